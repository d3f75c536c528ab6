//! Model error types.

/// Axis of the constraint matrix an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

/// Invalid arguments rejected before any state is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Sparse vector index and value sequences differ in length
    LengthMismatch { indices: usize, values: usize },
    /// Triplet sequences differ in length
    TripletLengthMismatch {
        rows: usize,
        columns: usize,
        values: usize,
    },
    /// Index outside 1..=count
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        count: usize,
    },
    /// Index repeated within one sparse vector
    DuplicateIndex { axis: Axis, index: usize },
    /// (row, column) pair repeated within one triplet load
    DuplicateEntry { row: usize, column: usize },
    /// Stored state whose parts disagree, e.g. a decoded model
    Inconsistent { reason: String },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::LengthMismatch { .. } => "SPARSE_LENGTH_MISMATCH",
            ModelError::TripletLengthMismatch { .. } => "TRIPLET_LENGTH_MISMATCH",
            ModelError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            ModelError::DuplicateIndex { .. } => "SPARSE_DUPLICATE_INDEX",
            ModelError::DuplicateEntry { .. } => "TRIPLET_DUPLICATE_ENTRY",
            ModelError::Inconsistent { .. } => "MODEL_INCONSISTENT",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::LengthMismatch { indices, values } => write!(
                f,
                "[{}] Index length ({}) must match value length ({})",
                self.code(),
                indices,
                values
            ),
            ModelError::TripletLengthMismatch {
                rows,
                columns,
                values,
            } => write!(
                f,
                "[{}] Triplet lengths differ: rows {}, columns {}, values {}",
                self.code(),
                rows,
                columns,
                values
            ),
            ModelError::IndexOutOfRange { axis, index, count } => write!(
                f,
                "[{}] {} index {} out of range (1..={})",
                self.code(),
                axis.as_str(),
                index,
                count
            ),
            ModelError::DuplicateIndex { axis, index } => write!(
                f,
                "[{}] {} index {} appears more than once",
                self.code(),
                axis.as_str(),
                index
            ),
            ModelError::DuplicateEntry { row, column } => write!(
                f,
                "[{}] Matrix entry ({}, {}) appears more than once",
                self.code(),
                row,
                column
            ),
            ModelError::Inconsistent { reason } => {
                write!(f, "[{}] Model state inconsistent: {}", self.code(), reason)
            }
        }
    }
}

impl std::error::Error for ModelError {}
