//! Sparse vectors and the constraint matrix.
//!
//! Entity numbers are 1-based everywhere in the public API. Containers are
//! ordinary 0-based vectors; the shift happens only at this boundary.

use crate::model::{Axis, ModelError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A sparse vector of (1-based index, value) pairs.
///
/// Pairs carry set semantics: their order is not significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build a vector from parallel index and value sequences.
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Result<Self, ModelError> {
        if indices.len() != values.len() {
            return Err(ModelError::LengthMismatch {
                indices: indices.len(),
                values: values.len(),
            });
        }
        Ok(Self { indices, values })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value stored at `index`, if any.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.iter().find(|(i, _)| *i == index).map(|(_, v)| v)
    }

    /// Index-keyed view, convenient for order-independent comparison.
    pub fn to_map(&self) -> BTreeMap<usize, f64> {
        self.iter().collect()
    }
}

impl FromIterator<(usize, f64)> for SparseVector {
    fn from_iter<T: IntoIterator<Item = (usize, f64)>>(iter: T) -> Self {
        let (indices, values) = iter.into_iter().unzip();
        Self { indices, values }
    }
}

/// Constraint matrix addressable by row and by column.
///
/// Both views are kept in sync by every mutation. Zero values are never
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredMatrix", into = "StoredMatrix")]
pub struct SparseMatrix {
    // rows[r] holds (column position, value)
    rows: Vec<Vec<(usize, f64)>>,
    // cols[c] holds (row position, value)
    cols: Vec<Vec<(usize, f64)>>,
}

impl SparseMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Number of stored nonzero entries.
    pub fn num_nz(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn add_rows(&mut self, count: usize) {
        self.rows.resize_with(self.rows.len() + count, Vec::new);
    }

    pub fn add_cols(&mut self, count: usize) {
        self.cols.resize_with(self.cols.len() + count, Vec::new);
    }

    /// Drop every entry and every row and column.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.cols.clear();
    }

    /// Replace the content of row `i` with the given (column, value) pairs.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `1..=num_rows`.
    pub fn set_row(&mut self, i: usize, indices: &[usize], values: &[f64]) -> Result<(), ModelError> {
        let r = position(i, self.rows.len(), Axis::Row);
        check_vector(indices, values, self.cols.len(), Axis::Column)?;
        for (c, _) in std::mem::take(&mut self.rows[r]) {
            self.cols[c].retain(|&(row, _)| row != r);
        }
        for (&j, &value) in indices.iter().zip(values) {
            if value != 0.0 {
                self.rows[r].push((j - 1, value));
                self.cols[j - 1].push((r, value));
            }
        }
        Ok(())
    }

    /// Replace the content of column `j` with the given (row, value) pairs.
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    pub fn set_col(&mut self, j: usize, indices: &[usize], values: &[f64]) -> Result<(), ModelError> {
        let c = position(j, self.cols.len(), Axis::Column);
        check_vector(indices, values, self.rows.len(), Axis::Row)?;
        for (r, _) in std::mem::take(&mut self.cols[c]) {
            self.rows[r].retain(|&(col, _)| col != c);
        }
        for (&i, &value) in indices.iter().zip(values) {
            if value != 0.0 {
                self.cols[c].push((i - 1, value));
                self.rows[i - 1].push((c, value));
            }
        }
        Ok(())
    }

    /// Nonzero entries of row `i` over column numbers.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `1..=num_rows`.
    pub fn row(&self, i: usize) -> SparseVector {
        let r = position(i, self.rows.len(), Axis::Row);
        self.rows[r].iter().map(|&(c, v)| (c + 1, v)).collect()
    }

    /// Nonzero entries of column `j` over row numbers.
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    pub fn col(&self, j: usize) -> SparseVector {
        let c = position(j, self.cols.len(), Axis::Column);
        self.cols[c].iter().map(|&(r, v)| (r + 1, v)).collect()
    }

    /// Replace the whole matrix from (row, column, value) triplets.
    ///
    /// All prior entries are cleared first. Nothing changes when the
    /// triplets are rejected.
    pub fn load(&mut self, rows: &[usize], cols: &[usize], values: &[f64]) -> Result<(), ModelError> {
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(ModelError::TripletLengthMismatch {
                rows: rows.len(),
                columns: cols.len(),
                values: values.len(),
            });
        }
        let mut seen = HashSet::with_capacity(rows.len());
        for (&i, &j) in rows.iter().zip(cols) {
            check_range(i, self.rows.len(), Axis::Row)?;
            check_range(j, self.cols.len(), Axis::Column)?;
            if !seen.insert((i, j)) {
                return Err(ModelError::DuplicateEntry { row: i, column: j });
            }
        }

        self.rows.iter_mut().for_each(Vec::clear);
        self.cols.iter_mut().for_each(Vec::clear);
        for ((&i, &j), &value) in rows.iter().zip(cols).zip(values) {
            if value != 0.0 {
                self.rows[i - 1].push((j - 1, value));
                self.cols[j - 1].push((i - 1, value));
            }
        }
        Ok(())
    }

    /// All entries as 1-based (row, column, value) triplets, row by row.
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, entries)| entries.iter().map(move |&(c, v)| (r + 1, c + 1, v)))
    }

    /// Column `j` entries as 1-based (row, value) pairs without allocating.
    pub fn col_entries(&self, j: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let c = position(j, self.cols.len(), Axis::Column);
        self.cols[c].iter().map(|&(r, v)| (r + 1, v))
    }
}

fn position(index: usize, count: usize, axis: Axis) -> usize {
    if index == 0 || index > count {
        panic!(
            "{} index {} out of range (1..={})",
            axis.as_str(),
            index,
            count
        );
    }
    index - 1
}

fn check_range(index: usize, count: usize, axis: Axis) -> Result<(), ModelError> {
    if index == 0 || index > count {
        return Err(ModelError::IndexOutOfRange { axis, index, count });
    }
    Ok(())
}

fn check_vector(indices: &[usize], values: &[f64], count: usize, axis: Axis) -> Result<(), ModelError> {
    if indices.len() != values.len() {
        return Err(ModelError::LengthMismatch {
            indices: indices.len(),
            values: values.len(),
        });
    }
    let mut seen = HashSet::with_capacity(indices.len());
    for &index in indices {
        check_range(index, count, axis)?;
        if !seen.insert(index) {
            return Err(ModelError::DuplicateIndex { axis, index });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredMatrix {
    num_rows: usize,
    num_cols: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl From<SparseMatrix> for StoredMatrix {
    fn from(matrix: SparseMatrix) -> Self {
        Self {
            num_rows: matrix.num_rows(),
            num_cols: matrix.num_cols(),
            entries: matrix.triplets().collect(),
        }
    }
}

impl TryFrom<StoredMatrix> for SparseMatrix {
    type Error = ModelError;

    fn try_from(stored: StoredMatrix) -> Result<Self, Self::Error> {
        let mut matrix = SparseMatrix::new();
        matrix.add_rows(stored.num_rows);
        matrix.add_cols(stored.num_cols);
        let mut rows = Vec::with_capacity(stored.entries.len());
        let mut cols = Vec::with_capacity(stored.entries.len());
        let mut values = Vec::with_capacity(stored.entries.len());
        for (i, j, v) in stored.entries {
            rows.push(i);
            cols.push(j);
            values.push(v);
        }
        matrix.load(&rows, &cols, &values)?;
        Ok(matrix)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize) -> SparseMatrix {
        let mut m = SparseMatrix::new();
        m.add_rows(rows);
        m.add_cols(cols);
        m
    }

    #[test]
    fn test_vector_length_mismatch() {
        let err = SparseVector::new(vec![1, 2], vec![1.0]).unwrap_err();
        assert_eq!(err.code(), "SPARSE_LENGTH_MISMATCH");
    }

    #[test]
    fn test_set_row_updates_column_view() {
        let mut m = matrix(2, 3);
        m.set_row(1, &[3, 1], &[2.0, 4.0]).unwrap();
        assert_eq!(m.col(3).to_map(), BTreeMap::from([(1, 2.0)]));
        assert_eq!(m.col(1).to_map(), BTreeMap::from([(1, 4.0)]));
        assert!(m.col(2).is_empty());

        m.set_row(1, &[2], &[5.0]).unwrap();
        assert!(m.col(3).is_empty());
        assert_eq!(m.col(2).get(1), Some(5.0));
        assert_eq!(m.num_nz(), 1);
    }

    #[test]
    fn test_set_col_updates_row_view() {
        let mut m = matrix(3, 2);
        m.set_col(2, &[1, 3], &[1.5, -2.0]).unwrap();
        assert_eq!(m.row(3).get(2), Some(-2.0));
        m.set_col(2, &[], &[]).unwrap();
        assert!(m.row(1).is_empty());
        assert_eq!(m.num_nz(), 0);
    }

    #[test]
    fn test_zero_values_not_stored() {
        let mut m = matrix(1, 3);
        m.set_row(1, &[1, 2, 3], &[1.0, 0.0, 3.0]).unwrap();
        assert_eq!(m.row(1).len(), 2);
        assert_eq!(m.row(1).get(2), None);
    }

    #[test]
    fn test_rejected_vector_leaves_matrix_untouched() {
        let mut m = matrix(2, 2);
        m.set_row(1, &[1], &[1.0]).unwrap();

        let err = m.set_row(1, &[1, 3], &[1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            ModelError::IndexOutOfRange {
                axis: Axis::Column,
                index: 3,
                count: 2
            }
        );
        let err = m.set_row(1, &[2, 2], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.code(), "SPARSE_DUPLICATE_INDEX");
        let err = m.set_col(1, &[1, 2], &[1.0]).unwrap_err();
        assert_eq!(err.code(), "SPARSE_LENGTH_MISMATCH");

        assert_eq!(m.row(1).to_map(), BTreeMap::from([(1, 1.0)]));
    }

    #[test]
    fn test_load_clears_previous_content() {
        let mut m = matrix(2, 2);
        m.set_row(2, &[1, 2], &[7.0, 8.0]).unwrap();
        m.load(&[1, 1], &[1, 2], &[3.0, 4.0]).unwrap();
        assert!(m.row(2).is_empty());
        assert_eq!(m.row(1).to_map(), BTreeMap::from([(1, 3.0), (2, 4.0)]));
        assert_eq!(m.col(2).to_map(), BTreeMap::from([(1, 4.0)]));
    }

    #[test]
    fn test_load_rejects_bad_triplets() {
        let mut m = matrix(2, 2);
        m.set_row(1, &[1], &[1.0]).unwrap();
        assert_eq!(
            m.load(&[1], &[1, 2], &[1.0]).unwrap_err().code(),
            "TRIPLET_LENGTH_MISMATCH"
        );
        assert_eq!(
            m.load(&[1, 1], &[2, 2], &[1.0, 2.0]).unwrap_err(),
            ModelError::DuplicateEntry { row: 1, column: 2 }
        );
        assert_eq!(
            m.load(&[3], &[1], &[1.0]).unwrap_err().code(),
            "INDEX_OUT_OF_RANGE"
        );
        assert_eq!(m.num_nz(), 1);
    }

    #[test]
    #[should_panic(expected = "row index 3 out of range")]
    fn test_row_index_out_of_range_panics() {
        let m = matrix(2, 2);
        let _ = m.row(3);
    }

    #[test]
    fn test_serde_preserves_shape_and_entries() {
        let mut m = matrix(3, 2);
        m.set_col(1, &[1, 3], &[1.0, 0.25]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: SparseMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back.num_rows(), 3);
        assert_eq!(back.num_cols(), 2);
        assert_eq!(back.col(1).to_map(), m.col(1).to_map());
    }

    #[test]
    fn test_serde_rejects_out_of_range_entry() {
        let json = r#"{"num_rows":1,"num_cols":1,"entries":[[1,2,1.0]]}"#;
        assert!(serde_json::from_str::<SparseMatrix>(json).is_err());
    }
}
