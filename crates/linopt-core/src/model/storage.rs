//! Storage access methods for the model.

use super::Model;
use super::error::ModelError;
use crate::entity::{Column, Row};
use crate::sparse::{SparseMatrix, SparseVector};
use crate::types::{BoundsType, ColumnKind, Sense, VarStatus};

impl Model {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.columns.len()
    }

    /// Number of nonzero constraint coefficients.
    pub fn num_nz(&self) -> usize {
        self.matrix.num_nz()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn obj_constant(&self) -> f64 {
        self.objective_constant
    }

    #[track_caller]
    pub fn obj_coef(&self, j: usize) -> f64 {
        self.col_ref(j).objective
    }

    #[track_caller]
    pub fn row_type(&self, i: usize) -> BoundsType {
        self.row_ref(i).bounds.kind()
    }

    #[track_caller]
    pub fn row_lb(&self, i: usize) -> f64 {
        self.row_ref(i).bounds.lower()
    }

    #[track_caller]
    pub fn row_ub(&self, i: usize) -> f64 {
        self.row_ref(i).bounds.upper()
    }

    #[track_caller]
    pub fn col_type(&self, j: usize) -> BoundsType {
        self.col_ref(j).bounds.kind()
    }

    #[track_caller]
    pub fn col_lb(&self, j: usize) -> f64 {
        self.col_ref(j).bounds.lower()
    }

    #[track_caller]
    pub fn col_ub(&self, j: usize) -> f64 {
        self.col_ref(j).bounds.upper()
    }

    #[track_caller]
    pub fn col_kind(&self, j: usize) -> ColumnKind {
        self.col_ref(j).kind()
    }

    #[track_caller]
    pub fn row_stat(&self, i: usize) -> VarStatus {
        self.row_ref(i).status
    }

    #[track_caller]
    pub fn col_stat(&self, j: usize) -> VarStatus {
        self.col_ref(j).status
    }

    /// True when at least one column is integer.
    pub fn has_integer_columns(&self) -> bool {
        self.columns.iter().any(Column::is_integer)
    }

    /// Replace row `i` of the constraint matrix.
    ///
    /// Fails on a length mismatch, a column number outside `1..=num_cols`, or
    /// a repeated column number; the row is then left unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `1..=num_rows`.
    #[track_caller]
    pub fn set_mat_row(&mut self, i: usize, indices: &[usize], values: &[f64]) -> Result<(), ModelError> {
        self.row_ref(i);
        self.matrix.set_row(i, indices, values)
    }

    /// Replace column `j` of the constraint matrix.
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    #[track_caller]
    pub fn set_mat_col(&mut self, j: usize, indices: &[usize], values: &[f64]) -> Result<(), ModelError> {
        self.col_ref(j);
        self.matrix.set_col(j, indices, values)
    }

    /// Nonzero entries of row `i`, over column numbers.
    #[track_caller]
    pub fn mat_row(&self, i: usize) -> SparseVector {
        self.row_ref(i);
        self.matrix.row(i)
    }

    /// Nonzero entries of column `j`, over row numbers.
    #[track_caller]
    pub fn mat_col(&self, j: usize) -> SparseVector {
        self.col_ref(j);
        self.matrix.col(j)
    }

    /// Replace the whole constraint matrix from (row, column, value) triplets.
    pub fn load_matrix(&mut self, rows: &[usize], cols: &[usize], values: &[f64]) -> Result<(), ModelError> {
        self.matrix.load(rows, cols, values)?;
        tracing::debug!(
            component = "model",
            operation = "load_matrix",
            status = "success",
            nnz = self.matrix.num_nz() as u64,
            "Loaded constraint matrix"
        );
        Ok(())
    }
}
