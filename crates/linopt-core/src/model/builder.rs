//! Builder methods for the model.

use super::Model;
use crate::entity::{Column, Row};
use crate::types::{Bounds, BoundsType, ColumnKind, Sense, VarStatus};

impl Model {
    /// Append `count` rows and return the number of the first new one.
    ///
    /// New rows are free and basic. With `count == 0` nothing is added and
    /// the return value is `num_rows() + 1`.
    pub fn add_rows(&mut self, count: usize) -> usize {
        let first = self.rows.len() + 1;
        self.rows.resize_with(self.rows.len() + count, Row::default);
        self.matrix.add_rows(count);
        tracing::trace!(
            component = "model",
            operation = "add_rows",
            status = "success",
            count = count as u64,
            first = first as u64,
            "Added rows"
        );
        first
    }

    /// Append `count` columns and return the number of the first new one.
    ///
    /// New columns are continuous, fixed at zero and non-basic.
    pub fn add_cols(&mut self, count: usize) -> usize {
        let first = self.columns.len() + 1;
        self.columns
            .resize_with(self.columns.len() + count, Column::default);
        self.matrix.add_cols(count);
        tracing::trace!(
            component = "model",
            operation = "add_cols",
            status = "success",
            count = count as u64,
            first = first as u64,
            "Added columns"
        );
        first
    }

    pub fn set_sense(&mut self, sense: Sense) {
        self.sense = sense;
    }

    /// Set the bounds of row `i` through [`Bounds::resolve`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `1..=num_rows`.
    #[track_caller]
    pub fn set_row_bounds(&mut self, i: usize, kind: BoundsType, lo: f64, hi: f64) {
        self.row_mut(i).set_bounds(Bounds::resolve(kind, lo, hi));
    }

    /// Set the bounds of column `j` through [`Bounds::resolve`].
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    #[track_caller]
    pub fn set_col_bounds(&mut self, j: usize, kind: BoundsType, lo: f64, hi: f64) {
        self.col_mut(j).set_bounds(Bounds::resolve(kind, lo, hi));
    }

    /// Set the integrality of column `j`.
    ///
    /// [`ColumnKind::Binary`] also resolves the bounds to double [0, 1].
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    #[track_caller]
    pub fn set_col_kind(&mut self, j: usize, kind: ColumnKind) {
        self.col_mut(j).set_kind(kind);
    }

    /// Set the objective coefficient of column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    #[track_caller]
    pub fn set_obj_coef(&mut self, j: usize, coef: f64) {
        self.col_mut(j).objective = coef;
    }

    /// Set the constant term of the objective.
    pub fn set_obj_constant(&mut self, value: f64) {
        self.objective_constant = value;
    }

    /// Set the basis status of row `i`, normalized against its bounds type.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in `1..=num_rows`.
    #[track_caller]
    pub fn set_row_stat(&mut self, i: usize, status: VarStatus) {
        let row = self.row_mut(i);
        row.status = status.normalize(row.bounds.kind());
    }

    /// Set the basis status of column `j`, normalized against its bounds type.
    ///
    /// # Panics
    ///
    /// Panics if `j` is not in `1..=num_cols`.
    #[track_caller]
    pub fn set_col_stat(&mut self, j: usize, status: VarStatus) {
        let col = self.col_mut(j);
        col.status = status.normalize(col.bounds.kind());
    }
}
