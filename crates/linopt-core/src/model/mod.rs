//! Model module for LP/MIP problem data.
//!
//! This module provides the [`Model`] aggregate: names, objective, rows,
//! columns, the constraint matrix and the stored solution state.
//!
//! # Module Organization
//!
//! - [`error`]: Argument error types
//! - [`builder`]: Adding rows and columns, bounds, kinds, objective, basis
//! - [`storage`]: Counts, readers and constraint matrix access
//! - [`metadata`]: Problem, objective, row and column names
//! - [`results`]: Storing and reading solve results

mod builder;
mod error;
mod metadata;
mod results;
mod storage;

use crate::entity::{Column, Row};
use crate::sparse::SparseMatrix;
use crate::types::{Sense, SolutionStatus};
use serde::{Deserialize, Serialize};

pub use error::{Axis, ModelError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct BasicState {
    pub(crate) status: SolutionStatus,
    pub(crate) primal_status: SolutionStatus,
    pub(crate) dual_status: SolutionStatus,
    pub(crate) objective: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct MipState {
    pub(crate) status: SolutionStatus,
    pub(crate) objective: f64,
}

/// In-memory LP/MIP problem.
///
/// Rows and columns are numbered densely from 1 and only ever grow. A fresh
/// model has no rows, no columns, empty names and minimizes.
///
/// Methods taking a single row or column number panic when the number is
/// outside `1..=num_rows` / `1..=num_cols`, like slice indexing. Sparse content
/// is validated and rejected with [`ModelError`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub(crate) name: String,
    pub(crate) objective_name: String,
    pub(crate) sense: Sense,
    pub(crate) objective_constant: f64,
    pub(crate) rows: Vec<Row>,
    pub(crate) columns: Vec<Column>,
    pub(crate) matrix: SparseMatrix,
    pub(crate) basic: BasicState,
    pub(crate) mip: MipState,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep copy of the structure with fresh solution state.
    ///
    /// Problem, objective, row and column names are carried over only when
    /// `with_names` is set.
    pub fn copy(&self, with_names: bool) -> Self {
        let mut copy = Self {
            name: String::new(),
            objective_name: String::new(),
            sense: self.sense,
            objective_constant: self.objective_constant,
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            matrix: self.matrix.clone(),
            basic: BasicState::default(),
            mip: MipState::default(),
        };
        if with_names {
            copy.name.clone_from(&self.name);
            copy.objective_name.clone_from(&self.objective_name);
        } else {
            copy.rows.iter_mut().for_each(|row| row.name.clear());
            copy.columns.iter_mut().for_each(|col| col.name.clear());
        }
        copy.rows.iter_mut().for_each(Row::clear_solution);
        copy.columns.iter_mut().for_each(Column::clear_solution);

        tracing::debug!(
            component = "model",
            operation = "copy",
            status = "success",
            rows = copy.rows.len() as u64,
            columns = copy.columns.len() as u64,
            with_names,
            "Copied model"
        );
        copy
    }

    /// Check that the matrix shape agrees with the row and column sets.
    ///
    /// Models built through the API always pass; decoded ones may not.
    pub fn check_consistency(&self) -> Result<(), ModelError> {
        if self.matrix.num_rows() != self.rows.len() || self.matrix.num_cols() != self.columns.len() {
            return Err(ModelError::Inconsistent {
                reason: format!(
                    "matrix is {}x{} but model has {} rows and {} columns",
                    self.matrix.num_rows(),
                    self.matrix.num_cols(),
                    self.rows.len(),
                    self.columns.len()
                ),
            });
        }
        Ok(())
    }

    #[track_caller]
    pub(crate) fn row_ref(&self, i: usize) -> &Row {
        let count = self.rows.len();
        match i.checked_sub(1).and_then(|r| self.rows.get(r)) {
            Some(row) => row,
            None => panic!("row index {} out of range (1..={})", i, count),
        }
    }

    #[track_caller]
    pub(crate) fn row_mut(&mut self, i: usize) -> &mut Row {
        let count = self.rows.len();
        match i.checked_sub(1).and_then(|r| self.rows.get_mut(r)) {
            Some(row) => row,
            None => panic!("row index {} out of range (1..={})", i, count),
        }
    }

    #[track_caller]
    pub(crate) fn col_ref(&self, j: usize) -> &Column {
        let count = self.columns.len();
        match j.checked_sub(1).and_then(|c| self.columns.get(c)) {
            Some(col) => col,
            None => panic!("column index {} out of range (1..={})", j, count),
        }
    }

    #[track_caller]
    pub(crate) fn col_mut(&mut self, j: usize) -> &mut Column {
        let count = self.columns.len();
        match j.checked_sub(1).and_then(|c| self.columns.get_mut(c)) {
            Some(col) => col,
            None => panic!("column index {} out of range (1..={})", j, count),
        }
    }
}
