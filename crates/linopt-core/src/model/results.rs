//! Storing and reading solve results.
//!
//! The basic (simplex) and integer tracks are independent: applying one
//! never touches the other.

use super::{BasicState, Model, MipState};
use crate::solution::{BasicSolution, MipSolution};
use crate::types::SolutionStatus;

impl Model {
    /// Store the outcome of a continuous solve.
    pub fn apply_basic(&mut self, solution: &BasicSolution) {
        self.basic = BasicState {
            status: solution.status,
            primal_status: solution.primal_status,
            dual_status: solution.dual_status,
            objective: solution.objective,
        };
        for (row, (&primal, &dual)) in self
            .rows
            .iter_mut()
            .zip(solution.row_primal.iter().zip(&solution.row_dual))
        {
            row.primal = primal;
            row.dual = dual;
        }
        for (col, (&primal, &dual)) in self
            .columns
            .iter_mut()
            .zip(solution.col_primal.iter().zip(&solution.col_dual))
        {
            col.primal = primal;
            col.dual = dual;
        }
        for (row, &status) in self.rows.iter_mut().zip(&solution.row_status) {
            row.status = status;
        }
        for (col, &status) in self.columns.iter_mut().zip(&solution.col_status) {
            col.status = status;
        }
    }

    /// Store the outcome of an integer solve.
    ///
    /// Every row and column value is replaced; entries the solution does not
    /// carry, as after a failed solve, become zero.
    pub fn apply_mip(&mut self, solution: &MipSolution) {
        self.mip = MipState {
            status: solution.status,
            objective: solution.objective,
        };
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.mip_value = solution.row_values.get(i).copied().unwrap_or(0.0);
        }
        for (j, col) in self.columns.iter_mut().enumerate() {
            col.mip_value = solution.col_values.get(j).copied().unwrap_or(0.0);
        }
    }

    /// Status of the basic solution.
    pub fn status(&self) -> SolutionStatus {
        self.basic.status
    }

    pub fn prim_stat(&self) -> SolutionStatus {
        self.basic.primal_status
    }

    pub fn dual_stat(&self) -> SolutionStatus {
        self.basic.dual_status
    }

    pub fn obj_val(&self) -> f64 {
        self.basic.objective
    }

    #[track_caller]
    pub fn row_prim(&self, i: usize) -> f64 {
        self.row_ref(i).primal
    }

    #[track_caller]
    pub fn row_dual(&self, i: usize) -> f64 {
        self.row_ref(i).dual
    }

    #[track_caller]
    pub fn col_prim(&self, j: usize) -> f64 {
        self.col_ref(j).primal
    }

    #[track_caller]
    pub fn col_dual(&self, j: usize) -> f64 {
        self.col_ref(j).dual
    }

    /// Status of the integer solution.
    pub fn mip_status(&self) -> SolutionStatus {
        self.mip.status
    }

    pub fn mip_obj_val(&self) -> f64 {
        self.mip.objective
    }

    #[track_caller]
    pub fn mip_row_val(&self, i: usize) -> f64 {
        self.row_ref(i).mip_value
    }

    #[track_caller]
    pub fn mip_col_val(&self, j: usize) -> f64 {
        self.col_ref(j).mip_value
    }
}
