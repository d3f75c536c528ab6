//! Solution data produced by an engine and stored on a model.

use crate::types::{SolutionStatus, VarStatus};

/// Outcome of a continuous (simplex) solve.
///
/// Per-entity vectors are ordered by row or column position. Empty status
/// vectors leave the stored basis untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicSolution {
    pub status: SolutionStatus,
    pub primal_status: SolutionStatus,
    pub dual_status: SolutionStatus,
    pub objective: f64,
    pub row_primal: Vec<f64>,
    pub row_dual: Vec<f64>,
    pub col_primal: Vec<f64>,
    pub col_dual: Vec<f64>,
    pub row_status: Vec<VarStatus>,
    pub col_status: Vec<VarStatus>,
}

/// Outcome of an integer (branch-and-cut) solve.
///
/// Values missing from the vectors are stored as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MipSolution {
    pub status: SolutionStatus,
    pub objective: f64,
    pub row_values: Vec<f64>,
    pub col_values: Vec<f64>,
}
