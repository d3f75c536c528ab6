//! Translation of HiGHS statuses into the linopt taxonomy.

use highs_sys::HighsInt;
use linopt_core::{BoundsType, Sense, SolutionStatus, VarStatus};
use linopt_solver::SolveError;

pub(crate) const MODEL_STATUS_NOTSET: HighsInt = 0;
pub(crate) const MODEL_STATUS_LOAD_ERROR: HighsInt = 1;
pub(crate) const MODEL_STATUS_MODEL_ERROR: HighsInt = 2;
pub(crate) const MODEL_STATUS_PRESOLVE_ERROR: HighsInt = 3;
pub(crate) const MODEL_STATUS_SOLVE_ERROR: HighsInt = 4;
pub(crate) const MODEL_STATUS_POSTSOLVE_ERROR: HighsInt = 5;
pub(crate) const MODEL_STATUS_MODEL_EMPTY: HighsInt = 6;
pub(crate) const MODEL_STATUS_OPTIMAL: HighsInt = 7;
pub(crate) const MODEL_STATUS_INFEASIBLE: HighsInt = 8;
pub(crate) const MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE: HighsInt = 9;
pub(crate) const MODEL_STATUS_UNBOUNDED: HighsInt = 10;
pub(crate) const MODEL_STATUS_OBJECTIVE_BOUND: HighsInt = 11;
pub(crate) const MODEL_STATUS_OBJECTIVE_TARGET: HighsInt = 12;
pub(crate) const MODEL_STATUS_TIME_LIMIT: HighsInt = 13;
pub(crate) const MODEL_STATUS_ITERATION_LIMIT: HighsInt = 14;
pub(crate) const MODEL_STATUS_UNKNOWN: HighsInt = 15;
pub(crate) const MODEL_STATUS_SOLUTION_LIMIT: HighsInt = 16;
pub(crate) const MODEL_STATUS_INTERRUPT: HighsInt = 17;

const SOLUTION_STATUS_INFEASIBLE: HighsInt = 1;
const SOLUTION_STATUS_FEASIBLE: HighsInt = 2;

const BASIS_STATUS_LOWER: HighsInt = 0;
const BASIS_STATUS_BASIC: HighsInt = 1;
const BASIS_STATUS_UPPER: HighsInt = 2;

/// Where a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// A defined stopping state with the status to store.
    Reached(SolutionStatus),
    /// A condition the engine could not resolve.
    Failed(SolveError),
}

/// Objective bound/target stops, oriented by the optimization sense.
///
/// HiGHS' objective bound cuts the search off from the worse side: above for
/// minimization, below for maximization. The target is the opposite side.
fn objective_limit(model_status: HighsInt, sense: Sense) -> SolveError {
    let bound = model_status == MODEL_STATUS_OBJECTIVE_BOUND;
    match (bound, sense) {
        (true, Sense::Minimize) | (false, Sense::Maximize) => SolveError::ObjectiveUpperLimitReached,
        (true, Sense::Maximize) | (false, Sense::Minimize) => SolveError::ObjectiveLowerLimitReached,
    }
}

fn common_failure(model_status: HighsInt, sense: Sense) -> SolveError {
    match model_status {
        MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE => SolveError::NoPrimalOrDualFeasible,
        MODEL_STATUS_OBJECTIVE_BOUND | MODEL_STATUS_OBJECTIVE_TARGET => {
            objective_limit(model_status, sense)
        }
        MODEL_STATUS_TIME_LIMIT => SolveError::TimeLimitExceeded,
        MODEL_STATUS_ITERATION_LIMIT => SolveError::IterationLimitExceeded,
        MODEL_STATUS_INTERRUPT | MODEL_STATUS_SOLUTION_LIMIT => SolveError::ApplicationStop,
        MODEL_STATUS_LOAD_ERROR | MODEL_STATUS_MODEL_ERROR => SolveError::InvalidData,
        MODEL_STATUS_POSTSOLVE_ERROR => SolveError::NumericalInstability,
        _ => SolveError::SolverFailure,
    }
}

/// Outcome of a continuous solve.
///
/// Infeasible and unbounded are defined stopping states for the simplex.
pub(crate) fn lp_outcome(model_status: HighsInt, sense: Sense) -> Outcome {
    match model_status {
        MODEL_STATUS_OPTIMAL => Outcome::Reached(SolutionStatus::Optimal),
        MODEL_STATUS_INFEASIBLE => Outcome::Reached(SolutionStatus::NoFeasible),
        MODEL_STATUS_UNBOUNDED => Outcome::Reached(SolutionStatus::Unbounded),
        other => Outcome::Failed(common_failure(other, sense)),
    }
}

/// Outcome of an integer solve.
///
/// Not finding an integer-feasible solution is always a failure.
pub(crate) fn mip_outcome(model_status: HighsInt, sense: Sense) -> Outcome {
    match model_status {
        MODEL_STATUS_OPTIMAL => Outcome::Reached(SolutionStatus::Optimal),
        MODEL_STATUS_INFEASIBLE => Outcome::Failed(SolveError::NoPrimalFeasible),
        MODEL_STATUS_UNBOUNDED => Outcome::Failed(SolveError::NoDualFeasible),
        other => Outcome::Failed(common_failure(other, sense)),
    }
}

/// Map a `primal_solution_status` / `dual_solution_status` info value.
pub(crate) fn solution_status(value: Option<HighsInt>) -> SolutionStatus {
    match value {
        Some(SOLUTION_STATUS_FEASIBLE) => SolutionStatus::Feasible,
        Some(SOLUTION_STATUS_INFEASIBLE) => SolutionStatus::Infeasible,
        _ => SolutionStatus::Undefined,
    }
}

/// Map a HiGHS basis status onto the bounds-aware basis status.
pub(crate) fn basis_status(value: HighsInt, kind: BoundsType) -> VarStatus {
    let status = match value {
        BASIS_STATUS_BASIC => VarStatus::Basic,
        BASIS_STATUS_LOWER => VarStatus::NonBasicLower,
        BASIS_STATUS_UPPER => VarStatus::NonBasicUpper,
        _ => VarStatus::NonBasicFree,
    };
    status.normalize(kind)
}

pub(crate) fn model_status_str(model_status: HighsInt) -> &'static str {
    match model_status {
        MODEL_STATUS_NOTSET => "not_set",
        MODEL_STATUS_LOAD_ERROR => "load_error",
        MODEL_STATUS_MODEL_ERROR => "model_error",
        MODEL_STATUS_PRESOLVE_ERROR => "presolve_error",
        MODEL_STATUS_SOLVE_ERROR => "solve_error",
        MODEL_STATUS_POSTSOLVE_ERROR => "postsolve_error",
        MODEL_STATUS_MODEL_EMPTY => "model_empty",
        MODEL_STATUS_OPTIMAL => "optimal",
        MODEL_STATUS_INFEASIBLE => "infeasible",
        MODEL_STATUS_UNBOUNDED_OR_INFEASIBLE => "unbounded_or_infeasible",
        MODEL_STATUS_UNBOUNDED => "unbounded",
        MODEL_STATUS_OBJECTIVE_BOUND => "objective_bound",
        MODEL_STATUS_OBJECTIVE_TARGET => "objective_target",
        MODEL_STATUS_TIME_LIMIT => "time_limit",
        MODEL_STATUS_ITERATION_LIMIT => "iteration_limit",
        MODEL_STATUS_UNKNOWN => "unknown",
        MODEL_STATUS_SOLUTION_LIMIT => "solution_limit",
        MODEL_STATUS_INTERRUPT => "interrupt",
        _ => "unrecognized",
    }
}
