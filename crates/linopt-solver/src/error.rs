//! Solve and format I/O error types.

use std::path::PathBuf;

/// Conditions a solve could not resolve.
///
/// None of these is retried automatically; relaxing a limit and solving
/// again is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    InvalidBasis,
    SingularMatrix,
    IllConditionedMatrix,
    InvalidBounds,
    SolverFailure,
    ObjectiveLowerLimitReached,
    ObjectiveUpperLimitReached,
    IterationLimitExceeded,
    TimeLimitExceeded,
    NoPrimalFeasible,
    NoDualFeasible,
    RootLpNotProvided,
    ApplicationStop,
    MipGapReached,
    NoPrimalOrDualFeasible,
    NoConvergence,
    NumericalInstability,
    InvalidData,
    ResultOutOfRange,
}

const ALL: [SolveError; 19] = [
    SolveError::InvalidBasis,
    SolveError::SingularMatrix,
    SolveError::IllConditionedMatrix,
    SolveError::InvalidBounds,
    SolveError::SolverFailure,
    SolveError::ObjectiveLowerLimitReached,
    SolveError::ObjectiveUpperLimitReached,
    SolveError::IterationLimitExceeded,
    SolveError::TimeLimitExceeded,
    SolveError::NoPrimalFeasible,
    SolveError::NoDualFeasible,
    SolveError::RootLpNotProvided,
    SolveError::ApplicationStop,
    SolveError::MipGapReached,
    SolveError::NoPrimalOrDualFeasible,
    SolveError::NoConvergence,
    SolveError::NumericalInstability,
    SolveError::InvalidData,
    SolveError::ResultOutOfRange,
];

impl SolveError {
    /// Every variant, ordered by return code.
    pub fn all() -> &'static [SolveError] {
        &ALL
    }

    /// Engine return code for this condition, in `1..=19`.
    pub fn return_code(self) -> i32 {
        match self {
            SolveError::InvalidBasis => 0x01,
            SolveError::SingularMatrix => 0x02,
            SolveError::IllConditionedMatrix => 0x03,
            SolveError::InvalidBounds => 0x04,
            SolveError::SolverFailure => 0x05,
            SolveError::ObjectiveLowerLimitReached => 0x06,
            SolveError::ObjectiveUpperLimitReached => 0x07,
            SolveError::IterationLimitExceeded => 0x08,
            SolveError::TimeLimitExceeded => 0x09,
            SolveError::NoPrimalFeasible => 0x0A,
            SolveError::NoDualFeasible => 0x0B,
            SolveError::RootLpNotProvided => 0x0C,
            SolveError::ApplicationStop => 0x0D,
            SolveError::MipGapReached => 0x0E,
            SolveError::NoPrimalOrDualFeasible => 0x0F,
            SolveError::NoConvergence => 0x10,
            SolveError::NumericalInstability => 0x11,
            SolveError::InvalidData => 0x12,
            SolveError::ResultOutOfRange => 0x13,
        }
    }

    /// Map an engine return code back to its condition.
    ///
    /// Returns `None` for 0 (success) and for codes outside the taxonomy.
    pub fn from_return_code(code: i32) -> Option<SolveError> {
        ALL.iter().copied().find(|err| err.return_code() == code)
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(self) -> &'static str {
        match self {
            SolveError::InvalidBasis => "SOLVE_INVALID_BASIS",
            SolveError::SingularMatrix => "SOLVE_SINGULAR_MATRIX",
            SolveError::IllConditionedMatrix => "SOLVE_ILL_CONDITIONED",
            SolveError::InvalidBounds => "SOLVE_INVALID_BOUNDS",
            SolveError::SolverFailure => "SOLVE_FAILURE",
            SolveError::ObjectiveLowerLimitReached => "SOLVE_OBJ_LOWER_LIMIT",
            SolveError::ObjectiveUpperLimitReached => "SOLVE_OBJ_UPPER_LIMIT",
            SolveError::IterationLimitExceeded => "SOLVE_ITERATION_LIMIT",
            SolveError::TimeLimitExceeded => "SOLVE_TIME_LIMIT",
            SolveError::NoPrimalFeasible => "SOLVE_NO_PRIMAL_FEASIBLE",
            SolveError::NoDualFeasible => "SOLVE_NO_DUAL_FEASIBLE",
            SolveError::RootLpNotProvided => "SOLVE_ROOT_LP_MISSING",
            SolveError::ApplicationStop => "SOLVE_STOPPED",
            SolveError::MipGapReached => "SOLVE_MIP_GAP",
            SolveError::NoPrimalOrDualFeasible => "SOLVE_NO_FEASIBLE",
            SolveError::NoConvergence => "SOLVE_NO_CONVERGENCE",
            SolveError::NumericalInstability => "SOLVE_NUMERICAL_INSTABILITY",
            SolveError::InvalidData => "SOLVE_INVALID_DATA",
            SolveError::ResultOutOfRange => "SOLVE_RESULT_OUT_OF_RANGE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SolveError::InvalidBasis => "invalid basis",
            SolveError::SingularMatrix => "singular matrix",
            SolveError::IllConditionedMatrix => "ill-conditioned matrix",
            SolveError::InvalidBounds => "invalid bounds",
            SolveError::SolverFailure => "solver failed",
            SolveError::ObjectiveLowerLimitReached => "objective lower limit reached",
            SolveError::ObjectiveUpperLimitReached => "objective upper limit reached",
            SolveError::IterationLimitExceeded => "iteration limit exceeded",
            SolveError::TimeLimitExceeded => "time limit exceeded",
            SolveError::NoPrimalFeasible => "no primal feasible solution",
            SolveError::NoDualFeasible => "no dual feasible solution",
            SolveError::RootLpNotProvided => "root LP optimum not provided",
            SolveError::ApplicationStop => "search terminated by application",
            SolveError::MipGapReached => "relative mip gap tolerance reached",
            SolveError::NoPrimalOrDualFeasible => "no primal/dual feasible solution",
            SolveError::NoConvergence => "no convergence",
            SolveError::NumericalInstability => "numerical instability",
            SolveError::InvalidData => "invalid data",
            SolveError::ResultOutOfRange => "result out of range",
        }
    }

    /// Whether the engine stopped on a limit rather than a failure.
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            SolveError::IterationLimitExceeded
                | SolveError::TimeLimitExceeded
                | SolveError::ObjectiveLowerLimitReached
                | SolveError::ObjectiveUpperLimitReached
                | SolveError::MipGapReached
        )
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.description())
    }
}

impl std::error::Error for SolveError {}

/// Direction of a failed format operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
}

impl IoOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            IoOperation::Read => "read",
            IoOperation::Write => "write",
        }
    }
}

/// A failed read or write of a problem file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoError {
    pub operation: IoOperation,
    pub path: PathBuf,
    pub message: String,
}

impl IoError {
    pub fn read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            operation: IoOperation::Read,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            operation: IoOperation::Write,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self.operation {
            IoOperation::Read => "IO_READ_FAILED",
            IoOperation::Write => "IO_WRITE_FAILED",
        }
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.operation.as_str(),
            self.path.display(),
            self.message
        )
    }
}

impl std::error::Error for IoError {}
