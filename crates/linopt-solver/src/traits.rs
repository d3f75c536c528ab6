//! Engine capability trait for abstraction over solving backends.

use crate::config::{CpxParams, IntoptParams, MpsFormat, MpsParams, SimplexParams};
use crate::error::SolveError;
use linopt_core::{BasicSolution, MipSolution, Model};
use std::path::Path;

/// Which solver to run, with its parameters.
#[derive(Debug, Clone)]
pub enum SolveRequest {
    Simplex(SimplexParams),
    /// Simplex with refinement of the final basis.
    Exact(SimplexParams),
    Intopt(IntoptParams),
}

impl SolveRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            SolveRequest::Simplex(_) => "simplex",
            SolveRequest::Exact(_) => "exact",
            SolveRequest::Intopt(_) => "intopt",
        }
    }
}

/// Which text codec to run, with its parameters.
#[derive(Debug, Clone)]
pub enum FormatRequest {
    Mps(MpsFormat, MpsParams),
    CplexLp(CpxParams),
}

impl FormatRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            FormatRequest::Mps(MpsFormat::Fixed, _) => "mps_fixed",
            FormatRequest::Mps(MpsFormat::Free, _) => "mps_free",
            FormatRequest::CplexLp(_) => "cplex_lp",
        }
    }
}

/// What an engine hands back from a solve.
///
/// `code` is 0 when the engine reached a defined stopping state, otherwise
/// the return code of a [`SolveError`]. Solution data may accompany a
/// non-zero code, e.g. the last iterate when a limit was hit.
#[derive(Debug, Clone, Default)]
pub struct EngineReport {
    pub code: i32,
    pub basic: Option<BasicSolution>,
    pub mip: Option<MipSolution>,
}

impl EngineReport {
    pub fn basic(code: i32, solution: BasicSolution) -> Self {
        Self {
            code,
            basic: Some(solution),
            mip: None,
        }
    }

    pub fn mip(code: i32, solution: MipSolution) -> Self {
        Self {
            code,
            basic: None,
            mip: Some(solution),
        }
    }

    /// A report carrying only a failure.
    pub fn failed(error: SolveError) -> Self {
        Self {
            code: error.return_code(),
            ..Self::default()
        }
    }

    /// Translate the return code. Unknown non-zero codes count as a failure.
    pub fn error(&self) -> Option<SolveError> {
        if self.code == 0 {
            return None;
        }
        Some(SolveError::from_return_code(self.code).unwrap_or(SolveError::SolverFailure))
    }
}

/// Capabilities a solving backend offers to a problem.
///
/// One engine value owns one native handle. The problem hands it a read-only
/// view of the model for every call, so the engine never needs to mirror
/// incremental edits.
pub trait Engine: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Create an independent engine of the same kind with a fresh handle.
    fn spawn(&self) -> Box<dyn Engine>;

    /// Drop any engine-side model state. The handle itself stays alive.
    fn reset(&mut self);

    /// Run a solver on `model`.
    fn solve(&mut self, model: &Model, request: &SolveRequest) -> EngineReport;

    /// Parse a problem file into a new model.
    ///
    /// # Errors
    ///
    /// Returns a short diagnostic when the file cannot be read or parsed.
    fn read(&mut self, request: &FormatRequest, path: &Path) -> Result<Model, String>;

    /// Write `model` to a problem file.
    ///
    /// # Errors
    ///
    /// Returns a short diagnostic when the file cannot be written.
    fn write(&mut self, model: &Model, request: &FormatRequest, path: &Path) -> Result<(), String>;
}
