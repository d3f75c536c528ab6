//! HiGHS implementation of the [`Engine`] trait.

use crate::convert::{col_names_for_write, from_lp, row_names_for_write, to_lp};
use crate::ffi::{HighsError, HighsHandle, STATUS_OK};
use crate::mps;
use crate::status::{Outcome, basis_status, lp_outcome, mip_outcome, model_status_str, solution_status};
use highs_sys::HighsInt;
use linopt_core::{BasicSolution, MipSolution, Model, Sense, SolutionStatus, VarStatus};
use linopt_solver::{
    Engine, EngineReport, FormatRequest, IntoptParams, MessageLevel, MpsFormat, Pricing,
    SimplexMethod, SimplexParams, SolveError, SolveRequest,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, trace, warn};

/// Tightest feasibility tolerance HiGHS accepts; used for exact solves.
const EXACT_TOLERANCE: f64 = 1e-10;
/// Remaining gap above which a gap-limited MIP stop is reported.
const GAP_EPSILON: f64 = 1e-9;

// simplex_strategy values
const SIMPLEX_STRATEGY_DUAL: HighsInt = 1;
const SIMPLEX_STRATEGY_PRIMAL: HighsInt = 4;

// edge weight strategy values
const EDGE_WEIGHT_DANTZIG: HighsInt = 0;
const EDGE_WEIGHT_DEVEX: HighsInt = 1;
const EDGE_WEIGHT_STEEPEST_EDGE: HighsInt = 2;

/// Solving engine backed by one HiGHS instance.
pub struct HighsEngine {
    handle: HighsHandle,
}

impl HighsEngine {
    pub fn new() -> Self {
        Self {
            handle: HighsHandle::new(),
        }
    }

    fn apply_message_level(&mut self, level: MessageLevel) -> Result<(), HighsError> {
        self.handle.set_bool_option("output_flag", level.is_verbose())?;
        self.handle.set_bool_option("log_to_console", level.is_verbose())?;
        if level == MessageLevel::Debug {
            self.handle.set_int_option("log_dev_level", 1)?;
        }
        Ok(())
    }

    fn apply_simplex_params(
        &mut self,
        params: &SimplexParams,
        sense: Sense,
        exact: bool,
    ) -> Result<(), HighsError> {
        self.handle.reset_options()?;
        self.apply_message_level(params.message_level)?;
        self.handle.set_string_option("solver", "simplex")?;

        let strategy = match params.method {
            SimplexMethod::Primal => SIMPLEX_STRATEGY_PRIMAL,
            SimplexMethod::Dual | SimplexMethod::DualPrimal => SIMPLEX_STRATEGY_DUAL,
        };
        self.handle.set_int_option("simplex_strategy", strategy)?;

        let (dual_weights, primal_weights) = match params.pricing {
            Pricing::Standard => (EDGE_WEIGHT_DANTZIG, EDGE_WEIGHT_DANTZIG),
            Pricing::SteepestEdge => (EDGE_WEIGHT_STEEPEST_EDGE, EDGE_WEIGHT_DEVEX),
        };
        self.handle
            .set_int_option("simplex_dual_edge_weight_strategy", dual_weights)?;
        self.handle
            .set_int_option("simplex_primal_edge_weight_strategy", primal_weights)?;
        trace!(
            component = "solver",
            operation = "apply_params",
            ratio_test = ?params.ratio_test,
            "Ratio test choice is not configurable in HiGHS"
        );

        let presolve = params.presolve && !exact;
        self.handle
            .set_string_option("presolve", if presolve { "on" } else { "off" })?;

        if let Some(limit) = params.iteration_limit {
            let limit = HighsInt::try_from(limit).unwrap_or(HighsInt::MAX);
            self.handle.set_int_option("simplex_iteration_limit", limit)?;
        }
        if let Some(seconds) = params.time_limit {
            self.handle.set_double_option("time_limit", seconds)?;
        }
        // HiGHS has a single objective bound, on the worse side for the sense.
        let bound = match sense {
            Sense::Minimize => params.objective_upper_limit,
            Sense::Maximize => params.objective_lower_limit,
        };
        if let Some(bound) = bound {
            self.handle.set_double_option("objective_bound", bound)?;
        }

        let (primal_tol, dual_tol) = if exact {
            (Some(EXACT_TOLERANCE), Some(EXACT_TOLERANCE))
        } else {
            (params.primal_tolerance, params.dual_tolerance)
        };
        if let Some(tol) = primal_tol {
            self.handle
                .set_double_option("primal_feasibility_tolerance", tol)?;
        }
        if let Some(tol) = dual_tol {
            self.handle.set_double_option("dual_feasibility_tolerance", tol)?;
        }
        Ok(())
    }

    fn apply_intopt_params(&mut self, params: &IntoptParams) -> Result<(), HighsError> {
        self.handle.reset_options()?;
        self.apply_message_level(params.message_level)?;
        self.handle
            .set_string_option("presolve", if params.presolve { "on" } else { "off" })?;
        if let Some(seconds) = params.time_limit {
            self.handle.set_double_option("time_limit", seconds)?;
        }
        if let Some(gap) = params.mip_gap {
            self.handle.set_double_option("mip_rel_gap", gap)?;
        }
        if let Some(tol) = params.integer_tolerance {
            self.handle.set_double_option("mip_feasibility_tolerance", tol)?;
        }
        if let Some(limit) = params.node_limit {
            let limit = HighsInt::try_from(limit).unwrap_or(HighsInt::MAX);
            self.handle.set_int_option("mip_max_nodes", limit)?;
        }
        Ok(())
    }

    fn quiet(&mut self) -> Result<(), HighsError> {
        self.handle.reset_options()?;
        self.apply_message_level(MessageLevel::Off)
    }

    fn load(&mut self, model: &Model, sense: Sense, integrality: bool) -> Result<(), HighsError> {
        let lp = to_lp(model, sense, integrality)?;
        self.handle.clear_model()?;
        self.handle.pass_model(&lp)
    }

    fn basic_report(&self, model: &Model, model_status: HighsInt) -> EngineReport {
        let primal_status = solution_status(self.handle.int_info("primal_solution_status"));
        let dual_status = solution_status(self.handle.int_info("dual_solution_status"));
        let (code, status) = match lp_outcome(model_status, model.sense()) {
            Outcome::Reached(status) => (0, status),
            Outcome::Failed(err) => {
                let status = match primal_status {
                    SolutionStatus::Feasible => SolutionStatus::Feasible,
                    SolutionStatus::Infeasible => SolutionStatus::Infeasible,
                    _ => SolutionStatus::Undefined,
                };
                (err.return_code(), status)
            }
        };

        let raw = match self.handle.solution() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "solution",
                    status = "warn",
                    error = %err,
                    "Could not read solution values"
                );
                return EngineReport {
                    code,
                    ..EngineReport::default()
                };
            }
        };

        let (col_status, row_status) = match self.handle.basis() {
            Some((cols, rows)) => (
                map_basis(&cols, model.columns().iter().map(|c| c.bounds().kind())),
                map_basis(&rows, model.rows().iter().map(|r| r.bounds().kind())),
            ),
            None => (Vec::new(), Vec::new()),
        };

        EngineReport::basic(
            code,
            BasicSolution {
                status,
                primal_status,
                dual_status,
                objective: self.handle.objective_value(),
                row_primal: raw.row_value,
                row_dual: raw.row_dual,
                col_primal: raw.col_value,
                col_dual: raw.col_dual,
                row_status,
                col_status,
            },
        )
    }

    fn mip_report(&self, model: &Model, model_status: HighsInt, params: &IntoptParams) -> EngineReport {
        let has_solution =
            solution_status(self.handle.int_info("primal_solution_status")).is_feasible();
        let (code, status) = match mip_outcome(model_status, model.sense()) {
            Outcome::Reached(status) => {
                let gap = self.handle.double_info("mip_gap").unwrap_or(0.0);
                let gap_limited = params.mip_gap.is_some_and(|requested| requested > 0.0);
                if gap_limited && gap > GAP_EPSILON {
                    (SolveError::MipGapReached.return_code(), SolutionStatus::Feasible)
                } else {
                    (0, status)
                }
            }
            Outcome::Failed(SolveError::NoPrimalFeasible) => {
                (SolveError::NoPrimalFeasible.return_code(), SolutionStatus::NoFeasible)
            }
            Outcome::Failed(err) if has_solution => (err.return_code(), SolutionStatus::Feasible),
            Outcome::Failed(err) => (err.return_code(), SolutionStatus::Undefined),
        };

        if !status.is_feasible() {
            return EngineReport::mip(
                code,
                MipSolution {
                    status,
                    ..MipSolution::default()
                },
            );
        }
        match self.handle.solution() {
            Ok(raw) => EngineReport::mip(
                code,
                MipSolution {
                    status,
                    objective: self.handle.objective_value(),
                    row_values: raw.row_value,
                    col_values: raw.col_value,
                },
            ),
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "solution",
                    status = "warn",
                    error = %err,
                    "Could not read integer solution values"
                );
                unreadable_mip()
            }
        }
    }

    fn solve_inner(&mut self, model: &Model, request: &SolveRequest) -> Result<EngineReport, HighsError> {
        let integer = match request {
            SolveRequest::Simplex(params) => {
                self.apply_simplex_params(params, model.sense(), false)?;
                false
            }
            SolveRequest::Exact(params) => {
                self.apply_simplex_params(params, model.sense(), true)?;
                false
            }
            SolveRequest::Intopt(params) => {
                self.apply_intopt_params(params)?;
                true
            }
        };
        self.load(model, model.sense(), integer)?;
        let run_status = self.handle.run()?;
        if run_status != STATUS_OK {
            debug!(
                component = "solver",
                operation = "run",
                status = "warn",
                run_status,
                "HiGHS run returned a warning"
            );
        }

        let model_status = self.handle.model_status();
        debug!(
            component = "solver",
            operation = "run",
            model_status = model_status_str(model_status),
            "HiGHS run finished"
        );
        Ok(match request {
            SolveRequest::Intopt(params) => self.mip_report(model, model_status, params),
            _ => self.basic_report(model, model_status),
        })
    }

    fn read_inner(&mut self, request: &FormatRequest, path: &Path) -> Result<Model, String> {
        if !path.is_file() {
            return Err("file not found".to_string());
        }
        let (extension, sense_override, tolerance) = match request {
            FormatRequest::Mps(_, params) => ("mps", Some(Sense::Minimize), params.tolerance.max(0.0)),
            FormatRequest::CplexLp(_) => ("lp", None, 0.0),
        };

        self.quiet().map_err(|err| err.to_string())?;
        if let FormatRequest::Mps(format, _) = request {
            self.handle
                .set_bool_option("mps_parser_type_free", *format == MpsFormat::Free)
                .map_err(|err| err.to_string())?;
        }
        self.handle.clear_model().map_err(|err| err.to_string())?;

        // HiGHS picks its parser from the file extension.
        let staged = stage_for_read(path, extension).map_err(|err| err.to_string())?;
        let source = staged
            .as_ref()
            .map_or_else(|| path.to_path_buf(), |file| file.path().to_path_buf());
        self.handle
            .read_model(&source)
            .map_err(|_| "HiGHS could not parse the file".to_string())?;

        let lp = self.handle.lp().map_err(|err| err.to_string())?;
        let row_names: Vec<String> = (0..lp.num_row)
            .map(|r| self.handle.row_name(r).unwrap_or_default())
            .collect();
        let col_names: Vec<String> = (0..lp.num_col)
            .map(|c| self.handle.col_name(c).unwrap_or_default())
            .collect();
        let sense = sense_override.unwrap_or(if lp.sense == crate::ffi::SENSE_MAXIMIZE {
            Sense::Maximize
        } else {
            Sense::Minimize
        });
        let mut model = from_lp(&lp, sense, &row_names, &col_names, tolerance);
        self.handle.clear_model().map_err(|err| err.to_string())?;

        if matches!(request, FormatRequest::Mps(..)) {
            let bytes = std::fs::read(path).map_err(|err| err.to_string())?;
            let header = mps::read_header(&String::from_utf8_lossy(&bytes));
            if let Some(name) = header.name {
                model.set_name(name);
            }
            if let Some(objective) = header.objective {
                model.set_objective_name(objective);
            }
        }
        Ok(model)
    }

    fn write_inner(&mut self, model: &Model, request: &FormatRequest, path: &Path) -> Result<(), String> {
        let (extension, sense, blank) = match request {
            FormatRequest::Mps(_, params) => ("mps", Sense::Minimize, params.blank),
            FormatRequest::CplexLp(_) => ("lp", model.sense(), None),
        };

        self.quiet().map_err(|err| err.to_string())?;
        self.load(model, sense, true).map_err(|err| err.to_string())?;
        let row_names = row_names_for_write(model, blank);
        for (r, name) in row_names.iter().enumerate() {
            self.handle
                .pass_row_name(r, name)
                .map_err(|err| err.to_string())?;
        }
        for (c, name) in col_names_for_write(model, blank).iter().enumerate() {
            self.handle
                .pass_col_name(c, name)
                .map_err(|err| err.to_string())?;
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let staged = Builder::new()
            .prefix(".linopt-")
            .suffix(&format!(".{}", extension))
            .tempfile_in(&dir)
            .map_err(|err| err.to_string())?;
        let result = self
            .handle
            .write_model(staged.path())
            .map_err(|_| "HiGHS could not write the model".to_string());
        self.handle.clear_model().map_err(|err| err.to_string())?;
        result?;

        if let FormatRequest::Mps(format, _) = request {
            let objective = objective_name_for_write(model, *format, blank, &row_names);
            let text = std::fs::read_to_string(staged.path()).map_err(|err| err.to_string())?;
            let name = blanked(model.name(), blank);
            let stamped = mps::stamp_header(&text, &name, objective.as_deref());
            std::fs::write(staged.path(), stamped).map_err(|err| err.to_string())?;
        }
        staged
            .persist(path)
            .map_err(|err| err.error.to_string())?;
        Ok(())
    }
}

impl Default for HighsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for HighsEngine {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn spawn(&self) -> Box<dyn Engine> {
        Box::new(HighsEngine::new())
    }

    fn reset(&mut self) {
        if let Err(err) = self.handle.clear_model() {
            warn!(
                component = "solver",
                operation = "reset",
                status = "warn",
                error = %err,
                "Failed to clear HiGHS model"
            );
        }
    }

    fn solve(&mut self, model: &Model, request: &SolveRequest) -> EngineReport {
        let started = Instant::now();
        let report = match self.solve_inner(model, request) {
            Ok(report) => report,
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = request.kind(),
                    status = "error",
                    error = %err,
                    "HiGHS rejected the problem"
                );
                EngineReport::failed(SolveError::InvalidData)
            }
        };
        debug!(
            component = "solver",
            operation = request.kind(),
            code = report.code,
            duration_ms = started.elapsed().as_millis() as u64,
            "HiGHS solve finished"
        );
        report
    }

    fn read(&mut self, request: &FormatRequest, path: &Path) -> Result<Model, String> {
        let result = self.read_inner(request, path);
        if result.is_err() {
            // Leave no half-loaded model behind.
            let _ = self.handle.clear_model();
        }
        result
    }

    fn write(&mut self, model: &Model, request: &FormatRequest, path: &Path) -> Result<(), String> {
        self.write_inner(model, request, path)
    }
}

fn blanked(name: &str, blank: Option<char>) -> String {
    match blank {
        Some(replacement) => name.replace(' ', &replacement.to_string()),
        None => name.to_string(),
    }
}

/// The objective row can only be renamed in free MPS, and only to a single
/// token that no constraint row already uses.
fn objective_name_for_write(
    model: &Model,
    format: MpsFormat,
    blank: Option<char>,
    row_names: &[String],
) -> Option<String> {
    let name = blanked(model.objective_name(), blank);
    let usable = format == MpsFormat::Free
        && !name.is_empty()
        && !name.contains(char::is_whitespace)
        && !row_names.contains(&name);
    usable.then_some(name)
}

/// A failed integer solve whose values could not be read back.
fn unreadable_mip() -> EngineReport {
    EngineReport::mip(SolveError::SolverFailure.return_code(), MipSolution::default())
}

fn map_basis(codes: &[HighsInt], kinds: impl Iterator<Item = linopt_core::BoundsType>) -> Vec<VarStatus> {
    codes
        .iter()
        .zip(kinds)
        .map(|(&code, kind)| basis_status(code, kind))
        .collect()
}

/// Copy `path` to a temporary file with the right extension when needed.
///
/// The comparison is case-sensitive, matching how HiGHS dispatches.
fn stage_for_read(path: &Path, extension: &str) -> std::io::Result<Option<NamedTempFile>> {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension);
    if matches {
        return Ok(None);
    }
    let staged = Builder::new()
        .prefix("linopt-")
        .suffix(&format!(".{}", extension))
        .tempfile()?;
    std::fs::copy(path, staged.path())?;
    Ok(Some(staged))
}
