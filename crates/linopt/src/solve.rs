//! Solver orchestration: argument checks, engine calls and result storage.

use crate::problem::{Inner, Problem};
use linopt_core::{BoundsType, Model, SolutionStatus};
use linopt_solver::{IntoptParams, SimplexMethod, SimplexParams, SolveError, SolveRequest};
use std::time::Instant;
use tracing::{debug, warn};

impl Problem {
    /// Solve the LP relaxation with the simplex method.
    ///
    /// Reaching a defined state, including infeasible or unbounded, returns
    /// `Ok`; read [`Problem::status`] for which one. `None` uses the default
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns the [`SolveError`] for a condition the engine could not
    /// resolve. A basic solution returned alongside the error is still
    /// stored.
    #[track_caller]
    pub fn simplex(&mut self, params: Option<&SimplexParams>) -> Result<(), SolveError> {
        let params = params.cloned().unwrap_or_default();
        self.live_mut().run_simplex(params, false)
    }

    /// Solve the LP relaxation with the tightest accuracy the engine offers.
    ///
    /// # Errors
    ///
    /// Same as [`Problem::simplex`].
    #[track_caller]
    pub fn exact(&mut self, params: Option<&SimplexParams>) -> Result<(), SolveError> {
        let params = params.cloned().unwrap_or_default();
        self.live_mut().run_simplex(params, true)
    }

    /// Solve with branch-and-cut, honouring integer and binary columns.
    ///
    /// Only the integer solution track is updated. With presolve off the
    /// LP relaxation must already be solved to optimality.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::RootLpNotProvided`] when presolve is off and the
    /// basic solution is not optimal, [`SolveError::InvalidBounds`] on bad
    /// bounds, and an infeasibility error when no integer solution exists.
    #[track_caller]
    pub fn intopt(&mut self, params: Option<&IntoptParams>) -> Result<(), SolveError> {
        let params = params.cloned().unwrap_or_default();
        let inner = self.live_mut();

        if let Err(err) = check_bounds(&inner.model, true) {
            return Err(reject("intopt", err));
        }
        if !params.presolve && inner.model.status() != SolutionStatus::Optimal {
            return Err(reject("intopt", SolveError::RootLpNotProvided));
        }
        inner.run(SolveRequest::Intopt(params))
    }
}

impl Inner {
    fn run_simplex(&mut self, params: SimplexParams, exact: bool) -> Result<(), SolveError> {
        let operation = if exact { "exact" } else { "simplex" };
        if let Err(err) = check_shape(&self.model).and_then(|()| check_bounds(&self.model, false)) {
            return Err(reject(operation, err));
        }

        let request = |params: SimplexParams| {
            if exact {
                SolveRequest::Exact(params)
            } else {
                SolveRequest::Simplex(params)
            }
        };

        if params.method != SimplexMethod::DualPrimal {
            return self.run(request(params));
        }

        let dual = params.clone().with_method(SimplexMethod::Dual);
        match self.run(request(dual)) {
            Err(err) if !err.is_limit() => {
                debug!(
                    component = "solver",
                    operation,
                    status = "warn",
                    error = %err,
                    "Dual simplex failed, falling back to primal"
                );
                self.run(request(params.with_method(SimplexMethod::Primal)))
            }
            outcome => outcome,
        }
    }

    /// Hand the model to the engine, store what it returns, map the code.
    fn run(&mut self, request: SolveRequest) -> Result<(), SolveError> {
        let started = Instant::now();
        let report = self.engine.solve(&self.model, &request);

        if let Some(basic) = report.basic.as_ref() {
            self.model.apply_basic(basic);
        }
        if let Some(mip) = report.mip.as_ref() {
            self.model.apply_mip(mip);
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        match report.error() {
            None => {
                debug!(
                    component = "problem",
                    operation = request.kind(),
                    status = "success",
                    engine = self.engine.name(),
                    lp_status = self.model.status().as_str(),
                    mip_status = self.model.mip_status().as_str(),
                    duration_ms,
                    "Solve finished"
                );
                Ok(())
            }
            Some(err) => {
                warn!(
                    component = "problem",
                    operation = request.kind(),
                    status = "error",
                    engine = self.engine.name(),
                    code = err.code(),
                    duration_ms,
                    "Solve failed"
                );
                Err(err)
            }
        }
    }
}

fn reject(operation: &'static str, err: SolveError) -> SolveError {
    warn!(
        component = "problem",
        operation,
        status = "error",
        code = err.code(),
        "Solve rejected before reaching the engine"
    );
    err
}

fn check_shape(model: &Model) -> Result<(), SolveError> {
    if model.num_rows() == 0 || model.num_cols() == 0 {
        return Err(SolveError::SolverFailure);
    }
    Ok(())
}

/// Double bounds must be strictly ordered. Integer columns additionally
/// need integral finite bounds when `integer` is set.
fn check_bounds(model: &Model, integer: bool) -> Result<(), SolveError> {
    let rows = model.rows().iter().map(|row| (row.bounds(), false));
    let cols = model
        .columns()
        .iter()
        .map(|col| (col.bounds(), integer && col.is_integer()));

    for (bounds, integral) in rows.chain(cols) {
        if bounds.kind() == BoundsType::Double && bounds.lower() >= bounds.upper() {
            return Err(SolveError::InvalidBounds);
        }
        if integral && (fractional(bounds.lower()) || fractional(bounds.upper())) {
            return Err(SolveError::InvalidBounds);
        }
    }
    Ok(())
}

fn fractional(limit: f64) -> bool {
    limit.abs() < linopt_core::UNBOUNDED && limit.fract() != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use linopt_core::ColumnKind;

    #[test]
    fn test_check_bounds_rejects_collapsed_double() {
        let mut model = Model::new();
        model.add_rows(1);
        model.add_cols(1);
        model.set_row_bounds(1, BoundsType::Double, 2.0, 2.0);
        assert_eq!(check_bounds(&model, false), Err(SolveError::InvalidBounds));
        model.set_row_bounds(1, BoundsType::Fixed, 2.0, 0.0);
        assert_eq!(check_bounds(&model, false), Ok(()));
    }

    #[test]
    fn test_check_bounds_integer_columns() {
        let mut model = Model::new();
        model.add_cols(2);
        model.set_col_bounds(1, BoundsType::Double, 0.5, 4.0);
        model.set_col_bounds(2, BoundsType::Lower, 0.0, 0.0);
        assert_eq!(check_bounds(&model, true), Ok(()));

        model.set_col_kind(1, ColumnKind::Integer);
        assert_eq!(check_bounds(&model, false), Ok(()));
        assert_eq!(check_bounds(&model, true), Err(SolveError::InvalidBounds));

        // an infinite upper bound is not fractional
        model.set_col_kind(2, ColumnKind::Integer);
        model.set_col_bounds(1, BoundsType::Double, 0.0, 4.0);
        assert_eq!(check_bounds(&model, true), Ok(()));
    }

    #[test]
    fn test_check_shape() {
        let mut model = Model::new();
        assert_eq!(check_shape(&model), Err(SolveError::SolverFailure));
        model.add_rows(1);
        assert_eq!(check_shape(&model), Err(SolveError::SolverFailure));
        model.add_cols(1);
        assert_eq!(check_shape(&model), Ok(()));
    }
}
