//! LP/MIP problems with pluggable solving engines and file formats.
//!
//! A [`Problem`] owns a [`Model`] together with the [`Engine`] that solves
//! it. Build the model through the problem's setters, run [`Problem::simplex`],
//! [`Problem::exact`] or [`Problem::intopt`], and read the stored solution
//! back. Problems can be read from and written to MPS, CPLEX LP and the
//! native format.
//!
//! ```no_run
//! use linopt::{BoundsType, Problem, Sense, SolutionStatus};
//!
//! let mut lp = Problem::new();
//! lp.set_sense(Sense::Maximize);
//! lp.add_rows(1);
//! lp.add_cols(2);
//! lp.set_row_bounds(1, BoundsType::Upper, 0.0, 4.0);
//! lp.set_col_bounds(1, BoundsType::Lower, 0.0, 0.0);
//! lp.set_col_bounds(2, BoundsType::Lower, 0.0, 0.0);
//! lp.set_obj_coef(1, 3.0);
//! lp.set_obj_coef(2, 2.0);
//! lp.set_mat_row(1, &[1, 2], &[1.0, 1.0])?;
//! lp.simplex(None)?;
//! assert_eq!(lp.status(), SolutionStatus::Optimal);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Indices of rows and columns are 1-based.

mod io;
mod logging;
mod problem;
mod solve;

pub use linopt_core::{
    Axis, BasicSolution, Bounds, BoundsType, ColumnKind, MipSolution, Model, ModelError, Sense,
    SolutionStatus, SparseVector, UNBOUNDED, VarStatus,
};
pub use linopt_highs::HighsEngine;
pub use linopt_solver::{
    CpxParams, Engine, EngineReport, FormatRequest, IntoptParams, IoError, IoOperation,
    MessageLevel, MpsFormat, MpsParams, Pricing, ProbFlags, RatioTest, SimplexMethod,
    SimplexParams, SolveError, SolveRequest,
};
pub use logging::{LoggingError, enable_logging};
pub use problem::Problem;
