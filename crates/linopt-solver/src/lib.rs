//! Shared solver abstractions for linopt.
//!
//! This crate provides the types that solving backends (like `linopt-highs`)
//! and the `linopt` problem facade agree on.
//!
//! # Overview
//!
//! - [`SimplexParams`], [`IntoptParams`]: Solver control parameters
//! - [`MpsParams`], [`CpxParams`], [`ProbFlags`]: Format control parameters
//! - [`SolveError`], [`IoError`]: Error taxonomy for solves and file I/O
//! - [`Engine`]: Trait for solving backends
//! - [`native`]: The native full-fidelity problem format

mod config;
mod error;
pub mod native;
mod traits;

pub use config::{
    CpxParams, IntoptParams, MessageLevel, MpsFormat, MpsParams, Pricing, ProbFlags, RatioTest,
    SimplexMethod, SimplexParams,
};
pub use error::{IoError, IoOperation, SolveError};
pub use traits::{Engine, EngineReport, FormatRequest, SolveRequest};
