//! HiGHS engine for linopt problems.
//!
//! This crate drives the HiGHS C API through an owning handle. Each solve
//! hands the whole model to HiGHS column-wise, runs it, and translates the
//! model status into the linopt error taxonomy. MPS and CPLEX LP files are
//! parsed and written by HiGHS' own codecs; the MPS problem and objective
//! names are carried on the file text around them.

mod convert;
pub mod engine;
pub mod ffi;
mod mps;
mod status;

pub use engine::HighsEngine;
pub use ffi::{HighsError, HighsHandle};
