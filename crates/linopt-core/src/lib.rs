//! LP/MIP problem data model.
//!
//! Bounds resolution, sparse constraint storage, row and column entities and
//! the [`Model`] aggregate that owns them together with the stored solution.

pub mod entity;
pub mod model;
pub mod solution;
pub mod sparse;
pub mod types;

pub use entity::{Column, Row};
pub use model::{Axis, Model, ModelError};
pub use solution::{BasicSolution, MipSolution};
pub use sparse::{SparseMatrix, SparseVector};
pub use types::{
    Bounds, BoundsType, ColumnKind, INFINITE_LIMIT, Sense, SolutionStatus, UNBOUNDED, VarStatus,
};
