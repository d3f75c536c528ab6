//! The problem handle: a model paired with the engine that solves it.

use linopt_core::{
    BoundsType, ColumnKind, Model, ModelError, Sense, SolutionStatus, SparseVector, VarStatus,
};
use linopt_highs::HighsEngine;
use linopt_solver::Engine;
use tracing::debug;

const DELETED: &str = "problem method called on a deleted problem";

pub(crate) struct Inner {
    pub(crate) model: Model,
    pub(crate) engine: Box<dyn Engine>,
}

/// An LP/MIP problem bound to a solving engine.
///
/// The problem owns its engine handle exclusively. It is `Send` so distinct
/// problems can live on distinct threads, but it is not `Sync`.
///
/// Row and column indices are 1-based throughout.
///
/// # Panics
///
/// Every method other than [`Problem::delete`] and [`Problem::is_deleted`]
/// panics once the problem has been deleted. Single-entity accessors panic
/// when the index is outside `1..=count`.
pub struct Problem {
    inner: Option<Inner>,
}

impl Problem {
    /// Create an empty problem solved by HiGHS.
    pub fn new() -> Self {
        Self::with_engine(Box::new(HighsEngine::new()))
    }

    /// Create an empty problem solved by `engine`.
    pub fn with_engine(engine: Box<dyn Engine>) -> Self {
        debug!(
            component = "problem",
            operation = "create",
            status = "success",
            engine = engine.name(),
            "Created problem"
        );
        Self {
            inner: Some(Inner {
                model: Model::new(),
                engine,
            }),
        }
    }

    /// Reset to the freshly created state. The engine handle is kept.
    #[track_caller]
    pub fn erase(&mut self) {
        let inner = self.live_mut();
        inner.model = Model::new();
        inner.engine.reset();
        debug!(
            component = "problem",
            operation = "erase",
            status = "success",
            "Erased problem"
        );
    }

    /// Release the engine handle and drop the model.
    ///
    /// Calling this more than once is a no-op. Dropping the problem has the
    /// same effect.
    pub fn delete(&mut self) {
        if let Some(inner) = self.inner.take() {
            debug!(
                component = "problem",
                operation = "delete",
                status = "success",
                engine = inner.engine.name(),
                "Deleted problem"
            );
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.inner.is_none()
    }

    /// Deep copy into a new problem with its own engine handle.
    ///
    /// Names are copied only when `with_names` is set. The copy starts with
    /// no solution.
    #[track_caller]
    pub fn copy(&self, with_names: bool) -> Problem {
        let inner = self.live();
        Problem {
            inner: Some(Inner {
                model: inner.model.copy(with_names),
                engine: inner.engine.spawn(),
            }),
        }
    }

    /// Read-only view of the underlying model.
    #[track_caller]
    pub fn model(&self) -> &Model {
        &self.live().model
    }

    #[track_caller]
    pub(crate) fn live(&self) -> &Inner {
        match &self.inner {
            Some(inner) => inner,
            None => panic!("{DELETED}"),
        }
    }

    #[track_caller]
    pub(crate) fn live_mut(&mut self) -> &mut Inner {
        match &mut self.inner {
            Some(inner) => inner,
            None => panic!("{DELETED}"),
        }
    }

    #[track_caller]
    fn model_mut(&mut self) -> &mut Model {
        &mut self.live_mut().model
    }

    // Names.

    #[track_caller]
    pub fn name(&self) -> &str {
        self.model().name()
    }

    #[track_caller]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.model_mut().set_name(name);
    }

    #[track_caller]
    pub fn objective_name(&self) -> &str {
        self.model().objective_name()
    }

    #[track_caller]
    pub fn set_objective_name(&mut self, name: impl Into<String>) {
        self.model_mut().set_objective_name(name);
    }

    #[track_caller]
    pub fn row_name(&self, i: usize) -> &str {
        self.model().row_name(i)
    }

    #[track_caller]
    pub fn set_row_name(&mut self, i: usize, name: impl Into<String>) {
        self.model_mut().set_row_name(i, name);
    }

    #[track_caller]
    pub fn col_name(&self, j: usize) -> &str {
        self.model().col_name(j)
    }

    #[track_caller]
    pub fn set_col_name(&mut self, j: usize, name: impl Into<String>) {
        self.model_mut().set_col_name(j, name);
    }

    /// First row named exactly `name`.
    #[track_caller]
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.model().find_row(name)
    }

    /// First column named exactly `name`.
    #[track_caller]
    pub fn find_col(&self, name: &str) -> Option<usize> {
        self.model().find_col(name)
    }

    // Structure.

    /// Append `count` rows and return the index of the first one.
    #[track_caller]
    pub fn add_rows(&mut self, count: usize) -> usize {
        self.model_mut().add_rows(count)
    }

    /// Append `count` columns and return the index of the first one.
    #[track_caller]
    pub fn add_cols(&mut self, count: usize) -> usize {
        self.model_mut().add_cols(count)
    }

    #[track_caller]
    pub fn num_rows(&self) -> usize {
        self.model().num_rows()
    }

    #[track_caller]
    pub fn num_cols(&self) -> usize {
        self.model().num_cols()
    }

    #[track_caller]
    pub fn num_nz(&self) -> usize {
        self.model().num_nz()
    }

    #[track_caller]
    pub fn sense(&self) -> Sense {
        self.model().sense()
    }

    #[track_caller]
    pub fn set_sense(&mut self, sense: Sense) {
        self.model_mut().set_sense(sense);
    }

    // Bounds and kinds.

    #[track_caller]
    pub fn set_row_bounds(&mut self, i: usize, kind: BoundsType, lo: f64, hi: f64) {
        self.model_mut().set_row_bounds(i, kind, lo, hi);
    }

    #[track_caller]
    pub fn row_type(&self, i: usize) -> BoundsType {
        self.model().row_type(i)
    }

    #[track_caller]
    pub fn row_lb(&self, i: usize) -> f64 {
        self.model().row_lb(i)
    }

    #[track_caller]
    pub fn row_ub(&self, i: usize) -> f64 {
        self.model().row_ub(i)
    }

    #[track_caller]
    pub fn set_col_bounds(&mut self, j: usize, kind: BoundsType, lo: f64, hi: f64) {
        self.model_mut().set_col_bounds(j, kind, lo, hi);
    }

    #[track_caller]
    pub fn col_type(&self, j: usize) -> BoundsType {
        self.model().col_type(j)
    }

    #[track_caller]
    pub fn col_lb(&self, j: usize) -> f64 {
        self.model().col_lb(j)
    }

    #[track_caller]
    pub fn col_ub(&self, j: usize) -> f64 {
        self.model().col_ub(j)
    }

    #[track_caller]
    pub fn set_col_kind(&mut self, j: usize, kind: ColumnKind) {
        self.model_mut().set_col_kind(j, kind);
    }

    #[track_caller]
    pub fn col_kind(&self, j: usize) -> ColumnKind {
        self.model().col_kind(j)
    }

    // Objective.

    #[track_caller]
    pub fn set_obj_coef(&mut self, j: usize, coef: f64) {
        self.model_mut().set_obj_coef(j, coef);
    }

    #[track_caller]
    pub fn obj_coef(&self, j: usize) -> f64 {
        self.model().obj_coef(j)
    }

    #[track_caller]
    pub fn set_obj_constant(&mut self, value: f64) {
        self.model_mut().set_obj_constant(value);
    }

    #[track_caller]
    pub fn obj_constant(&self) -> f64 {
        self.model().obj_constant()
    }

    // Basis statuses.

    #[track_caller]
    pub fn set_row_stat(&mut self, i: usize, status: VarStatus) {
        self.model_mut().set_row_stat(i, status);
    }

    #[track_caller]
    pub fn row_stat(&self, i: usize) -> VarStatus {
        self.model().row_stat(i)
    }

    #[track_caller]
    pub fn set_col_stat(&mut self, j: usize, status: VarStatus) {
        self.model_mut().set_col_stat(j, status);
    }

    #[track_caller]
    pub fn col_stat(&self, j: usize) -> VarStatus {
        self.model().col_stat(j)
    }

    // Constraint matrix.

    /// Replace the entries of row `i`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] on a length mismatch, an out-of-range column
    /// or a repeated column. The row is left unchanged in that case.
    #[track_caller]
    pub fn set_mat_row(&mut self, i: usize, indices: &[usize], values: &[f64]) -> Result<(), ModelError> {
        self.model_mut().set_mat_row(i, indices, values)
    }

    /// Replace the entries of column `j`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Problem::set_mat_row`], with row indices.
    #[track_caller]
    pub fn set_mat_col(&mut self, j: usize, indices: &[usize], values: &[f64]) -> Result<(), ModelError> {
        self.model_mut().set_mat_col(j, indices, values)
    }

    #[track_caller]
    pub fn mat_row(&self, i: usize) -> SparseVector {
        self.model().mat_row(i)
    }

    #[track_caller]
    pub fn mat_col(&self, j: usize) -> SparseVector {
        self.model().mat_col(j)
    }

    /// Replace the whole matrix from parallel triplet arrays.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] on unequal lengths, out-of-range indices or a
    /// repeated `(row, column)` pair. The matrix is left unchanged then.
    #[track_caller]
    pub fn load_matrix(&mut self, rows: &[usize], cols: &[usize], values: &[f64]) -> Result<(), ModelError> {
        self.model_mut().load_matrix(rows, cols, values)
    }

    // Basic solution.

    #[track_caller]
    pub fn status(&self) -> SolutionStatus {
        self.model().status()
    }

    #[track_caller]
    pub fn prim_stat(&self) -> SolutionStatus {
        self.model().prim_stat()
    }

    #[track_caller]
    pub fn dual_stat(&self) -> SolutionStatus {
        self.model().dual_stat()
    }

    #[track_caller]
    pub fn obj_val(&self) -> f64 {
        self.model().obj_val()
    }

    #[track_caller]
    pub fn row_prim(&self, i: usize) -> f64 {
        self.model().row_prim(i)
    }

    #[track_caller]
    pub fn row_dual(&self, i: usize) -> f64 {
        self.model().row_dual(i)
    }

    #[track_caller]
    pub fn col_prim(&self, j: usize) -> f64 {
        self.model().col_prim(j)
    }

    #[track_caller]
    pub fn col_dual(&self, j: usize) -> f64 {
        self.model().col_dual(j)
    }

    // Integer solution.

    #[track_caller]
    pub fn mip_status(&self) -> SolutionStatus {
        self.model().mip_status()
    }

    #[track_caller]
    pub fn mip_obj_val(&self) -> f64 {
        self.model().mip_obj_val()
    }

    #[track_caller]
    pub fn mip_row_val(&self, i: usize) -> f64 {
        self.model().mip_row_val(i)
    }

    #[track_caller]
    pub fn mip_col_val(&self, j: usize) -> f64 {
        self.model().mip_col_val(j)
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Some(inner) => f
                .debug_struct("Problem")
                .field("engine", &inner.engine.name())
                .field("rows", &inner.model.num_rows())
                .field("columns", &inner.model.num_cols())
                .field("nonzeros", &inner.model.num_nz())
                .finish(),
            None => f.write_str("Problem(deleted)"),
        }
    }
}
