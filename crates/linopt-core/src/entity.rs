//! Rows and columns of a problem.

use crate::types::{Bounds, BoundsType, ColumnKind, VarStatus};
use serde::{Deserialize, Serialize};

/// A constraint, modeled as a bounded auxiliary variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub(crate) name: String,
    pub(crate) bounds: Bounds,
    pub(crate) status: VarStatus,
    pub(crate) primal: f64,
    pub(crate) dual: f64,
    pub(crate) mip_value: f64,
}

impl Row {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn status(&self) -> VarStatus {
        self.status
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.status = self.status.normalize(bounds.kind());
    }

    pub(crate) fn clear_solution(&mut self) {
        self.primal = 0.0;
        self.dual = 0.0;
        self.mip_value = 0.0;
    }
}

impl Default for Row {
    fn default() -> Self {
        Self {
            name: String::new(),
            bounds: Bounds::free(),
            status: VarStatus::Basic,
            primal: 0.0,
            dual: 0.0,
            mip_value: 0.0,
        }
    }
}

/// A structural decision variable.
///
/// A new column is fixed at zero and non-basic, the usual state of a
/// freshly added structural variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) bounds: Bounds,
    pub(crate) integer: bool,
    pub(crate) objective: f64,
    pub(crate) status: VarStatus,
    pub(crate) primal: f64,
    pub(crate) dual: f64,
    pub(crate) mip_value: f64,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn status(&self) -> VarStatus {
        self.status
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn is_integer(&self) -> bool {
        self.integer
    }

    /// Binary is reported for any integer column bounded exactly to [0, 1].
    pub fn kind(&self) -> ColumnKind {
        match (self.integer, self.bounds.is_unit_interval()) {
            (false, _) => ColumnKind::Continuous,
            (true, true) => ColumnKind::Binary,
            (true, false) => ColumnKind::Integer,
        }
    }

    pub(crate) fn set_kind(&mut self, kind: ColumnKind) {
        match kind {
            ColumnKind::Continuous => self.integer = false,
            ColumnKind::Integer => self.integer = true,
            ColumnKind::Binary => {
                self.integer = true;
                self.set_bounds(Bounds::resolve(BoundsType::Double, 0.0, 1.0));
            }
        }
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.status = self.status.normalize(bounds.kind());
    }

    pub(crate) fn clear_solution(&mut self) {
        self.primal = 0.0;
        self.dual = 0.0;
        self.mip_value = 0.0;
    }
}

impl Default for Column {
    fn default() -> Self {
        Self {
            name: String::new(),
            bounds: Bounds::fixed(0.0),
            integer: false,
            objective: 0.0,
            status: VarStatus::NonBasicFixed,
            primal: 0.0,
            dual: 0.0,
            mip_value: 0.0,
        }
    }
}
