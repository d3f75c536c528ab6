use serde::{Deserialize, Serialize};

/// Magnitude used for an absent bound.
///
/// Engines following the classic LP convention represent "no bound" as the
/// largest finite double rather than IEEE infinity; every resolved bound in
/// this crate uses this sentinel.
pub const UNBOUNDED: f64 = f64::MAX;

/// Limits at or beyond this magnitude are treated as absent when importing.
pub const INFINITE_LIMIT: f64 = 1e30;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Discriminant selecting which limits of a row or column are in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsType {
    /// -inf < x < +inf
    #[default]
    Free,
    /// lo <= x < +inf
    Lower,
    /// -inf < x <= hi
    Upper,
    /// lo <= x <= hi
    Double,
    /// x = lo
    Fixed,
}

impl BoundsType {
    pub fn as_str(self) -> &'static str {
        match self {
            BoundsType::Free => "free",
            BoundsType::Lower => "lower",
            BoundsType::Upper => "upper",
            BoundsType::Double => "double",
            BoundsType::Fixed => "fixed",
        }
    }
}

/// Resolved bounds of a row or column.
///
/// The only way to build one from user input is [`Bounds::resolve`], so the
/// stored limits always agree with the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    kind: BoundsType,
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Resolve a bounds type and its two inputs into effective limits.
    ///
    /// | kind   | lower | upper |
    /// |--------|-------|-------|
    /// | Free   | -MAX  | +MAX  |
    /// | Lower  | lo    | +MAX  |
    /// | Upper  | -MAX  | hi    |
    /// | Double | lo    | hi    |
    /// | Fixed  | lo    | lo    |
    ///
    /// Any pair is accepted, including `lo > hi`; solving reports such bounds.
    /// Infinite inputs are stored as the matching [`UNBOUNDED`] sentinel.
    pub fn resolve(kind: BoundsType, lo: f64, hi: f64) -> Self {
        let (lo, hi) = (sentinel(lo), sentinel(hi));
        let (lower, upper) = match kind {
            BoundsType::Free => (-UNBOUNDED, UNBOUNDED),
            BoundsType::Lower => (lo, UNBOUNDED),
            BoundsType::Upper => (-UNBOUNDED, hi),
            BoundsType::Double => (lo, hi),
            BoundsType::Fixed => (lo, lo),
        };
        Self { kind, lower, upper }
    }

    pub fn free() -> Self {
        Self::resolve(BoundsType::Free, 0.0, 0.0)
    }

    pub fn fixed(value: f64) -> Self {
        Self::resolve(BoundsType::Fixed, value, value)
    }

    /// Rebuild bounds from a pair of raw limits reported by an engine.
    ///
    /// Infinite limits, and finite ones at or beyond [`INFINITE_LIMIT`], count
    /// as absent. Equal finite limits give [`BoundsType::Fixed`].
    pub fn from_limits(lower: f64, upper: f64) -> Self {
        let has_lower = lower > -INFINITE_LIMIT;
        let has_upper = upper < INFINITE_LIMIT;
        match (has_lower, has_upper) {
            (false, false) => Self::free(),
            (true, false) => Self::resolve(BoundsType::Lower, lower, 0.0),
            (false, true) => Self::resolve(BoundsType::Upper, 0.0, upper),
            (true, true) if lower == upper => Self::fixed(lower),
            (true, true) => Self::resolve(BoundsType::Double, lower, upper),
        }
    }

    pub fn kind(&self) -> BoundsType {
        self.kind
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// True for double bounds whose lower limit does not lie below the upper.
    pub fn is_inverted(&self) -> bool {
        self.kind == BoundsType::Double && self.lower >= self.upper
    }

    /// True when both limits are exactly zero and one.
    pub(crate) fn is_unit_interval(&self) -> bool {
        self.kind == BoundsType::Double && self.lower == 0.0 && self.upper == 1.0
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::free()
    }
}

/// Integrality of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnKind {
    #[default]
    Continuous,
    Integer,
    /// Integer restricted to [0, 1].
    Binary,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Continuous => "continuous",
            ColumnKind::Integer => "integer",
            ColumnKind::Binary => "binary",
        }
    }
}

/// Basis membership of a row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VarStatus {
    #[default]
    Basic,
    NonBasicLower,
    NonBasicUpper,
    NonBasicFree,
    NonBasicFixed,
}

impl VarStatus {
    /// Adjust a requested status to what the bounds type allows.
    ///
    /// Basic is kept as is. A non-basic request is mapped onto the only
    /// non-basic status the bounds admit; double bounds keep `NonBasicUpper`
    /// and otherwise sit at the lower limit.
    pub fn normalize(self, kind: BoundsType) -> Self {
        if self == VarStatus::Basic {
            return self;
        }
        match kind {
            BoundsType::Free => VarStatus::NonBasicFree,
            BoundsType::Lower => VarStatus::NonBasicLower,
            BoundsType::Upper => VarStatus::NonBasicUpper,
            BoundsType::Double if self == VarStatus::NonBasicUpper => VarStatus::NonBasicUpper,
            BoundsType::Double => VarStatus::NonBasicLower,
            BoundsType::Fixed => VarStatus::NonBasicFixed,
        }
    }

    pub fn is_basic(self) -> bool {
        self == VarStatus::Basic
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarStatus::Basic => "basic",
            VarStatus::NonBasicLower => "nonbasic_lower",
            VarStatus::NonBasicUpper => "nonbasic_upper",
            VarStatus::NonBasicFree => "nonbasic_free",
            VarStatus::NonBasicFixed => "nonbasic_fixed",
        }
    }
}

/// Status of a basic or integer solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolutionStatus {
    #[default]
    Undefined,
    Feasible,
    Infeasible,
    /// The problem has no feasible solution.
    NoFeasible,
    Optimal,
    Unbounded,
}

impl SolutionStatus {
    pub fn is_optimal(self) -> bool {
        self == SolutionStatus::Optimal
    }

    /// Optimal solutions are feasible too.
    pub fn is_feasible(self) -> bool {
        matches!(self, SolutionStatus::Optimal | SolutionStatus::Feasible)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolutionStatus::Undefined => "undefined",
            SolutionStatus::Feasible => "feasible",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::NoFeasible => "no_feasible",
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Unbounded => "unbounded",
        }
    }
}

fn sentinel(limit: f64) -> f64 {
    if limit.is_infinite() {
        UNBOUNDED.copysign(limit)
    } else {
        limit
    }
}
