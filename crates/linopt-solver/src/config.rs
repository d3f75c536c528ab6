//! Solver and format control parameters.
//!
//! Parameter blocks are plain values: they carry no reference to a problem
//! and can be shared read-only across any number of solves.

/// Engine output verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageLevel {
    Off,
    ErrorsOnly,
    Normal,
    #[default]
    All,
    Debug,
}

impl MessageLevel {
    /// Whether the engine should print anything beyond errors.
    pub fn is_verbose(self) -> bool {
        matches!(self, MessageLevel::Normal | MessageLevel::All | MessageLevel::Debug)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageLevel::Off => "off",
            MessageLevel::ErrorsOnly => "errors_only",
            MessageLevel::Normal => "normal",
            MessageLevel::All => "all",
            MessageLevel::Debug => "debug",
        }
    }
}

/// Simplex variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimplexMethod {
    #[default]
    Primal,
    /// Dual simplex, falling back to primal if the dual phase fails.
    DualPrimal,
    Dual,
}

impl SimplexMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SimplexMethod::Primal => "primal",
            SimplexMethod::DualPrimal => "dual_primal",
            SimplexMethod::Dual => "dual",
        }
    }
}

/// Pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pricing {
    Standard,
    #[default]
    SteepestEdge,
}

/// Ratio test rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioTest {
    Standard,
    #[default]
    Harris,
}

/// Parameters for the simplex and exact solvers.
#[derive(Debug, Clone, Default)]
pub struct SimplexParams {
    pub message_level: MessageLevel,
    pub method: SimplexMethod,
    pub pricing: Pricing,
    pub ratio_test: RatioTest,
    /// Run the LP presolver first. Off by default.
    pub presolve: bool,
    /// Iteration limit. `None` means no limit.
    pub iteration_limit: Option<u64>,
    /// Time limit in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Stop once the objective falls below this value.
    pub objective_lower_limit: Option<f64>,
    /// Stop once the objective rises above this value.
    pub objective_upper_limit: Option<f64>,
    /// Primal feasibility tolerance. `None` uses the engine default.
    pub primal_tolerance: Option<f64>,
    /// Dual feasibility tolerance. `None` uses the engine default.
    pub dual_tolerance: Option<f64>,
}

impl SimplexParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message_level(mut self, level: MessageLevel) -> Self {
        self.message_level = level;
        self
    }

    pub fn with_method(mut self, method: SimplexMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_ratio_test(mut self, ratio_test: RatioTest) -> Self {
        self.ratio_test = ratio_test;
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = enabled;
        self
    }

    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_objective_lower_limit(mut self, value: f64) -> Self {
        self.objective_lower_limit = Some(value);
        self
    }

    pub fn with_objective_upper_limit(mut self, value: f64) -> Self {
        self.objective_upper_limit = Some(value);
        self
    }

    pub fn with_primal_tolerance(mut self, tol: f64) -> Self {
        self.primal_tolerance = Some(tol);
        self
    }

    pub fn with_dual_tolerance(mut self, tol: f64) -> Self {
        self.dual_tolerance = Some(tol);
        self
    }
}

/// Parameters for the branch-and-cut solver.
#[derive(Debug, Clone, Default)]
pub struct IntoptParams {
    pub message_level: MessageLevel,
    /// Run the MIP presolver. Off by default, which requires an optimal
    /// LP relaxation to be present before solving.
    pub presolve: bool,
    /// Time limit in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Relative MIP gap at which to stop. `None` uses the engine default.
    pub mip_gap: Option<f64>,
    /// Integrality tolerance. `None` uses the engine default.
    pub integer_tolerance: Option<f64>,
    /// Branch-and-bound node limit. `None` means no limit.
    pub node_limit: Option<u64>,
}

impl IntoptParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message_level(mut self, level: MessageLevel) -> Self {
        self.message_level = level;
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = enabled;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_integer_tolerance(mut self, tol: f64) -> Self {
        self.integer_tolerance = Some(tol);
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }
}

/// MPS dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MpsFormat {
    Fixed,
    #[default]
    Free,
}

impl MpsFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            MpsFormat::Fixed => "fixed",
            MpsFormat::Free => "free",
        }
    }
}

/// MPS reader/writer parameters.
#[derive(Debug, Clone, Default)]
pub struct MpsParams {
    /// Replacement for spaces in names when writing. `None` keeps names.
    pub blank: Option<char>,
    /// Coefficients with a smaller magnitude are dropped when reading.
    pub tolerance: f64,
}

impl MpsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blank(mut self, blank: char) -> Self {
        self.blank = Some(blank);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }
}

/// CPLEX LP reader/writer parameters. Reserved; carries no fields yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpxParams;

/// Flags for the native problem format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbFlags(u32);

impl ProbFlags {
    pub const NONE: ProbFlags = ProbFlags(0);
    /// Indented, human-readable output.
    pub const PRETTY: ProbFlags = ProbFlags(1);

    pub fn contains(self, other: ProbFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for ProbFlags {
    type Output = ProbFlags;

    fn bitor(self, rhs: ProbFlags) -> ProbFlags {
        ProbFlags(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_defaults() {
        let params = SimplexParams::new();
        assert_eq!(params.message_level, MessageLevel::All);
        assert_eq!(params.method, SimplexMethod::Primal);
        assert_eq!(params.pricing, Pricing::SteepestEdge);
        assert_eq!(params.ratio_test, RatioTest::Harris);
        assert!(!params.presolve);
        assert!(params.time_limit.is_none());
    }

    #[test]
    fn test_simplex_builder_pattern() {
        let params = SimplexParams::new()
            .with_message_level(MessageLevel::Off)
            .with_method(SimplexMethod::Dual)
            .with_pricing(Pricing::Standard)
            .with_ratio_test(RatioTest::Standard)
            .with_presolve(true)
            .with_iteration_limit(500)
            .with_time_limit(2.5)
            .with_objective_upper_limit(10.0)
            .with_primal_tolerance(1e-9);

        assert_eq!(params.message_level, MessageLevel::Off);
        assert_eq!(params.method, SimplexMethod::Dual);
        assert_eq!(params.pricing, Pricing::Standard);
        assert!(params.presolve);
        assert_eq!(params.iteration_limit, Some(500));
        assert_eq!(params.time_limit, Some(2.5));
        assert_eq!(params.objective_upper_limit, Some(10.0));
        assert_eq!(params.objective_lower_limit, None);
        assert_eq!(params.primal_tolerance, Some(1e-9));
    }

    #[test]
    fn test_intopt_builder_pattern() {
        let params = IntoptParams::new()
            .with_presolve(true)
            .with_mip_gap(0.05)
            .with_node_limit(10);
        assert!(params.presolve);
        assert_eq!(params.mip_gap, Some(0.05));
        assert_eq!(params.node_limit, Some(10));
        assert_eq!(params.message_level, MessageLevel::All);
        assert!(!IntoptParams::default().presolve);
    }

    #[test]
    fn test_message_level_verbosity() {
        assert!(!MessageLevel::Off.is_verbose());
        assert!(!MessageLevel::ErrorsOnly.is_verbose());
        assert!(MessageLevel::Normal.is_verbose());
        assert!(MessageLevel::default().is_verbose());
    }

    #[test]
    fn test_prob_flags() {
        let flags = ProbFlags::NONE | ProbFlags::PRETTY;
        assert!(flags.contains(ProbFlags::PRETTY));
        assert!(!ProbFlags::NONE.contains(ProbFlags::PRETTY));
        assert_eq!(flags.bits(), 1);
    }
}
