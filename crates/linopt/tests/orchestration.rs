//! Solve and I/O orchestration against a scripted engine.

use linopt::{
    BasicSolution, BoundsType, ColumnKind, Engine, EngineReport, FormatRequest, IntoptParams,
    IoOperation, MessageLevel, MipSolution, Model, MpsFormat, Problem, ProbFlags, SimplexMethod,
    SimplexParams, SolutionStatus, SolveError, SolveRequest,
};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// What the scripted engine saw.
#[derive(Debug, Default)]
struct Journal {
    requests: Vec<String>,
    methods: Vec<SimplexMethod>,
    resets: usize,
}

/// Engine that replays queued reports and records every call.
struct ScriptedEngine {
    replies: VecDeque<EngineReport>,
    journal: Arc<Mutex<Journal>>,
    read_result: Option<Model>,
}

impl ScriptedEngine {
    fn new(replies: Vec<EngineReport>) -> (Self, Arc<Mutex<Journal>>) {
        let journal = Arc::new(Mutex::new(Journal::default()));
        let engine = Self {
            replies: replies.into(),
            journal: Arc::clone(&journal),
            read_result: None,
        };
        (engine, journal)
    }
}

impl Engine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn spawn(&self) -> Box<dyn Engine> {
        Box::new(ScriptedEngine {
            replies: VecDeque::new(),
            journal: Arc::new(Mutex::new(Journal::default())),
            read_result: None,
        })
    }

    fn reset(&mut self) {
        self.journal.lock().unwrap().resets += 1;
    }

    fn solve(&mut self, _model: &Model, request: &SolveRequest) -> EngineReport {
        let mut journal = self.journal.lock().unwrap();
        journal.requests.push(request.kind().to_string());
        if let SolveRequest::Simplex(params) | SolveRequest::Exact(params) = request {
            journal.methods.push(params.method);
        }
        self.replies.pop_front().unwrap_or_default()
    }

    fn read(&mut self, _request: &FormatRequest, _path: &Path) -> Result<Model, String> {
        self.read_result
            .take()
            .ok_or_else(|| "syntax error on line 3".to_string())
    }

    fn write(&mut self, _model: &Model, _request: &FormatRequest, _path: &Path) -> Result<(), String> {
        Err("disk full".to_string())
    }
}

fn optimal_basic(objective: f64) -> BasicSolution {
    BasicSolution {
        status: SolutionStatus::Optimal,
        primal_status: SolutionStatus::Feasible,
        dual_status: SolutionStatus::Feasible,
        objective,
        row_primal: vec![1.0],
        row_dual: vec![0.5],
        col_primal: vec![1.0, 0.0],
        col_dual: vec![0.0, 2.0],
        ..BasicSolution::default()
    }
}

fn small_problem(engine: ScriptedEngine) -> Problem {
    let mut lp = Problem::with_engine(Box::new(engine));
    lp.add_rows(1);
    lp.add_cols(2);
    lp.set_row_bounds(1, BoundsType::Lower, 1.0, 0.0);
    lp.set_col_bounds(1, BoundsType::Lower, 0.0, 0.0);
    lp.set_col_bounds(2, BoundsType::Double, 0.0, 4.0);
    lp.set_mat_row(1, &[1, 2], &[1.0, 1.0]).unwrap();
    lp
}

fn quiet() -> SimplexParams {
    SimplexParams::new().with_message_level(MessageLevel::Off)
}

#[test]
fn test_defined_state_is_success() {
    let infeasible = BasicSolution {
        status: SolutionStatus::NoFeasible,
        ..BasicSolution::default()
    };
    let (engine, _) = ScriptedEngine::new(vec![EngineReport::basic(0, infeasible)]);
    let mut lp = small_problem(engine);

    assert_eq!(lp.simplex(None), Ok(()));
    assert_eq!(lp.status(), SolutionStatus::NoFeasible);
}

#[test]
fn test_solution_is_stored() {
    let (engine, journal) = ScriptedEngine::new(vec![EngineReport::basic(0, optimal_basic(1.0))]);
    let mut lp = small_problem(engine);

    lp.simplex(Some(&quiet())).unwrap();
    assert_eq!(lp.status(), SolutionStatus::Optimal);
    assert_eq!(lp.prim_stat(), SolutionStatus::Feasible);
    assert_eq!(lp.obj_val(), 1.0);
    assert_eq!(lp.row_dual(1), 0.5);
    assert_eq!(lp.col_prim(1), 1.0);
    assert_eq!(lp.col_dual(2), 2.0);
    assert_eq!(lp.mip_status(), SolutionStatus::Undefined);
    assert_eq!(journal.lock().unwrap().requests, vec!["simplex"]);
}

#[test]
fn test_every_code_maps_to_its_error() {
    for &expected in SolveError::all() {
        let (engine, _) = ScriptedEngine::new(vec![EngineReport::failed(expected)]);
        let mut lp = small_problem(engine);
        assert_eq!(lp.simplex(Some(&quiet())), Err(expected));
    }
}

#[test]
fn test_unknown_code_is_solver_failure() {
    let report = EngineReport {
        code: 42,
        ..EngineReport::default()
    };
    let (engine, _) = ScriptedEngine::new(vec![report]);
    let mut lp = small_problem(engine);
    assert_eq!(lp.exact(None), Err(SolveError::SolverFailure));
}

#[test]
fn test_limit_failure_still_stores_last_iterate() {
    let feasible = BasicSolution {
        status: SolutionStatus::Feasible,
        objective: 3.0,
        ..BasicSolution::default()
    };
    let code = SolveError::IterationLimitExceeded.return_code();
    let (engine, _) = ScriptedEngine::new(vec![EngineReport::basic(code, feasible)]);
    let mut lp = small_problem(engine);

    assert_eq!(lp.simplex(None), Err(SolveError::IterationLimitExceeded));
    assert_eq!(lp.status(), SolutionStatus::Feasible);
    assert_eq!(lp.obj_val(), 3.0);
}

#[test]
fn test_exact_sends_exact_request() {
    let (engine, journal) = ScriptedEngine::new(vec![EngineReport::basic(0, optimal_basic(1.0))]);
    let mut lp = small_problem(engine);
    lp.exact(Some(&quiet())).unwrap();
    assert_eq!(journal.lock().unwrap().requests, vec!["exact"]);
}

#[test]
fn test_dual_primal_falls_back_to_primal() {
    let (engine, journal) = ScriptedEngine::new(vec![
        EngineReport::failed(SolveError::SingularMatrix),
        EngineReport::basic(0, optimal_basic(2.0)),
    ]);
    let mut lp = small_problem(engine);

    let params = quiet().with_method(SimplexMethod::DualPrimal);
    assert_eq!(lp.simplex(Some(&params)), Ok(()));
    assert_eq!(lp.obj_val(), 2.0);
    assert_eq!(
        journal.lock().unwrap().methods,
        vec![SimplexMethod::Dual, SimplexMethod::Primal]
    );
}

#[test]
fn test_dual_primal_keeps_limit_failures() {
    let (engine, journal) = ScriptedEngine::new(vec![
        EngineReport::failed(SolveError::TimeLimitExceeded),
        EngineReport::basic(0, optimal_basic(2.0)),
    ]);
    let mut lp = small_problem(engine);

    let params = quiet().with_method(SimplexMethod::DualPrimal);
    assert_eq!(lp.simplex(Some(&params)), Err(SolveError::TimeLimitExceeded));
    assert_eq!(journal.lock().unwrap().methods, vec![SimplexMethod::Dual]);
}

#[test]
fn test_dual_primal_success_does_not_rerun() {
    let (engine, journal) = ScriptedEngine::new(vec![EngineReport::basic(0, optimal_basic(2.0))]);
    let mut lp = small_problem(engine);

    let params = quiet().with_method(SimplexMethod::DualPrimal);
    lp.simplex(Some(&params)).unwrap();
    assert_eq!(journal.lock().unwrap().methods, vec![SimplexMethod::Dual]);
}

#[test]
fn test_empty_model_fails_without_engine_call() {
    let (engine, journal) = ScriptedEngine::new(vec![]);
    let mut lp = Problem::with_engine(Box::new(engine));
    assert_eq!(lp.simplex(None), Err(SolveError::SolverFailure));
    lp.add_rows(2);
    assert_eq!(lp.exact(None), Err(SolveError::SolverFailure));
    assert!(journal.lock().unwrap().requests.is_empty());
}

#[test]
fn test_collapsed_double_bounds_are_invalid() {
    let (engine, journal) = ScriptedEngine::new(vec![]);
    let mut lp = small_problem(engine);
    lp.set_col_bounds(2, BoundsType::Double, 4.0, 4.0);
    assert_eq!(lp.simplex(None), Err(SolveError::InvalidBounds));
    assert!(journal.lock().unwrap().requests.is_empty());
}

#[test]
fn test_intopt_requires_root_lp_without_presolve() {
    let (engine, journal) = ScriptedEngine::new(vec![]);
    let mut lp = small_problem(engine);
    lp.set_col_kind(1, ColumnKind::Integer);

    assert_eq!(lp.intopt(None), Err(SolveError::RootLpNotProvided));
    assert!(journal.lock().unwrap().requests.is_empty());
}

#[test]
fn test_intopt_with_presolve_skips_root_check() {
    let mip = MipSolution {
        status: SolutionStatus::Optimal,
        objective: 5.0,
        row_values: vec![1.0],
        col_values: vec![1.0, 0.0],
    };
    let (engine, journal) = ScriptedEngine::new(vec![EngineReport::mip(0, mip)]);
    let mut lp = small_problem(engine);
    lp.set_col_kind(1, ColumnKind::Integer);

    let params = IntoptParams::new().with_presolve(true);
    assert_eq!(lp.intopt(Some(&params)), Ok(()));
    assert_eq!(lp.mip_status(), SolutionStatus::Optimal);
    assert_eq!(lp.mip_obj_val(), 5.0);
    assert_eq!(lp.mip_col_val(1), 1.0);
    assert_eq!(journal.lock().unwrap().requests, vec!["intopt"]);
}

#[test]
fn test_intopt_leaves_basic_track_alone() {
    let mip = MipSolution {
        status: SolutionStatus::Feasible,
        objective: 9.0,
        ..MipSolution::default()
    };
    let (engine, _) = ScriptedEngine::new(vec![
        EngineReport::basic(0, optimal_basic(1.0)),
        EngineReport::mip(SolveError::MipGapReached.return_code(), mip),
    ]);
    let mut lp = small_problem(engine);
    lp.set_col_kind(1, ColumnKind::Integer);

    lp.simplex(None).unwrap();
    assert_eq!(lp.intopt(None), Err(SolveError::MipGapReached));
    assert_eq!(lp.mip_status(), SolutionStatus::Feasible);
    assert_eq!(lp.mip_obj_val(), 9.0);
    assert_eq!(lp.status(), SolutionStatus::Optimal);
    assert_eq!(lp.obj_val(), 1.0);
}

#[test]
fn test_failed_intopt_clears_previous_integer_values() {
    let solved = MipSolution {
        status: SolutionStatus::Optimal,
        objective: 7.0,
        row_values: vec![3.0],
        col_values: vec![3.0, 0.0],
    };
    let infeasible = MipSolution {
        status: SolutionStatus::NoFeasible,
        ..MipSolution::default()
    };
    let (engine, _) = ScriptedEngine::new(vec![
        EngineReport::mip(0, solved),
        EngineReport::mip(SolveError::NoPrimalFeasible.return_code(), infeasible),
    ]);
    let mut lp = small_problem(engine);
    lp.set_col_kind(1, ColumnKind::Integer);
    let params = IntoptParams::new().with_presolve(true);

    lp.intopt(Some(&params)).unwrap();
    assert_eq!(lp.mip_col_val(1), 3.0);

    assert_eq!(lp.intopt(Some(&params)), Err(SolveError::NoPrimalFeasible));
    assert_eq!(lp.mip_status(), SolutionStatus::NoFeasible);
    assert_eq!(lp.mip_obj_val(), 0.0);
    assert_eq!(lp.mip_row_val(1), 0.0);
    assert_eq!(lp.mip_col_val(1), 0.0);
}

#[test]
fn test_unreadable_integer_solution_is_undefined() {
    let solved = MipSolution {
        status: SolutionStatus::Optimal,
        objective: 7.0,
        row_values: vec![3.0],
        col_values: vec![3.0, 0.0],
    };
    let (engine, _) = ScriptedEngine::new(vec![
        EngineReport::mip(0, solved),
        EngineReport::mip(SolveError::SolverFailure.return_code(), MipSolution::default()),
    ]);
    let mut lp = small_problem(engine);
    let params = IntoptParams::new().with_presolve(true);

    lp.intopt(Some(&params)).unwrap();
    assert_eq!(lp.intopt(Some(&params)), Err(SolveError::SolverFailure));
    assert_eq!(lp.mip_status(), SolutionStatus::Undefined);
    assert_eq!(lp.mip_col_val(1), 0.0);
}

#[test]
fn test_intopt_rejects_fractional_integer_bounds() {
    let (engine, _) = ScriptedEngine::new(vec![EngineReport::basic(0, optimal_basic(1.0))]);
    let mut lp = small_problem(engine);
    lp.simplex(None).unwrap();

    lp.set_col_bounds(2, BoundsType::Double, 0.0, 2.5);
    lp.set_col_kind(2, ColumnKind::Integer);
    assert_eq!(lp.intopt(None), Err(SolveError::InvalidBounds));
}

#[test]
fn test_failed_read_leaves_problem_untouched() {
    let (engine, _) = ScriptedEngine::new(vec![]);
    let mut lp = small_problem(engine);
    lp.set_name("kept");

    let err = lp
        .read_mps(MpsFormat::Free, None, "model.mps")
        .unwrap_err();
    assert_eq!(err.operation, IoOperation::Read);
    assert_eq!(err.path, Path::new("model.mps"));
    assert_eq!(err.to_string(), "read model.mps: syntax error on line 3");
    assert_eq!(err.code(), "IO_READ_FAILED");

    assert_eq!(lp.name(), "kept");
    assert_eq!(lp.num_rows(), 1);
    assert_eq!(lp.num_cols(), 2);
    assert_eq!(lp.num_nz(), 2);
}

#[test]
fn test_failed_native_read_leaves_problem_untouched() {
    let (engine, journal) = ScriptedEngine::new(vec![]);
    let mut lp = small_problem(engine);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = lp.read_prob(ProbFlags::NONE, &path).unwrap_err();
    assert_eq!(err.operation, IoOperation::Read);
    assert_eq!(lp.num_cols(), 2);
    assert_eq!(journal.lock().unwrap().resets, 0);
}

#[test]
fn test_successful_read_replaces_model() {
    let (mut engine, _) = ScriptedEngine::new(vec![]);
    let mut replacement = Model::new();
    replacement.add_rows(5);
    replacement.set_name("from file");
    engine.read_result = Some(replacement);

    let mut lp = small_problem(engine);
    lp.read_lp(None, "model.lp").unwrap();
    assert_eq!(lp.name(), "from file");
    assert_eq!(lp.num_rows(), 5);
    assert_eq!(lp.num_cols(), 0);
}

#[test]
fn test_write_failure_is_tagged() {
    let (engine, _) = ScriptedEngine::new(vec![]);
    let mut lp = small_problem(engine);
    let err = lp.write_lp(None, "out.lp").unwrap_err();
    assert_eq!(err.operation, IoOperation::Write);
    assert_eq!(err.to_string(), "write out.lp: disk full");
}

#[test]
fn test_erase_resets_engine() {
    let (engine, journal) = ScriptedEngine::new(vec![]);
    let mut lp = small_problem(engine);
    lp.erase();
    assert_eq!(journal.lock().unwrap().resets, 1);
    assert_eq!(lp.num_rows(), 0);
}
