use linopt::{
    BoundsType, ColumnKind, IoOperation, MessageLevel, MpsFormat, MpsParams, Problem, ProbFlags,
    Sense, SimplexParams, SolutionStatus,
};
use std::path::Path;

const TOL: f64 = 1e-10;

fn quiet() -> SimplexParams {
    SimplexParams::new().with_message_level(MessageLevel::Off)
}

fn production_lp() -> Problem {
    let mut lp = Problem::new();
    lp.set_name("sample");
    lp.set_sense(Sense::Maximize);
    lp.add_rows(3);
    for (i, (name, upper)) in [("p", 100.0), ("q", 600.0), ("r", 300.0)].into_iter().enumerate() {
        lp.set_row_name(i + 1, name);
        lp.set_row_bounds(i + 1, BoundsType::Upper, 0.0, upper);
    }
    lp.add_cols(3);
    for (j, (name, cost)) in [("x1", 10.0), ("x2", 6.0), ("x3", 4.0)].into_iter().enumerate() {
        lp.set_col_name(j + 1, name);
        lp.set_col_bounds(j + 1, BoundsType::Lower, 0.0, 0.0);
        lp.set_obj_coef(j + 1, cost);
    }
    lp.load_matrix(
        &[1, 1, 1, 2, 2, 2, 3, 3, 3],
        &[1, 2, 3, 1, 2, 3, 1, 2, 3],
        &[1.0, 1.0, 1.0, 10.0, 4.0, 5.0, 2.0, 2.0, 6.0],
    )
    .unwrap();
    lp
}

/// Solve both problems and compare the outcome column by column name.
fn assert_same_solution(original: &mut Problem, restored: &mut Problem) {
    original.simplex(Some(&quiet())).unwrap();
    restored.simplex(Some(&quiet())).unwrap();

    assert_eq!(restored.status(), original.status());
    assert!((restored.obj_val() - original.obj_val()).abs() <= TOL);
    for j in 1..=original.num_cols() {
        let name = original.col_name(j).to_string();
        let k = restored
            .find_col(&name)
            .unwrap_or_else(|| panic!("column {name} missing after round trip"));
        assert!(
            (restored.col_prim(k) - original.col_prim(j)).abs() <= TOL,
            "column {name}: {} vs {}",
            restored.col_prim(k),
            original.col_prim(j)
        );
    }
}

fn assert_same_structure(original: &Problem, restored: &Problem) {
    assert_eq!(restored.num_rows(), original.num_rows());
    assert_eq!(restored.num_cols(), original.num_cols());
    assert_eq!(restored.num_nz(), original.num_nz());
    for i in 1..=original.num_rows() {
        let k = restored.find_row(original.row_name(i)).unwrap();
        assert_eq!(restored.row_type(k), original.row_type(i));
        assert_eq!(restored.row_ub(k), original.row_ub(i));
    }
    for j in 1..=original.num_cols() {
        let k = restored.find_col(original.col_name(j)).unwrap();
        assert_eq!(restored.col_type(k), original.col_type(j));
        assert_eq!(restored.col_lb(k), original.col_lb(j));
        assert_eq!(restored.obj_coef(k), original.obj_coef(j));
        assert_eq!(restored.col_kind(k), original.col_kind(j));
    }
}

#[test]
fn test_mps_free_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.mps");

    let mut original = production_lp();
    original.write_mps(MpsFormat::Free, None, &path).unwrap();

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Free, None, &path).unwrap();
    // MPS carries no direction
    assert_eq!(restored.sense(), Sense::Minimize);
    restored.set_sense(Sense::Maximize);

    assert_same_structure(&original, &restored);
    assert_same_solution(&mut original, &mut restored);
}

#[test]
fn test_mps_fixed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.mps");

    let mut original = production_lp();
    original.set_col_bounds(3, BoundsType::Double, 0.0, 100.0);
    original.set_col_kind(3, ColumnKind::Integer);
    original.write_mps(MpsFormat::Fixed, None, &path).unwrap();

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Fixed, None, &path).unwrap();
    restored.set_sense(Sense::Maximize);

    assert_same_structure(&original, &restored);
    assert_same_solution(&mut original, &mut restored);
}

#[test]
fn test_mps_reads_any_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.txt");

    let original = {
        let mut lp = production_lp();
        lp.write_mps(MpsFormat::Free, None, &path).unwrap();
        lp
    };
    assert!(path.is_file());

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Free, None, &path).unwrap();
    assert_same_structure(&original, &restored);
}

#[test]
fn test_mps_blank_replaces_spaces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.mps");

    let mut lp = production_lp();
    lp.set_row_name(2, "machine hours");
    let params = MpsParams::new().with_blank('_');
    lp.write_mps(MpsFormat::Free, Some(&params), &path).unwrap();

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Free, None, &path).unwrap();
    assert_eq!(restored.find_row("machine_hours"), Some(2));
}

#[test]
fn test_mps_keeps_problem_and_objective_names() {
    let dir = tempfile::tempdir().unwrap();
    let free = dir.path().join("named.mps");
    let fixed = dir.path().join("named_fixed.mps");

    let mut lp = production_lp();
    lp.set_objective_name("profit");
    lp.write_mps(MpsFormat::Free, None, &free).unwrap();
    lp.write_mps(MpsFormat::Fixed, None, &fixed).unwrap();

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Free, None, &free).unwrap();
    assert_eq!(restored.name(), "sample");
    assert_eq!(restored.objective_name(), "profit");
    assert_same_structure(&lp, &restored);

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Fixed, None, &fixed).unwrap();
    assert_eq!(restored.name(), "sample");
}

#[test]
fn test_mps_unnamed_entities_get_generated_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unnamed.mps");

    let mut lp = production_lp().copy(false);
    lp.write_mps(MpsFormat::Free, None, &path).unwrap();

    let mut restored = Problem::new();
    restored.read_mps(MpsFormat::Free, None, &path).unwrap();
    assert_eq!(restored.row_name(1), "R1");
    assert_eq!(restored.col_name(3), "C3");
}

#[test]
fn test_mps_tolerance_drops_small_coefficients() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.mps");

    let mut lp = production_lp();
    lp.set_mat_row(3, &[1, 2, 3], &[2.0, 2.0, 1e-7]).unwrap();
    lp.write_mps(MpsFormat::Free, None, &path).unwrap();

    let mut exact = Problem::new();
    exact.read_mps(MpsFormat::Free, None, &path).unwrap();
    assert_eq!(exact.num_nz(), 9);

    let mut pruned = Problem::new();
    let params = MpsParams::new().with_tolerance(1e-6);
    pruned.read_mps(MpsFormat::Free, Some(&params), &path).unwrap();
    assert_eq!(pruned.num_nz(), 8);
}

#[test]
fn test_lp_round_trip_keeps_direction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.lp");

    let mut original = production_lp();
    original.set_col_bounds(3, BoundsType::Double, 0.0, 8.0);
    original.set_col_bounds(1, BoundsType::Double, 0.0, 1000.0);
    original.set_col_kind(1, ColumnKind::Integer);
    original.write_lp(None, &path).unwrap();

    let mut restored = Problem::new();
    restored.read_lp(None, &path).unwrap();
    assert_eq!(restored.sense(), Sense::Maximize);

    assert_same_structure(&original, &restored);
    assert_eq!(restored.col_ub(restored.find_col("x3").unwrap()), 8.0);
    assert_same_solution(&mut original, &mut restored);
}

#[test]
fn test_native_round_trip_keeps_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.json");

    let mut original = production_lp();
    original.set_objective_name("Z");
    original.set_obj_constant(1.5);
    original.set_col_kind(2, ColumnKind::Binary);
    original.simplex(Some(&quiet())).unwrap();
    original.write_prob(ProbFlags::PRETTY, &path).unwrap();

    let mut restored = Problem::new();
    restored.read_prob(ProbFlags::NONE, &path).unwrap();

    assert_eq!(restored.name(), "sample");
    assert_eq!(restored.objective_name(), "Z");
    assert_eq!(restored.sense(), Sense::Maximize);
    assert_eq!(restored.obj_constant(), 1.5);
    assert_eq!(restored.col_kind(2), ColumnKind::Binary);
    for i in 1..=3 {
        assert_eq!(restored.row_name(i), original.row_name(i));
        assert_eq!(restored.mat_row(i).to_map(), original.mat_row(i).to_map());
        assert_eq!(restored.row_stat(i), original.row_stat(i));
    }

    // the stored solution comes back without solving
    assert_eq!(restored.status(), SolutionStatus::Optimal);
    assert_eq!(restored.obj_val(), original.obj_val());

    assert_same_solution(&mut original, &mut restored);
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mps");

    let mut lp = production_lp();
    let err = lp.read_mps(MpsFormat::Free, None, &missing).unwrap_err();
    assert_eq!(err.operation, IoOperation::Read);
    assert_eq!(err.path, missing);
    assert_eq!(lp.num_rows(), 3);

    let err = lp.read_lp(None, &missing).unwrap_err();
    assert_eq!(err.code(), "IO_READ_FAILED");
    assert_eq!(lp.name(), "sample");
}

#[test]
fn test_read_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "not a problem").unwrap();

    let mut lp = production_lp();
    let err = lp.read_prob(ProbFlags::NONE, &path).unwrap_err();
    assert_eq!(err.operation, IoOperation::Read);
    assert_eq!(lp.num_cols(), 3);
}

#[test]
fn test_write_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere").join("sample.lp");

    let mut lp = production_lp();
    let err = lp.write_lp(None, &path).unwrap_err();
    assert_eq!(err.operation, IoOperation::Write);
    assert!(!Path::new(&path).exists());

    let err = lp.write_prob(ProbFlags::NONE, &path).unwrap_err();
    assert_eq!(err.code(), "IO_WRITE_FAILED");
}
