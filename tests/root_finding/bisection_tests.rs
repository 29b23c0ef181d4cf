//! tests for the bisection root finding algorithm
use calcnum::root_finding::bisection::{bisection, bisection_traced, BisectionCfg, BisectionError};
use calcnum::root_finding::errors::RootFindingError;
use calcnum::root_finding::report::TerminationReason;
use calcnum::trace::{BisectionAction, TraceRecord};
use proptest::prelude::*;

type TestResult = Result<(), BisectionError>;

#[test]
fn finds_sqrt_2() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let cfg = BisectionCfg::new().set_tolerance(0.01)?.set_max_iter(100)?;

    let res = bisection(f, 0.0, 2.0, cfg)?;

    assert!(res.converged);
    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!(res.relative_error <= 0.01);
    assert!((res.root - 1.41421).abs() < 0.01);
    assert_eq!(res.root, 1.4140625);
    assert_eq!(res.iterations, 8);
    assert_eq!(res.algorithm_name, "bisection");
    Ok(())
}

#[test]
fn defaults_match_the_documented_budget() -> TestResult {
    let f = |x: f64| x * x - 2.0;
    let explicit = bisection(f, 0.0, 2.0, BisectionCfg::new().set_max_iter(100)?)?;
    let default  = bisection(f, 0.0, 2.0, BisectionCfg::new())?;

    assert_eq!(explicit, default);
    assert_eq!(default.pair(), (default.root, default.relative_error));
    Ok(())
}

#[test]
fn exact_midpoint_root() -> TestResult {
    let f   = |x: f64| x - 1.0;
    let res = bisection(f, 0.0, 2.0, BisectionCfg::new())?;

    assert_eq!(res.root, 1.0);
    assert_eq!(res.relative_error, 0.0);
    assert_eq!(res.termination_reason, TerminationReason::ExactRoot);
    assert_eq!(res.iterations, 1);
    Ok(())
}

#[test]
fn no_sign_change() -> TestResult {
    let f   = |x: f64| x * x + 1.0;
    let err = bisection(f, -1.0, 1.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::NoSignChange { a, b, fa, fb }
        if a == -1.0 && b == 1.0 && fa == 2.0 && fb == 2.0
    ));
    Ok(())
}

#[test]
fn no_sign_change_runs_no_iterations() -> TestResult {
    let f = |x: f64| x * x + 1.0;
    let mut records: Vec<TraceRecord> = Vec::new();
    let res = bisection_traced(f, -1.0, 1.0, BisectionCfg::new(), &mut records);

    assert!(res.is_err());
    assert!(records.is_empty());
    Ok(())
}

#[test]
fn non_finite_eval() -> TestResult {
    let f   = |x: f64| x.sqrt() - 2.0;
    let err = bisection(f, -1.0, 5.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::Common(RootFindingError::NonFiniteEvaluation { x, fx })
        if x == -1.0 && fx.is_nan()));
    Ok(())
}

#[test]
fn invalid_bounds() -> TestResult {
    let f   = |x: f64| x;
    let err = bisection(f, f64::NAN, 1.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(err, BisectionError::InvalidBounds { .. }));
    Ok(())
}

#[test]
fn rejects_bad_config() {
    assert!(matches!(
        BisectionCfg::new().set_tolerance(1.0),
        Err(ref e) if e.to_string().contains("(0, 1)")
    ));
    assert!(BisectionCfg::new().set_tolerance(0.0).is_err());
    assert!(BisectionCfg::new().set_tolerance(f64::NAN).is_err());
    assert!(BisectionCfg::new().set_max_iter(0).is_err());
}

#[test]
fn iteration_limit_is_not_an_error() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let cfg = BisectionCfg::new().set_tolerance(1e-9)?.set_max_iter(5)?;

    let res = bisection(f, 0.0, 2.0, cfg)?;

    assert!(!res.converged);
    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(res.iterations, 5);
    assert_eq!(res.root, 1.4375);
    assert!(res.relative_error > 1e-9);
    Ok(())
}

#[test]
fn reversed_bracket() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let res = bisection(f, 2.0, 0.0, BisectionCfg::new())?;

    assert!(res.converged);
    assert!((res.root - 2.0_f64.sqrt()).abs() < 0.02);
    assert!(res.root > 0.0 && res.root < 2.0);
    Ok(())
}

#[test]
fn residual_shrinks_with_budget() -> TestResult {
    let f = |x: f64| x * x - 2.0;
    let mut last = f64::INFINITY;

    for cap in [2, 4, 8, 16] {
        let cfg = BisectionCfg::new().set_tolerance(1e-9)?.set_max_iter(cap)?;
        let res = bisection(f, 0.0, 2.0, cfg)?;
        let residual = f(res.root).abs();
        assert!(residual < last, "cap {cap}: {residual} >= {last}");
        last = residual;
    }
    Ok(())
}

#[test]
fn trace_has_one_record_per_iteration() -> TestResult {
    let f = |x: f64| x * x - 2.0;
    let mut records: Vec<TraceRecord> = Vec::new();

    let traced = bisection_traced(f, 0.0, 2.0, BisectionCfg::new(), &mut records)?;
    let plain  = bisection(f, 0.0, 2.0, BisectionCfg::new())?;

    assert_eq!(traced, plain);
    assert_eq!(records.len(), traced.iterations);

    match &records[0] {
        TraceRecord::Bisection { iteration, a, b, midpoint, relative_error, action, .. } => {
            assert_eq!(*iteration, 0);
            assert_eq!((*a, *b, *midpoint), (0.0, 2.0, 1.0));
            assert_eq!(*relative_error, None);
            assert_eq!(*action, BisectionAction::KeepRight);
        }
        other => panic!("unexpected record {other:?}"),
    }
    match &records[1] {
        TraceRecord::Bisection { midpoint, relative_error, action, .. } => {
            assert_eq!(*midpoint, 1.5);
            assert_eq!(*relative_error, Some((1.5_f64 - 1.0) / 1.5));
            assert_eq!(*action, BisectionAction::KeepLeft);
        }
        other => panic!("unexpected record {other:?}"),
    }
    Ok(())
}

proptest! {
    #[test]
    fn root_stays_inside_bracket(
        r  in -10.0..10.0_f64,
        d1 in 0.1..10.0_f64,
        d2 in 0.1..10.0_f64,
        flip in any::<bool>(),
    ) {
        let (lo, hi) = (r - d1, r + d2);
        let (a, b) = if flip { (hi, lo) } else { (lo, hi) };

        let res = bisection(|x: f64| x - r, a, b, BisectionCfg::new()).unwrap();
        prop_assert!(res.root > lo && res.root < hi);
    }
}
