use approx::assert_relative_eq;
use calcnum::integration::errors::QuadratureError;
use calcnum::integration::{integrate, integrate_named, integrate_report, integrate_traced, Rule};
use calcnum::trace::TraceRecord;
use std::f64::consts::E;

type TestResult = Result<(), QuadratureError>;

#[test]
fn midpoint_beats_left_and_right() -> TestResult {
    let f     = |x: f64| x * x;
    let exact = 1.0 / 3.0;

    let mid   = integrate(f, 0.0, 1.0, 20, Rule::Midpoint)?;
    let left  = integrate(f, 0.0, 1.0, 20, Rule::Left)?;
    let right = integrate(f, 0.0, 1.0, 20, Rule::Right)?;

    assert!((mid - exact).abs() < 0.01);
    assert!((left - exact).abs() > (mid - exact).abs());
    assert!((right - exact).abs() > (mid - exact).abs());
    assert_relative_eq!(left, 0.30875, epsilon = 1e-12);
    assert_relative_eq!(right, 0.35875, epsilon = 1e-12);
    Ok(())
}

#[test]
fn convergence_orders() -> TestResult {
    let exact = E - 1.0;
    let err = |rule: Rule, n: usize| -> Result<f64, QuadratureError> {
        Ok((integrate(f64::exp, 0.0, 1.0, n, rule)? - exact).abs())
    };

    // first order: halving h halves the error
    let ratio = err(Rule::Left, 10)? / err(Rule::Left, 20)?;
    assert!(ratio > 1.8 && ratio < 2.2, "left ratio {ratio}");
    let ratio = err(Rule::Right, 10)? / err(Rule::Right, 20)?;
    assert!(ratio > 1.8 && ratio < 2.2, "right ratio {ratio}");

    // second order: halving h quarters the error
    let ratio = err(Rule::Midpoint, 10)? / err(Rule::Midpoint, 20)?;
    assert!(ratio > 3.8 && ratio < 4.2, "midpoint ratio {ratio}");
    Ok(())
}

#[test]
fn midpoint_is_exact_for_lines() -> TestResult {
    let value = integrate(|x: f64| 3.0 * x + 1.0, 0.0, 2.0, 7, Rule::Midpoint)?;
    assert_relative_eq!(value, 8.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn reversed_bounds_flip_sign() -> TestResult {
    let forward  = integrate(|x: f64| x * x, 0.0, 1.0, 20, Rule::Midpoint)?;
    let backward = integrate(|x: f64| x * x, 1.0, 0.0, 20, Rule::Midpoint)?;
    assert_relative_eq!(backward, -forward, epsilon = 1e-12);
    Ok(())
}

#[test]
fn named_rules() -> TestResult {
    let f = |x: f64| x * x;
    assert_eq!(
        integrate_named(f, 0.0, 1.0, 20, "midpoint")?,
        integrate(f, 0.0, 1.0, 20, Rule::Midpoint)?
    );
    assert_eq!(
        integrate_named(f, 0.0, 1.0, 20, "left")?,
        integrate(f, 0.0, 1.0, 20, Rule::Left)?
    );
    Ok(())
}

#[test]
fn unknown_rule_samples_nothing() {
    let mut calls = 0;
    let res = integrate_named(|x: f64| { calls += 1; x }, 0.0, 1.0, 10, "trapezoid");

    assert!(matches!(res, Err(QuadratureError::UnknownRule { ref got }) if got == "trapezoid"));
    assert_eq!(calls, 0);
}

#[test]
fn rejects_bad_input() {
    let f = |x: f64| x;
    assert!(matches!(
        integrate(f, 0.0, 1.0, 0, Rule::Left),
        Err(QuadratureError::InvalidSubintervals { got: 0 })
    ));
    assert!(matches!(
        integrate(f, f64::NAN, 1.0, 4, Rule::Left),
        Err(QuadratureError::InvalidBounds { .. })
    ));
    assert!(matches!(
        integrate(f64::ln, 0.0, 1.0, 4, Rule::Left),
        Err(QuadratureError::NonFiniteEvaluation { x, .. }) if x == 0.0
    ));
    // the right rule never samples x = a
    assert!(integrate(f64::ln, 0.0, 1.0, 4, Rule::Right).is_ok());
}

#[test]
fn report_and_trace() -> TestResult {
    let f = |x: f64| x.sin();
    let mut records: Vec<TraceRecord> = Vec::new();

    let traced = integrate_traced(f, 0.0, 1.0, 8, Rule::Right, &mut records)?;
    let report = integrate_report(f, 0.0, 1.0, 8, Rule::Right)?;

    assert_eq!(traced, report);
    assert_eq!(report.n, 8);
    assert_eq!(report.h, 0.125);
    assert_eq!(report.evaluations, 8);
    assert_eq!(records.len(), 8);

    match records.last() {
        Some(TraceRecord::Quadrature { index, x, partial_sum, .. }) => {
            assert_eq!(*index, 7);
            assert_eq!(*x, 1.0);
            assert_eq!(*partial_sum, report.value);
        }
        other => panic!("unexpected record {other:?}"),
    }
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let f = |x: f64| x.sin() * x.exp() + 1.0 / (1.0 + x * x);

    for rule in Rule::ALL {
        for (a, b, n) in [(0.0, 1.0, 7), (-2.5, 3.0, 1000), (4.0, -1.0, 33)] {
            let first  = integrate(f, a, b, n, rule)?;
            let second = integrate(f, a, b, n, rule)?;
            assert_eq!(first.to_bits(), second.to_bits(), "{rule} on [{a}, {b}], n={n}");

            let mut records: Vec<TraceRecord> = Vec::new();
            let traced = integrate_traced(f, a, b, n, rule, &mut records)?;
            assert_eq!(traced.value.to_bits(), first.to_bits());
        }
    }
    Ok(())
}
