use approx::assert_relative_eq;
use calcnum::differentiation::errors::DerivativeError;
use calcnum::differentiation::{
    derivative, derivative_traced, DerivativeEngine, DerivativeValue, FiniteDifference,
    FiniteDifferenceCfg, Function, Mode, SymbolicFunction,
};
use calcnum::symbolic::{parse, Expr};
use calcnum::trace::{NoTrace, TraceRecord, TraceValue};

type TestResult = Result<(), DerivativeError>;

#[test]
fn evaluation_count_doubles_per_order() -> TestResult {
    let cfg = FiniteDifferenceCfg::new();
    for order in 0..=8 {
        let mut fd = FiniteDifference::new(f64::exp, &cfg);
        fd.estimate(0.5, order)?;
        let expected = if order == 0 { 1 } else { 1 << order };
        assert_eq!(fd.evaluations(), expected, "order {order}");
    }
    Ok(())
}

#[test]
fn memo_cuts_calls_without_changing_values() -> TestResult {
    // exact binary step so shifted centers coincide
    let plain = FiniteDifferenceCfg::new().set_step(0.25)?;
    let memo  = plain.with_memo(true);

    let mut a = FiniteDifference::new(f64::exp, &plain);
    let mut b = FiniteDifference::new(f64::exp, &memo);
    let va = a.estimate(0.0, 4)?;
    let vb = b.estimate(0.0, 4)?;

    assert_eq!(va.to_bits(), vb.to_bits());
    assert_eq!(a.evaluations(), 16);
    assert_eq!(b.evaluations(), 5);
    Ok(())
}

#[test]
fn symbolic_and_numeric_agree_on_cubic() -> TestResult {
    let cfg = FiniteDifferenceCfg::new().set_step(1e-3)?;

    let symbolic = Function::parse("x^3")?;
    let numeric  = Function::numeric(|x: f64| x * x * x);

    let exact = derivative(&symbolic, 2.0, 2, &cfg)?;
    assert_eq!(exact, DerivativeValue::Number(12.0));

    let approx = derivative(&numeric, 2.0, 2, &cfg)?.as_number().unwrap();
    assert_relative_eq!(approx, 12.0, max_relative = 1e-4);
    Ok(())
}

#[test]
fn order_zero_is_the_function_value() -> TestResult {
    let cfg = FiniteDifferenceCfg::new();
    let f   = Function::parse("cos(x) - x")?;
    let g   = Function::numeric(|x: f64| x.cos() - x);

    for c in [-1.5, 0.0, 0.739, 2.0] {
        assert_eq!(derivative(&f, c, 0, &cfg)?, DerivativeValue::Number(c.cos() - c));
        assert_eq!(derivative(&g, c, 0, &cfg)?, DerivativeValue::Number(c.cos() - c));
    }
    Ok(())
}

#[test]
fn numeric_order_is_capped() -> TestResult {
    let cfg = FiniteDifferenceCfg::new().set_max_order(3)?;
    let f   = Function::numeric(f64::sin);

    let err = derivative(&f, 0.0, 4, &cfg).unwrap_err();
    assert!(matches!(err, DerivativeError::OrderTooLarge { order: 4, max: 3 }));

    // the exact path has no such limit
    let s = Function::parse("sin(x)")?;
    assert_eq!(derivative(&s, 0.0, 8, &cfg)?, DerivativeValue::Number(0.0));
    Ok(())
}

#[test]
fn residual_parameters_stay_symbolic() -> TestResult {
    let f = Function::from(SymbolicFunction::with_var(parse("a * x^2")?, "x"));
    let d = derivative(&f, 3.0, 1, &FiniteDifferenceCfg::new())?;

    assert_eq!(d, DerivativeValue::Expression(Expr::constant(6.0) * Expr::var("a")));
    assert_eq!(d.as_number(), None);
    assert_eq!(d.to_trace(), TraceValue::Expression("6 * a".to_string()));
    Ok(())
}

#[test]
fn domain_errors_surface() {
    let cfg = FiniteDifferenceCfg::new();

    let f = Function::parse("ln(x)").unwrap();
    let err = derivative(&f, 0.0, 1, &cfg).unwrap_err();
    assert!(matches!(err, DerivativeError::NonFiniteDerivative { order: 1, .. }));

    let g = Function::numeric(f64::ln);
    let err = derivative(&g, 0.0, 1, &cfg).unwrap_err();
    assert!(matches!(err, DerivativeError::NonFiniteEvaluation { .. }));
}

#[test]
fn rejects_bad_config() {
    assert!(matches!(
        FiniteDifferenceCfg::new().set_step(0.0),
        Err(DerivativeError::InvalidStep { .. })
    ));
    assert!(FiniteDifferenceCfg::new().set_step(f64::INFINITY).is_err());
    assert!(matches!(
        FiniteDifferenceCfg::new().set_max_order(0),
        Err(DerivativeError::InvalidMaxOrder { got: 0 })
    ));
}

#[test]
fn engine_shares_evaluations_across_orders() -> TestResult {
    let f   = Function::numeric(f64::exp);
    let cfg = FiniteDifferenceCfg::new().set_step(1e-2)?;
    let mut engine = DerivativeEngine::new(&f, &cfg);

    assert_eq!(engine.mode(), Mode::Numeric);
    for order in 0..=3 {
        engine.derivative(0.0, order, &mut NoTrace)?;
    }
    assert_eq!(engine.evaluations(), 1 + 2 + 4 + 8);

    let s = Function::parse("exp(x)")?;
    let mut engine = DerivativeEngine::new(&s, &cfg);
    engine.derivative(0.0, 3, &mut NoTrace)?;
    assert_eq!(engine.evaluations(), 0);
    Ok(())
}

#[test]
fn engine_differentiates_once_per_new_order() -> TestResult {
    let f   = Function::parse("exp(x) * sin(x)")?;
    let cfg = FiniteDifferenceCfg::new();
    let mut engine = DerivativeEngine::new(&f, &cfg);

    for order in 0..=6 {
        engine.derivative(0.5, order, &mut NoTrace)?;
    }
    assert_eq!(engine.differentiations(), 6);

    // lower orders and repeats come from the cache
    let again = engine.derivative(0.5, 3, &mut NoTrace)?;
    assert_eq!(engine.differentiations(), 6);
    assert_eq!(again, derivative(&f, 0.5, 3, &cfg)?);

    let n = Function::numeric(f64::exp);
    assert_eq!(DerivativeEngine::new(&n, &cfg).differentiations(), 0);
    Ok(())
}

#[test]
fn traced_derivative_records_mode() -> TestResult {
    let f = Function::numeric(f64::exp);
    let mut records: Vec<TraceRecord> = Vec::new();

    let traced = derivative_traced(&f, 1.0, 1, &FiniteDifferenceCfg::new(), &mut records)?;
    let plain  = derivative(&f, 1.0, 1, &FiniteDifferenceCfg::new())?;

    assert_eq!(traced, plain);
    assert_eq!(records.len(), 1);
    match &records[0] {
        TraceRecord::Derivative { order, center, mode, .. } => {
            assert_eq!((*order, *center, *mode), (1, 1.0, "numeric"));
        }
        other => panic!("unexpected record {other:?}"),
    }
    Ok(())
}
