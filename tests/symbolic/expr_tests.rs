use approx::assert_relative_eq;
use calcnum::symbolic::{parse, Expr, ExprError};

type TestResult = Result<(), ExprError>;

/// central difference with a small step, for checking exact derivatives
fn central(f: &Expr, x: f64) -> Result<f64, ExprError> {
    let h = 1e-6;
    Ok((f.eval_at("x", x + h)? - f.eval_at("x", x - h)?) / (2.0 * h))
}

#[test]
fn derivatives_agree_with_differences() -> TestResult {
    let sources = [
        "sin(x) * x^2",
        "sqrt(x) / (1 + x)",
        "tan(x)",
        "2^x",
        "x^x",
        "e^(-x) - ln(x)",
        "cos(3x + 1)",
        "abs(x - 2)",
    ];
    for src in sources {
        let f = parse(src)?;
        let d = f.diff("x");
        for x in [0.4, 0.7, 1.3] {
            let exact = d.eval_at("x", x)?;
            assert_relative_eq!(exact, central(&f, x)?, max_relative = 1e-5);
        }
    }
    Ok(())
}

#[test]
fn newton_exercise_derivative() -> TestResult {
    let f  = parse("e^(-x) - ln(x)")?;
    let df = f.diff("x");
    assert_relative_eq!(df.eval_at("x", 1.0)?, -(-1.0_f64).exp() - 1.0, epsilon = 1e-15);
    Ok(())
}

#[test]
fn polynomial_derivatives_terminate() -> TestResult {
    let f = parse("x^3 - 2x + 7")?;
    assert_eq!(f.nth_diff("x", 3), Expr::constant(6.0));
    assert_eq!(f.nth_diff("x", 4), Expr::zero());
    Ok(())
}

#[test]
fn display_parses_back() -> TestResult {
    for src in ["x^2 - 2", "cos(x) - x", "(x + 1) / (x - 1)", "-x^2 + e^x", "2^-x"] {
        let e    = parse(src)?;
        let back = parse(&e.to_string())?;
        for x in [0.3, 2.5] {
            assert_eq!(e.eval_at("x", x)?, back.eval_at("x", x)?, "{src} vs {e}");
        }
    }
    Ok(())
}

#[test]
fn substitute_then_simplify_folds_to_number() -> TestResult {
    let e = parse("x^2 + 3x")?;
    let s = e.substitute("x", &Expr::constant(2.0)).simplify();
    assert_eq!(s, Expr::constant(10.0));
    Ok(())
}

#[test]
fn parameters_survive_differentiation() -> TestResult {
    let e = parse("a * x^2")?;
    assert_eq!(e.free_vars().into_iter().collect::<Vec<_>>(), vec!["a", "x"]);

    let d = e.diff("x").substitute("x", &Expr::constant(3.0)).simplify();
    assert_eq!(d, Expr::constant(6.0) * Expr::var("a"));
    assert!(matches!(d.eval_at("x", 0.0), Err(ExprError::UnboundSymbol { ref name }) if name == "a"));
    Ok(())
}

#[test]
fn closures_from_expressions() -> TestResult {
    let e = parse("x^2 - 2")?;
    let f = e.to_fn("x");
    assert_eq!(f(2.0), 2.0);
    assert_eq!(f(0.0), -2.0);
    Ok(())
}

#[test]
fn repeated_product_rule_stays_compact() -> TestResult {
    // d^n/dx^n e^x sin(x) = 2^(n/2) e^x sin(x + n pi/4)
    let f   = parse("exp(x) * sin(x)")?;
    let d10 = f.nth_diff("x", 10);

    assert!(d10.to_string().len() < 100, "{d10}");
    for x in [-0.4_f64, 0.3, 1.1] {
        let expected = 32.0 * x.exp() * x.cos();
        assert_relative_eq!(d10.eval_at("x", x)?, expected, max_relative = 1e-12);
    }

    let lengths: Vec<usize> = (1..=12).map(|k| f.nth_diff("x", k).to_string().len()).collect();
    assert!(lengths.iter().all(|&n| n < 100), "{lengths:?}");
    Ok(())
}
