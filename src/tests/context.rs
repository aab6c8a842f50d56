use super::test_utils::*;
use crate::{
    error::RuntimeError,
    runner::{Context, Scope},
};

#[test]
fn test_set_and_get() {
    let suite = Scope::new_global().new_enclosed();
    let mut ctx = Context::new(&suite, false);

    assert!(ctx.get("title").is_none());
    ctx.set("title", "addition");
    ctx.set("answer", 6);

    assert_eq!(ctx.string("title").unwrap(), "addition");
    assert_eq!(ctx.number("answer").unwrap(), 6.0);
}

#[test]
fn test_lookup_errors() {
    let suite = Scope::new_global().new_enclosed();
    let mut ctx = Context::new(&suite, false);
    ctx.set("title", "addition");

    let err = ctx.number("missing").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RuntimeError>(),
        Some(RuntimeError::ReferenceError { ident }) if ident == "missing"
    ));

    let err = ctx.number("title").unwrap_err();
    assert_eq!(err.to_string(), "TypeError: `title` is string, expected number");

    let err = ctx.assign("missing", 1).unwrap_err();
    assert_eq!(err.to_string(), "ReferenceError: missing is not defined");
}

#[test]
fn test_set_does_not_touch_suite_variables() {
    let suite = Scope::new_global().new_enclosed();
    suite.define("shared".to_string(), 1.into());

    let mut ctx = Context::new(&suite, false);
    assert_eq!(ctx.number("shared").unwrap(), 1.0);

    // shadows on the per-case scope only
    ctx.set("shared", 2);
    assert_eq!(ctx.number("shared").unwrap(), 2.0);
    assert_eq!(suite.get("shared").unwrap().as_number(), Some(1.0));

    let next = Context::new(&suite, false);
    assert_eq!(next.number("shared").unwrap(), 1.0);
}

#[test]
fn test_assign_writes_through_to_suite_variable() {
    let suite = Scope::new_global().new_enclosed();
    suite.define("counter".to_string(), 0.into());

    let mut ctx = Context::new(&suite, false);
    ctx.assign("counter", 5).unwrap();
    assert_eq!(suite.get("counter").unwrap().as_number(), Some(5.0));
}

#[test]
fn test_fixture_values_reset_between_cases() {
    let trace = new_trace();
    let (first, second) = (trace.clone(), trace.clone());

    let report = run(move |r| {
        r.describe("suite", move |s| {
            s.it("writes", move |ctx| {
                push(&first, &format!("seen: {}", ctx.get("title").is_some()));
                ctx.set("title", "from first case");
                Ok(())
            });
            s.it("reads", move |ctx| {
                push(&second, &format!("seen: {}", ctx.get("title").is_some()));
                Ok(())
            });
        });
    });

    assert_eq!(report.passed(), 2);
    assert_eq!(events(&trace), vec!["seen: false", "seen: false"]);
}

#[test]
fn test_hooks_and_body_share_one_context() {
    let trace = new_trace();
    let seen = trace.clone();

    let report = run(move |r| {
        r.describe("test suite 4", move |s| {
            s.before_each(|ctx| {
                ctx.set("number1", 4);
                ctx.set("number2", 2);
                Ok(())
            });
            s.after_each(move |ctx| {
                push(&seen, &format!("{} = {}", ctx.value("title")?, ctx.value("answer")?));
                Ok(())
            });
            s.it("Add", |ctx| {
                let answer = ctx.number("number1")? + ctx.number("number2")?;
                ctx.set("title", "addition");
                ctx.set("answer", answer);
                ctx.expect(answer).to_be(6)
            });
            s.it("Subtract", |ctx| {
                let answer = ctx.number("number1")? - ctx.number("number2")?;
                ctx.set("title", "subtract");
                ctx.set("answer", answer);
                ctx.expect(answer).to_equal(2)
            });
        });
    });

    assert_eq!(report.passed(), 2);
    assert_eq!(events(&trace), vec!["addition = 6", "subtract = 2"]);
}

#[test]
fn test_suite_variables_are_shared_across_cases() {
    let report = run(|r| {
        r.describe("counter", |s| {
            s.var("count", 0);
            s.before_each(|ctx| {
                let count = ctx.number("count")?;
                ctx.assign("count", count + 1.0)
            });
            s.it("first sees one", |ctx| ctx.expect(ctx.number("count")?).to_be(1));
            s.it("second sees two", |ctx| ctx.expect(ctx.number("count")?).to_be(2));
            s.describe("nested", |s| {
                s.it("nested sees three", |ctx| ctx.expect(ctx.number("count")?).to_be(3));
            });
        });
    });

    assert_eq!(report.passed(), 3, "{report}");
}

#[test]
fn test_expectations_are_recorded_on_context() {
    let suite = Scope::new_global();
    let mut ctx = Context::new(&suite, false);

    ctx.expect(1).to_be(1).unwrap();
    ctx.expect(1).to_be(2).unwrap();
    ctx.expect("abc").not().to_contain("z").unwrap();

    let passed: Vec<bool> = ctx.expectations().iter().map(|r| r.passed).collect();
    assert_eq!(passed, vec![true, false, true]);
}

#[test]
fn test_stop_on_expectation_failure_returns_error() {
    let suite = Scope::new_global();
    let mut ctx = Context::new(&suite, true);

    assert!(ctx.expect(1).to_be(1).is_ok());
    let err = ctx.expect(1).to_be(2).unwrap_err();
    assert_eq!(err.to_string(), "ExpectationFailed: Expected 1 to be 2.");
    assert_eq!(ctx.expectations().len(), 2);
}

#[test]
fn test_scope_chain_lookup() {
    let global = Scope::new_global();
    let suite = global.new_enclosed();
    let fixture = suite.new_enclosed();

    global.define("root".to_string(), "visible".into());
    fixture.define("fixture only".to_string(), 1.into());

    assert_eq!(fixture.get("root").unwrap().as_str(), Some("visible"));
    assert!(suite.get("fixture only").is_none());
    assert!(fixture.assign("root", "rebound".into()));
    assert_eq!(global.get("root").unwrap().as_str(), Some("rebound"));
}
