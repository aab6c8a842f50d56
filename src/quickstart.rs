//! Quick start: the basic shapes of a describe/it test file.
//!
//! Matchers available on `ctx.expect(actual)`:
//!
//! | matcher                       | passes when                                  |
//! |-------------------------------|----------------------------------------------|
//! | `to_be(expected)`             | same primitive value, or the same composite  |
//! | `to_equal(expected)`          | recursively equal, composites included       |
//! | `to_be_less_than(expected)`   | `actual < expected`, both numbers            |
//! | `to_be_greater_than(expected)`| `actual > expected`, both numbers            |
//! | `to_contain(expected)`        | substring of a string, or element of a list  |
//! | `to_be_null()`                | `actual` is nil                              |
//!
//! `to_be` can only compare data, while `to_equal` also compares objects
//! key by key. Every matcher can be inverted with `.not()`, e.g.
//! `ctx.expect(1).not().to_be(2)`.

use crate::{log_stdout, suite::Registry, value::Value};

/// Registers every quick-start suite.
pub fn register(registry: &mut Registry) {
    basic_structure(registry);
    setup_and_teardown(registry);
    nesting_and_disabling(registry);
    arithmetic(registry);
    object_equality(registry);
}

/// The most basic structure: one describe and one it.
fn basic_structure(registry: &mut Registry) {
    registry.describe("test suite 1", |s| {
        s.it("test case 1", |_| {
            log_stdout!("test suite 1: test case 1");
            Ok(())
        });
    });
}

/// Suite-level variables live as long as the suite and are shared by every
/// case in it. Values set on the context in `before_each` are fresh for
/// each case.
fn setup_and_teardown(registry: &mut Registry) {
    registry.describe("test suite 2", |s| {
        s.var(
            "suiteVar",
            "This is a suite var for test suite 2, shared by every case in it.",
        );

        s.before_each(|ctx| {
            ctx.set(
                "contextVar",
                "This is a context var for test suite 2, set again before every case.",
            );
            log_stdout!("test suite 2: This is a test setup function that runs before every test case.");
            Ok(())
        });

        s.after_each(|_| {
            log_stdout!("test suite 2: This is a test teardown function that will run after every test case.");
            Ok(())
        });

        s.it("test case 1", |ctx| {
            log_stdout!("test suite 2: test case 1");
            log_stdout!("{}", ctx.string("contextVar")?);
            Ok(())
        });

        s.it("test case 2", |ctx| {
            log_stdout!("test suite 2: test case 2");
            log_stdout!("{}", ctx.string("suiteVar")?);
            Ok(())
        });
    });
}

/// Nested suites run their parent's hooks around their own cases. An
/// `xdescribe` is listed but never executed.
fn nesting_and_disabling(registry: &mut Registry) {
    registry.describe("test suite 3", |s| {
        s.before_each(|_| {
            log_stdout!("test suite 3: test setup function.");
            Ok(())
        });

        s.after_each(|_| {
            log_stdout!("test suite 3: test teardown function.");
            Ok(())
        });

        s.it("test case 1", |_| {
            log_stdout!("test suite 3: test case 1");
            Ok(())
        });

        s.it("test case 2", |_| {
            log_stdout!("test suite 3: test case 2");
            Ok(())
        });

        s.describe("sub-test suite 3-A", |s| {
            s.it("test case 1", |_| {
                log_stdout!("sub-test suite 3-A: test case 1");
                Ok(())
            });

            s.it("test case 2", |_| {
                log_stdout!("sub-test suite 3-A: test case 2");
                Ok(())
            });
        });

        s.xdescribe("sub-test suite 3-B", |s| {
            s.it("test case 1", |_| {
                log_stdout!("test suite 3-B: test case 1");
                Ok(())
            });
        });
    });
}

/// Setup stores two numbers, each case computes an answer and the teardown
/// prints the title and answer the case left behind.
fn arithmetic(registry: &mut Registry) {
    registry.describe("test suite 4", |s| {
        s.before_each(|ctx| {
            ctx.set("number1", 4);
            ctx.set("number2", 2);
            Ok(())
        });

        s.after_each(|ctx| {
            log_stdout!("{}", ctx.value("title")?);
            log_stdout!("answer: {}", ctx.value("answer")?);
            Ok(())
        });

        s.it("test case 1: Add", |ctx| {
            let answer = ctx.number("number1")? + ctx.number("number2")?;
            ctx.set("title", "addition");
            ctx.set("answer", answer);
            ctx.expect(answer).to_be(6)
        });

        s.it("test case 2: Subtract", |ctx| {
            let answer = ctx.number("number1")? - ctx.number("number2")?;
            ctx.set("title", "subtract");
            ctx.set("answer", answer);
            ctx.expect(answer).to_equal(2)
        });

        s.it("test case 3: Multiply", |ctx| {
            let answer = ctx.number("number1")? * ctx.number("number2")?;
            ctx.set("title", "multiply");
            ctx.set("answer", answer);
            ctx.expect(answer).to_be(8)
        });

        s.it("test case 4: Division", |ctx| {
            let answer = ctx.number("number1")? / ctx.number("number2")?;
            ctx.set("title", "Division");
            ctx.set("answer", answer);
            ctx.expect(answer).to_equal(2)
        });
    });
}

/// Two objects built independently are equal but not identical.
fn object_equality(registry: &mut Registry) {
    registry.describe("test suite 5", |s| {
        s.before_each(|ctx| {
            ctx.set("object1", Value::object([("key1", 1), ("key2", 2)]));
            ctx.set("object2", Value::object([("key1", 1), ("key2", 2)]));
            Ok(())
        });

        s.it("test case 1", |ctx| {
            log_stdout!("test suite 5, test case 1");
            let object1 = ctx.value("object1")?;
            let object2 = ctx.value("object2")?;
            ctx.expect(object1.clone()).to_equal(object2.clone())?;
            ctx.expect(object1).not().to_be(object2)
        });
    });
}
