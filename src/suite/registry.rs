use miette::Error;

use crate::{
    error::RegistrationError,
    runner::{Context, Scope},
    suite::{Body, Child, Mode, Suite, SuiteTree, TestCase},
    value::Value,
};

/// Collects suite declarations into a [`SuiteTree`].
///
/// ```
/// use bdd_runner::Registry;
///
/// let mut registry = Registry::new();
/// registry.describe("Math", |s| {
///     s.before_each(|ctx| {
///         ctx.set("a", 4);
///         ctx.set("b", 2);
///         Ok(())
///     });
///     s.it("Add", |ctx| {
///         let sum = ctx.number("a")? + ctx.number("b")?;
///         ctx.expect(sum).to_be(6)
///     });
/// });
/// let tree = registry.finish().unwrap();
/// assert_eq!(tree.case_count(), 1);
/// ```
#[derive(Debug)]
pub struct Registry {
    suites: Vec<Suite>,
    global: Scope,
    errors: Vec<RegistrationError>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            suites: vec![],
            global: Scope::new_global(),
            errors: vec![],
        }
    }

    pub fn describe(&mut self, name: &str, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        self.declare(name, Mode::Enabled, declare)
    }

    /// Registers the suite but nothing inside it will execute.
    pub fn xdescribe(&mut self, name: &str, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        self.declare(name, Mode::Disabled, declare)
    }

    pub fn fdescribe(&mut self, name: &str, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        self.declare(name, Mode::Focused, declare)
    }

    fn declare(
        &mut self,
        name: &str,
        mode: Mode,
        declare: impl FnOnce(&mut SuiteBuilder),
    ) -> &mut Self {
        if let Some(suite) = build_suite(name, mode, &self.global, &[], &mut self.errors, declare) {
            self.suites.push(suite);
        }
        self
    }

    /// Ends registration. The first declaration error aborts the whole
    /// registration.
    pub fn finish(mut self) -> Result<SuiteTree, Error> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0).into());
        }

        Ok(SuiteTree {
            suites: self.suites,
            global: self.global,
        })
    }
}

fn build_suite(
    name: &str,
    mode: Mode,
    parent_scope: &Scope,
    parent_path: &[String],
    errors: &mut Vec<RegistrationError>,
    declare: impl FnOnce(&mut SuiteBuilder),
) -> Option<Suite> {
    if name.trim().is_empty() {
        errors.push(RegistrationError::EmptySuiteName {
            parent: if parent_path.is_empty() {
                "<root>".to_string()
            } else {
                parent_path.join(" > ")
            },
        });
        return None;
    }

    let mut path = parent_path.to_vec();
    path.push(name.to_string());

    let mut builder = SuiteBuilder {
        suite: Suite::new(name.to_string(), mode, parent_scope.new_enclosed()),
        path,
        errors,
    };
    declare(&mut builder);

    let SuiteBuilder {
        suite,
        path,
        errors,
    } = builder;

    if suite.children.is_empty() {
        errors.push(RegistrationError::EmptySuite {
            suite: path.join(" > "),
        });
    }

    Some(suite)
}

/// Handle passed to a `describe` block. Everything declared through it is
/// attached to the innermost enclosing suite, in declaration order.
pub struct SuiteBuilder<'r> {
    suite: Suite,
    path: Vec<String>,
    errors: &'r mut Vec<RegistrationError>,
}

impl SuiteBuilder<'_> {
    pub fn describe(&mut self, name: &str, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        self.nested(name, Mode::Enabled, declare)
    }

    pub fn xdescribe(&mut self, name: &str, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        self.nested(name, Mode::Disabled, declare)
    }

    pub fn fdescribe(&mut self, name: &str, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        self.nested(name, Mode::Focused, declare)
    }

    fn nested(&mut self, name: &str, mode: Mode, declare: impl FnOnce(&mut SuiteBuilder)) -> &mut Self {
        if let Some(child) = build_suite(
            name,
            mode,
            &self.suite.scope,
            &self.path,
            self.errors,
            declare,
        ) {
            self.suite.children.push(Child::Suite(child));
        }
        self
    }

    pub fn it<F>(&mut self, name: &str, body: F) -> &mut Self
    where
        F: Fn(&mut Context) -> Result<(), Error> + 'static,
    {
        self.case(name, Mode::Enabled, Box::new(body))
    }

    pub fn xit<F>(&mut self, name: &str, body: F) -> &mut Self
    where
        F: Fn(&mut Context) -> Result<(), Error> + 'static,
    {
        self.case(name, Mode::Disabled, Box::new(body))
    }

    pub fn fit<F>(&mut self, name: &str, body: F) -> &mut Self
    where
        F: Fn(&mut Context) -> Result<(), Error> + 'static,
    {
        self.case(name, Mode::Focused, Box::new(body))
    }

    fn case(&mut self, name: &str, mode: Mode, body: Body) -> &mut Self {
        if name.trim().is_empty() {
            self.errors.push(RegistrationError::EmptyCaseName {
                suite: self.path.join(" > "),
            });
            return self;
        }

        self.suite.children.push(Child::Case(TestCase {
            name: name.to_string(),
            mode,
            body,
        }));
        self
    }

    /// Only one hook per suite; a later registration replaces the earlier one.
    pub fn before_each<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Context) -> Result<(), Error> + 'static,
    {
        self.suite.before_each = Some(Box::new(hook));
        self
    }

    pub fn after_each<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut Context) -> Result<(), Error> + 'static,
    {
        self.suite.after_each = Some(Box::new(hook));
        self
    }

    /// Declares a suite-level variable. It is initialised once, here, and
    /// every case in this suite (and nested suites) reads and writes the
    /// same binding.
    pub fn var(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.suite.scope.define(name.to_string(), value.into());
        self
    }
}
