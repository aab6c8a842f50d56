use core::fmt;

use miette::Error;

use crate::runner::{Context, Scope};

pub mod registry;
pub use registry::{Registry, SuiteBuilder};

/// Hook and test bodies. They all receive the fixture context of the case
/// being executed.
pub type Body = Box<dyn Fn(&mut Context) -> Result<(), Error>>;

/// Tri-state flag set at registration (`describe`/`xdescribe`/`fdescribe`,
/// `it`/`xit`/`fit`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Mode {
    #[default]
    Enabled,
    Disabled,
    Focused,
}

pub struct TestCase {
    pub name: String,
    pub mode: Mode,
    pub(crate) body: Body,
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Child suites and cases share one list so that execution follows
/// declaration order.
#[derive(Debug)]
pub enum Child {
    Suite(Suite),
    Case(TestCase),
}

pub struct Suite {
    pub name: String,
    pub mode: Mode,
    pub children: Vec<Child>,
    pub(crate) before_each: Option<Body>,
    pub(crate) after_each: Option<Body>,
    /// Suite-level variables, shared by every case below this suite.
    pub(crate) scope: Scope,
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("children", &self.children)
            .field("before_each", &self.before_each.is_some())
            .field("after_each", &self.after_each.is_some())
            .finish()
    }
}

impl Suite {
    pub(crate) fn new(name: String, mode: Mode, scope: Scope) -> Self {
        Self {
            name,
            mode,
            children: vec![],
            before_each: None,
            after_each: None,
            scope,
        }
    }

    pub fn suites(&self) -> impl Iterator<Item = &Suite> {
        self.children.iter().filter_map(|child| match child {
            Child::Suite(suite) => Some(suite),
            Child::Case(_) => None,
        })
    }

    pub fn cases(&self) -> impl Iterator<Item = &TestCase> {
        self.children.iter().filter_map(|child| match child {
            Child::Case(case) => Some(case),
            Child::Suite(_) => None,
        })
    }

    fn contains_focus(&self) -> bool {
        self.mode == Mode::Focused
            || self.children.iter().any(|child| match child {
                Child::Suite(suite) => suite.contains_focus(),
                Child::Case(case) => case.mode == Mode::Focused,
            })
    }

    fn runs_any(&self, inherited: Inherited, focus_active: bool) -> bool {
        let inherited = inherited.enter(self.mode);
        self.children.iter().any(|child| match child {
            Child::Suite(suite) => suite.runs_any(inherited, focus_active),
            Child::Case(case) => inherited.enter(case.mode).runs(focus_active),
        })
    }
}

/// Mode state accumulated from the root down to a node.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Inherited {
    pub disabled: bool,
    pub focused: bool,
}

impl Inherited {
    pub fn enter(self, mode: Mode) -> Self {
        Self {
            disabled: self.disabled || mode == Mode::Disabled,
            focused: self.focused || mode == Mode::Focused,
        }
    }

    /// Disabled always wins. When anything in the forest is focused, only
    /// focused subtrees run.
    pub fn runs(self, focus_active: bool) -> bool {
        !self.disabled && (!focus_active || self.focused)
    }
}

/// The forest produced by a successful registration.
#[derive(Debug)]
pub struct SuiteTree {
    pub suites: Vec<Suite>,
    pub(crate) global: Scope,
}

impl SuiteTree {
    pub fn has_focus(&self) -> bool {
        self.suites.iter().any(Suite::contains_focus)
    }

    pub fn case_count(&self) -> usize {
        fn count(suite: &Suite) -> usize {
            suite.cases().count() + suite.suites().map(count).sum::<usize>()
        }
        self.suites.iter().map(count).sum()
    }

    /// Structural report: every suite and case, indented by depth. Nodes
    /// that will not execute are still listed and marked `(skipped)`.
    pub fn outline(&self) -> Vec<String> {
        let focus_active = self.has_focus();
        let mut lines = vec![];
        for suite in &self.suites {
            outline_suite(suite, 0, Inherited::default(), focus_active, &mut lines);
        }
        lines
    }
}

fn marker(mode: Mode, runs: bool) -> &'static str {
    match (runs, mode) {
        (false, _) => " (skipped)",
        (true, Mode::Focused) => " (focused)",
        (true, _) => "",
    }
}

fn outline_suite(
    suite: &Suite,
    depth: usize,
    inherited: Inherited,
    focus_active: bool,
    lines: &mut Vec<String>,
) {
    let runs = suite.runs_any(inherited, focus_active);
    lines.push(format!(
        "{}{}{}",
        "  ".repeat(depth),
        suite.name,
        marker(suite.mode, runs)
    ));

    let inherited = inherited.enter(suite.mode);
    for child in &suite.children {
        match child {
            Child::Suite(child) => outline_suite(child, depth + 1, inherited, focus_active, lines),
            Child::Case(case) => {
                let runs = inherited.enter(case.mode).runs(focus_active);
                lines.push(format!(
                    "{}{}{}",
                    "  ".repeat(depth + 1),
                    case.name,
                    marker(case.mode, runs)
                ));
            }
        }
    }
}
