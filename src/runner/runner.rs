use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    sync::Once,
};

use chrono::Utc;
use miette::Error;

use crate::{
    error::{ExpectationFailed, RuntimeError},
    runner::{
        report::{CaseReport, Fault, Phase, RunReport},
        Context,
    },
    suite::{Body, Child, Inherited, Suite, SuiteTree, TestCase},
};

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Only cases whose full name contains this substring run; the rest are
    /// reported as skipped.
    pub filter: Option<String>,
    /// Abort a case body at its first failed expectation instead of
    /// collecting every expectation.
    pub stop_on_expectation_failure: bool,
}

/// Walks a [`SuiteTree`] depth-first in declaration order and executes one
/// case at a time.
pub struct Runner<'t> {
    tree: &'t SuiteTree,
    config: RunConfig,
}

impl<'t> Runner<'t> {
    pub fn new(tree: &'t SuiteTree, config: RunConfig) -> Self {
        Self { tree, config }
    }

    pub fn run(&self) -> RunReport {
        let started_at = Utc::now();
        let focus_active = self.tree.has_focus();

        let mut cases = vec![];
        let mut ancestors = vec![];
        for suite in &self.tree.suites {
            self.run_suite(
                suite,
                &mut ancestors,
                Inherited::default(),
                focus_active,
                &mut cases,
            );
        }

        RunReport {
            cases,
            started_at,
            duration: Utc::now() - started_at,
        }
    }

    fn run_suite(
        &self,
        suite: &'t Suite,
        ancestors: &mut Vec<&'t Suite>,
        inherited: Inherited,
        focus_active: bool,
        cases: &mut Vec<CaseReport>,
    ) {
        let inherited = inherited.enter(suite.mode);
        ancestors.push(suite);

        for child in &suite.children {
            match child {
                Child::Suite(child) => {
                    self.run_suite(child, ancestors, inherited, focus_active, cases)
                }
                Child::Case(case) => {
                    let scheduled = inherited.enter(case.mode).runs(focus_active);
                    cases.push(self.run_case(case, ancestors, scheduled));
                }
            }
        }

        ancestors.pop();
    }

    fn run_case(&self, case: &TestCase, ancestors: &[&Suite], scheduled: bool) -> CaseReport {
        let path: Vec<String> = ancestors.iter().map(|suite| suite.name.clone()).collect();

        if !scheduled || !self.matches_filter(&path, &case.name) {
            return CaseReport::skipped(path, case.name.clone());
        }

        let suite_scope = ancestors
            .last()
            .map(|suite| &suite.scope)
            .unwrap_or(&self.tree.global);
        let mut ctx = Context::new(suite_scope, self.config.stop_on_expectation_failure);
        let mut faults = vec![];

        // outermost first
        let mut setup_ok = true;
        for suite in ancestors {
            let Some(hook) = &suite.before_each else {
                continue;
            };
            if let Err(err) = invoke(hook, &mut ctx) {
                record_fault(
                    Phase::BeforeEach {
                        suite: suite.name.clone(),
                    },
                    err,
                    &mut faults,
                );
                setup_ok = false;
                break;
            }
        }

        if setup_ok {
            if let Err(err) = invoke(&case.body, &mut ctx) {
                record_fault(Phase::Body, err, &mut faults);
            }
        }

        // innermost first; every after-each runs even if setup or an inner
        // teardown failed
        for suite in ancestors.iter().rev() {
            let Some(hook) = &suite.after_each else {
                continue;
            };
            if let Err(err) = invoke(hook, &mut ctx) {
                record_fault(
                    Phase::AfterEach {
                        suite: suite.name.clone(),
                    },
                    err,
                    &mut faults,
                );
            }
        }

        CaseReport::finished(path, case.name.clone(), ctx.into_expectations(), faults)
    }

    fn matches_filter(&self, path: &[String], name: &str) -> bool {
        let Some(filter) = &self.config.filter else {
            return true;
        };
        let mut full_name = path.join(" ");
        if !full_name.is_empty() {
            full_name.push(' ');
        }
        full_name.push_str(name);
        full_name.contains(filter.as_str())
    }
}

thread_local! {
    static CONTAINING: Cell<bool> = const { Cell::new(false) };
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

static QUIET_HOOK: Once = Once::new();

/// Panics raised inside a hook or body are reported as faults, so the hook
/// only remembers where they happened. Panics anywhere else still go to the
/// previously installed hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CONTAINING.with(Cell::get) {
                let location = info
                    .location()
                    .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
                PANIC_LOCATION.with(|slot| *slot.borrow_mut() = location);
            } else {
                previous(info);
            }
        }));
    });
}

/// Runs a hook or body, turning a panic into a runtime error so one case
/// can never abort the whole run.
fn invoke(body: &Body, ctx: &mut Context) -> Result<(), Error> {
    install_quiet_hook();

    CONTAINING.with(|flag| flag.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(ctx)));
    CONTAINING.with(|flag| flag.set(false));

    match outcome {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(message) = payload.downcast_ref::<&str>() {
                message.to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "unknown panic payload".to_string()
            };
            let location = PANIC_LOCATION.with(|slot| slot.borrow_mut().take());
            Err(RuntimeError::Panic { message, location }.into())
        }
    }
}

fn record_fault(phase: Phase, err: Error, faults: &mut Vec<Fault>) {
    // already recorded as a failed expectation
    if err.downcast_ref::<ExpectationFailed>().is_some() {
        return;
    }

    let location = match err.downcast_ref::<RuntimeError>() {
        Some(RuntimeError::Panic { location, .. }) => location.clone(),
        _ => None,
    };

    faults.push(Fault {
        phase,
        message: err.to_string(),
        location,
    });
}
