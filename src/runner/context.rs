use miette::Error;

use crate::{
    error::{ExpectationFailed, RuntimeError},
    matcher::{AssertionResult, Expectation},
    runner::Scope,
    value::Value,
};

/// Per-execution fixture state. A fresh context is created for every test
/// case; its before-each hooks, body and after-each hooks all receive the
/// same instance, then it is discarded.
///
/// Lookups fall through to the enclosing suite variables, but [`set`]
/// always binds on the per-case scope, so nothing written with it survives
/// into the next case.
///
/// [`set`]: Context::set
#[derive(Debug)]
pub struct Context {
    scope: Scope,
    expectations: Vec<AssertionResult>,
    stop_on_expectation_failure: bool,
}

impl Context {
    pub(crate) fn new(suite_scope: &Scope, stop_on_expectation_failure: bool) -> Self {
        Self {
            scope: suite_scope.new_enclosed(),
            expectations: vec![],
            stop_on_expectation_failure,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.scope.define(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.scope.get(name)
    }

    /// Rebinds an existing variable where it was defined. Assigning to a
    /// suite variable mutates it for every later case of that suite.
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> Result<(), Error> {
        if !self.scope.assign(name, value.into()) {
            return Err(RuntimeError::ReferenceError {
                ident: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn value(&self, name: &str) -> Result<Value, Error> {
        self.get(name).ok_or_else(|| {
            RuntimeError::ReferenceError {
                ident: name.to_string(),
            }
            .into()
        })
    }

    pub fn number(&self, name: &str) -> Result<f64, Error> {
        let value = self.value(name)?;
        value.as_number().ok_or_else(|| {
            RuntimeError::TypeError {
                ident: name.to_string(),
                expected: "number".to_string(),
                found: value.type_name().to_string(),
            }
            .into()
        })
    }

    pub fn string(&self, name: &str) -> Result<String, Error> {
        let value = self.value(name)?;
        match value.as_str() {
            Some(string) => Ok(string.to_string()),
            None => Err(RuntimeError::TypeError {
                ident: name.to_string(),
                expected: "string".to_string(),
                found: value.type_name().to_string(),
            }
            .into()),
        }
    }

    pub fn expect(&mut self, actual: impl Into<Value>) -> Expectation<'_> {
        Expectation::new(self, actual.into())
    }

    pub fn expectations(&self) -> &[AssertionResult] {
        &self.expectations
    }

    pub(crate) fn record(&mut self, result: AssertionResult) -> Result<(), Error> {
        let failed = !result.passed;
        let message = result.message.clone();
        self.expectations.push(result);

        if failed && self.stop_on_expectation_failure {
            return Err(ExpectationFailed { message }.into());
        }
        Ok(())
    }

    pub(crate) fn into_expectations(self) -> Vec<AssertionResult> {
        self.expectations
    }
}
