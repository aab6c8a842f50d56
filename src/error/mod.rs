use miette::Diagnostic;
use thiserror::Error;

/// Raised while the suite tree is being declared. Any of these aborts
/// registration before a single case runs.
#[derive(Diagnostic, Debug, Error)]
pub enum RegistrationError {
    #[error("RegistrationError: suite declared with an empty name under `{parent}`")]
    #[diagnostic(help("give every describe block a non-empty name"))]
    EmptySuiteName { parent: String },

    #[error("RegistrationError: test case declared with an empty name in `{suite}`")]
    #[diagnostic(help("give every it block a non-empty name"))]
    EmptyCaseName { suite: String },

    #[error("RegistrationError: describe `{suite}` has no children")]
    #[diagnostic(help("declare at least one test case or nested suite inside it"))]
    EmptySuite { suite: String },
}

#[derive(Diagnostic, Debug, Error)]
pub enum RuntimeError {
    #[error("ReferenceError: {ident} is not defined")]
    ReferenceError { ident: String },

    #[error("TypeError: `{ident}` is {found}, expected {expected}")]
    TypeError {
        ident: String,
        expected: String,
        found: String,
    },

    #[error("Panic: {message}")]
    Panic {
        message: String,
        location: Option<String>,
    },
}

/// Returned by an expectation when the run stops a case on its first
/// failed expectation. The failure itself is already recorded on the
/// fixture context, so the runner does not count this as a fault.
#[derive(Diagnostic, Debug, Error)]
#[error("ExpectationFailed: {message}")]
pub struct ExpectationFailed {
    pub message: String,
}
