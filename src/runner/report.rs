use core::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{log_stdout, matcher::AssertionResult};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    Passed,
    Failed,
    Skipped,
}

/// Where in a case's execution a fault was raised.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Phase {
    BeforeEach { suite: String },
    Body,
    AfterEach { suite: String },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::BeforeEach { suite } => write!(f, "beforeEach of `{}`", suite),
            Phase::Body => write!(f, "test body"),
            Phase::AfterEach { suite } => write!(f, "afterEach of `{}`", suite),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fault {
    pub phase: Phase,
    pub message: String,
    /// Source location, for faults raised by a panic.
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    /// Names of the enclosing suites, outermost first.
    pub path: Vec<String>,
    pub name: String,
    pub status: Status,
    pub expectations: Vec<AssertionResult>,
    pub faults: Vec<Fault>,
}

impl CaseReport {
    pub(crate) fn skipped(path: Vec<String>, name: String) -> Self {
        Self {
            path,
            name,
            status: Status::Skipped,
            expectations: vec![],
            faults: vec![],
        }
    }

    /// A case with no expectations and no faults passes.
    pub(crate) fn finished(
        path: Vec<String>,
        name: String,
        expectations: Vec<AssertionResult>,
        faults: Vec<Fault>,
    ) -> Self {
        let failed = !faults.is_empty() || expectations.iter().any(|result| !result.passed);
        Self {
            path,
            name,
            status: if failed { Status::Failed } else { Status::Passed },
            expectations,
            faults,
        }
    }

    pub fn full_name(&self) -> String {
        let mut parts = self.path.clone();
        parts.push(self.name.clone());
        parts.join(" ")
    }

    pub fn failed_expectations(&self) -> impl Iterator<Item = &AssertionResult> {
        self.expectations.iter().filter(|result| !result.passed)
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub cases: Vec<CaseReport>,
    pub started_at: DateTime<Utc>,
    pub duration: TimeDelta,
}

impl RunReport {
    fn count(&self, status: Status) -> usize {
        self.cases.iter().filter(|case| case.status == status).count()
    }

    pub fn passed(&self) -> usize {
        self.count(Status::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(Status::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(Status::Skipped)
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn case(&self, full_name: &str) -> Option<&CaseReport> {
        self.cases.iter().find(|case| case.full_name() == full_name)
    }

    pub fn summary(&self) -> String {
        let total = self.cases.len();
        let failed = self.failed();
        format!(
            "{} spec{}, {} failure{}, {} skipped",
            total,
            if total == 1 { "" } else { "s" },
            failed,
            if failed == 1 { "" } else { "s" },
            self.skipped()
        )
    }

    /// Writes the report line by line to stdout.
    pub fn print(&self) {
        for line in self.to_string().lines() {
            log_stdout!("{line}");
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failures: Vec<&CaseReport> = self
            .cases
            .iter()
            .filter(|case| case.status == Status::Failed)
            .collect();

        if !failures.is_empty() {
            writeln!(f, "Failures:")?;
            for (index, case) in failures.iter().enumerate() {
                writeln!(f, "{}) {}", index + 1, case.full_name())?;
                for result in case.failed_expectations() {
                    writeln!(f, "  Message:")?;
                    writeln!(f, "    {}", result.message)?;
                }
                for fault in &case.faults {
                    writeln!(f, "  Fault in {}:", fault.phase)?;
                    writeln!(f, "    {}", fault.message)?;
                    if let Some(location) = &fault.location {
                        writeln!(f, "    at {}", location)?;
                    }
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.summary())?;
        write!(
            f,
            "Finished in {:.3} seconds",
            self.duration.num_microseconds().unwrap_or_default() as f64 / 1_000_000.0
        )
    }
}
