use core::fmt;

use miette::Error;

use crate::{
    runner::Context,
    value::{Value, ValueInner},
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Primitives by value, composites by identity.
    ToBe,
    /// Recursive structural equality.
    ToEqual,
    ToBeLessThan,
    ToBeGreaterThan,
    /// Substring of a string, or structurally equal element of a list.
    ToContain,
    /// Passes iff the actual value is nil. An expected value, if one is
    /// supplied through [`Assertion`], is ignored.
    ToBeNull,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MatcherKind::ToBe => "to be",
                MatcherKind::ToEqual => "to equal",
                MatcherKind::ToBeLessThan => "to be less than",
                MatcherKind::ToBeGreaterThan => "to be greater than",
                MatcherKind::ToContain => "to contain",
                MatcherKind::ToBeNull => "to be null",
            }
        )
    }
}

/// Outcome of comparing two values before negation is applied.
#[derive(Debug, Clone, PartialEq)]
enum Verdict {
    Match,
    Mismatch,
    /// The operands are of the wrong kind for this matcher. Counts as a
    /// mismatch; the reason only shows up in the failure message.
    Incomparable(String),
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        if matched {
            Verdict::Match
        } else {
            Verdict::Mismatch
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assertion {
    pub actual: Value,
    pub expected: Option<Value>,
    pub matcher: MatcherKind,
    pub negated: bool,
}

#[derive(Debug, Clone)]
pub struct AssertionResult {
    pub matcher: MatcherKind,
    pub negated: bool,
    pub passed: bool,
    pub message: String,
}

impl Assertion {
    pub fn new(actual: Value, matcher: MatcherKind, expected: Option<Value>) -> Self {
        Self {
            actual,
            expected,
            matcher,
            negated: false,
        }
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn evaluate(&self) -> AssertionResult {
        let verdict = self.verdict();

        let passed = match verdict {
            Verdict::Match => !self.negated,
            Verdict::Mismatch | Verdict::Incomparable(_) => self.negated,
        };

        let message = if passed {
            "Passed.".to_string()
        } else {
            let mut message = format!(
                "Expected {} {}{}",
                self.actual.describe(),
                if self.negated { "not " } else { "" },
                self.matcher
            );
            if self.matcher != MatcherKind::ToBeNull {
                let expected = self.expected.clone().unwrap_or_else(Value::new_nil);
                message.push(' ');
                message.push_str(&expected.describe());
            }
            message.push('.');
            if let Verdict::Incomparable(reason) = verdict {
                message.push(' ');
                message.push_str(&reason);
            }
            message
        };

        AssertionResult {
            matcher: self.matcher,
            negated: self.negated,
            passed,
            message,
        }
    }

    fn verdict(&self) -> Verdict {
        if self.matcher == MatcherKind::ToBeNull {
            return self.actual.is_nil().into();
        }

        let nil = Value::new_nil();
        let expected = self.expected.as_ref().unwrap_or(&nil);

        match self.matcher {
            MatcherKind::ToBe => identical(&self.actual, expected).into(),
            MatcherKind::ToEqual => deep_equal(&self.actual, expected).into(),
            MatcherKind::ToBeLessThan | MatcherKind::ToBeGreaterThan => {
                match (self.actual.as_number(), expected.as_number()) {
                    (Some(actual), Some(expected)) => match self.matcher {
                        MatcherKind::ToBeLessThan => (actual < expected).into(),
                        MatcherKind::ToBeGreaterThan => (actual > expected).into(),
                        _ => unreachable!("by outer arm"),
                    },
                    _ => Verdict::Incomparable(format!(
                        "Operands must be numbers, got {} and {}.",
                        self.actual.type_name(),
                        expected.type_name()
                    )),
                }
            }
            MatcherKind::ToContain => match (&*self.actual, &**expected) {
                (ValueInner::String(haystack), ValueInner::String(needle)) => {
                    haystack.contains(needle.as_str()).into()
                }
                (ValueInner::List(items), _) => {
                    items.iter().any(|item| deep_equal(item, expected)).into()
                }
                _ => Verdict::Incomparable(format!(
                    "Cannot look for a {} inside a {}.",
                    expected.type_name(),
                    self.actual.type_name()
                )),
            },
            MatcherKind::ToBeNull => unreachable!("handled above"),
        }
    }
}

/// `to_be` semantics: primitives compare by value (exact float comparison),
/// composites only when both handles point at the same allocation.
pub fn identical(left: &Value, right: &Value) -> bool {
    match (&**left, &**right) {
        (ValueInner::Number(left_num), ValueInner::Number(right_num)) => left_num == right_num,
        (ValueInner::String(left_str), ValueInner::String(right_str)) => left_str == right_str,
        (ValueInner::Bool(left_bool), ValueInner::Bool(right_bool)) => left_bool == right_bool,
        (ValueInner::Nil, ValueInner::Nil) => true,
        (ValueInner::List(_), ValueInner::List(_))
        | (ValueInner::Object(_), ValueInner::Object(_)) => left.ptr_eq(right),
        _ => false,
    }
}

/// `to_equal` semantics. Unlike `to_be`, NaN equals NaN.
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    if left.is_composite() && left.ptr_eq(right) {
        return true;
    }

    match (&**left, &**right) {
        (ValueInner::Number(left_num), ValueInner::Number(right_num)) => {
            left_num == right_num || (left_num.is_nan() && right_num.is_nan())
        }
        (ValueInner::List(left_items), ValueInner::List(right_items)) => {
            left_items.len() == right_items.len()
                && left_items
                    .iter()
                    .zip(right_items)
                    .all(|(left, right)| deep_equal(left, right))
        }
        (ValueInner::Object(left_obj), ValueInner::Object(right_obj)) => {
            left_obj.properties.len() == right_obj.properties.len()
                && left_obj.properties.iter().all(|(key, left_value)| {
                    right_obj
                        .properties
                        .get(key)
                        .is_some_and(|right_value| deep_equal(left_value, right_value))
                })
        }
        _ => identical(left, right),
    }
}

/// Fluent front end over [`Assertion`], created by [`Context::expect`].
/// Each terminal method evaluates one assertion and records the result on
/// the fixture context.
pub struct Expectation<'ctx> {
    ctx: &'ctx mut Context,
    actual: Value,
    negated: bool,
}

impl<'ctx> Expectation<'ctx> {
    pub(crate) fn new(ctx: &'ctx mut Context, actual: Value) -> Self {
        Self {
            ctx,
            actual,
            negated: false,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn to_be(self, expected: impl Into<Value>) -> Result<(), Error> {
        self.check(MatcherKind::ToBe, Some(expected.into()))
    }

    pub fn to_equal(self, expected: impl Into<Value>) -> Result<(), Error> {
        self.check(MatcherKind::ToEqual, Some(expected.into()))
    }

    pub fn to_be_less_than(self, expected: impl Into<Value>) -> Result<(), Error> {
        self.check(MatcherKind::ToBeLessThan, Some(expected.into()))
    }

    pub fn to_be_greater_than(self, expected: impl Into<Value>) -> Result<(), Error> {
        self.check(MatcherKind::ToBeGreaterThan, Some(expected.into()))
    }

    pub fn to_contain(self, expected: impl Into<Value>) -> Result<(), Error> {
        self.check(MatcherKind::ToContain, Some(expected.into()))
    }

    pub fn to_be_null(self) -> Result<(), Error> {
        self.check(MatcherKind::ToBeNull, None)
    }

    fn check(self, matcher: MatcherKind, expected: Option<Value>) -> Result<(), Error> {
        let assertion = Assertion {
            actual: self.actual,
            expected,
            matcher,
            negated: self.negated,
        };
        self.ctx.record(assertion.evaluate())
    }
}
