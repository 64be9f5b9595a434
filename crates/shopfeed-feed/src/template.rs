//! The field-template mini-language.
//!
//! A specification is exactly one of, tested in this order:
//!
//! 1. a ternary, `left > 0 ? 'yes' : 'no'` (single or double quotes, one
//!    `>` or `<` comparison against a numeric literal),
//! 2. a template with `{key}` placeholders,
//! 3. a literal, returned unchanged.
//!
//! Anything that does not fit the first two forms silently falls through to
//! the next one; malformed specifications are never an error.

use std::sync::LazyLock;

use regex::Regex;

static TERNARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(.+?)\s*\?\s*['"](.+?)['"]\s*:\s*['"](.+?)['"]"#).expect("valid regex")
});

/// A value in the flat per-variant [`Context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Text(String),
    Integer(i64),
    Absent,
}

impl ContextValue {
    /// Empty text, zero and absence are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Integer(n) => *n != 0,
            Self::Absent => false,
        }
    }

    /// Numeric reading used by ternary comparisons.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Integer(n) => Some(*n as f64),
            Self::Absent => None,
        }
    }

    /// Text substituted for a placeholder: falsy values become `""`.
    #[must_use]
    pub fn substitution(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(0) | Self::Absent => String::new(),
            Self::Integer(n) => n.to_string(),
        }
    }
}

impl From<Option<&str>> for ContextValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Absent, |s| Self::Text(s.to_owned()))
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Ordered name → value mapping. Placeholders are substituted in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    entries: Vec<(String, ContextValue)>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Greater,
    Less,
}

impl Comparison {
    fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Self::Greater => left > right,
            Self::Less => left < right,
        }
    }
}

/// Right-hand side of a ternary condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparand {
    Number(f64),
    /// Parsed but never comparable; the condition is always false.
    Text(String),
}

/// A parsed template specification.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Ternary {
        left: String,
        comparison: Comparison,
        right: Comparand,
        when_true: String,
        when_false: String,
    },
    Placeholders(String),
    Literal(String),
}

impl Expression {
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        if let Some(ternary) = parse_ternary(spec) {
            return ternary;
        }
        if spec.contains('{') {
            Self::Placeholders(spec.to_owned())
        } else {
            Self::Literal(spec.to_owned())
        }
    }

    #[must_use]
    pub fn evaluate(&self, context: &Context) -> String {
        match self {
            Self::Ternary {
                left,
                comparison,
                right,
                when_true,
                when_false,
            } => {
                let left = context
                    .get(left)
                    .filter(|v| v.is_truthy())
                    .and_then(ContextValue::as_number);
                let holds = match (left, right) {
                    (Some(l), Comparand::Number(r)) => comparison.holds(l, *r),
                    _ => false,
                };
                if holds {
                    when_true.clone()
                } else {
                    when_false.clone()
                }
            }
            Self::Placeholders(template) => substitute(template, context),
            Self::Literal(text) => text.clone(),
        }
    }
}

/// Parses and evaluates `spec` in one go.
#[must_use]
pub fn evaluate_template(spec: &str, context: &Context) -> String {
    Expression::parse(spec).evaluate(context)
}

fn parse_ternary(spec: &str) -> Option<Expression> {
    let caps = TERNARY_RE.captures(spec.trim())?;
    let condition = caps.get(1)?.as_str();

    let (comparison, (left, right)) = match condition.split_once('>') {
        Some(parts) => (Comparison::Greater, parts),
        None => (Comparison::Less, condition.split_once('<')?),
    };

    let right = right.trim();
    let right = if is_numeric_literal(right) {
        right
            .parse()
            .map_or_else(|_| Comparand::Text(right.to_owned()), Comparand::Number)
    } else {
        Comparand::Text(right.to_owned())
    };

    Some(Expression::Ternary {
        left: left.trim().to_owned(),
        comparison,
        right,
        when_true: caps.get(2)?.as_str().to_owned(),
        when_false: caps.get(3)?.as_str().to_owned(),
    })
}

/// Digits with at most one `.`.
fn is_numeric_literal(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && s.bytes().filter(|&b| b == b'.').count() <= 1
}

fn substitute(template: &str, context: &Context) -> String {
    let mut result = template.to_owned();
    for (key, value) in context.iter() {
        let placeholder = format!("{{{key}}}");
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, &value.substitution());
        }
    }
    result
}

#[cfg(test)]
#[path = "template_test.rs"]
mod tests;
