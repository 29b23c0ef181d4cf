//! Defines the Riemann-sum sampling rules.
//!
//! Provides the [`Rule`] enum and its textual names. Parsing an unknown name
//! is the only way to get [`QuadratureError::UnknownRule`].

use std::str::FromStr;

use serde::Serialize;

use crate::integration::errors::QuadratureError;

/// Riemann-sum sampling rules on `h = (b - a) / n`.
/// - [`Rule::Left`]     `x_i = a + i h`,         `i = 0 .. n-1`
/// - [`Rule::Right`]    `x_i = a + i h`,         `i = 1 .. n`
/// - [`Rule::Midpoint`] `x_i = a + (i + 0.5) h`, `i = 0 .. n-1`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Left,
    Right,
    Midpoint,
}

impl Rule {
    pub const ALL: [Rule; 3] = [Rule::Left, Rule::Right, Rule::Midpoint];

    pub const fn rule_name(self) -> &'static str {
        match self {
            Rule::Left     => "left",
            Rule::Right    => "right",
            Rule::Midpoint => "midpoint",
        }
    }

    /// Sample point of the `i`-th rectangle, `i` in `0..n`.
    #[inline]
    pub(crate) fn sample(self, a: f64, h: f64, i: usize) -> f64 {
        match self {
            Rule::Left     => a + i as f64 * h,
            Rule::Right    => a + (i + 1) as f64 * h,
            Rule::Midpoint => a + (i as f64 + 0.5) * h,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rule_name())
    }
}

impl FromStr for Rule {
    type Err = QuadratureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left"     => Ok(Rule::Left),
            "right"    => Ok(Rule::Right),
            "midpoint" => Ok(Rule::Midpoint),
            other      => Err(QuadratureError::UnknownRule { got: other.to_string() }),
        }
    }
}
