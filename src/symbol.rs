//! Symbol matching for rules.

use crate::types::{Symbol, BLANK_SYMBOL, SCHWA};
use std::collections::BTreeSet;
use std::fmt;

/// What a rule scans for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Exactly this symbol. The blank symbol is matched this way too.
    Symbol(Symbol),
    /// Any member of the set.
    AnyOf(BTreeSet<Symbol>),
    /// Every symbol except blank.
    AnyNonBlank,
}

impl Matcher {
    /// Returns whether `symbol` is accepted by this matcher.
    pub fn matches(&self, symbol: &str) -> bool {
        match self {
            Matcher::AnyNonBlank => symbol != BLANK_SYMBOL,
            Matcher::AnyOf(symbols) => symbols.contains(symbol),
            Matcher::Symbol(expected) => expected == symbol,
        }
    }

    /// Returns whether every symbol `other` accepts is also accepted by `self`.
    pub fn covers(&self, other: &Matcher) -> bool {
        match (self, other) {
            (Matcher::AnyNonBlank, Matcher::AnyNonBlank) => true,
            (_, Matcher::AnyNonBlank) => false,
            (_, Matcher::Symbol(symbol)) => self.matches(symbol),
            (_, Matcher::AnyOf(symbols)) => symbols.iter().all(|s| self.matches(s)),
        }
    }
}

impl From<&str> for Matcher {
    fn from(symbol: &str) -> Self {
        Matcher::Symbol(symbol.to_string())
    }
}

impl From<String> for Matcher {
    fn from(symbol: String) -> Self {
        Matcher::Symbol(symbol)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Symbol(symbol) if symbol.is_empty() => write!(f, "none"),
            Matcher::Symbol(symbol) => write!(f, "{symbol}"),
            Matcher::AnyOf(symbols) => {
                let symbols = symbols.iter().cloned().collect::<Vec<_>>();
                write!(f, "{{{}}}", symbols.join(", "))
            }
            Matcher::AnyNonBlank => write!(f, "any"),
        }
    }
}

/// Matches a blank cell.
pub fn none() -> Matcher {
    Matcher::Symbol(BLANK_SYMBOL.to_string())
}

/// Matches any non-blank cell.
pub fn any() -> Matcher {
    Matcher::AnyNonBlank
}

/// Matches any of the given symbols.
pub fn any_of<I, S>(symbols: I) -> Matcher
where
    I: IntoIterator<Item = S>,
    S: Into<Symbol>,
{
    Matcher::AnyOf(symbols.into_iter().map(Into::into).collect())
}

/// The schwa symbol, `ə`.
pub fn schwa() -> Symbol {
    SCHWA.to_string()
}
