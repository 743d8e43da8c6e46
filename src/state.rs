use std::fmt::Display;

use crate::{math::Residual, Show};

/// A state of an automaton constructed from a linear equation.
///
/// A [`State::Value`] holds the residual: the amount that the bits of the variables which
/// have not been read yet still have to contribute for the equation to hold. Every transition
/// that would leave an odd residual leads into the absorbing [`State::Sink`] instead.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum State {
    /// A residual value.
    Value(Residual),
    /// The rejecting sink, usually written `⊥`.
    Sink,
}

impl State {
    /// Returns true if `self` is the sink.
    pub fn is_sink(&self) -> bool {
        matches!(self, State::Sink)
    }

    /// Returns the residual value, or `None` for the sink.
    pub fn value(&self) -> Option<Residual> {
        match self {
            State::Value(k) => Some(*k),
            State::Sink => None,
        }
    }
}

impl From<Residual> for State {
    fn from(value: Residual) -> Self {
        State::Value(value)
    }
}

impl From<i64> for State {
    fn from(value: i64) -> Self {
        State::Value(Residual::from(value))
    }
}

impl Show for State {
    fn show(&self) -> String {
        match self {
            State::Value(k) => k.to_string(),
            State::Sink => "\u{22A5}".to_string(),
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_is_distinct_from_values() {
        assert!(State::Sink.is_sink());
        assert!(!State::from(0i64).is_sink());
        assert_eq!(State::from(-3i64).value(), Some(-3));
        assert_eq!(State::Sink.value(), None);
        assert_eq!(State::Sink.show(), "⊥");
        assert_eq!(State::from(-3i64).to_string(), "-3");
    }
}
