//! Library for turning linear Diophantine equations into deterministic finite automata.
//!
//! An equation $a_1 x_1 + \dots + a_n x_n = c$ over non-negative integers is recognized by an
//! automaton which reads the binary representations of all variables in parallel, least
//! significant bit first. Every symbol of the input is a [`alphabet::BitSymbol`] that fixes one
//! bit for each variable, so the alphabet of an equation with $n$ variables has $2^n$ symbols.
//!
//! The states of the automaton are residuals: the value that the bits which have not been read
//! yet still need to contribute. Starting from $c$, reading a symbol with weighted sum $w$ in
//! state $k$ leads to $(k - w) / 2$ if $k - w$ is even, and into an absorbing sink otherwise.
//! The only accepting state is the residual $0$. Only finitely many residuals are reachable,
//! and [`builder::build`] explores exactly those.
//!
//! ```
//! use diophantine_automata::prelude::*;
//!
//! let eq = LinearEquation::new(2, vec![1, 1], 2).unwrap();
//! let dfa = eq.to_dfa();
//! // x1 = 1, x2 = 1
//! assert!(dfa.accepts(["11"]));
//! // x1 = 2, x2 = 0
//! assert!(dfa.accepts(["00", "10"]));
//! assert_eq!(dfa.minimum_word_length(), Some(1));
//! ```
//!
//! Besides the construction, the crate offers a few consumers of the resulting [`DFA`]: the
//! rendering of transition tables and graphviz diagrams (see [`dot`]), reachability queries such
//! as finding a shortest accepted word, and the sampling of random accepted words (see
//! [`random`], behind the `random` feature).
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use diophantine_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    #[cfg(feature = "random")]
    pub use super::random;
    pub use super::{
        alphabet::{BitAlphabet, BitSymbol, ParseSymbolError, MAX_VARIABLES},
        automaton::{IntoBitSymbol, DFA},
        builder::{build, InvalidArgument},
        equation::LinearEquation,
        math,
        state::State,
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the
/// crate and do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets of bit vectors.
pub mod alphabet;

/// Linear equations and the encoding of their assignments as words.
pub mod equation;

/// The states of automata constructed from equations.
pub mod state;

/// Implements the construction of an automaton from an equation.
pub mod builder;
pub use builder::build;

/// Defines the automaton that the construction produces.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::DFA;

/// Output of automata in the DOT format of graphviz.
pub mod dot;

/// Implements the sampling of random accepted words.
#[cfg(feature = "random")]
pub mod random;

/// Helper trait which can be used to display states, symbols and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that is its residual or
    /// `⊥`, for a symbol the string of its bits.
    fn show(&self) -> String;
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!(
            "\"{}\"",
            itertools::Itertools::join(&mut self.iter().map(|x| x.show()), " ")
        )
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn show_words() {
        let word: Vec<BitSymbol> = vec!["10".parse().unwrap(), "01".parse().unwrap()];
        assert_eq!(word.show(), "\"10 01\"");
        assert_eq!(Vec::<BitSymbol>::new().show(), "\"\"");
    }
}
