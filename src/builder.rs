use std::collections::VecDeque;

use bit_set::BitSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    alphabet::{BitAlphabet, MAX_VARIABLES},
    automaton::{StateId, DFA},
    equation::LinearEquation,
    math::{self, Map, Residual},
    state::State,
};

/// Violation of the input contract of [`build`]. These are detected before any state is
/// explored, so no partial automaton is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    /// The equation has no variables.
    #[error("an equation needs at least one variable")]
    NoVariables,
    /// The number of coefficients differs from the number of variables.
    #[error("expected {expected} coefficients but got {found}")]
    CoefficientCount {
        /// The declared number of variables.
        expected: usize,
        /// The number of coefficients that were given.
        found: usize,
    },
    /// More variables than [`MAX_VARIABLES`], the alphabet would be too large to enumerate.
    #[error("{0} variables exceed the maximum of {max}", max = MAX_VARIABLES)]
    TooManyVariables(usize),
}

impl InvalidArgument {
    pub(crate) fn check(n: usize, coefficients: &[i64]) -> Result<(), InvalidArgument> {
        if n == 0 {
            return Err(InvalidArgument::NoVariables);
        }
        if coefficients.len() != n {
            return Err(InvalidArgument::CoefficientCount {
                expected: n,
                found: coefficients.len(),
            });
        }
        if n > MAX_VARIABLES {
            return Err(InvalidArgument::TooManyVariables(n));
        }
        Ok(())
    }
}

/// Constructs the [`DFA`] that accepts exactly the words encoding (least significant bit first)
/// assignments of non-negative integers to the `n` variables which satisfy
/// `coefficients[0]·x1 + … + coefficients[n-1]·xn = constant`.
///
/// The states are the residuals reachable from `constant`. Reading a symbol `s` in state `k`
/// leads to `(k - w) / 2` where `w` is the weighted sum of `s`, provided `k - w` is even. If it
/// is odd, the transition leads to the sink. The only accepting state is `0`.
///
/// # Example
/// ```
/// use diophantine_automata::prelude::*;
///
/// let dfa = build(2, &[1, 1], 2).unwrap();
/// assert_eq!(dfa.initial(), State::Value(2));
/// assert!(dfa.accepts(["11"]));
/// assert!(dfa.accepts(["00", "10"]));
/// assert!(!dfa.accepts(["10"]));
/// ```
pub fn build(n: usize, coefficients: &[i64], constant: i64) -> Result<DFA, InvalidArgument> {
    InvalidArgument::check(n, coefficients)?;
    Ok(Exploration::new(coefficients, constant).run())
}

impl LinearEquation {
    /// Constructs the automaton recognizing the solutions of `self`, see [`build`].
    pub fn to_dfa(&self) -> DFA {
        Exploration::new(self.coefficients(), self.constant()).run()
    }
}

/// Mutable context of a single construction. It owns every intermediate structure and is
/// consumed by [`Exploration::run`], which freezes it into a [`DFA`].
struct Exploration {
    alphabet: BitAlphabet,
    // weighted sum of every symbol, indexed by position in the alphabet
    weights: Vec<Residual>,
    initial: StateId,
    sink: StateId,
    states: Vec<State>,
    known: Map<State, StateId>,
    rows: Vec<Vec<StateId>>,
    accepting: BitSet,
    worklist: VecDeque<StateId>,
}

impl Exploration {
    fn new(coefficients: &[i64], constant: i64) -> Self {
        let alphabet = BitAlphabet::new(coefficients.len());
        let weights = alphabet
            .universe()
            .map(|sym| sym.weighted_sum(coefficients))
            .collect();

        let mut exploration = Self {
            alphabet,
            weights,
            initial: 0,
            sink: 0,
            states: vec![],
            known: Map::default(),
            rows: vec![],
            accepting: BitSet::new(),
            worklist: VecDeque::new(),
        };
        exploration.initial = exploration.insert(State::from(constant));
        exploration.sink = exploration.insert(State::Sink);
        exploration.worklist.push_back(exploration.initial);
        exploration
    }

    fn insert(&mut self, state: State) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(state);
        self.rows.push(vec![]);
        self.known.insert(state, id);
        id
    }

    /// Returns the id of `state`, registering it and scheduling it for exploration if it
    /// has not been seen before.
    fn discover(&mut self, state: State) -> StateId {
        if let Some(id) = self.known.get(&state) {
            return *id;
        }
        let id = self.insert(state);
        trace!("discovered state {state}");
        self.worklist.push_back(id);
        id
    }

    fn run(mut self) -> DFA {
        debug!(
            "exploring residuals from {} over {} symbols",
            self.states[self.initial as usize],
            self.alphabet.size()
        );

        while let Some(id) = self.worklist.pop_front() {
            let k = self.states[id as usize]
                .value()
                .expect("the sink is never scheduled for exploration");
            if k == 0 {
                self.accepting.insert(id as usize);
            }

            let mut row = Vec::with_capacity(self.weights.len());
            for position in 0..self.weights.len() {
                let target = match math::halve_exact(k - self.weights[position]) {
                    Some(next) => self.discover(State::Value(next)),
                    None => self.sink,
                };
                row.push(target);
            }
            self.rows[id as usize] = row;
        }

        self.rows[self.sink as usize] = vec![self.sink; self.weights.len()];

        debug!(
            "explored {} states, {} accepting",
            self.states.len(),
            self.accepting.len()
        );
        DFA::from_parts(
            self.alphabet,
            self.states,
            self.known,
            self.rows,
            self.initial,
            self.accepting,
        )
    }
}
