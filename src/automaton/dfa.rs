use bit_set::BitSet;
use itertools::Itertools;

use crate::{
    alphabet::{BitAlphabet, BitSymbol},
    automaton::{IntoBitSymbol, StateId},
    math::Map,
    state::State,
    Show,
};

/// A deterministic finite automaton over a [`BitAlphabet`] whose states are residuals of a
/// linear equation. It is produced by [`crate::builder::build`] and cannot be modified
/// afterwards.
///
/// The transition function is total: every state, including the sink, has exactly one
/// successor for every symbol of the alphabet.
#[derive(Clone, Debug)]
pub struct DFA {
    alphabet: BitAlphabet,
    states: Vec<State>,
    index: Map<State, StateId>,
    // one row per state, indexed by the position of a symbol in the alphabet
    rows: Vec<Vec<StateId>>,
    initial: StateId,
    accepting: BitSet,
}

impl DFA {
    pub(crate) fn from_parts(
        alphabet: BitAlphabet,
        states: Vec<State>,
        index: Map<State, StateId>,
        rows: Vec<Vec<StateId>>,
        initial: StateId,
        accepting: BitSet,
    ) -> Self {
        debug_assert_eq!(states.len(), rows.len());
        debug_assert!(rows.iter().all(|row| row.len() == alphabet.size()));
        Self {
            alphabet,
            states,
            index,
            rows,
            initial,
            accepting,
        }
    }

    /// The alphabet the automaton reads.
    pub fn alphabet(&self) -> &BitAlphabet {
        &self.alphabet
    }

    /// Iterates over all states in the order in which they were discovered.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.states.iter().copied()
    }

    /// The number of states, including the sink.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if `state` is a state of `self`.
    pub fn contains(&self, state: &State) -> bool {
        self.index.contains_key(state)
    }

    /// The initial state, which is the constant of the equation.
    pub fn initial(&self) -> State {
        self.states[self.initial as usize]
    }

    /// The absorbing rejecting state.
    pub fn sink(&self) -> State {
        State::Sink
    }

    /// Iterates over the accepting states. This is either just the residual `0`, or nothing at
    /// all if the equation has no solution.
    pub fn accepting_states(&self) -> impl Iterator<Item = State> + '_ {
        self.accepting.iter().map(|id| self.states[id])
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: &State) -> bool {
        self.id(state)
            .is_some_and(|id| self.accepting.contains(id as usize))
    }

    /// Returns the state that is reached from `state` on `symbol`. This is `None` only if
    /// `state` does not belong to `self` or `symbol` has the wrong width.
    pub fn successor(&self, state: &State, symbol: BitSymbol) -> Option<State> {
        let id = self.id(state)?;
        self.successor_id(id, symbol).map(|t| self.state(t))
    }

    /// Iterates over all transitions as triples `(source, symbol, target)`.
    pub fn transitions(&self) -> impl Iterator<Item = (State, BitSymbol, State)> + '_ {
        self.states.iter().enumerate().flat_map(move |(id, q)| {
            self.alphabet
                .universe()
                .zip(self.rows[id].iter())
                .map(move |(sym, t)| (*q, sym, self.state(*t)))
        })
    }

    /// Runs `word` from the initial state and returns the state that is reached. Returns `None`
    /// if some symbol of `word` is not part of the alphabet.
    pub fn run<W>(&self, word: W) -> Option<State>
    where
        W: IntoIterator,
        W::Item: IntoBitSymbol,
    {
        self.run_from(&self.initial(), word)
    }

    /// Runs `word` from `origin`, see [`Self::run`].
    pub fn run_from<W>(&self, origin: &State, word: W) -> Option<State>
    where
        W: IntoIterator,
        W::Item: IntoBitSymbol,
    {
        let mut current = self.id(origin)?;
        for sym in word {
            current = self.successor_id(current, sym.into_bit_symbol()?)?;
        }
        Some(self.state(current))
    }

    /// Returns true if running `word` from the initial state ends in an accepting state.
    pub fn accepts<W>(&self, word: W) -> bool
    where
        W: IntoIterator,
        W::Item: IntoBitSymbol,
    {
        self.run(word).is_some_and(|q| self.is_accepting(&q))
    }

    /// Returns a string representation of the transition table with one row per state and one
    /// column per symbol. The initial state is marked with `->`, accepting states with `*`.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet.universe().map(|s| s.show())),
        );
        for id in (0..self.states.len()).sorted_by_key(|id| self.states[*id]) {
            let mut label = String::new();
            if id == self.initial as usize {
                label.push_str("->");
            }
            if self.accepting.contains(id) {
                label.push('*');
            }
            label.push_str(&self.states[id].show());
            builder.push_record(
                std::iter::once(label).chain(self.rows[id].iter().map(|t| self.state(*t).show())),
            );
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    pub(crate) fn id(&self, state: &State) -> Option<StateId> {
        self.index.get(state).copied()
    }

    pub(crate) fn state(&self, id: StateId) -> State {
        self.states[id as usize]
    }

    pub(crate) fn initial_id(&self) -> StateId {
        self.initial
    }

    pub(crate) fn accepting_ids(&self) -> &BitSet {
        &self.accepting
    }

    pub(crate) fn row(&self, id: StateId) -> &[StateId] {
        &self.rows[id as usize]
    }

    pub(crate) fn successor_id(&self, id: StateId, symbol: BitSymbol) -> Option<StateId> {
        let position = self.alphabet.position(symbol)?;
        self.rows.get(id as usize).map(|row| row[position])
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    fn all_words(alphabet: &BitAlphabet, length: usize) -> Vec<Vec<BitSymbol>> {
        if length == 0 {
            return vec![vec![]];
        }
        (0..length)
            .map(|_| alphabet.universe().collect_vec())
            .multi_cartesian_product()
            .collect()
    }

    #[test]
    fn transition_function_is_total() {
        for (coefficients, constant) in [
            (vec![1], 0),
            (vec![1, 1], 2),
            (vec![2], 1),
            (vec![3, -5, 7], -11),
            (vec![0, 0, 0], 5),
        ] {
            let dfa = build(coefficients.len(), &coefficients, constant).unwrap();
            assert!(dfa.contains(&State::Sink));
            for q in dfa.states() {
                for sym in dfa.alphabet().universe() {
                    let target = dfa.successor(&q, sym).unwrap();
                    assert!(dfa.contains(&target));
                }
            }
            assert_eq!(
                dfa.transitions().count(),
                dfa.size() * dfa.alphabet().size()
            );
        }
    }

    #[test]
    fn sink_is_absorbing() {
        let dfa = build(2, &[3, -1], 4).unwrap();
        for sym in dfa.alphabet().universe() {
            assert_eq!(dfa.successor(&State::Sink, sym), Some(State::Sink));
        }
        assert!(!dfa.is_accepting(&State::Sink));
        for word in all_words(dfa.alphabet(), 3) {
            assert_eq!(dfa.run_from(&State::Sink, &word), Some(State::Sink));
        }
    }

    #[test]
    fn unknown_inputs_are_rejected() {
        let dfa = build(2, &[1, 1], 2).unwrap();
        assert_eq!(dfa.successor(&State::Value(77), "00".parse().unwrap()), None);
        assert_eq!(dfa.successor(&State::Value(2), "0".parse().unwrap()), None);
        assert_eq!(dfa.run(["11", "x"]), None);
        assert!(!dfa.accepts(["1"]));
    }

    #[test_log::test]
    fn accepts_exactly_the_solutions() {
        for (coefficients, constant) in [
            (vec![1, 1], 2),
            (vec![2, -3], 1),
            (vec![1, 2, -1], 0),
            (vec![-1, -1], -3),
            (vec![3], 9),
            (vec![0, 2], 4),
        ] {
            let eq = LinearEquation::new(coefficients.len(), coefficients, constant).unwrap();
            let dfa = eq.to_dfa();
            for length in 0..=4 {
                for word in all_words(dfa.alphabet(), length) {
                    let values = eq.decode(&word).unwrap();
                    assert_eq!(
                        dfa.accepts(&word),
                        eq.is_satisfied_by(&values),
                        "{eq} on {values:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn state_count_stays_bounded() {
        for (coefficients, constant) in [
            (vec![5, -7], 100),
            (vec![13, 4, -9], -31),
            (vec![1], -1000),
        ] {
            let dfa = build(coefficients.len(), &coefficients, constant).unwrap();
            let bound = crate::math::residual_bound(&coefficients, constant);
            for q in dfa.states() {
                if let Some(k) = q.value() {
                    assert!(k.abs() <= bound);
                }
            }
            assert!(dfa.size() as i128 <= 2 * bound + 2);
        }
    }

    #[test]
    fn transition_table_lists_every_state() {
        let dfa = build(1, &[1], 0).unwrap();
        let table = dfa.transition_table();
        assert!(table.contains("State"));
        assert!(table.contains("->*0"));
        assert!(table.contains('⊥'));
        assert_eq!(table.lines().filter(|l| l.contains('⊥')).count(), 2);
    }
}
