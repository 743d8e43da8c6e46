use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::trace;

use crate::{
    alphabet::BitSymbol,
    automaton::{StateId, DFA},
    state::State,
};

/// Type alias for a minimal representative of a state, which is its length-lexicographically
/// minimal access sequence together with the state itself.
pub type MinimalRepresentative = (Vec<BitSymbol>, State);

/// Iterator over the minimal representatives of all states that are reachable from a given
/// origin, in breadth-first order. Symbols are tried in the order of the alphabet, so the
/// access sequence of each state is length-lexicographically minimal.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a DFA,
    seen: BitSet,
    queue: VecDeque<(Vec<BitSymbol>, StateId)>,
}

impl<'a> MinimalRepresentatives<'a> {
    fn new(dfa: &'a DFA, origin: StateId) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        seen.insert(origin as usize);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (sym, &p) in self.dfa.alphabet().universe().zip(self.dfa.row(q)) {
            if self.seen.insert(p as usize) {
                let mut extended = access.clone();
                extended.push(sym);
                self.queue.push_back((extended, p));
            }
        }
        Some((access, self.dfa.state(q)))
    }
}

impl DFA {
    /// Iterates over the minimal representatives of all states reachable from the initial
    /// state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, self.initial_id())
    }

    /// Same as [`Self::minimal_representatives`], but starting from `origin`. Returns `None`
    /// if `origin` is not a state of `self`.
    pub fn minimal_representatives_from(
        &self,
        origin: &State,
    ) -> Option<MinimalRepresentatives<'_>> {
        Some(MinimalRepresentatives::new(self, self.id(origin)?))
    }

    /// Iterates over the states that are reachable from the initial state. As the construction
    /// only ever adds reachable states, these are all states of the automaton.
    pub fn reachable_states(&self) -> impl Iterator<Item = State> + '_ {
        self.minimal_representatives().map(|(_, q)| q)
    }

    /// Returns the length-lexicographically smallest accepted word, or `None` if the accepted
    /// language is empty.
    pub fn shortest_accepted_word(&self) -> Option<Vec<BitSymbol>> {
        self.minimal_representatives()
            .find_map(|(word, q)| self.is_accepting(&q).then_some(word))
    }

    /// The length of the shortest accepted word.
    pub fn minimum_word_length(&self) -> Option<usize> {
        self.shortest_accepted_word().map(|w| w.len())
    }

    /// Returns true if and only if no word is accepted, which is the case precisely when the
    /// equation has no solution.
    pub fn is_empty_language(&self) -> bool {
        self.shortest_accepted_word().is_none()
    }

    /// Returns the states from which some accepting state can be reached. The sink never is
    /// among them.
    pub fn live_states(&self) -> Vec<State> {
        let live = self.live_ids();
        self.states()
            .enumerate()
            .filter_map(|(id, q)| live.contains(id).then_some(q))
            .collect()
    }

    fn live_ids(&self) -> BitSet {
        let mut live = self.accepting_ids().clone();
        loop {
            let before = live.len();
            for id in 0..self.size() {
                if !live.contains(id)
                    && self
                        .row(id as StateId)
                        .iter()
                        .any(|t| live.contains(*t as usize))
                {
                    live.insert(id);
                }
            }
            if live.len() == before {
                break;
            }
        }
        trace!("{} of {} states are live", live.len(), self.size());
        live
    }

    /// Computes for every `i` in `0..=length` and every state the number of words of exactly
    /// `i` symbols that lead from that state into an accepting state. Entry `[i][id]` belongs to
    /// the state with index `id`. Counts saturate at `u128::MAX`.
    pub(crate) fn accepted_word_counts(&self, length: usize) -> Vec<Vec<u128>> {
        let mut counts = Vec::with_capacity(length + 1);
        counts.push(
            (0..self.size())
                .map(|id| u128::from(self.accepting_ids().contains(id)))
                .collect::<Vec<_>>(),
        );
        for i in 1..=length {
            let previous: &Vec<u128> = &counts[i - 1];
            let layer = (0..self.size())
                .map(|id| {
                    self.row(id as StateId)
                        .iter()
                        .fold(0u128, |acc, t| acc.saturating_add(previous[*t as usize]))
                })
                .collect();
            counts.push(layer);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    #[test]
    fn minimal_representatives_are_breadth_first() {
        let dfa = build(2, &[1, 1], 2).unwrap();
        let reps = dfa.minimal_representatives().collect_vec();
        assert_eq!(reps[0], (vec![], State::Value(2)));
        assert_eq!(reps.len(), dfa.size());
        assert!(reps.iter().tuple_windows().all(|(a, b)| a.0.len() <= b.0.len()));
        assert_eq!(
            dfa.reachable_states().sorted().collect_vec(),
            dfa.states().sorted().collect_vec()
        );
    }

    #[test]
    fn shortest_word_reaches_zero() {
        let dfa = build(2, &[1, 1], 2).unwrap();
        let word = dfa.shortest_accepted_word().unwrap();
        assert_eq!(word.iter().map(|s| s.show()).collect_vec(), vec!["11"]);
        assert_eq!(dfa.minimum_word_length(), Some(1));

        let dfa = build(1, &[1], 0).unwrap();
        assert_eq!(dfa.shortest_accepted_word(), Some(vec![]));
        assert_eq!(dfa.minimum_word_length(), Some(0));

        let dfa = build(1, &[1], 5).unwrap();
        let word = dfa.shortest_accepted_word().unwrap();
        let eq = LinearEquation::new(1, vec![1], 5).unwrap();
        assert_eq!(eq.decode(&word), Some(vec![5]));
    }

    #[test]
    fn empty_language() {
        let dfa = build(1, &[2], 1).unwrap();
        assert!(dfa.is_empty_language());
        assert_eq!(dfa.minimum_word_length(), None);
        assert!(dfa.live_states().is_empty());

        let dfa = build(2, &[4, 6], 3).unwrap();
        assert!(dfa.is_empty_language());
    }

    #[test]
    fn live_states_exclude_the_sink() {
        let dfa = build(2, &[1, -1], 3).unwrap();
        let live = dfa.live_states();
        assert!(!live.contains(&State::Sink));
        assert!(live.contains(&dfa.initial()));
        assert!(live.contains(&State::Value(0)));
    }

    #[test]
    fn accepted_words_are_counted_per_length() {
        let dfa = build(1, &[1], 2).unwrap();
        let counts = dfa.accepted_word_counts(3);
        let two = dfa.id(&State::Value(2)).unwrap() as usize;
        let sink = dfa.id(&State::Sink).unwrap() as usize;
        // 2 needs at least the two symbols `0 1`, afterwards only leading zeros can follow
        assert_eq!(
            counts.iter().map(|layer| layer[two]).collect_vec(),
            vec![0, 0, 1, 1]
        );
        assert!(counts.iter().all(|layer| layer[sink] == 0));

        // x1 + x2 = 2 has the solutions (2, 0), (1, 1) and (0, 2)
        let dfa = build(2, &[1, 1], 2).unwrap();
        let counts = dfa.accepted_word_counts(3);
        let initial = dfa.id(&dfa.initial()).unwrap() as usize;
        assert_eq!(counts[1][initial], 1);
        assert_eq!(counts[2][initial], 3);
        assert_eq!(counts[3][initial], 3);
    }
}
