use tracing::debug;

use crate::{automaton::StateId, prelude::*};

/// Draws a word of exactly `length` symbols uniformly at random from all such words accepted by
/// `dfa`. In every step, each symbol is chosen with probability proportional to the number of
/// accepted completions of the remaining length from its target. Returns `None` if no accepted
/// word of this length exists.
///
/// # Example
/// ```
/// use diophantine_automata::prelude::*;
///
/// let dfa = build(2, &[1, 1], 2).unwrap();
/// let word = random::random_word(&dfa, 3).unwrap();
/// assert_eq!(word.len(), 3);
/// assert!(dfa.accepts(&word));
/// ```
pub fn random_word(dfa: &DFA, length: usize) -> Option<Vec<BitSymbol>> {
    sample_word(dfa, length, &mut fastrand::Rng::new())
}

/// Works as [`random_word`], but draws from a generator seeded with `seed`, so that the result
/// is reproducible.
pub fn random_word_with_seed(dfa: &DFA, length: usize, seed: u64) -> Option<Vec<BitSymbol>> {
    sample_word(dfa, length, &mut fastrand::Rng::with_seed(seed))
}

/// Draws a random solution of `equation` whose values fit into `length` bits, using the
/// automaton `dfa` that was constructed for it.
pub fn random_solution(equation: &LinearEquation, dfa: &DFA, length: usize) -> Option<Vec<u64>> {
    let word = random_word(dfa, length)?;
    equation.decode(&word)
}

fn sample_word(dfa: &DFA, length: usize, rng: &mut fastrand::Rng) -> Option<Vec<BitSymbol>> {
    let counts = dfa.accepted_word_counts(length);
    let mut current: StateId = dfa.initial_id();
    if counts[length][current as usize] == 0 {
        debug!("no accepted word of length {length} exists");
        return None;
    }

    let mut word = Vec::with_capacity(length);
    for remaining in (0..length).rev() {
        // the completions from `current` split up among its successors
        let mut pick = rng.u128(..counts[remaining + 1][current as usize]);
        let (sym, target) = dfa
            .alphabet()
            .universe()
            .zip(dfa.row(current))
            .find_map(|(sym, t)| {
                let completions = counts[remaining][*t as usize];
                if pick < completions {
                    Some((sym, *t))
                } else {
                    pick -= completions;
                    None
                }
            })?;
        word.push(sym);
        current = target;
    }
    Some(word)
}
