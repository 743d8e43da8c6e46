use crate::alphabet::BitSymbol;

mod dfa;
pub use dfa::DFA;

/// Queries about which states and words can be reached in a [`DFA`].
pub mod reachability;

/// Dense index of a state inside a [`DFA`]. Indices are assigned in the order in which the
/// construction discovers states, the initial state always has index `0`.
pub type StateId = u32;

/// Anything that can be read by a [`DFA`] as a single symbol. Strings are parsed as described
/// in [`BitSymbol`], a string that does not parse is not a symbol of any automaton and makes
/// the run fail.
pub trait IntoBitSymbol {
    /// Converts `self` into a symbol, if possible.
    fn into_bit_symbol(self) -> Option<BitSymbol>;
}

impl IntoBitSymbol for BitSymbol {
    fn into_bit_symbol(self) -> Option<BitSymbol> {
        Some(self)
    }
}

impl IntoBitSymbol for &BitSymbol {
    fn into_bit_symbol(self) -> Option<BitSymbol> {
        Some(*self)
    }
}

impl IntoBitSymbol for &str {
    fn into_bit_symbol(self) -> Option<BitSymbol> {
        self.parse().ok()
    }
}

impl IntoBitSymbol for &String {
    fn into_bit_symbol(self) -> Option<BitSymbol> {
        self.parse().ok()
    }
}
