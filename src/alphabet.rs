use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use crate::{math::Residual, Show};

/// The largest number of variables an alphabet may have. The construction materializes one
/// weight per symbol and one transition per symbol and state, so an alphabet of this width with
/// its `2^24` symbols is about as large as can still be built. The size of such an alphabet
/// also fits into a `usize` on 32-bit targets.
pub const MAX_VARIABLES: usize = 24;

/// A symbol of a [`BitAlphabet`]. It fixes one bit for each of the `width` variables of an
/// equation, bit `i` of the symbol being the bit that is currently read for variable `i`.
///
/// The textual representation (see [`Show`] and [`FromStr`]) is a string of `0` and `1` of length
/// `width`, where the `i`-th character is the bit of variable `i`.
///
/// # Example
/// ```
/// use diophantine_automata::prelude::*;
///
/// let sym: BitSymbol = "10".parse().unwrap();
/// assert!(sym.bit(0));
/// assert!(!sym.bit(1));
/// assert_eq!(sym.weighted_sum(&[3, 5]), 3);
/// ```
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct BitSymbol {
    width: u8,
    raw: u64,
}

impl BitSymbol {
    /// Creates a symbol of the given `width` from its packed representation. Bits above `width`
    /// are cleared.
    pub fn from_raw(width: usize, raw: u64) -> Self {
        assert!(width <= MAX_VARIABLES, "symbol is too wide");
        let mask = if width == 0 { 0 } else { u64::MAX >> (64 - width) };
        Self {
            width: width as u8,
            raw: raw & mask,
        }
    }

    /// Creates a symbol from one bit per variable.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let (width, raw) = bits
            .into_iter()
            .enumerate()
            .fold((0usize, 0u64), |(_, raw), (i, b)| {
                (i + 1, if b { raw | (1 << i) } else { raw })
            });
        Self::from_raw(width, raw)
    }

    /// The number of variables this symbol assigns a bit to.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// The packed representation, bit `i` belongs to variable `i`.
    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// Returns the bit that `self` assigns to the variable with index `i`.
    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.width(), "variable {i} is out of range");
        self.raw & (1 << i) != 0
    }

    /// Iterates over the bits of all variables in order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.width()).map(|i| self.bit(i))
    }

    /// Computes `Σ sᵢ·coefficients[i]`, i.e. the sum of all coefficients whose variable has
    /// its bit set in `self`.
    pub fn weighted_sum(&self, coefficients: &[i64]) -> Residual {
        debug_assert_eq!(coefficients.len(), self.width());
        coefficients
            .iter()
            .enumerate()
            .filter(|(i, _)| self.bit(*i))
            .map(|(_, &a)| Residual::from(a))
            .sum()
    }
}

impl Show for BitSymbol {
    fn show(&self) -> String {
        self.bits().map(|b| if b { '1' } else { '0' }).collect()
    }
}

impl Display for BitSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

/// Error that is returned when parsing a [`BitSymbol`] from a string fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSymbolError {
    /// The string contained a character other than `0` and `1`.
    #[error("encountered invalid bit `{0}`, expected `0` or `1`")]
    InvalidBit(char),
    /// The string is longer than [`MAX_VARIABLES`].
    #[error("symbol of width {0} exceeds the maximum of {max} variables", max = MAX_VARIABLES)]
    TooWide(usize),
}

impl FromStr for BitSymbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(ParseSymbolError::InvalidBit(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if bits.len() > MAX_VARIABLES {
            return Err(ParseSymbolError::TooWide(bits.len()));
        }
        Ok(Self::from_bits(bits))
    }
}

/// The alphabet of all [`BitSymbol`]s of a fixed width `n`. It contains exactly `2^n` symbols,
/// for `n = 0` that is the single empty symbol.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct BitAlphabet {
    width: u8,
}

impl BitAlphabet {
    /// Creates the alphabet of all symbols with `width` bits.
    pub fn new(width: usize) -> Self {
        assert!(width <= MAX_VARIABLES, "alphabet is too large");
        Self {
            width: width as u8,
        }
    }

    /// The number of bits per symbol.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Returns the number of symbols, which is `2^width`.
    pub fn size(&self) -> usize {
        1usize << self.width
    }

    /// Returns true if `symbol` has the width of this alphabet.
    pub fn contains(&self, symbol: BitSymbol) -> bool {
        symbol.width == self.width
    }

    /// Iterates over all symbols in ascending order of their packed representation.
    pub fn universe(&self) -> impl Iterator<Item = BitSymbol> + '_ {
        let width = self.width();
        (0..self.size() as u64).map(move |raw| BitSymbol::from_raw(width, raw))
    }

    /// The position of `symbol` in [`Self::universe`], if it belongs to this alphabet.
    pub fn position(&self, symbol: BitSymbol) -> Option<usize> {
        self.contains(symbol).then_some(symbol.raw as usize)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::math::Set;

    #[test]
    fn universe_has_every_symbol_once() {
        for n in 0..6 {
            let alphabet = BitAlphabet::new(n);
            let symbols: Set<_> = alphabet.universe().collect();
            assert_eq!(symbols.len(), 1 << n);
            assert_eq!(alphabet.size(), 1 << n);
            assert!(symbols.iter().all(|s| alphabet.contains(*s)));
        }
    }

    #[test]
    fn empty_width_alphabet_is_singleton() {
        let alphabet = BitAlphabet::new(0);
        let symbols = alphabet.universe().collect_vec();
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].show(), "");
        assert_eq!(symbols[0].weighted_sum(&[]), 0);
    }

    #[test]
    fn bit_positions_follow_variables() {
        let sym: BitSymbol = "011".parse().unwrap();
        assert_eq!(sym.bits().collect_vec(), vec![false, true, true]);
        assert_eq!(sym.raw(), 0b110);
        assert_eq!(sym.weighted_sum(&[1, 2, 4]), 6);
        assert_eq!(sym.weighted_sum(&[-7, -2, 5]), 3);
        assert_eq!(sym.show(), "011");
    }

    #[test]
    fn parsing_rejects_garbage() {
        assert_eq!(
            "01x".parse::<BitSymbol>(),
            Err(ParseSymbolError::InvalidBit('x'))
        );
        assert_eq!(
            "0".repeat(MAX_VARIABLES + 1).parse::<BitSymbol>(),
            Err(ParseSymbolError::TooWide(MAX_VARIABLES + 1))
        );
    }

    #[test]
    fn position_matches_universe_order() {
        let alphabet = BitAlphabet::new(3);
        for (i, sym) in alphabet.universe().enumerate() {
            assert_eq!(alphabet.position(sym), Some(i));
        }
        assert_eq!(alphabet.position(BitSymbol::from_raw(2, 1)), None);
    }

    #[test]
    fn widest_alphabet_size() {
        let alphabet = BitAlphabet::new(MAX_VARIABLES);
        assert_eq!(alphabet.size(), 1 << 24);
        let last = BitSymbol::from_raw(MAX_VARIABLES, u64::MAX);
        assert_eq!(alphabet.position(last), Some((1 << 24) - 1));
    }
}
