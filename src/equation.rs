use std::fmt::Display;

use itertools::Itertools;

use crate::{
    alphabet::{BitAlphabet, BitSymbol},
    builder::InvalidArgument,
    math::Residual,
    Show,
};

/// A linear equation `a1·x1 + … + an·xn = c` over non-negative integer variables.
///
/// The equation is validated on creation, so an instance always has at least one variable and
/// at most [`crate::alphabet::MAX_VARIABLES`] of them.
///
/// # Example
/// ```
/// use diophantine_automata::prelude::*;
///
/// let eq = LinearEquation::new(2, vec![1, -2], 3).unwrap();
/// assert_eq!(eq.to_string(), "1*x_1 + -2*x_2 = 3");
/// assert!(eq.is_satisfied_by(&[5, 1]));
/// ```
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct LinearEquation {
    coefficients: Vec<i64>,
    constant: i64,
}

impl LinearEquation {
    /// Creates a new equation with `n` variables. Fails if `n` is zero, if `coefficients` does
    /// not contain exactly `n` entries or if there are too many variables.
    pub fn new(n: usize, coefficients: Vec<i64>, constant: i64) -> Result<Self, InvalidArgument> {
        InvalidArgument::check(n, &coefficients)?;
        Ok(Self {
            coefficients,
            constant,
        })
    }

    /// The number of variables.
    pub fn variables(&self) -> usize {
        self.coefficients.len()
    }

    /// The coefficients, the `i`-th one belongs to variable `x_{i+1}`.
    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    /// The constant on the right hand side.
    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// The alphabet over which words encoding assignments for this equation are written.
    pub fn alphabet(&self) -> BitAlphabet {
        BitAlphabet::new(self.variables())
    }

    /// Computes the left hand side for the given assignment.
    pub fn evaluate(&self, values: &[u64]) -> Residual {
        assert_eq!(values.len(), self.variables(), "wrong number of values");
        self.coefficients
            .iter()
            .zip(values)
            .map(|(&a, &v)| Residual::from(a) * Residual::from(v))
            .sum()
    }

    /// Returns true if the given assignment satisfies the equation.
    pub fn is_satisfied_by(&self, values: &[u64]) -> bool {
        self.evaluate(values) == Residual::from(self.constant)
    }

    /// Returns the smallest number of bits in which every one of `values` can be represented.
    pub fn minimal_length(values: &[u64]) -> usize {
        values
            .iter()
            .map(|v| (u64::BITS - v.leading_zeros()) as usize)
            .max()
            .unwrap_or(0)
    }

    /// Encodes an assignment as a word of `length` symbols, least significant bits first. The
    /// `j`-th symbol holds bit `j` of every value. Returns `None` if some value does not fit into
    /// `length` bits.
    pub fn encode(&self, values: &[u64], length: usize) -> Option<Vec<BitSymbol>> {
        assert_eq!(values.len(), self.variables(), "wrong number of values");
        if Self::minimal_length(values) > length {
            return None;
        }
        Some(
            (0..length)
                .map(|j| BitSymbol::from_bits(values.iter().map(|v| j < 64 && (v >> j) & 1 == 1)))
                .collect(),
        )
    }

    /// Decodes a word of symbols (least significant bits first) into one value per variable.
    /// Returns `None` if a symbol has the wrong width or the word has more than 64 symbols.
    pub fn decode<'a, W>(&self, word: W) -> Option<Vec<u64>>
    where
        W: IntoIterator<Item = &'a BitSymbol>,
    {
        let mut values = vec![0u64; self.variables()];
        for (j, sym) in word.into_iter().enumerate() {
            if j >= 64 || sym.width() != self.variables() {
                return None;
            }
            for (i, value) in values.iter_mut().enumerate() {
                if sym.bit(i) {
                    *value |= 1 << j;
                }
            }
        }
        Some(values)
    }
}

impl Display for LinearEquation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {}",
            self.coefficients
                .iter()
                .enumerate()
                .map(|(i, a)| format!("{a}*x_{}", i + 1))
                .join(" + "),
            self.constant
        )
    }
}

impl Show for LinearEquation {
    fn show(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting() {
        let eq = LinearEquation::new(3, vec![2, 0, -1], -4).unwrap();
        assert_eq!(eq.to_string(), "2*x_1 + 0*x_2 + -1*x_3 = -4");
        let eq = LinearEquation::new(1, vec![1], 0).unwrap();
        assert_eq!(eq.show(), "1*x_1 = 0");
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert_eq!(
            LinearEquation::new(0, vec![], 1),
            Err(InvalidArgument::NoVariables)
        );
        assert_eq!(
            LinearEquation::new(2, vec![1], 1),
            Err(InvalidArgument::CoefficientCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn evaluation() {
        let eq = LinearEquation::new(2, vec![3, -2], 4).unwrap();
        assert_eq!(eq.evaluate(&[2, 1]), 4);
        assert!(eq.is_satisfied_by(&[2, 1]));
        assert!(!eq.is_satisfied_by(&[1, 1]));
        assert!(eq.is_satisfied_by(&[4, 4]));
    }

    #[test]
    fn encoding_is_lsb_first() {
        let eq = LinearEquation::new(2, vec![1, 1], 0).unwrap();
        let word = eq.encode(&[1, 6], 3).unwrap();
        assert_eq!(word.iter().map(Show::show).collect::<Vec<_>>(), ["10", "01", "01"]);
        assert_eq!(eq.decode(&word), Some(vec![1, 6]));
        assert_eq!(eq.encode(&[1, 6], 2), None);
        assert_eq!(eq.encode(&[0, 0], 0), Some(vec![]));
        assert_eq!(LinearEquation::minimal_length(&[1, 6]), 3);
        assert_eq!(LinearEquation::minimal_length(&[0]), 0);
    }

    #[test]
    fn decoding_rejects_wrong_width() {
        let eq = LinearEquation::new(2, vec![1, 1], 0).unwrap();
        let word: Vec<BitSymbol> = vec!["1".parse().unwrap()];
        assert_eq!(eq.decode(&word), None);
    }
}
