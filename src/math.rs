/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Integer type of the residual values that make up the states of a constructed automaton.
///
/// Coefficients and constants are given as `i64`. A residual reachable from the constant `c`
/// never exceeds `max(|c|, Σ|aᵢ|)` in absolute value, and a weighted sum over at most
/// [`crate::alphabet::MAX_VARIABLES`] coefficients stays far below the range of `i128`, so
/// none of the arithmetic performed during the construction can overflow.
pub type Residual = i128;

/// Halves `value` if it is even and returns `None` otherwise.
///
/// Only even values are ever halved, which means the division is exact and the sign of the
/// result always matches the sign of `value`. Floor division, truncating division and an
/// arithmetic shift all agree on this input, so the identity of a residual does not depend on
/// any rounding convention.
pub fn halve_exact(value: Residual) -> Option<Residual> {
    if value % 2 == 0 {
        Some(value / 2)
    } else {
        None
    }
}

/// Returns the bound `max(|constant|, Σ|aᵢ|)` on the absolute value of every residual that is
/// reachable from `constant` for the given coefficients.
pub fn residual_bound(coefficients: &[i64], constant: i64) -> Residual {
    let total: Residual = coefficients
        .iter()
        .map(|&a| Residual::from(a).abs())
        .sum();
    total.max(Residual::from(constant).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halving_preserves_sign() {
        assert_eq!(halve_exact(6), Some(3));
        assert_eq!(halve_exact(-6), Some(-3));
        assert_eq!(halve_exact(-2), Some(-1));
        assert_eq!(halve_exact(0), Some(0));
        assert_eq!(halve_exact(-1), None);
        assert_eq!(halve_exact(3), None);
    }

    #[test]
    fn bound_covers_constant_and_coefficients() {
        assert_eq!(residual_bound(&[1, -3], 2), 4);
        assert_eq!(residual_bound(&[1], -9), 9);
        assert_eq!(
            residual_bound(&[i64::MIN, i64::MIN], 0),
            2 * Residual::from(i64::MAX) + 2
        );
    }
}
