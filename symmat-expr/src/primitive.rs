//! Functions to construct [`Rational`]s from various types.

use rug::Rational;

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Rational`] from a numerator and denominator.
///
/// The denominator must be nonzero; the result is automatically reduced to lowest terms, with the
/// sign carried by the numerator.
pub fn frac(numer: i64, denom: i64) -> Rational {
    assert!(denom != 0, "fraction denominator must be nonzero");
    Rational::from((numer, denom))
}
