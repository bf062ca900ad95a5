use ark_ff::Field;

use super::batch_inverse::batch_inverse;

/// A quotient whose division is deferred so that several can share one
/// field inversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fraction<F> {
    pub numerator: F,
    pub denominator: F,
}

impl<F: Field> Fraction<F> {
    pub fn new(numerator: F, denominator: F) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn evaluate(&self) -> Option<F> {
        Some(self.numerator * self.denominator.inverse()?)
    }
}

/// Evaluates all fractions with a single inversion. `None` if any
/// denominator is zero.
pub fn batch_evaluate<F: Field, const N: usize>(fractions: [Fraction<F>; N]) -> Option<[F; N]> {
    let mut denominators = fractions.map(|f| f.denominator);
    batch_inverse(&mut denominators)?;
    let mut out = denominators;
    for (o, f) in out.iter_mut().zip(fractions) {
        *o *= f.numerator;
    }
    Some(out)
}
