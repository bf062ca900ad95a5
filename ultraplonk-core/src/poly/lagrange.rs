//! Closed forms for the vanishing polynomial and the Lagrange basis over an
//! [`EvaluationDomain`], evaluated at a single out-of-domain point.

use ark_bn254::Fr;
use ark_ff::{Field, One, Zero};
use common::constants::NUM_ROOTS_CUT_OUT_OF_VANISHING_POLYNOMIAL;

use super::batch_inverse::batch_inverse;
use super::domain::EvaluationDomain;
use super::fraction::Fraction;

/// `1 / Z*(ζ)` where `Z*(X) = (X^n - 1) / ∏_{j=1}^{4} (X - ω^{-j})` is the
/// vanishing polynomial with the last four rows removed.
pub fn vanishing_inverse(domain: &EvaluationDomain, zeta: Fr, zeta_pow_n: Fr) -> Fraction<Fr> {
    let mut denominator = Fr::one();
    let mut root = Fr::one();
    for _ in 0..NUM_ROOTS_CUT_OUT_OF_VANISHING_POLYNOMIAL {
        root *= domain.root_inverse;
        denominator *= zeta - root;
    }
    Fraction::new(denominator, zeta_pow_n - Fr::one())
}

/// `L_0(ζ) = (ζ^n - 1) / (n (ζ - 1))`.
pub fn l_start(domain: &EvaluationDomain, zeta: Fr, zeta_pow_n: Fr) -> Fraction<Fr> {
    Fraction::new(
        (zeta_pow_n - Fr::one()) * domain.size_inverse,
        zeta - Fr::one(),
    )
}

/// Lagrange polynomial of the last unmasked row, `n - 5`:
/// `(ζ^n - 1) / (n (ζ ω^5 - 1))`.
pub fn l_end(domain: &EvaluationDomain, zeta: Fr, zeta_pow_n: Fr) -> Fraction<Fr> {
    let omega_pow_5 = domain.root.pow([NUM_ROOTS_CUT_OUT_OF_VANISHING_POLYNOMIAL as u64 + 1]);
    Fraction::new(
        (zeta_pow_n - Fr::one()) * domain.size_inverse,
        zeta * omega_pow_5 - Fr::one(),
    )
}

/// `(γ(1 + β))^{n - 4}`, the grand product correction for the lookup
/// argument.
pub fn plookup_delta(domain: &EvaluationDomain, beta: Fr, gamma: Fr) -> Fraction<Fr> {
    let base = gamma * (beta + Fr::one());
    Fraction::new(
        domain.pow_size(base),
        base.pow([NUM_ROOTS_CUT_OUT_OF_VANISHING_POLYNOMIAL as u64]),
    )
}

/// Evaluates the polynomial taking `values[i]` at `ω^i`, and zero on the
/// remaining rows, at `ζ` with the barycentric formula
/// `(ζ^n - 1)/n · Σ values[i] ω^i / (ζ - ω^i)`.
pub fn barycentric_evaluate(
    domain: &EvaluationDomain,
    values: &[Fr],
    zeta: Fr,
    zeta_pow_n: Fr,
) -> Fr {
    let roots: Vec<Fr> = domain.powers_of_root(values.len()).collect();
    let mut denominators: Vec<Fr> = roots.iter().map(|w| zeta - w).collect();

    if batch_inverse(&mut denominators).is_none() {
        // ζ is one of the first `values.len()` rows
        return roots
            .iter()
            .position(|w| *w == zeta)
            .map(|i| values[i])
            .unwrap_or_default();
    }
    if zeta_pow_n.is_one() {
        // ζ is a row past the end of `values`
        return Fr::zero();
    }

    let sum: Fr = values
        .iter()
        .zip(roots.iter().zip(denominators.iter()))
        .map(|(v, (w, d))| *v * w * d)
        .sum();
    sum * (zeta_pow_n - Fr::one()) * domain.size_inverse
}
