use ark_bn254::Fr;
use ark_ff::{One, Zero};
use common::constants::PUBLIC_INPUT_SIZE;

use crate::field::FieldBytes;
use crate::poly::domain::EvaluationDomain;
use crate::poly::fraction::Fraction;
use crate::poly::lagrange::barycentric_evaluate;
use crate::utils::errors::{HexError, VerifyError};

/// A public input as it crosses the binary boundary: 32 bytes big-endian.
pub type PublicInput = [u8; PUBLIC_INPUT_SIZE];

/// Coset generators separating the copy-permutation identity columns.
const PERMUTATION_COSET_NUMERATOR: u64 = 5;
const PERMUTATION_COSET_DENOMINATOR: u64 = 12;

/// Parses a hex public input, with or without a `0x` prefix, left-padding
/// it to 32 bytes.
pub fn parse_public_input_hex(text: &str) -> Result<PublicInput, HexError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let bytes = hex::decode(digits)?;
    if bytes.len() > PUBLIC_INPUT_SIZE {
        return Err(HexError::TooLong(bytes.len()));
    }
    let mut input = [0u8; PUBLIC_INPUT_SIZE];
    input[PUBLIC_INPUT_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Ok(input)
}

/// Checks the count against the key and that every input is a canonical
/// scalar.
pub fn decode_public_inputs(
    inputs: &[PublicInput],
    expected_count: u32,
) -> Result<Vec<Fr>, VerifyError> {
    if inputs.len() != expected_count as usize {
        return Err(VerifyError::PublicInputCountMismatch {
            expected: expected_count as usize,
            got: inputs.len(),
        });
    }
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            Fr::from_canonical_be_bytes(input).ok_or(VerifyError::InvalidPublicInput { index })
        })
        .collect()
}

/// `PI(ζ)`, the public input polynomial taking `inputs[i]` at `ω^i`.
///
/// Not part of [`verify`](crate::verify): UltraPlonk binds public inputs
/// through the copy permutation, so the identity check consumes
/// [`permutation_delta`] instead. Kept for callers that need the plain
/// evaluation.
pub fn evaluate(inputs: &[Fr], domain: &EvaluationDomain, zeta: Fr, zeta_pow_n: Fr) -> Fr {
    if inputs.is_empty() {
        return Fr::zero();
    }
    barycentric_evaluate(domain, inputs, zeta, zeta_pow_n)
}

/// `ΔPI = ∏ (x_i + γ + 5βω^i) / ∏ (x_i + γ + 12βω^i)`, the amount by which
/// public inputs shift the copy-permutation grand product.
pub fn permutation_delta(
    inputs: &[Fr],
    domain: &EvaluationDomain,
    beta: Fr,
    gamma: Fr,
) -> Fraction<Fr> {
    let mut numerator_root = beta * Fr::from(PERMUTATION_COSET_NUMERATOR);
    let mut denominator_root = beta * Fr::from(PERMUTATION_COSET_DENOMINATOR);
    let mut numerator = Fr::one();
    let mut denominator = Fr::one();
    for input in inputs {
        let shifted = *input + gamma;
        numerator *= shifted + numerator_root;
        denominator *= shifted + denominator_root;
        numerator_root *= domain.root;
        denominator_root *= domain.root;
    }
    Fraction::new(numerator, denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::UniformRand;
    use ark_std::test_rng;

    #[test]
    fn parses_hex_inputs() {
        let mut ten = [0u8; 32];
        ten[31] = 10;
        assert_eq!(parse_public_input_hex("0x0a"), Ok(ten));
        assert_eq!(parse_public_input_hex("0X0A"), Ok(ten));
        assert_eq!(parse_public_input_hex("0a"), Ok(ten));
        assert_eq!(parse_public_input_hex(&format!("{:064x}", 10)), Ok(ten));
        assert_eq!(parse_public_input_hex(""), Ok([0u8; 32]));

        assert!(matches!(
            parse_public_input_hex("0xa"),
            Err(HexError::Encoding(hex::FromHexError::OddLength))
        ));
        assert!(matches!(
            parse_public_input_hex("0xzz"),
            Err(HexError::Encoding(_))
        ));
        assert_eq!(
            parse_public_input_hex(&"00".repeat(33)),
            Err(HexError::TooLong(33))
        );
    }

    #[test]
    fn validates_count_and_range() {
        let mut ten = [0u8; 32];
        ten[31] = 10;
        assert_eq!(decode_public_inputs(&[ten], 1), Ok(vec![Fr::from(10u64)]));
        assert_eq!(
            decode_public_inputs(&[ten, ten], 1),
            Err(VerifyError::PublicInputCountMismatch {
                expected: 1,
                got: 2
            })
        );
        assert_eq!(
            decode_public_inputs(&[ten, [0xff; 32]], 2),
            Err(VerifyError::InvalidPublicInput { index: 1 })
        );
        assert_eq!(decode_public_inputs(&[], 0), Ok(vec![]));
    }

    #[test]
    fn no_inputs() {
        let mut rng = test_rng();
        let domain = EvaluationDomain::new(1 << 10).unwrap();
        let (beta, gamma, zeta) = (Fr::rand(&mut rng), Fr::rand(&mut rng), Fr::rand(&mut rng));
        assert!(evaluate(&[], &domain, zeta, domain.pow_size(zeta)).is_zero());
        assert_eq!(
            permutation_delta(&[], &domain, beta, gamma).evaluate(),
            Some(Fr::one())
        );
    }

    #[test]
    fn single_input_delta() {
        let domain = EvaluationDomain::new(16).unwrap();
        let (beta, gamma) = (Fr::from(2u64), Fr::from(3u64));
        let delta = permutation_delta(&[Fr::from(10u64)], &domain, beta, gamma);
        assert_eq!(delta.numerator, Fr::from(10 + 3 + 5 * 2u64));
        assert_eq!(delta.denominator, Fr::from(10 + 3 + 12 * 2u64));
    }

    #[test]
    fn evaluation_passes_through_inputs() {
        let mut rng = test_rng();
        let domain = EvaluationDomain::new(8).unwrap();
        let inputs: Vec<Fr> = (0..3).map(|_| Fr::rand(&mut rng)).collect();
        let omega_sq = domain.root * domain.root;
        assert_eq!(evaluate(&inputs, &domain, omega_sq, Fr::one()), inputs[2]);
    }
}
