//! BN254 point encodings and the fixed G2 points used by the final pairing.

use ark_bn254::{g2, Fq, Fq2, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::MontFp;
use common::constants::{FIELD_ELEMENT_SIZE, G1_POINT_SIZE};

use crate::field::FieldBytes;
use crate::utils::errors::DecodeError;

/// `[1]_2`, the generator of G2.
pub const G2_GENERATOR: G2Affine = G2Affine::new_unchecked(g2::G2_GENERATOR_X, g2::G2_GENERATOR_Y);

/// `[x]_2` from the Aztec Ignition ceremony.
pub const IGNITION_SRS_G2: G2Affine = G2Affine::new_unchecked(
    Fq2::new(
        MontFp!("496075682290949347282619629729389528669750910289829251317610107342504362928"),
        MontFp!("17212635814319756364507010169094758005397460366678210664966334781961899574209"),
    ),
    Fq2::new(
        MontFp!("15828724851114720558251891430452666121603726704878231219287131634746610441813"),
        MontFp!("2255182984359105691812395885056400739448730162863181907784180250290003009508"),
    ),
);

/// Reads a G1 point stored as `y ‖ x`, both coordinates big-endian.
///
/// `offset` is the position of `bytes` in the enclosing buffer and is only
/// used for error reporting.
pub fn read_g1(bytes: &[u8; G1_POINT_SIZE], offset: usize) -> Result<G1Affine, DecodeError> {
    let (y_bytes, x_bytes) = bytes.split_at(FIELD_ELEMENT_SIZE);
    let coordinate = |raw: &[u8], at: usize| {
        let mut word = [0u8; FIELD_ELEMENT_SIZE];
        word.copy_from_slice(raw);
        Fq::from_canonical_be_bytes(&word)
            .ok_or(DecodeError::NonCanonicalFieldElement { offset: at })
    };
    let y = coordinate(y_bytes, offset)?;
    let x = coordinate(x_bytes, offset + FIELD_ELEMENT_SIZE)?;

    // The all-zero encoding is how the prover would write infinity; it is
    // never a valid commitment here.
    if x == Fq::from(0u64) && y == Fq::from(0u64) {
        return Err(DecodeError::PointAtInfinity { offset });
    }

    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(DecodeError::PointNotOnCurve { offset });
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(DecodeError::PointNotInSubgroup { offset });
    }
    Ok(point)
}

/// Inverse of [`read_g1`]. Infinity is written as 64 zero bytes, which
/// [`read_g1`] rejects.
pub fn write_g1(point: &G1Affine, out: &mut Vec<u8>) {
    out.extend_from_slice(&point.y.to_be_bytes());
    out.extend_from_slice(&point.x.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_ff::UniformRand;
    use ark_std::test_rng;

    fn encode(point: &G1Affine) -> [u8; G1_POINT_SIZE] {
        let mut out = Vec::new();
        write_g1(point, &mut out);
        out.try_into().unwrap()
    }

    #[test]
    fn fixed_g2_points_are_valid() {
        for point in [G2_GENERATOR, IGNITION_SRS_G2] {
            assert!(point.is_on_curve());
            assert!(point.is_in_correct_subgroup_assuming_on_curve());
        }
        assert_eq!(G2_GENERATOR, G2Affine::generator());
    }

    #[test]
    fn generator_is_stored_y_first() {
        let bytes = encode(&G1Affine::generator());
        // G1 generator is (1, 2)
        assert_eq!(bytes[31], 2);
        assert_eq!(bytes[63], 1);
        assert_eq!(read_g1(&bytes, 0), Ok(G1Affine::generator()));
    }

    #[test]
    fn decodes_random_points() {
        let mut rng = test_rng();
        let point = (G1Projective::generator() * Fr::rand(&mut rng)).into_affine();
        assert_eq!(read_g1(&encode(&point), 0), Ok(point));
    }

    #[test]
    fn rejects_bad_points() {
        assert_eq!(
            read_g1(&[0u8; G1_POINT_SIZE], 96),
            Err(DecodeError::PointAtInfinity { offset: 96 })
        );

        // (1, 1) is not on y^2 = x^3 + 3
        let mut off_curve = [0u8; G1_POINT_SIZE];
        off_curve[31] = 1;
        off_curve[63] = 1;
        assert_eq!(
            read_g1(&off_curve, 0),
            Err(DecodeError::PointNotOnCurve { offset: 0 })
        );

        let mut oversized = encode(&G1Affine::generator());
        oversized[32..].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            read_g1(&oversized, 64),
            Err(DecodeError::NonCanonicalFieldElement { offset: 96 })
        );
    }
}
