use ark_bn254::{Fr, G1Affine};
use common::constants::{
    NUM_OPENING_PROOFS, NUM_PROOF_COMMITMENTS, NUM_PROOF_EVALUATIONS, NUM_SHIFTED_EVALUATIONS,
    NUM_UNSHIFTED_EVALUATIONS, PROOF_SIZE, PUBLIC_INPUT_SIZE,
};

use super::codec::{ByteReader, ByteWriter};
use super::public_inputs::PublicInput;
use crate::transcripts::{AppendToTranscript, Transcript};
use crate::utils::errors::DecodeError;

/// Claimed polynomial evaluations at `ζ`, then at `ζω` for the shifted ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofEvaluations {
    pub w1: Fr,
    pub w2: Fr,
    pub w3: Fr,
    pub w4: Fr,
    pub s: Fr,
    pub z: Fr,
    pub z_lookup: Fr,
    pub q1: Fr,
    pub q2: Fr,
    pub q3: Fr,
    pub q4: Fr,
    pub qm: Fr,
    pub qc: Fr,
    pub q_arith: Fr,
    pub q_sort: Fr,
    pub q_elliptic: Fr,
    pub q_aux: Fr,
    pub sigma1: Fr,
    pub sigma2: Fr,
    pub sigma3: Fr,
    pub sigma4: Fr,
    pub table1: Fr,
    pub table2: Fr,
    pub table3: Fr,
    pub table4: Fr,
    pub table_type: Fr,
    pub id1: Fr,
    pub id2: Fr,
    pub id3: Fr,
    pub id4: Fr,
    pub w1_omega: Fr,
    pub w2_omega: Fr,
    pub w3_omega: Fr,
    pub w4_omega: Fr,
    pub s_omega: Fr,
    pub z_omega: Fr,
    pub z_lookup_omega: Fr,
    pub table1_omega: Fr,
    pub table2_omega: Fr,
    pub table3_omega: Fr,
    pub table4_omega: Fr,
}

impl ProofEvaluations {
    pub fn from_array(values: [Fr; NUM_PROOF_EVALUATIONS]) -> Self {
        let [w1, w2, w3, w4, s, z, z_lookup, q1, q2, q3, q4, qm, qc, q_arith, q_sort, q_elliptic, q_aux, sigma1, sigma2, sigma3, sigma4, table1, table2, table3, table4, table_type, id1, id2, id3, id4, w1_omega, w2_omega, w3_omega, w4_omega, s_omega, z_omega, z_lookup_omega, table1_omega, table2_omega, table3_omega, table4_omega] =
            values;
        Self {
            w1,
            w2,
            w3,
            w4,
            s,
            z,
            z_lookup,
            q1,
            q2,
            q3,
            q4,
            qm,
            qc,
            q_arith,
            q_sort,
            q_elliptic,
            q_aux,
            sigma1,
            sigma2,
            sigma3,
            sigma4,
            table1,
            table2,
            table3,
            table4,
            table_type,
            id1,
            id2,
            id3,
            id4,
            w1_omega,
            w2_omega,
            w3_omega,
            w4_omega,
            s_omega,
            z_omega,
            z_lookup_omega,
            table1_omega,
            table2_omega,
            table3_omega,
            table4_omega,
        }
    }

    /// All evaluations in wire order.
    pub fn as_array(&self) -> [Fr; NUM_PROOF_EVALUATIONS] {
        [
            self.w1,
            self.w2,
            self.w3,
            self.w4,
            self.s,
            self.z,
            self.z_lookup,
            self.q1,
            self.q2,
            self.q3,
            self.q4,
            self.qm,
            self.qc,
            self.q_arith,
            self.q_sort,
            self.q_elliptic,
            self.q_aux,
            self.sigma1,
            self.sigma2,
            self.sigma3,
            self.sigma4,
            self.table1,
            self.table2,
            self.table3,
            self.table4,
            self.table_type,
            self.id1,
            self.id2,
            self.id3,
            self.id4,
            self.w1_omega,
            self.w2_omega,
            self.w3_omega,
            self.w4_omega,
            self.s_omega,
            self.z_omega,
            self.z_lookup_omega,
            self.table1_omega,
            self.table2_omega,
            self.table3_omega,
            self.table4_omega,
        ]
    }

    /// Evaluations at `ζ`, one per opened polynomial, in batching order.
    pub fn unshifted(&self) -> [Fr; NUM_UNSHIFTED_EVALUATIONS] {
        let all = self.as_array();
        core::array::from_fn(|i| all[i])
    }

    /// Evaluations at `ζω`, paired with `unshifted()[i]` for `i < 7` and
    /// with the table evaluations `unshifted()[21..25]`.
    pub fn shifted(&self) -> [Fr; NUM_SHIFTED_EVALUATIONS] {
        let all = self.as_array();
        core::array::from_fn(|i| all[NUM_UNSHIFTED_EVALUATIONS + i])
    }
}

impl AppendToTranscript for ProofEvaluations {
    fn append_to_transcript<ProofTranscript: Transcript>(&self, transcript: &mut ProofTranscript) {
        transcript.append_scalars(&self.as_array());
    }
}

/// An UltraPlonk proof as produced by barretenberg, without its public
/// inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proof {
    pub w1: G1Affine,
    pub w2: G1Affine,
    pub w3: G1Affine,
    pub w4: G1Affine,
    /// Sorted lookup accumulator
    pub s: G1Affine,
    /// Permutation grand product
    pub z: G1Affine,
    pub z_lookup: G1Affine,
    /// Quotient polynomial split in four parts of degree `n`
    pub t1: G1Affine,
    pub t2: G1Affine,
    pub t3: G1Affine,
    pub t4: G1Affine,
    pub evaluations: ProofEvaluations,
    /// Opening proof at `ζ`
    pub pi_z: G1Affine,
    /// Opening proof at `ζω`
    pub pi_z_omega: G1Affine,
}

impl Proof {
    #[tracing::instrument(skip_all, name = "Proof::from_bytes")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes, PROOF_SIZE)?;
        let [w1, w2, w3, w4, s, z, z_lookup, t1, t2, t3, t4] =
            reader.read_points::<NUM_PROOF_COMMITMENTS>()?;
        let evaluations = ProofEvaluations::from_array(reader.read_scalars::<NUM_PROOF_EVALUATIONS>()?);
        let [pi_z, pi_z_omega] = reader.read_points::<NUM_OPENING_PROOFS>()?;
        reader.finish()?;

        Ok(Self {
            w1,
            w2,
            w3,
            w4,
            s,
            z,
            z_lookup,
            t1,
            t2,
            t3,
            t4,
            evaluations,
            pi_z,
            pi_z_omega,
        })
    }

    pub fn commitments(&self) -> [G1Affine; NUM_PROOF_COMMITMENTS] {
        [
            self.w1,
            self.w2,
            self.w3,
            self.w4,
            self.s,
            self.z,
            self.z_lookup,
            self.t1,
            self.t2,
            self.t3,
            self.t4,
        ]
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(PROOF_SIZE);
        writer.write_points(&self.commitments());
        writer.write_scalars(&self.evaluations.as_array());
        writer.write_points(&[self.pi_z, self.pi_z_omega]);
        writer.into_bytes()
    }
}

impl TryFrom<&[u8]> for Proof {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

/// Splits a barretenberg proof file, which carries its public inputs as a
/// prefix, into the public inputs and the proof bytes.
pub fn split_public_inputs(
    bytes: &[u8],
    num_public_inputs: usize,
) -> Result<(Vec<PublicInput>, &[u8]), DecodeError> {
    let expected = num_public_inputs
        .checked_mul(PUBLIC_INPUT_SIZE)
        .and_then(|len| len.checked_add(PROOF_SIZE))
        .unwrap_or(usize::MAX);
    if bytes.len() != expected {
        return Err(DecodeError::InvalidLength {
            expected,
            got: bytes.len(),
        });
    }
    let (inputs, proof) = bytes.split_at(bytes.len() - PROOF_SIZE);
    let inputs = inputs
        .chunks_exact(PUBLIC_INPUT_SIZE)
        .map(|chunk| {
            let mut input = [0u8; PUBLIC_INPUT_SIZE];
            input.copy_from_slice(chunk);
            input
        })
        .collect();
    Ok((inputs, proof))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::G1Projective;
    use ark_ec::{AffineRepr, CurveGroup, PrimeGroup};
    use ark_ff::{PrimeField, UniformRand};
    use common::constants::{FIELD_ELEMENT_SIZE, G1_POINT_SIZE};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn random_proof(seed: u8) -> Proof {
        let mut rng = ChaCha20Rng::from_seed([seed; 32]);
        let mut point = || (G1Projective::generator() * Fr::rand(&mut rng)).into_affine();
        let [w1, w2, w3, w4, s, z, z_lookup, t1, t2, t3, t4, pi_z, pi_z_omega] =
            [(); 13].map(|_| point());
        let evaluations =
            ProofEvaluations::from_array([(); NUM_PROOF_EVALUATIONS].map(|_| Fr::rand(&mut rng)));
        Proof {
            w1,
            w2,
            w3,
            w4,
            s,
            z,
            z_lookup,
            t1,
            t2,
            t3,
            t4,
            evaluations,
            pi_z,
            pi_z_omega,
        }
    }

    const EVALUATIONS_START: usize = NUM_PROOF_COMMITMENTS * G1_POINT_SIZE;

    #[test]
    fn decodes_wire_order() {
        let proof = random_proof(1);
        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), PROOF_SIZE);
        assert_eq!(Proof::try_from(bytes.as_slice()), Ok(proof));

        // the first evaluation is w1, the last shifted one table4_omega
        let w1_eval = Fr::from_be_bytes_mod_order(
            &bytes[EVALUATIONS_START..EVALUATIONS_START + FIELD_ELEMENT_SIZE],
        );
        assert_eq!(w1_eval, proof.evaluations.w1);
        assert_eq!(proof.evaluations.shifted()[10], proof.evaluations.table4_omega);
        assert_eq!(proof.evaluations.unshifted()[29], proof.evaluations.id4);
    }

    #[test]
    fn rejects_malformed_proofs() {
        assert_eq!(
            Proof::from_bytes(&[0u8; 100]),
            Err(DecodeError::InvalidLength {
                expected: PROOF_SIZE,
                got: 100
            })
        );

        let bytes = random_proof(2).to_bytes();
        let mut oversized = bytes.clone();
        oversized.extend_from_slice(&[0u8; 32]);
        assert!(matches!(
            Proof::from_bytes(&oversized),
            Err(DecodeError::InvalidLength { .. })
        ));

        let mut non_canonical = bytes.clone();
        non_canonical[EVALUATIONS_START..EVALUATIONS_START + FIELD_ELEMENT_SIZE].fill(0xff);
        assert_eq!(
            Proof::from_bytes(&non_canonical),
            Err(DecodeError::NonCanonicalFieldElement {
                offset: EVALUATIONS_START
            })
        );

        let mut infinity = bytes;
        let pi_z_start = PROOF_SIZE - 2 * G1_POINT_SIZE;
        infinity[pi_z_start..pi_z_start + G1_POINT_SIZE].fill(0);
        assert_eq!(
            Proof::from_bytes(&infinity),
            Err(DecodeError::PointAtInfinity { offset: pi_z_start })
        );
    }

    #[test]
    fn splits_prefixed_public_inputs() {
        let proof = random_proof(3).to_bytes();
        let mut file = vec![0u8; 2 * PUBLIC_INPUT_SIZE];
        file[PUBLIC_INPUT_SIZE - 1] = 10;
        file.extend_from_slice(&proof);

        let (inputs, proof_bytes) = split_public_inputs(&file, 2).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0][31], 10);
        assert_eq!(proof_bytes, proof.as_slice());

        assert!(split_public_inputs(&file, 1).is_err());
        assert!(split_public_inputs(&file, usize::MAX).is_err());
    }
}
