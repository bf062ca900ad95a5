use ark_bn254::G1Affine;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use common::commitments::VkCommitment;
use common::constants::{
    NUM_RECURSIVE_PROOF_INDICES, NUM_VK_COMMITMENTS, ULTRA_CIRCUIT_TYPE, VK_SIZE,
};
use strum::IntoEnumIterator;

use super::codec::{ByteReader, ByteWriter};
use crate::poly::domain::EvaluationDomain;
use crate::utils::errors::{DecodeError, VerifyError};

/// A decoded UltraPlonk verification key.
///
/// Immutable once decoded; share it by reference across verifications.
/// The ark-serialize form is the barretenberg layout, so a cached key goes
/// through the same checks as a fresh one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    pub domain: EvaluationDomain,
    pub num_public_inputs: u32,
    /// Indexed by `VkCommitment as usize`.
    commitments: [G1Affine; NUM_VK_COMMITMENTS],
    pub contains_recursive_proof: bool,
    pub recursive_proof_public_input_indices: [u32; NUM_RECURSIVE_PROOF_INDICES],
    pub is_recursive_circuit: bool,
}

impl VerificationKey {
    pub fn new(
        circuit_size: u32,
        num_public_inputs: u32,
        commitments: [G1Affine; NUM_VK_COMMITMENTS],
    ) -> Result<Self, DecodeError> {
        Ok(Self {
            domain: EvaluationDomain::new(circuit_size)?,
            num_public_inputs,
            commitments,
            contains_recursive_proof: false,
            recursive_proof_public_input_indices: [0; NUM_RECURSIVE_PROOF_INDICES],
            is_recursive_circuit: false,
        })
    }

    pub fn circuit_size(&self) -> u32 {
        self.domain.size
    }

    pub fn commitment(&self, which: VkCommitment) -> &G1Affine {
        &self.commitments[which as usize]
    }

    /// Decodes the barretenberg binary layout. Rejects anything other than
    /// an Ultra circuit key with exactly the 23 expected commitments.
    #[tracing::instrument(skip_all, name = "VerificationKey::from_bytes")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VerifyError> {
        // The circuit type is checked first so that keys of other proving
        // systems are reported as unsupported rather than malformed.
        if let Some(circuit_type) = bytes.get(..4) {
            let circuit_type = u32::from_be_bytes([
                circuit_type[0],
                circuit_type[1],
                circuit_type[2],
                circuit_type[3],
            ]);
            if circuit_type != ULTRA_CIRCUIT_TYPE {
                tracing::debug!(circuit_type, "unsupported circuit type");
                return Err(VerifyError::UnsupportedCircuitType(circuit_type));
            }
        }
        Self::decode(bytes).map_err(|err| {
            tracing::debug!(%err, "malformed verification key");
            VerifyError::InvalidVerificationKey(err)
        })
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = ByteReader::new(bytes, VK_SIZE)?;
        let _circuit_type = reader.read_u32()?;
        let circuit_size = reader.read_u32()?;
        let domain = EvaluationDomain::new(circuit_size)?;
        let num_public_inputs = reader.read_u32()?;

        let num_commitments = reader.read_u32()?;
        if num_commitments as usize != NUM_VK_COMMITMENTS {
            return Err(DecodeError::InvalidCommitmentCount(num_commitments));
        }

        let mut commitments = [G1Affine::identity(); NUM_VK_COMMITMENTS];
        for (index, which) in VkCommitment::iter().enumerate() {
            let label = which.label().as_bytes();
            let label_len = reader.read_u32()? as usize;
            if label_len != label.len() || reader.take_slice(label_len)? != label {
                return Err(DecodeError::UnexpectedCommitmentLabel { index });
            }
            commitments[index] = reader.read_point()?;
        }

        let contains_recursive_proof = reader.read_bool()?;
        let mut recursive_proof_public_input_indices = [0u32; NUM_RECURSIVE_PROOF_INDICES];
        for index in recursive_proof_public_input_indices.iter_mut() {
            *index = reader.read_u32()?;
        }
        let is_recursive_circuit = reader.read_bool()?;
        reader.finish()?;

        Ok(Self {
            domain,
            num_public_inputs,
            commitments,
            contains_recursive_proof,
            recursive_proof_public_input_indices,
            is_recursive_circuit,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(VK_SIZE);
        writer.write_u32(ULTRA_CIRCUIT_TYPE);
        writer.write_u32(self.domain.size);
        writer.write_u32(self.num_public_inputs);
        writer.write_u32(NUM_VK_COMMITMENTS as u32);
        for (which, point) in VkCommitment::iter().zip(self.commitments.iter()) {
            let label = which.label();
            writer.write_u32(label.len() as u32);
            writer.write_bytes(label.as_bytes());
            writer.write_points(&[*point]);
        }
        writer.write_u8(self.contains_recursive_proof as u8);
        for index in self.recursive_proof_public_input_indices {
            writer.write_u32(index);
        }
        writer.write_u8(self.is_recursive_circuit as u8);
        writer.into_bytes()
    }
}

impl TryFrom<&[u8]> for VerificationKey {
    type Error = VerifyError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl CanonicalSerialize for VerificationKey {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        _compress: Compress,
    ) -> Result<(), SerializationError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    fn serialized_size(&self, _compress: Compress) -> usize {
        VK_SIZE
    }
}

impl Valid for VerificationKey {
    fn check(&self) -> Result<(), SerializationError> {
        self.domain.check()?;
        if self.commitments.iter().any(|point| {
            point.infinity
                || !point.is_on_curve()
                || !point.is_in_correct_subgroup_assuming_on_curve()
        }) {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl CanonicalDeserialize for VerificationKey {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        _compress: Compress,
        _validate: Validate,
    ) -> Result<Self, SerializationError> {
        let mut bytes = vec![0u8; VK_SIZE];
        reader.read_exact(&mut bytes)?;
        Self::from_bytes(&bytes).map_err(|_| SerializationError::InvalidData)
    }
}
