use ark_bn254::Fr;
use ark_ff::{FftField, Field};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use common::constants::{MAX_LOG_CIRCUIT_SIZE, MIN_CIRCUIT_SIZE};

use crate::utils::errors::DecodeError;
use crate::utils::math::Math;

/// The multiplicative subgroup `H = {ω^i}` of size `n` that the circuit's
/// rows are laid out over.
///
/// Serializes as its size alone; everything else is rebuilt on load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvaluationDomain {
    pub size: u32,
    pub log_size: u32,
    /// Primitive `n`-th root of unity `ω`.
    pub root: Fr,
    pub root_inverse: Fr,
    pub size_inverse: Fr,
}

impl EvaluationDomain {
    pub fn new(size: u32) -> Result<Self, DecodeError> {
        let log_size = size
            .exact_log_2()
            .filter(|log| size >= MIN_CIRCUIT_SIZE && *log <= MAX_LOG_CIRCUIT_SIZE)
            .ok_or(DecodeError::InvalidCircuitSize(size))?;
        let root = Fr::get_root_of_unity(size as u64).ok_or(DecodeError::InvalidCircuitSize(size))?;
        let root_inverse = root.inverse().ok_or(DecodeError::InvalidCircuitSize(size))?;
        let size_inverse = Fr::from(size)
            .inverse()
            .ok_or(DecodeError::InvalidCircuitSize(size))?;
        Ok(Self {
            size,
            log_size,
            root,
            root_inverse,
            size_inverse,
        })
    }

    /// `x^n` by `log n` squarings.
    pub fn pow_size(&self, x: Fr) -> Fr {
        (0..self.log_size).fold(x, |acc, _| acc.square())
    }

    /// `ω^i` for `i < count`.
    pub fn powers_of_root(&self, count: usize) -> impl Iterator<Item = Fr> + '_ {
        core::iter::successors(Some(Fr::from(1u64)), move |w| Some(*w * self.root)).take(count)
    }
}

impl CanonicalSerialize for EvaluationDomain {
    fn serialize_with_mode<W: Write>(
        &self,
        writer: W,
        compress: Compress,
    ) -> Result<(), SerializationError> {
        self.size.serialize_with_mode(writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        self.size.serialized_size(compress)
    }
}

impl Valid for EvaluationDomain {
    fn check(&self) -> Result<(), SerializationError> {
        match Self::new(self.size) {
            Ok(domain) if domain == *self => Ok(()),
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl CanonicalDeserialize for EvaluationDomain {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let size = u32::deserialize_with_mode(reader, compress, validate)?;
        Self::new(size).map_err(|_| SerializationError::InvalidData)
    }
}
