//! Cursor over the big-endian barretenberg byte layouts.

use ark_bn254::{Fr, G1Affine};
use common::constants::{FIELD_ELEMENT_SIZE, G1_POINT_SIZE};

use crate::curve::{read_g1, write_g1};
use crate::field::FieldBytes;
use crate::utils::errors::DecodeError;

pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Fails unless `bytes` is exactly `expected_len` long, so no later
    /// read can run past the end of a well-sized buffer.
    pub fn new(bytes: &'a [u8], expected_len: usize) -> Result<Self, DecodeError> {
        if bytes.len() != expected_len {
            return Err(DecodeError::InvalidLength {
                expected: expected_len,
                got: bytes.len(),
            });
        }
        Ok(Self { bytes, offset: 0 })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take<const N: usize>(&mut self) -> Result<&'a [u8; N], DecodeError> {
        let chunk = self
            .bytes
            .get(self.offset..self.offset + N)
            .and_then(|chunk| chunk.try_into().ok())
            .ok_or(DecodeError::InvalidLength {
                expected: self.offset + N,
                got: self.bytes.len(),
            })?;
        self.offset += N;
        Ok(chunk)
    }

    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let chunk = self
            .offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(self.offset..end))
            .ok_or(DecodeError::InvalidLength {
                expected: self.offset.saturating_add(len),
                got: self.bytes.len(),
            })?;
        self.offset += len;
        Ok(chunk)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(*self.take::<4>()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidFlag { offset }),
        }
    }

    pub fn read_scalar(&mut self) -> Result<Fr, DecodeError> {
        let offset = self.offset;
        let bytes = self.take::<FIELD_ELEMENT_SIZE>()?;
        Fr::from_canonical_be_bytes(bytes).ok_or(DecodeError::NonCanonicalFieldElement { offset })
    }

    pub fn read_scalars<const N: usize>(&mut self) -> Result<[Fr; N], DecodeError> {
        let mut out = [Fr::from(0u64); N];
        for value in out.iter_mut() {
            *value = self.read_scalar()?;
        }
        Ok(out)
    }

    pub fn read_point(&mut self) -> Result<G1Affine, DecodeError> {
        let offset = self.offset;
        read_g1(self.take::<G1_POINT_SIZE>()?, offset)
    }

    pub fn read_points<const N: usize>(&mut self) -> Result<[G1Affine; N], DecodeError> {
        let mut out = [G1Affine::identity(); N];
        for point in out.iter_mut() {
            *point = self.read_point()?;
        }
        Ok(out)
    }

    /// Fails if any bytes are left unread.
    pub fn finish(self) -> Result<(), DecodeError> {
        if self.offset != self.bytes.len() {
            return Err(DecodeError::InvalidLength {
                expected: self.offset,
                got: self.bytes.len(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_scalars(&mut self, scalars: &[Fr]) {
        for scalar in scalars {
            self.bytes.extend_from_slice(&scalar.to_be_bytes());
        }
    }

    pub fn write_points(&mut self, points: &[G1Affine]) {
        for point in points {
            write_g1(point, &mut self.bytes);
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
