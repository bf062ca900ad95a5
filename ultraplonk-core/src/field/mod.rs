use ark_ff::{BigInt, BigInteger, PrimeField};

/// Big-endian 32-byte encodings for the BN254 scalar and base fields.
pub trait FieldBytes: PrimeField {
    /// Decodes `bytes`, rejecting values that are not `< MODULUS`.
    fn from_canonical_be_bytes(bytes: &[u8; 32]) -> Option<Self>;

    /// Interprets `bytes` as an integer and reduces it mod `MODULUS`.
    /// Used to turn hash outputs into challenges.
    fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::from_be_bytes_mod_order(bytes)
    }

    fn to_be_bytes(&self) -> [u8; 32];
}

impl<F: PrimeField<BigInt = BigInt<4>>> FieldBytes for F {
    fn from_canonical_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        // from_bigint returns None for values >= MODULUS
        F::from_bigint(BigInt::new(limbs))
    }

    fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.into_bigint().to_bytes_be());
        out
    }
}
