use thiserror::Error;

/// Structural defects found while decoding a verification key or a proof.
///
/// Offsets are byte offsets into the buffer handed to the decoder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid input length, expected length {expected} but got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("Field element at offset {offset} is not canonically reduced")]
    NonCanonicalFieldElement { offset: usize },
    #[error("Point at offset {offset} is not on the curve")]
    PointNotOnCurve { offset: usize },
    #[error("Point at offset {offset} is not in the prime order subgroup")]
    PointNotInSubgroup { offset: usize },
    #[error("Point at offset {offset} is the point at infinity")]
    PointAtInfinity { offset: usize },
    #[error("Unexpected label for commitment {index}")]
    UnexpectedCommitmentLabel { index: usize },
    #[error("Invalid commitment count {0}")]
    InvalidCommitmentCount(u32),
    #[error("Invalid circuit size {0}, expected a power of 2")]
    InvalidCircuitSize(u32),
    #[error("Invalid boolean flag at offset {offset}")]
    InvalidFlag { offset: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Invalid verification key: {0}")]
    InvalidVerificationKey(DecodeError),
    #[error("Invalid proof data: {0}")]
    InvalidProof(DecodeError),
    #[error("Invalid public input count, expected {expected} but got {got}")]
    PublicInputCountMismatch { expected: usize, got: usize },
    #[error("Public input {index} is not canonically reduced")]
    InvalidPublicInput { index: usize },
    #[error("Unsupported circuit type {0}")]
    UnsupportedCircuitType(u32),
    #[error("Proof verification failed")]
    VerificationFailed,
    #[error("Internal error: {0}")]
    Internal(&'static str),
}

impl VerifyError {
    /// True for faults in the caller's bytes, as opposed to a proof that is
    /// well formed but false.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::VerificationFailed | Self::Internal(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Invalid hex encoding: {0}")]
    Encoding(#[from] hex::FromHexError),
    #[error("Public input too long: {0} bytes")]
    TooLong(usize),
}
