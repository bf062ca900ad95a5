pub use common;
pub use ultraplonk_core::{
    parse_public_input_hex, plonk::proof::split_public_inputs, verify, verify_with_config,
    verify_with_key, DecodeError, HexError, Proof, PublicInput, VerificationKey, VerifierConfig,
    VerifyError,
};

use rayon::prelude::*;

/// A decoded verification key bound to a trusted setup, ready to check any
/// number of proofs. Holds no mutable state, so one `Verifier` can be shared
/// freely between threads.
#[derive(Clone, Debug)]
pub struct Verifier {
    vk: VerificationKey,
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(vk_bytes: &[u8]) -> Result<Self, VerifyError> {
        Self::with_config(vk_bytes, VerifierConfig::IGNITION)
    }

    pub fn with_config(vk_bytes: &[u8], config: VerifierConfig) -> Result<Self, VerifyError> {
        Ok(Self {
            vk: VerificationKey::from_bytes(vk_bytes)?,
            config,
        })
    }

    pub fn from_key(vk: VerificationKey, config: VerifierConfig) -> Self {
        Self { vk, config }
    }

    pub fn vk(&self) -> &VerificationKey {
        &self.vk
    }

    pub fn verify(&self, proof: &[u8], public_inputs: &[PublicInput]) -> Result<(), VerifyError> {
        verify_with_key(&self.vk, proof, public_inputs, &self.config)
    }

    /// Verifies independent proofs on the rayon pool. Results are in input
    /// order.
    #[tracing::instrument(skip_all, name = "Verifier::verify_batch", fields(batch = items.len()))]
    pub fn verify_batch<P, I>(&self, items: &[(P, I)]) -> Vec<Result<(), VerifyError>>
    where
        P: AsRef<[u8]> + Sync,
        I: AsRef<[PublicInput]> + Sync,
    {
        items
            .par_iter()
            .map(|(proof, inputs)| self.verify(proof.as_ref(), inputs.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_between_threads() {
        assert_send_sync::<Verifier>();
        assert_send_sync::<VerificationKey>();
    }

    #[test]
    fn rejects_malformed_key() {
        let mut header = [0u8; 16];
        header[3] = 2;
        assert!(matches!(
            Verifier::new(&header),
            Err(VerifyError::InvalidVerificationKey(DecodeError::InvalidLength { .. }))
        ));
        assert_eq!(
            Verifier::new(&[0u8; 16]).err(),
            Some(VerifyError::UnsupportedCircuitType(0))
        );
    }
}
