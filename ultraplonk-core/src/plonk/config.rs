use ark_bn254::{g1, G1Affine, G2Affine};

use crate::curve::{G2_GENERATOR, IGNITION_SRS_G2};
use crate::poly::commitment::kzg::KZGVerifierKey;

/// Curve points fixed by the trusted setup rather than by the circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifierConfig {
    /// `[1]_1`
    pub g1_generator: G1Affine,
    /// `[1]_2`
    pub g2_generator: G2Affine,
    /// `[x]_2`, the only G2 power of the SRS the verifier needs.
    pub srs_g2: G2Affine,
}

impl VerifierConfig {
    /// The Aztec Ignition setup used by barretenberg.
    pub const IGNITION: Self = Self {
        g1_generator: G1Affine::new_unchecked(g1::G1_GENERATOR_X, g1::G1_GENERATOR_Y),
        g2_generator: G2_GENERATOR,
        srs_g2: IGNITION_SRS_G2,
    };

    pub fn with_srs_g2(srs_g2: G2Affine) -> Self {
        Self {
            srs_g2,
            ..Self::IGNITION
        }
    }

    pub fn kzg_key(&self) -> KZGVerifierKey {
        KZGVerifierKey {
            g2: self.g2_generator,
            beta_g2: self.srs_g2,
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self::IGNITION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;

    #[test]
    fn ignition_points() {
        let config = VerifierConfig::default();
        assert_eq!(config.g1_generator, G1Affine::generator());
        assert!(config.srs_g2.is_on_curve());
        assert_ne!(config.srs_g2, config.g2_generator);

        let custom = VerifierConfig::with_srs_g2(G2Affine::generator());
        assert_eq!(custom.g1_generator, config.g1_generator);
        assert_eq!(custom.kzg_key().beta_g2, G2Affine::generator());
    }
}
