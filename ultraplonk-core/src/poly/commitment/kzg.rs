use ark_bn254::{Bn254, G1Affine, G1Projective, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// The two G2 points a univariate KZG verifier needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct KZGVerifierKey {
    /// `[1]_2`
    pub g2: G2Affine,
    /// `[τ]_2`
    pub beta_g2: G2Affine,
}

/// A batched opening reduced to the pairing equation
/// `e(rhs, [1]_2) · e(lhs, [τ]_2) = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingCheck {
    pub rhs: G1Affine,
    pub lhs: G1Affine,
}

impl PairingCheck {
    pub fn new(rhs: G1Projective, lhs: G1Projective) -> Self {
        Self {
            rhs: rhs.into_affine(),
            lhs: lhs.into_affine(),
        }
    }
}

pub struct UnivariateKZG;

impl UnivariateKZG {
    #[tracing::instrument(skip_all, name = "KZG::verify")]
    pub fn verify(vk: &KZGVerifierKey, check: &PairingCheck) -> bool {
        Bn254::multi_pairing([check.rhs, check.lhs], [vk.g2, vk.beta_g2]).is_zero()
    }

    /// Single point opening `e(C - [y]_1 + [z]π, [1]_2) = e(π, [τ]_2)`.
    pub fn verify_opening(
        vk: &KZGVerifierKey,
        commitment: &G1Affine,
        point: &ark_bn254::Fr,
        proof: &G1Affine,
        evaluation: &ark_bn254::Fr,
    ) -> bool {
        let rhs = commitment.into_group() - G1Affine::generator() * evaluation + *proof * point;
        let lhs = -proof.into_group();
        Self::verify(vk, &PairingCheck::new(rhs, lhs))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{Field, One};
    use ark_std::UniformRand;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn setup(tau: Fr) -> KZGVerifierKey {
        let g2 = G2Affine::generator();
        KZGVerifierKey {
            g2,
            beta_g2: (g2 * tau).into_affine(),
        }
    }

    /// Commits to `coeffs` and opens it at `point` using the trapdoor.
    fn commit_and_open(tau: Fr, coeffs: &[Fr], point: Fr) -> (G1Affine, G1Affine, Fr) {
        let eval_at = |x: Fr| coeffs.iter().rev().fold(Fr::from(0u64), |acc, c| acc * x + c);
        let value = eval_at(point);
        let quotient = (eval_at(tau) - value) * (tau - point).inverse().unwrap();
        let g1 = G1Affine::generator();
        (
            (g1 * eval_at(tau)).into_affine(),
            (g1 * quotient).into_affine(),
            value,
        )
    }

    #[test]
    fn kzg_open_verify() {
        for i in 0..10 {
            let mut rng = ChaCha20Rng::from_seed([i; 32]);
            let tau = Fr::rand(&mut rng);
            let vk = setup(tau);
            let coeffs: Vec<Fr> = (0..8).map(|_| Fr::rand(&mut rng)).collect();
            let point = Fr::rand(&mut rng);
            let (comm, proof, value) = commit_and_open(tau, &coeffs, point);
            assert!(UnivariateKZG::verify_opening(&vk, &comm, &point, &proof, &value));
            assert!(!UnivariateKZG::verify_opening(
                &vk,
                &comm,
                &point,
                &proof,
                &(value + Fr::one())
            ));
        }
    }

    #[test]
    fn wrong_srs_rejects() {
        let mut rng = ChaCha20Rng::from_seed([7; 32]);
        let tau = Fr::rand(&mut rng);
        let coeffs: Vec<Fr> = (0..4).map(|_| Fr::rand(&mut rng)).collect();
        let point = Fr::rand(&mut rng);
        let (comm, proof, value) = commit_and_open(tau, &coeffs, point);
        let vk = setup(tau + Fr::one());
        assert!(!UnivariateKZG::verify_opening(&vk, &comm, &point, &proof, &value));
    }
}
