//! A test-only prover that produces proofs the verifier accepts, by knowing
//! the SRS trapdoor instead of running the real prover.
//!
//! Commitments and evaluations are random and no circuit is satisfied. The
//! two opening proofs are then solved for directly, so every check up to and
//! including the pairing passes under [`SyntheticProver::config`].

use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, One, UniformRand, Zero};
use common::constants::{NUM_PROOF_COMMITMENTS, NUM_PROOF_EVALUATIONS, NUM_VK_COMMITMENTS};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use crate::plonk::challenges::{Challenges, NuChallenges};
use crate::plonk::config::VerifierConfig;
use crate::plonk::identity::{quotient_evaluation, LagrangeTerms};
use crate::plonk::key::VerificationKey;
use crate::plonk::opening::{batch_evaluation, msm_scalars, NUM_MSM_BASES, VK_OPENING_ORDER};
use crate::plonk::proof::{Proof, ProofEvaluations};
use crate::plonk::public_inputs::{decode_public_inputs, PublicInput};
use crate::transcripts::{KeccakTranscript, Transcript};

pub struct SyntheticProver {
    tau: Fr,
    vk: VerificationKey,
    /// Discrete logs of the key's commitments, by `VkCommitment as usize`.
    vk_dlogs: [Fr; NUM_VK_COMMITMENTS],
    /// Discrete logs of the proof's commitments in wire order.
    proof_dlogs: [Fr; NUM_PROOF_COMMITMENTS],
    evaluations: ProofEvaluations,
}

impl SyntheticProver {
    pub fn new(circuit_size: u32, num_public_inputs: u32, seed: u8) -> Self {
        let mut rng = ChaCha20Rng::from_seed([seed; 32]);
        let tau = Fr::rand(&mut rng);
        let vk_dlogs = [(); NUM_VK_COMMITMENTS].map(|_| Fr::rand(&mut rng));
        let proof_dlogs = [(); NUM_PROOF_COMMITMENTS].map(|_| Fr::rand(&mut rng));
        let evaluations =
            ProofEvaluations::from_array([(); NUM_PROOF_EVALUATIONS].map(|_| Fr::rand(&mut rng)));

        let vk = VerificationKey::new(circuit_size, num_public_inputs, commit(&vk_dlogs))
            .expect("synthetic circuit size must be supported");

        Self {
            tau,
            vk,
            vk_dlogs,
            proof_dlogs,
            evaluations,
        }
    }

    pub fn vk(&self) -> &VerificationKey {
        &self.vk
    }

    pub fn vk_bytes(&self) -> Vec<u8> {
        self.vk.to_bytes()
    }

    /// Ignition generators with `[τ]_2` in place of the ceremony's `[x]_2`.
    pub fn config(&self) -> VerifierConfig {
        VerifierConfig::with_srs_g2((G2Affine::generator() * self.tau).into_affine())
    }

    /// Proof bytes for `public_inputs`, which must match the key's count and
    /// be canonical.
    pub fn prove(&self, public_inputs: &[PublicInput]) -> Vec<u8> {
        let inputs = decode_public_inputs(public_inputs, self.vk.num_public_inputs)
            .expect("synthetic prover needs valid public inputs");
        let domain = &self.vk.domain;

        let [w1, w2, w3, w4, s, z, z_lookup, t1, t2, t3, t4] = commit(&self.proof_dlogs);
        let mut proof = Proof {
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
            evaluations: self.evaluations,
            pi_z: G1Affine::generator(),
            pi_z_omega: G1Affine::generator(),
        };

        let mut transcript = KeccakTranscript::new(domain.size, self.vk.num_public_inputs);
        let challenges = Challenges::derive(&mut transcript, domain, public_inputs, &proof);
        let terms = LagrangeTerms::compute(domain, &challenges, &inputs)
            .expect("ζ landed on a masked root");
        let quotient_eval = quotient_evaluation(&self.evaluations, &challenges, &terms);
        // `v` does not depend on the opening proofs; `u` does and is left free.
        let nu = NuChallenges::derive(&mut transcript, quotient_eval, &self.evaluations, &proof);

        // Everything in the MSM except the two opening proofs is affine in u.
        let at = |u: Fr| self.combined_dlog(&challenges, &NuChallenges { v: nu.v, u }, quotient_eval);
        let constant = at(Fr::zero());
        let linear = at(Fr::one()) - constant;

        let zeta = challenges.zeta;
        let zeta_omega = zeta * domain.root;
        let a = constant * (self.tau - zeta).inverse().expect("τ = ζ");
        let b = linear * (self.tau - zeta_omega).inverse().expect("τ = ζω");
        let [pi_z, pi_z_omega] = commit(&[a, b]);
        proof.pi_z = pi_z;
        proof.pi_z_omega = pi_z_omega;

        proof.to_bytes()
    }

    /// Discrete log of the MSM without its two opening proof terms.
    fn combined_dlog(&self, challenges: &Challenges, nu: &NuChallenges, quotient_eval: Fr) -> Fr {
        let batch = batch_evaluation(&self.evaluations, nu, quotient_eval);
        let scalars = msm_scalars(challenges, nu, self.vk.domain.root, batch);

        let d = &self.proof_dlogs;
        let mut dlogs = [Fr::one(); NUM_MSM_BASES - 2];
        dlogs[..4].copy_from_slice(&d[7..11]);
        dlogs[4..11].copy_from_slice(&d[..7]);
        for (dlog, which) in dlogs[11..34].iter_mut().zip(VK_OPENING_ORDER) {
            *dlog = self.vk_dlogs[which as usize];
        }

        scalars.iter().zip(dlogs.iter()).map(|(s, d)| *s * d).sum()
    }
}

fn commit<const N: usize>(dlogs: &[Fr; N]) -> [G1Affine; N] {
    dlogs.map(|d| (G1Affine::generator() * d).into_affine())
}
