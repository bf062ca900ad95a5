//! Reduces every claimed evaluation to a single KZG pairing equation.
//!
//! The `i`-th polynomial opened at `ζ` is weighted by `v_i`. Polynomials that
//! are also opened at `ζω` get `v_i·(1 + u)` on their commitment, and
//! `v_i·u` times their shifted evaluation joins the batched evaluation.

use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, VariableBaseMSM};
use ark_ff::{Field, One};
use common::commitments::VkCommitment;
use common::constants::{NUM_SHIFTED_EVALUATIONS, NUM_UNSHIFTED_EVALUATIONS};

use super::challenges::{Challenges, NuChallenges};
use super::config::VerifierConfig;
use super::key::VerificationKey;
use super::proof::{Proof, ProofEvaluations};
use crate::poly::commitment::kzg::{PairingCheck, UnivariateKZG};
use crate::utils::errors::VerifyError;

/// Quotient parts, opened polynomials, generator, and the two opening proofs.
pub const NUM_MSM_BASES: usize = 4 + NUM_UNSHIFTED_EVALUATIONS + 1 + 2;

/// Opened polynomials also opened at `ζω`: wires, sorted accumulator and
/// both grand products, then the four table columns.
const SHIFTED_POLYNOMIALS: [usize; NUM_SHIFTED_EVALUATIONS] = [0, 1, 2, 3, 4, 5, 6, 21, 22, 23, 24];

/// Commitments of the selector, permutation, table and identity polynomials
/// in the order their evaluations appear in the proof.
pub(crate) const VK_OPENING_ORDER: [VkCommitment; 23] = [
    VkCommitment::Q1,
    VkCommitment::Q2,
    VkCommitment::Q3,
    VkCommitment::Q4,
    VkCommitment::QM,
    VkCommitment::QC,
    VkCommitment::QArithmetic,
    VkCommitment::QSort,
    VkCommitment::QElliptic,
    VkCommitment::QAux,
    VkCommitment::Sigma1,
    VkCommitment::Sigma2,
    VkCommitment::Sigma3,
    VkCommitment::Sigma4,
    VkCommitment::Table1,
    VkCommitment::Table2,
    VkCommitment::Table3,
    VkCommitment::Table4,
    VkCommitment::TableType,
    VkCommitment::Id1,
    VkCommitment::Id2,
    VkCommitment::Id3,
    VkCommitment::Id4,
];

fn shifted_partner(index: usize) -> Option<usize> {
    SHIFTED_POLYNOMIALS.iter().position(|&i| i == index)
}

/// `Σ v_i (eval_i + u·shifted_eval_i) + quotient_eval`
pub fn batch_evaluation(evals: &ProofEvaluations, nu: &NuChallenges, quotient_eval: Fr) -> Fr {
    let unshifted = evals.unshifted();
    let shifted = evals.shifted();
    let opened: Fr = unshifted
        .iter()
        .enumerate()
        .map(|(i, eval)| {
            let shifted_term = shifted_partner(i).map_or(Fr::from(0u64), |j| nu.u * shifted[j]);
            nu.v[i] * (*eval + shifted_term)
        })
        .sum();
    opened + quotient_eval
}

/// Scalars multiplying [`msm_bases`], term by term.
pub fn msm_scalars(
    challenges: &Challenges,
    nu: &NuChallenges,
    root: Fr,
    batch_evaluation: Fr,
) -> [Fr; NUM_MSM_BASES] {
    let zeta_pow_2n = challenges.zeta_pow_n.square();
    let u_plus_one = nu.u + Fr::one();

    let mut scalars = [Fr::from(0u64); NUM_MSM_BASES];
    scalars[..4].copy_from_slice(&[
        Fr::one(),
        challenges.zeta_pow_n,
        zeta_pow_2n,
        zeta_pow_2n * challenges.zeta_pow_n,
    ]);
    for (i, v) in nu.v.iter().enumerate() {
        scalars[4 + i] = match shifted_partner(i) {
            Some(_) => *v * u_plus_one,
            None => *v,
        };
    }
    scalars[NUM_MSM_BASES - 3] = -batch_evaluation;
    scalars[NUM_MSM_BASES - 2] = challenges.zeta;
    scalars[NUM_MSM_BASES - 1] = challenges.zeta * nu.u * root;
    scalars
}

pub fn msm_bases(
    proof: &Proof,
    vk: &VerificationKey,
    config: &VerifierConfig,
) -> [G1Affine; NUM_MSM_BASES] {
    let mut bases = [config.g1_generator; NUM_MSM_BASES];
    bases[..4].copy_from_slice(&[proof.t1, proof.t2, proof.t3, proof.t4]);
    bases[4..11].copy_from_slice(&[
        proof.w1,
        proof.w2,
        proof.w3,
        proof.w4,
        proof.s,
        proof.z,
        proof.z_lookup,
    ]);
    for (base, which) in bases[11..34].iter_mut().zip(VK_OPENING_ORDER) {
        *base = *vk.commitment(which);
    }
    bases[NUM_MSM_BASES - 2] = proof.pi_z;
    bases[NUM_MSM_BASES - 1] = proof.pi_z_omega;
    bases
}

/// `R = MSM(bases, scalars)` and `L = -(PI_Z + u·PI_Z_OMEGA)`.
#[tracing::instrument(skip_all, name = "opening::reduce")]
pub fn reduce(
    proof: &Proof,
    vk: &VerificationKey,
    config: &VerifierConfig,
    challenges: &Challenges,
    nu: &NuChallenges,
    quotient_eval: Fr,
) -> Result<PairingCheck, VerifyError> {
    let batch_evaluation = batch_evaluation(&proof.evaluations, nu, quotient_eval);
    let scalars = msm_scalars(challenges, nu, vk.domain.root, batch_evaluation);
    let bases = msm_bases(proof, vk, config);

    let rhs = G1Projective::msm(&bases, &scalars)
        .map_err(|_| VerifyError::Internal("mismatched MSM lengths"))?;
    let lhs = -(proof.pi_z.into_group() + proof.pi_z_omega * nu.u);
    Ok(PairingCheck::new(rhs, lhs))
}

pub fn verify(config: &VerifierConfig, check: &PairingCheck) -> Result<(), VerifyError> {
    if UnivariateKZG::verify(&config.kzg_key(), check) {
        Ok(())
    } else {
        Err(VerifyError::VerificationFailed)
    }
}
