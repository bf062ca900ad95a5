use ark_bn254::Fr;

use super::challenges::{Challenges, NuChallenges};
use super::config::VerifierConfig;
use super::identity::{quotient_evaluation, LagrangeTerms};
use super::key::VerificationKey;
use super::opening;
use super::proof::Proof;
use super::public_inputs::{decode_public_inputs, PublicInput};
use crate::transcripts::{KeccakTranscript, Transcript};
use crate::utils::errors::VerifyError;

/// Stages of a single verification, in order. Any failure ends the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Decoding,
    ChallengeDerivation,
    PublicInputEval,
    IdentityCheck,
    OpeningVerification,
}

/// Verifies an UltraPlonk proof against the Ignition setup.
pub fn verify(
    vk_bytes: &[u8],
    proof_bytes: &[u8],
    public_inputs: &[PublicInput],
) -> Result<(), VerifyError> {
    verify_with_config(vk_bytes, proof_bytes, public_inputs, &VerifierConfig::IGNITION)
}

pub fn verify_with_config(
    vk_bytes: &[u8],
    proof_bytes: &[u8],
    public_inputs: &[PublicInput],
    config: &VerifierConfig,
) -> Result<(), VerifyError> {
    let vk = VerificationKey::from_bytes(vk_bytes)?;
    verify_with_key(&vk, proof_bytes, public_inputs, config)
}

/// Verifies against an already decoded key, which may be shared between
/// threads.
#[tracing::instrument(skip_all, name = "UltraPlonk::verify")]
pub fn verify_with_key(
    vk: &VerificationKey,
    proof_bytes: &[u8],
    public_inputs: &[PublicInput],
    config: &VerifierConfig,
) -> Result<(), VerifyError> {
    tracing::trace!(stage = ?Stage::Decoding);
    let proof = Proof::from_bytes(proof_bytes).map_err(|err| {
        tracing::debug!(%err, "malformed proof");
        VerifyError::InvalidProof(err)
    })?;
    let inputs = decode_public_inputs(public_inputs, vk.num_public_inputs).inspect_err(|err| {
        tracing::debug!(%err, "rejected public inputs");
    })?;
    verify_proof::<KeccakTranscript>(vk, &proof, public_inputs, &inputs, config)
}

/// Runs every stage after decoding. `raw_inputs` and `inputs` are the same
/// public inputs before and after decoding.
pub(crate) fn verify_proof<ProofTranscript: Transcript>(
    vk: &VerificationKey,
    proof: &Proof,
    raw_inputs: &[PublicInput],
    inputs: &[Fr],
    config: &VerifierConfig,
) -> Result<(), VerifyError> {
    let domain = &vk.domain;

    tracing::trace!(stage = ?Stage::ChallengeDerivation);
    let mut transcript = ProofTranscript::new(domain.size, vk.num_public_inputs);
    let challenges = Challenges::derive(&mut transcript, domain, raw_inputs, proof);

    tracing::trace!(stage = ?Stage::PublicInputEval);
    let terms = LagrangeTerms::compute(domain, &challenges, inputs)
        .ok_or(VerifyError::VerificationFailed)?;

    tracing::trace!(stage = ?Stage::IdentityCheck);
    let quotient_eval = quotient_evaluation(&proof.evaluations, &challenges, &terms);

    tracing::trace!(stage = ?Stage::OpeningVerification);
    let nu = NuChallenges::derive(&mut transcript, quotient_eval, &proof.evaluations, proof);
    let check = opening::reduce(proof, vk, config, &challenges, &nu, quotient_eval)?;
    opening::verify(config, &check)
}
