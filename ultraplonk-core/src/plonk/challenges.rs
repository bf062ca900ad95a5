use ark_bn254::Fr;
use ark_ff::Field;
use common::constants::NUM_NU_CHALLENGES;

use super::proof::{Proof, ProofEvaluations};
use super::public_inputs::PublicInput;
use crate::poly::domain::EvaluationDomain;
use crate::transcripts::{AppendToTranscript, Transcript};

/// Round challenges of the UltraPlonk protocol, with the powers the widgets
/// reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenges {
    /// Lookup column compression
    pub eta: Fr,
    pub eta_sqr: Fr,
    pub eta_cube: Fr,
    pub beta: Fr,
    pub gamma: Fr,
    /// Quotient combiner
    pub alpha: Fr,
    pub alpha_sqr: Fr,
    pub alpha_cube: Fr,
    pub alpha_quad: Fr,
    /// Evaluation point
    pub zeta: Fr,
    pub zeta_pow_n: Fr,
}

impl Challenges {
    /// Replays the prover's rounds up to `ζ`.
    pub fn derive<ProofTranscript: Transcript>(
        transcript: &mut ProofTranscript,
        domain: &EvaluationDomain,
        public_inputs: &[PublicInput],
        proof: &Proof,
    ) -> Self {
        for input in public_inputs {
            transcript.append_bytes(input);
        }
        transcript.append_points(&[proof.w1, proof.w2, proof.w3]);
        let eta = transcript.challenge_scalar();

        transcript.append_points(&[proof.w4, proof.s]);
        let beta = transcript.challenge_scalar();

        transcript.append_bytes(&[1u8]);
        let gamma = transcript.challenge_scalar();

        transcript.append_points(&[proof.z, proof.z_lookup]);
        let alpha = transcript.challenge_scalar();

        transcript.append_points(&[proof.t1, proof.t2, proof.t3, proof.t4]);
        let zeta = transcript.challenge_scalar();

        Self::from_rounds(eta, beta, gamma, alpha, zeta, domain)
    }

    pub fn from_rounds(
        eta: Fr,
        beta: Fr,
        gamma: Fr,
        alpha: Fr,
        zeta: Fr,
        domain: &EvaluationDomain,
    ) -> Self {
        let eta_sqr = eta.square();
        let alpha_sqr = alpha.square();
        let alpha_cube = alpha_sqr * alpha;
        Self {
            eta,
            eta_sqr,
            eta_cube: eta_sqr * eta,
            beta,
            gamma,
            alpha,
            alpha_sqr,
            alpha_cube,
            alpha_quad: alpha_cube * alpha,
            zeta,
            zeta_pow_n: domain.pow_size(zeta),
        }
    }
}

/// Opening batching challenges: `v_i` weights the `i`-th opened polynomial,
/// `u` separates the `ζ` and `ζω` openings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NuChallenges {
    pub v: [Fr; NUM_NU_CHALLENGES],
    pub u: Fr,
}

impl NuChallenges {
    pub fn derive<ProofTranscript: Transcript>(
        transcript: &mut ProofTranscript,
        quotient_eval: Fr,
        evaluations: &ProofEvaluations,
        proof: &Proof,
    ) -> Self {
        transcript.append_scalar(&quotient_eval);
        evaluations.append_to_transcript(transcript);
        let nu = transcript.challenge_scalar();

        let mut v = [nu; NUM_NU_CHALLENGES];
        for (i, v_i) in v.iter_mut().enumerate().skip(1) {
            *v_i = transcript.forked_challenge_scalar(i as u8);
        }

        transcript.append_points(&[proof.pi_z, proof.pi_z_omega]);
        let u = transcript.challenge_scalar();

        Self { v, u }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcripts::KeccakTranscript;
    use ark_bn254::G1Affine;
    use ark_ec::AffineRepr;
    use ark_ff::One;

    #[test]
    fn powers_are_consistent() {
        let domain = EvaluationDomain::new(64).unwrap();
        let challenges = Challenges::from_rounds(
            Fr::from(2u64),
            Fr::from(3u64),
            Fr::from(5u64),
            Fr::from(7u64),
            Fr::from(11u64),
            &domain,
        );
        assert_eq!(challenges.eta_cube, Fr::from(8u64));
        assert_eq!(challenges.alpha_quad, Fr::from(7u64.pow(4)));
        assert_eq!(challenges.zeta_pow_n, Fr::from(11u64).pow([64u64]));
    }

    fn generator_proof(evaluations: ProofEvaluations) -> Proof {
        let g = G1Affine::generator();
        Proof {
            w1: g,
            w2: g,
            w3: g,
            w4: g,
            s: g,
            z: g,
            z_lookup: g,
            t1: g,
            t2: g,
            t3: g,
            t4: g,
            evaluations,
            pi_z: g,
            pi_z_omega: g,
        }
    }

    fn counting_evaluations() -> ProofEvaluations {
        ProofEvaluations::from_array(core::array::from_fn(|i| Fr::from(i as u64)))
    }

    fn fr(decimal: &str) -> Fr {
        decimal.parse().unwrap()
    }

    #[test]
    fn nu_challenges_are_forked_from_nu() {
        let evaluations = counting_evaluations();
        let mut transcript = KeccakTranscript::new(8, 0);
        let mut replay = transcript.clone();
        let proof = generator_proof(evaluations);
        let nu = NuChallenges::derive(&mut transcript, Fr::one(), &evaluations, &proof);

        replay.append_scalar(&Fr::one());
        replay.append_scalars(&evaluations.as_array());
        assert_eq!(replay.challenge_scalar(), nu.v[0]);
        assert_eq!(replay.forked_challenge_scalar(29), nu.v[29]);
        assert_ne!(nu.v[1], nu.v[2]);
    }

    #[test]
    fn keccak_challenge_schedule() {
        // Digests computed independently with OpenSSL's KECCAK-256 over the
        // wire encodings, then reduced mod r.
        let proof = generator_proof(counting_evaluations());
        let domain = EvaluationDomain::new(8).unwrap();
        let mut ten = [0u8; 32];
        ten[31] = 10;

        let mut transcript = KeccakTranscript::new(8, 1);
        assert_eq!(
            hex::encode(transcript.state),
            "ca6fb8fb4fd807631b4bb758284c5c270641ed923a6fc0d3e90b1725c7237b53"
        );

        let challenges = Challenges::derive(&mut transcript, &domain, &[ten], &proof);
        assert_eq!(
            challenges.eta,
            fr("14068473538178951908740599501466391406083271396655725130951232679128692602653")
        );
        assert_eq!(
            challenges.beta,
            fr("12248586525473009842578808465644080964533201881932052729693387300402905696847")
        );
        assert_eq!(
            challenges.gamma,
            fr("17194722338284764499634443624058637397739500776594864013183128308458250827731")
        );
        assert_eq!(
            challenges.alpha,
            fr("12276244174860393795769652170804605634197032625389469312003890744663514122774")
        );
        assert_eq!(
            challenges.zeta,
            fr("11976834664655017651928310647853752744410975869986896555026086937053042990928")
        );
        assert_eq!(
            hex::encode(transcript.state),
            "7b4342d5cc623e306b068c538980e797fc48d41f8a6f69a6987b9754d97a5f52"
        );

        let nu = NuChallenges::derive(&mut transcript, Fr::one(), &proof.evaluations, &proof);
        assert_eq!(
            nu.v[0],
            fr("1685141602114149304640943266229240488758399374879371494982129761584162638052")
        );
        assert_eq!(
            nu.v[1],
            fr("1888947402768921273326394685138936138041492012875525377906311652080018021518")
        );
        assert_eq!(
            nu.v[29],
            fr("5766170364347389780701749252606276554196149994867765478281687816179944040672")
        );
        assert_eq!(
            nu.u,
            fr("18797037541295171329056810536734328323806259413364659398871771077879083228387")
        );
    }
}
