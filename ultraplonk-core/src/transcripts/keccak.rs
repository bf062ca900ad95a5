use ark_bn254::{Fr, G1Affine};
use sha3::{Digest, Keccak256};

use super::transcript::Transcript;
use crate::curve::write_g1;
use crate::field::FieldBytes;

/// Keccak-256 transcript compatible with the Solidity UltraPlonk verifier.
#[derive(Clone)]
pub struct KeccakTranscript {
    /// Most recent challenge digest, before reduction into the field
    pub state: [u8; 32],
    /// Absorbs `state` followed by everything appended since
    hasher: Keccak256,
    n_rounds: u32,
    #[cfg(test)]
    /// A complete history of the transcript's `state`; used for testing.
    state_history: Vec<[u8; 32]>,
    #[cfg(test)]
    /// When set, every new state is checked against this history so a
    /// divergence panics at the round where it happens.
    expected_state_history: Option<Vec<[u8; 32]>>,
}

impl KeccakTranscript {
    fn update_state(&mut self, new_state: [u8; 32]) {
        self.state = new_state;
        self.hasher = Keccak256::new().chain_update(new_state);
        self.n_rounds += 1;
        #[cfg(test)]
        {
            if let Some(expected_state_history) = &self.expected_state_history {
                assert!(
                    new_state == expected_state_history[self.n_rounds as usize],
                    "Fiat-Shamir transcript mismatch"
                );
            }
            self.state_history.push(new_state);
        }
    }
}

impl Transcript for KeccakTranscript {
    fn new(circuit_size: u32, num_public_inputs: u32) -> Self {
        let state: [u8; 32] = Keccak256::new()
            .chain_update(circuit_size.to_be_bytes())
            .chain_update(num_public_inputs.to_be_bytes())
            .finalize()
            .into();

        Self {
            state,
            hasher: Keccak256::new().chain_update(state),
            n_rounds: 0,
            #[cfg(test)]
            state_history: vec![state],
            #[cfg(test)]
            expected_state_history: None,
        }
    }

    #[cfg(test)]
    fn compare_to(&mut self, other: Self) {
        self.expected_state_history = Some(other.state_history);
    }

    fn append_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    fn append_scalar(&mut self, scalar: &Fr) {
        self.hasher.update(scalar.to_be_bytes());
    }

    fn append_scalars(&mut self, scalars: &[Fr]) {
        for scalar in scalars {
            self.append_scalar(scalar);
        }
    }

    fn append_point(&mut self, point: &G1Affine) {
        let mut buf = Vec::with_capacity(64);
        write_g1(point, &mut buf);
        self.hasher.update(&buf);
    }

    fn append_points(&mut self, points: &[G1Affine]) {
        for point in points {
            self.append_point(point);
        }
    }

    fn challenge_scalar(&mut self) -> Fr {
        let digest: [u8; 32] = self.hasher.clone().finalize().into();
        self.update_state(digest);
        Fr::from_be_bytes_reduced(&digest)
    }

    fn forked_challenge_scalar(&self, index: u8) -> Fr {
        let digest: [u8; 32] = Keccak256::new()
            .chain_update(self.state)
            .chain_update([index])
            .finalize()
            .into();
        Fr::from_be_bytes_reduced(&digest)
    }
}

impl core::fmt::Debug for KeccakTranscript {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeccakTranscript")
            .field("state", &hex::encode(self.state))
            .field("n_rounds", &self.n_rounds)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_ec::AffineRepr;
    use ark_ff::UniformRand;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn keccak(parts: &[&[u8]]) -> [u8; 32] {
        parts
            .iter()
            .fold(Keccak256::new(), |h, p| h.chain_update(p))
            .finalize()
            .into()
    }

    #[test]
    fn chains_previous_digest() {
        let mut transcript = KeccakTranscript::new(16, 1);
        let c0 = keccak(&[&16u32.to_be_bytes(), &1u32.to_be_bytes()]);
        assert_eq!(transcript.state, c0);

        let generator = G1Affine::generator();
        let mut encoded = Vec::new();
        write_g1(&generator, &mut encoded);

        transcript.append_scalar(&Fr::from(10u64));
        transcript.append_point(&generator);
        let challenge = transcript.challenge_scalar();

        let expected = keccak(&[&c0, &Fr::from(10u64).to_be_bytes(), &encoded]);
        assert_eq!(transcript.state, expected);
        assert_eq!(challenge, Fr::from_be_bytes_reduced(&expected));

        // a lone separator byte: H(previous ‖ 0x01)
        transcript.append_bytes(&[1u8]);
        transcript.challenge_scalar();
        assert_eq!(transcript.state, keccak(&[&expected, &[1u8]]));
    }

    #[test]
    fn forked_challenges_do_not_advance() {
        let mut transcript = KeccakTranscript::new(8, 0);
        transcript.append_bytes(b"nu");
        let nu = transcript.challenge_scalar();
        let state = transcript.state;

        let v3 = transcript.forked_challenge_scalar(3);
        assert_eq!(v3, Fr::from_be_bytes_reduced(&keccak(&[&state, &[3u8]])));
        assert_ne!(v3, transcript.forked_challenge_scalar(4));
        assert_eq!(transcript.state, state);

        // the next challenge still chains from nu
        let u = transcript.challenge_scalar();
        assert_eq!(u, Fr::from_be_bytes_reduced(&keccak(&[&state])));
        assert_ne!(u, nu);
    }

    #[test]
    fn identical_transcripts_agree() {
        let mut rng = ChaCha20Rng::from_seed([3; 32]);
        let scalars: Vec<Fr> = (0..5).map(|_| Fr::rand(&mut rng)).collect();

        let run = || {
            let mut t = KeccakTranscript::new(1 << 10, 5);
            t.append_scalars(&scalars);
            t.challenge_scalar();
            t.append_points(&[G1Affine::generator()]);
            t.challenge_scalar();
            t
        };
        let prover = run();
        let mut verifier = KeccakTranscript::new(1 << 10, 5);
        verifier.compare_to(prover);
        verifier.append_scalars(&scalars);
        verifier.challenge_scalar();
        verifier.append_points(&[G1Affine::generator()]);
        verifier.challenge_scalar();
    }

    #[test]
    #[should_panic(expected = "Fiat-Shamir transcript mismatch")]
    fn diverging_transcripts_panic() {
        let mut prover = KeccakTranscript::new(8, 0);
        prover.append_bytes(b"a");
        prover.challenge_scalar();

        let mut verifier = KeccakTranscript::new(8, 0);
        verifier.compare_to(prover);
        verifier.append_bytes(b"b");
        verifier.challenge_scalar();
    }
}
