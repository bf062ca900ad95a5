use ark_bn254::{Fr, G1Affine};

/// A Fiat-Shamir transcript in which every challenge is the hash of the
/// previous challenge followed by everything absorbed since.
pub trait Transcript: Clone + Sync + Send + 'static {
    /// Seeds the chain with the circuit size and public input count.
    fn new(circuit_size: u32, num_public_inputs: u32) -> Self;
    #[cfg(test)]
    fn compare_to(&mut self, other: Self);
    fn append_bytes(&mut self, bytes: &[u8]);
    fn append_scalar(&mut self, scalar: &Fr);
    fn append_scalars(&mut self, scalars: &[Fr]);
    fn append_point(&mut self, point: &G1Affine);
    fn append_points(&mut self, points: &[G1Affine]);
    /// Squeezes a challenge and makes it the new chaining value.
    fn challenge_scalar(&mut self) -> Fr;
    /// `H(current ‖ index)`, which does not advance the chain.
    fn forked_challenge_scalar(&self, index: u8) -> Fr;
}

pub trait AppendToTranscript {
    fn append_to_transcript<ProofTranscript: Transcript>(&self, transcript: &mut ProofTranscript);
}
