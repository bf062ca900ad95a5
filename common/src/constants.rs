/// Size of a serialized scalar or base field element.
pub const FIELD_ELEMENT_SIZE: usize = 32;
/// Size of a serialized G1 affine point, `y ‖ x`.
pub const G1_POINT_SIZE: usize = 2 * FIELD_ELEMENT_SIZE;
pub const PUBLIC_INPUT_SIZE: usize = FIELD_ELEMENT_SIZE;

/// barretenberg `CircuitType::ULTRA`.
pub const ULTRA_CIRCUIT_TYPE: u32 = 2;

// Proof layout
pub const NUM_PROOF_COMMITMENTS: usize = 11;
pub const NUM_UNSHIFTED_EVALUATIONS: usize = 30;
pub const NUM_SHIFTED_EVALUATIONS: usize = 11;
pub const NUM_PROOF_EVALUATIONS: usize = NUM_UNSHIFTED_EVALUATIONS + NUM_SHIFTED_EVALUATIONS;
pub const NUM_OPENING_PROOFS: usize = 2;
pub const PROOF_SIZE: usize = (NUM_PROOF_COMMITMENTS + NUM_OPENING_PROOFS) * G1_POINT_SIZE
    + NUM_PROOF_EVALUATIONS * FIELD_ELEMENT_SIZE;

// Verification key layout
pub const NUM_VK_COMMITMENTS: usize = 23;
pub const NUM_RECURSIVE_PROOF_INDICES: usize = 16;
/// circuit type, circuit size, public input count, commitment count.
pub const VK_HEADER_SIZE: usize = 4 * 4;
pub const VK_SIZE: usize = 1779;

/// Number of batching challenges `v_i`, one per opened polynomial.
pub const NUM_NU_CHALLENGES: usize = NUM_UNSHIFTED_EVALUATIONS;
/// Rows removed from the vanishing polynomial to make room for randomness.
pub const NUM_ROOTS_CUT_OUT_OF_VANISHING_POLYNOMIAL: u32 = 4;
pub const MIN_CIRCUIT_SIZE: u32 = 8;
/// The BN254 scalar field has two-adicity 28.
pub const MAX_LOG_CIRCUIT_SIZE: u32 = 28;

const _: () = assert!(PROOF_SIZE == 2144);
