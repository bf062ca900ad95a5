#![allow(clippy::too_many_arguments)]
#![allow(clippy::len_without_is_empty)]

pub mod curve;
pub mod field;
pub mod plonk;
pub mod poly;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod transcripts;
pub mod utils;

pub use plonk::config::VerifierConfig;
pub use plonk::key::VerificationKey;
pub use plonk::proof::Proof;
pub use plonk::public_inputs::{parse_public_input_hex, PublicInput};
pub use plonk::verifier::{verify, verify_with_config, verify_with_key};
pub use utils::errors::{DecodeError, HexError, VerifyError};
