pub mod challenges;
pub(crate) mod codec;
pub mod config;
pub mod identity;
pub mod key;
pub mod opening;
pub mod proof;
pub mod public_inputs;
pub mod verifier;
pub mod widgets;
