pub mod commitments;
pub mod constants;
