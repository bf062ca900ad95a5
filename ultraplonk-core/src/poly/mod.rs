pub mod batch_inverse;
pub mod commitment;
pub mod domain;
pub mod fraction;
pub mod lagrange;
