//! Deterministic star simulation
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Frame-normalized timesteps supplied by the caller
//! - No rendering or platform dependencies

pub mod field;
pub mod star;

pub use field::StarField;
pub use star::Star;
