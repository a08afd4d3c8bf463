//! complexity/mod.rs
//! Texture scoring used to pick an embedding depth.

pub mod estimator;

pub use estimator::*;
