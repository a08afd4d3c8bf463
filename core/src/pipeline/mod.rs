//! pipeline/mod.rs
//! Concealment pipeline: envelope build + embed, extract + envelope open.

pub mod core;
pub mod batch;

pub use self::core::*;
pub use self::batch::*;
