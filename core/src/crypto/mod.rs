
pub mod types;
pub mod aead;
pub mod keywrap;

pub use types::*;
pub use aead::*;
pub use keywrap::*;
