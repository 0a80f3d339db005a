//! Identifier minters

mod random;
mod sequence;

pub use random::UuidMinter;
pub use sequence::SequenceMinter;
