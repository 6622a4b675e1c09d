//! Static form schema mirroring the NERDm resource properties

mod field;

pub use field::*;
