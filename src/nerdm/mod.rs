//! Record semantics: validation, document construction, import/export

mod document;
mod export;
mod validate;

pub use document::*;
pub use export::*;
pub use validate::*;
