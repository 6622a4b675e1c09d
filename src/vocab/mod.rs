//! Controlled-vocabulary fetching over HTTP

mod client;
mod traits;

pub use client::*;
pub use traits::*;
