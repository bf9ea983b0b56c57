//! Common types shared by the Hero Lab Online client crates

mod secret;
mod error;

pub use secret::Secret;
pub use error::{Error, Result};
