//! Shared dependency surface for the exoscope crates.
//!
//! Every crate in the workspace reaches third-party functionality through
//! these re-exports so the stack stays pinned in one place.

pub use anyhow::{Error, Result, anyhow, bail};
pub use async_trait::async_trait;
pub use base64;
pub use minijinja;
pub use rand;
pub use regex;
pub use reqwest;
pub use serde_json::Value;

pub mod json {
    pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
    pub use serde_json::*;
}
