pub mod auth;
pub mod client;
mod investors;
pub mod types;

pub use client::*;
pub use types::*;
