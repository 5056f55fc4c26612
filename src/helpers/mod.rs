//! Display helpers shared by the CLI and generated manifests

mod date;

pub use date::*;
