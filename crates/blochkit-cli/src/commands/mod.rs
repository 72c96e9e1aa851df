//! CLI command implementations.

pub mod clipboard;
pub mod code;
pub mod common;
pub mod gates;
pub mod render;
pub mod run;
pub mod script;
pub mod version;
