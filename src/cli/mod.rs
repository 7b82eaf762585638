//! CLI command implementations
//!
//! - `solve`: solve every machine of an input file
//! - `config`: effective settings and JSON schema
//! - `util`: shared argument helpers

pub mod config;
pub mod solve;
pub mod util;

pub use config::{cmd_config, cmd_schema};
pub use solve::cmd_solve;
