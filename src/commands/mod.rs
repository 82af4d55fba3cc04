//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod generate;
pub mod init;
pub mod sections;

pub use generate::{execute_generate, generate_with, GenerateOptions};
pub use init::{execute_init, InitOptions};
pub use sections::execute_sections;
