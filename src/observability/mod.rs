//! Structured logging for hosts embedding the contract.
//!
//! The reducer and codec emit `tracing` spans and events. This module wires
//! them to a `tracing-subscriber` fmt layer:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → LogFile (rotating) | stderr
//! ```
//!
//! # Configuration
//!
//! - `trace_level`: an `EnvFilter` directive. Default: `"info"`
//! - `log_file`: write to this file instead of stderr. The file is rotated
//!   at 10 MB and three backups are kept
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`log_file`]: rotating file writer

pub mod init;
pub mod log_file;

pub use init::init_tracing;
pub use log_file::LogFile;
