//! # gateway-cli
//!
//! Argument parsing, config loading and thread maintenance for the `whatsapp-gateway` binary.

pub mod cli;

pub use cli::{
    delete_threads, load_config, maintenance_client, show_thread, Cli, Commands, ThreadCommands,
};
