//! # CLI Module
//!
//! Command-line helpers for inspecting a router configuration file before deploying it.
//!
//! ## Commands
//!
//! ### `check`
//!
//! Load and validate a configuration file, then print the effective CORS policy:
//!
//! ```bash
//! restroute check --config router.yaml
//! ```
//!
//! ### `cors`
//!
//! Show the headers a request would receive under the configured policy:
//!
//! ```bash
//! restroute cors --config router.yaml --origin https://app.example.com --method OPTIONS
//! restroute cors --config router.yaml --always-on
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use restroute::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{describe_config, render_cors, run_cli, Cli, Commands};
