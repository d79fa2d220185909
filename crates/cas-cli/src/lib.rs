//! # cas-cli — Anchor Service Command-Line Interface
//!
//! Operator commands against a live anchor service.
//!
//! ## Subcommands
//!
//! - `chains` — Print the chain the service anchors to
//! - `status` — Look up the anchor request for a stream tip
//! - `request` — Submit an encoded anchor request (CAR file)
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every network call goes through
//!   `cas-client`.
//! - Handlers return the text to print so they can be tested without a
//!   terminal.

pub mod chains;
pub mod connection;
pub mod request;
pub mod status;
