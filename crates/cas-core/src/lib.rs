//! # cas-core — Foundational Types for the Anchor Service Client
//!
//! Leaf crate of the workspace. Defines the identifier newtypes and the
//! status enum that every anchor service payload is decoded into.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`StreamId`], [`Cid`], and
//!    [`ChainId`] validate their string form at construction. A payload
//!    field that fails to parse never becomes a typed value.
//!
//! 2. **Single [`AnchorRequestStatus`] enum.** One definition with the
//!    service's wire names, exhaustive `match` everywhere.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cas-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod status;

pub use error::ValidationError;
pub use identity::{ChainId, Cid, StreamId};
pub use status::AnchorRequestStatus;
