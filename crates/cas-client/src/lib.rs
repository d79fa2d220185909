//! # cas-client -- Typed Rust client for a chain anchor service
//!
//! A node submits anchor requests for stream commits to an external anchor
//! service, which batches them and commits a proof to a blockchain. This
//! crate is the node side of that exchange:
//! - **Supported chains** via `GET /api/v0/service-info/supported_chains`
//! - **Anchor request submission** via `POST /api/v0/requests`
//! - **Anchor status lookup** via `GET /api/v0/requests/{streamId}/{tip}`
//!
//! ## Architecture
//!
//! ```text
//! AnchorServiceClient ──▶ PollLoop ──▶ FetchJson (HttpFetcher or injected)
//!          │                 │                │
//!          │                 └── CancellationToken ◀── close()
//!          └──────────────▶ decode (untrusted JSON ──▶ typed values)
//! ```
//!
//! Every network operation runs through one [`PollLoop`] bound to the
//! client's [`CancellationToken`]. Closing the client stops the token,
//! which aborts in-flight requests and wakes sleeping retry loops.
//!
//! ## Error Model
//!
//! Transport failures are retried only for `create(.., true)`. Decode
//! failures are never retried. See [`CasError`].

pub mod archive;
pub mod cancel;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod poll;
pub mod transport;
pub mod types;

pub use archive::{AnchorArchive, AnchorRequestArchive, CAR_CONTENT_TYPE};
pub use cancel::CancellationToken;
pub use client::AnchorServiceClient;
pub use config::{CasClientConfig, ConfigError};
pub use error::{CasError, DecodeError, SchemaViolation, TransportError};
pub use poll::{PollLoop, PollPolicy};
pub use transport::{FetchJson, HttpFetcher, HttpMethod, RequestOptions};
pub use types::{AnchorRequest, AnchorRequestStatus, AnchorStatusResponse, ChainId, Cid, StreamId};
