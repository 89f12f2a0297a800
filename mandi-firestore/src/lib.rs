//! Cloud Firestore REST client for the dashboard's two collections.
//!
//! Queries go through `documents:runQuery` with a `structuredQuery` body;
//! responses are decoded from Firestore's typed value envelopes into the
//! core document records. HTTP is behind the [`Transport`] trait so the
//! encoding and decoding can be exercised without a network.

pub mod decode;
pub mod encode;
mod client;
mod transport;

pub use client::FirestoreClient;
pub use transport::{HttpReply, ReqwestTransport, Transport};
