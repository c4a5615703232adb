//! Authenticated HTTP client for the Filestore API.
//!
//! One [`Client`] per configured connection; every request carries the
//! API key and tenant headers installed at construction. The client
//! also implements the transport seams of `filestore-transfer`, which
//! is how the chunked upload session reaches the wire.

mod client;
mod transport;

pub use client::{Client, CredentialStatus, Error};
