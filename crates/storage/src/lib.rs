//! Storage layer for SnapFit
//!
//! This crate provides the device key-value store and the injected token
//! storage capability the login flow writes session tokens through.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod tokens;

pub use kv::{KvConfig, KvError, KvStore};
pub use tokens::{
    MemoryTokenStore, SledTokenStore, StorageError, TokenStore, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};
