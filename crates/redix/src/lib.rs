//! # redix
//!
//! Typed async wrappers over single Redis key-value commands.
//!
//! Each [`KvClient`] method maps to exactly one command, with replies decoded
//! into Rust types: `Option` for nil, `bool` for 0/1 replies, [`KeyTtl`] for
//! TTL/PTTL and [`KeyType`] for TYPE. Commands are logged at `trace` on the
//! `redix.cmd` target and can be bounded by [`KvConfig::command_timeout`].
//!
//! ```ignore
//! use std::time::Duration;
//! use redix::{KeyTtl, KvClient, KvConfig};
//!
//! let kv = KvClient::connect(
//!     "redis://127.0.0.1:6379/0",
//!     KvConfig::new().command_timeout(Duration::from_secs(1)),
//! )
//! .await?;
//!
//! kv.set_with_expiration("greeting", "hello", Duration::from_secs(60)).await?;
//! if let KeyTtl::Expires(left) = kv.ttl("greeting").await? {
//!     println!("expires in {left:?}");
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod shared;
pub mod ttl;

pub use client::KvClient;
pub use config::KvConfig;
pub use error::{KvError, KvResult};
pub use ttl::{KeyTtl, KeyType};
