//! Typed replies for TTL and TYPE.

use redis::{FromRedisValue, RedisResult, Value};
use std::fmt;
use std::time::Duration;

/// Remaining lifetime of a key, decoded from a TTL or PTTL reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist (`-2`).
    Missing,
    /// The key exists without an expiration (`-1`).
    Persistent,
    /// The key expires after this long.
    Expires(Duration),
}

impl KeyTtl {
    /// Decode a TTL reply in seconds.
    pub fn from_secs(reply: i64) -> Self {
        Self::decode(reply, Duration::from_secs)
    }

    /// Decode a PTTL reply in milliseconds.
    pub fn from_millis(reply: i64) -> Self {
        Self::decode(reply, Duration::from_millis)
    }

    fn decode(reply: i64, unit: impl FnOnce(u64) -> Duration) -> Self {
        match reply {
            -1 => Self::Persistent,
            n if n < 0 => Self::Missing,
            n => Self::Expires(unit(n.unsigned_abs())),
        }
    }

    /// Remaining time, if the key has an expiration.
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            Self::Expires(d) => Some(*d),
            _ => None,
        }
    }

    pub fn exists(&self) -> bool {
        !matches!(self, Self::Missing)
    }
}

/// Type of the value stored at a key, as reported by TYPE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    None,
    String,
    List,
    Set,
    ZSet,
    Hash,
    Stream,
    /// A type this crate does not know, e.g. from a module.
    Other(String),
}

impl KeyType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::ZSet => "zset",
            Self::Hash => "hash",
            Self::Stream => "stream",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for KeyType {
    fn from(name: &str) -> Self {
        match name {
            "none" => Self::None,
            "string" => Self::String,
            "list" => Self::List,
            "set" => Self::Set,
            "zset" => Self::ZSet,
            "hash" => Self::Hash,
            "stream" => Self::Stream,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromRedisValue for KeyType {
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        let name = String::from_redis_value(v)?;
        Ok(Self::from(name.as_str()))
    }
}
