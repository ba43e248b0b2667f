//! Connection and SQL-generation settings for [`crate::Database`].

use std::time::Duration;

/// Configuration for [`crate::Database`].
///
/// Settings are applied once, when the pool is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Table prefix; `users` resolves to `<prefix>_users` when non-empty.
    pub prefix: String,
    /// Maximum lifetime of a pooled connection. `Duration::ZERO` keeps
    /// connections until they fail.
    pub conn_max_lifetime: Duration,
    /// Ceiling on idle connections. It only raises [`Self::pool_size`];
    /// the pool never opens connections ahead of demand.
    pub max_idle_conns: u32,
    /// Upper bound on open connections; never lower than `max_idle_conns`.
    pub max_open_conns: u32,
    /// How long to wait for a free connection before failing.
    pub acquire_timeout: Duration,
    /// Treat `"null"` / `"now()"` strings in SET maps as SQL keywords.
    pub string_sentinels: bool,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_IDLE_CONNS: u32 = 10;
    pub const DEFAULT_MAX_OPEN_CONNS: u32 = 10;
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a configuration with the given connection lifetime and defaults
    /// for everything else.
    ///
    /// There is no sensible default lifetime for every deployment, so it has
    /// to be chosen explicitly.
    pub fn new(conn_max_lifetime: Duration) -> Self {
        Self {
            prefix: String::new(),
            conn_max_lifetime,
            max_idle_conns: Self::DEFAULT_MAX_IDLE_CONNS,
            max_open_conns: Self::DEFAULT_MAX_OPEN_CONNS,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
            string_sentinels: true,
        }
    }

    /// Set the table prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the maximum connection lifetime.
    pub fn conn_max_lifetime(mut self, lifetime: Duration) -> Self {
        self.conn_max_lifetime = lifetime;
        self
    }

    /// Set the idle connection ceiling.
    pub fn max_idle_conns(mut self, n: u32) -> Self {
        self.max_idle_conns = n;
        self
    }

    /// Set the maximum number of open connections.
    pub fn max_open_conns(mut self, n: u32) -> Self {
        self.max_open_conns = n;
        self
    }

    /// Set the acquire timeout.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Enable or disable string sentinel interpretation.
    pub fn string_sentinels(mut self, enabled: bool) -> Self {
        self.string_sentinels = enabled;
        self
    }

    /// Effective pool size: `max_open_conns`, raised to `max_idle_conns` and at least 1.
    pub fn pool_size(&self) -> u32 {
        self.max_open_conns.max(self.max_idle_conns).max(1)
    }

    /// Lifetime passed to the pool, `None` meaning unlimited.
    pub fn effective_max_lifetime(&self) -> Option<Duration> {
        (!self.conn_max_lifetime.is_zero()).then_some(self.conn_max_lifetime)
    }
}
