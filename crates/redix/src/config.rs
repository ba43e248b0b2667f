//! Client settings.

use std::time::Duration;

/// Configuration for [`crate::KvClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KvConfig {
    /// Expiration applied by [`crate::KvClient::set`]; `None` keeps keys forever.
    pub default_expiration: Option<Duration>,
    /// Upper bound on a single command round trip; `None` waits indefinitely.
    pub command_timeout: Option<Duration>,
}

impl KvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default expiration. `Duration::ZERO` clears it.
    pub fn default_expiration(mut self, expiration: Duration) -> Self {
        self.default_expiration = (!expiration.is_zero()).then_some(expiration);
        self
    }

    /// Set the command timeout. `Duration::ZERO` clears it.
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_never_expire_and_never_time_out() {
        let cfg = KvConfig::default();
        assert_eq!(cfg.default_expiration, None);
        assert_eq!(cfg.command_timeout, None);
    }

    #[test]
    fn zero_durations_clear_the_setting() {
        let cfg = KvConfig::new()
            .default_expiration(Duration::from_secs(60))
            .command_timeout(Duration::from_millis(250));
        assert_eq!(cfg.default_expiration, Some(Duration::from_secs(60)));
        assert_eq!(cfg.command_timeout, Some(Duration::from_millis(250)));

        let cfg = cfg.default_expiration(Duration::ZERO).command_timeout(Duration::ZERO);
        assert_eq!(cfg, KvConfig::default());
    }
}
