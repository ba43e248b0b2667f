//! Opt-in process-wide [`KvClient`].

use crate::client::KvClient;
use crate::config::KvConfig;
use crate::error::KvResult;
use tokio::sync::OnceCell;

static CLIENT: OnceCell<KvClient> = OnceCell::const_new();

/// The shared client, connecting on first use.
///
/// The first successful call wins; later calls get the same client and their
/// `url` and `config` are ignored.
pub async fn client(url: &str, config: KvConfig) -> KvResult<&'static KvClient> {
    let initialised = CLIENT.initialized();
    let wanted = config.clone();
    let client = CLIENT
        .get_or_try_init(|| KvClient::connect(url, config))
        .await?;
    if initialised && client.config() != &wanted {
        tracing::debug!(
            target: "redix.cmd",
            "shared client already initialised; ignoring new configuration"
        );
    }
    Ok(client)
}

/// The shared client if it has been initialised.
pub fn get() -> Option<&'static KvClient> {
    CLIENT.get()
}
