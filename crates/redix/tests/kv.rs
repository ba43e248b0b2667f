//! Round trips against a live Redis server.
//!
//! Set `REDIS_URL` (directly or in `.env`), e.g. `REDIS_URL=redis://127.0.0.1:6379/15`.
//! Keys are namespaced per test run and removed afterwards.

use chrono::Utc;
use redix::{KeyTtl, KeyType, KvClient, KvConfig, KvError, KvResult};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn url() -> Option<String> {
    let _ = dotenvy::dotenv();
    match std::env::var("REDIS_URL") {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("REDIS_URL is not set; skipping");
            None
        }
    }
}

fn namespace(test: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before UNIX_EPOCH")
        .as_nanos();
    format!("redix_it:{test}:{}:{nanos}", std::process::id())
}

async fn connect() -> KvResult<Option<KvClient>> {
    match url() {
        Some(url) => Ok(Some(
            KvClient::connect(&url, KvConfig::new().command_timeout(Duration::from_secs(5)))
                .await?,
        )),
        None => Ok(None),
    }
}

#[tokio::test]
async fn string_commands() -> KvResult<()> {
    let Some(kv) = connect().await? else {
        return Ok(());
    };
    let ns = namespace("strings");
    let (a, b, c) = (format!("{ns}:a"), format!("{ns}:b"), format!("{ns}:c"));

    kv.set(&a, "1").await?;
    assert_eq!(kv.get(&a).await?.as_deref(), Some("1"));
    assert_eq!(kv.get_as::<i64>(&a).await?, Some(1));
    assert_eq!(kv.ttl(&a).await?, KeyTtl::Persistent);

    assert!(kv.mset(&[(b.as_str(), "2"), (c.as_str(), "3")]).await?);
    assert_eq!(
        kv.mget(&[a.as_str(), "redix_it:missing", c.as_str()]).await?,
        vec![Some("1".to_string()), None, Some("3".to_string())]
    );

    assert_eq!(kv.getset(&a, "10").await?.as_deref(), Some("1"));
    assert!(!kv.set_nx(&a, "x", Duration::ZERO).await?);
    assert_eq!(kv.get(&a).await?.as_deref(), Some("10"));

    assert_eq!(kv.exists(&[&a, &b, &c]).await?, 3);
    assert_eq!(kv.key_type(&a).await?, KeyType::String);
    assert_eq!(kv.del(&[&a, &b]).await?, 2);
    assert_eq!(kv.unlink(&[&c]).await?, 1);
    assert_eq!(kv.ttl(&a).await?, KeyTtl::Missing);
    assert_eq!(kv.key_type(&a).await?, KeyType::None);
    Ok(())
}

#[tokio::test]
async fn expiration_commands() -> KvResult<()> {
    let Some(kv) = connect().await? else {
        return Ok(());
    };
    let ns = namespace("expire");
    let key = format!("{ns}:k");

    kv.set_with_expiration(&key, "v", Duration::from_secs(100))
        .await?;
    assert!(matches!(kv.ttl(&key).await?, KeyTtl::Expires(d) if d <= Duration::from_secs(100)));

    assert!(kv.persist(&key).await?);
    assert_eq!(kv.pttl(&key).await?, KeyTtl::Persistent);

    assert!(kv.pexpire(&key, Duration::from_millis(50_000)).await?);
    assert!(kv.pttl(&key).await?.remaining().is_some());

    let at = Utc::now() + chrono::Duration::seconds(300);
    assert!(kv.expire_at(&key, at).await?);
    assert!(kv.pexpire_at(&key, at).await?);
    assert!(kv.expire(&key, Duration::from_secs(30)).await?);

    kv.set_ex(&key, "v2", Duration::from_secs(20)).await?;
    assert!(matches!(kv.ttl(&key).await?, KeyTtl::Expires(d) if d <= Duration::from_secs(20)));

    assert!(!kv.expire(&format!("{ns}:missing"), Duration::from_secs(1)).await?);
    kv.del(&[&key]).await?;
    Ok(())
}

#[tokio::test]
async fn rename_dump_and_keys() -> KvResult<()> {
    let Some(kv) = connect().await? else {
        return Ok(());
    };
    let ns = namespace("rename");
    let (src, dst, other) = (format!("{ns}:src"), format!("{ns}:dst"), format!("{ns}:other"));

    kv.set(&src, "payload").await?;
    assert!(kv.dump(&src).await?.is_some_and(|bytes| !bytes.is_empty()));

    kv.rename(&src, &dst).await?;
    kv.set(&other, "x").await?;
    assert!(!kv.rename_nx(&dst, &other).await?);

    let mut keys = kv.keys(&format!("{ns}:*")).await?;
    keys.sort();
    assert_eq!(keys, vec![dst.clone(), other.clone()]);
    assert!(kv.random_key().await?.is_some());

    kv.del(&[&dst, &other]).await?;
    Ok(())
}

#[tokio::test]
async fn concurrent_commands_share_one_connection() -> KvResult<()> {
    let Some(kv) = connect().await? else {
        return Ok(());
    };
    let ns = namespace("concurrent");
    let keys: Vec<String> = (0..16).map(|i| format!("{ns}:{i}")).collect();

    futures_util::future::try_join_all(keys.iter().map(|k| kv.set(k, k.as_str()))).await?;
    let values = kv.mget(&keys).await?;
    assert!(values.iter().zip(&keys).all(|(v, k)| v.as_deref() == Some(k.as_str())));

    assert_eq!(kv.del(&keys).await?, 16);
    Ok(())
}

#[tokio::test]
async fn shared_client_is_initialised_once() -> KvResult<()> {
    let Some(url) = url() else {
        return Ok(());
    };
    let first = redix::shared::client(&url, KvConfig::new()).await?;
    let second = redix::shared::client(
        &url,
        KvConfig::new().default_expiration(Duration::from_secs(1)),
    )
    .await?;

    assert!(std::ptr::eq(first, second));
    assert_eq!(second.config().default_expiration, None);
    Ok(())
}

#[tokio::test]
async fn malformed_url_is_rejected() {
    let err = KvClient::connect("not a url", KvConfig::new())
        .await
        .unwrap_err();
    assert!(matches!(err, KvError::InvalidUrl(_)), "{err}");
}
