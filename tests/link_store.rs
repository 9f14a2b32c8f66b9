mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FailingCache, InMemoryCache, InMemoryRepository, SequenceKeyGenerator};
use short_link_store::application::services::link_store::{
    CacheNamespace, MAX_CREATE_ATTEMPTS, cache_key,
};
use short_link_store::error::ShortLinkError;
use short_link_store::utils::key_generator::{
    KEY_ALPHABET, KEY_LENGTH, RandomKeyGenerator, is_valid_key,
};

#[tokio::test]
async fn test_create_then_resolve_round_trip() {
    let repository = Arc::new(InMemoryRepository::new());
    let cache = Arc::new(InMemoryCache::new());
    let store = common::create_link_store(
        repository.clone(),
        cache.clone(),
        Arc::new(RandomKeyGenerator::seeded(7)),
    );

    let link = store.create("https://example.com/a?b=c").await.unwrap();

    assert_eq!(link.key.chars().count(), KEY_LENGTH);
    assert!(link.key.bytes().all(|b| KEY_ALPHABET.contains(&b)));
    assert!(is_valid_key(&link.key));
    assert_eq!(
        link.short_url,
        format!("{}/api/shortener/{}/redirect", common::BASE_URL, link.key)
    );
    assert_eq!(link.hits, 0);

    let url = store.resolve(&link.key).await.unwrap();
    assert_eq!(url, "https://example.com/a?b=c");

    let expanded = store.expand(&link.key).await.unwrap();
    assert_eq!(expanded.original_url, link.original_url);
    assert_eq!(expanded.key, link.key);
}

#[tokio::test]
async fn test_never_created_key_is_not_found() {
    let store = common::create_link_store(
        Arc::new(InMemoryRepository::new()),
        Arc::new(InMemoryCache::new()),
        Arc::new(RandomKeyGenerator::seeded(1)),
    );

    assert!(matches!(
        store.resolve("bcdfgh").await,
        Err(ShortLinkError::NotFound { ref key }) if key == "bcdfgh"
    ));
    assert!(matches!(
        store.expand("bcdfgh").await,
        Err(ShortLinkError::NotFound { .. })
    ));
    assert!(matches!(
        store.stats("bcdfgh").await,
        Err(ShortLinkError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_malformed_url_writes_nothing() {
    let repository = Arc::new(InMemoryRepository::new());
    let cache = Arc::new(InMemoryCache::new());
    let store = common::create_link_store(
        repository.clone(),
        cache.clone(),
        Arc::new(RandomKeyGenerator::seeded(1)),
    );

    let result = store.create("not a url").await;

    assert!(matches!(result, Err(ShortLinkError::InvalidUrl(_))));
    assert_eq!(repository.insert_calls(), 0);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_delete_invalidates_both_namespaces() {
    let repository = Arc::new(InMemoryRepository::new());
    let cache = Arc::new(InMemoryCache::new());
    let store = common::create_link_store(
        repository.clone(),
        cache.clone(),
        Arc::new(SequenceKeyGenerator::new(&["Qw2rTy"])),
    );

    store.create("https://example.com").await.unwrap();
    store.resolve("Qw2rTy").await.unwrap();
    store.expand("Qw2rTy").await.unwrap();

    let entity_key = cache_key(CacheNamespace::Entity, "Qw2rTy");
    let url_key = cache_key(CacheNamespace::OriginalUrl, "Qw2rTy");
    assert!(cache.value(&entity_key).is_some());
    assert_eq!(cache.value(&url_key).as_deref(), Some("https://example.com"));

    store.delete("Qw2rTy").await.unwrap();

    assert!(cache.value(&entity_key).is_none());
    assert!(cache.value(&url_key).is_none());
    assert!(matches!(
        store.resolve("Qw2rTy").await,
        Err(ShortLinkError::NotFound { .. })
    ));
    assert!(matches!(
        store.expand("Qw2rTy").await,
        Err(ShortLinkError::NotFound { .. })
    ));
    assert!(matches!(
        store.stats("Qw2rTy").await,
        Err(ShortLinkError::NotFound { .. })
    ));

    // Deleting again is not an error.
    assert!(store.delete("Qw2rTy").await.is_ok());
}

#[tokio::test]
async fn test_hits_never_decrease_and_expand_does_not_count() {
    let repository = Arc::new(InMemoryRepository::new());
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
        Arc::new(SequenceKeyGenerator::new(&["Qw2rTy"])),
    );

    store.create("https://example.com").await.unwrap();

    let mut previous = 0;
    for expected in 1..=5 {
        store.resolve("Qw2rTy").await.unwrap();
        let stats = store.stats("Qw2rTy").await.unwrap();
        assert!(stats.hits >= previous);
        assert_eq!(stats.hits, expected);
        previous = stats.hits;
    }

    store.expand("Qw2rTy").await.unwrap();
    assert_eq!(store.stats("Qw2rTy").await.unwrap().hits, 5);
}

#[tokio::test]
async fn test_failed_hit_increment_does_not_fail_resolve() {
    let repository = Arc::new(InMemoryRepository::new());
    repository.seed("Qw2rTy", "https://example.com");
    repository.fail_increments();
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
        Arc::new(RandomKeyGenerator::seeded(1)),
    );

    let url = store.resolve("Qw2rTy").await.unwrap();

    assert_eq!(url, "https://example.com");
    assert_eq!(repository.get("Qw2rTy").unwrap().hits, 0);
}

#[tokio::test]
async fn test_create_succeeds_on_last_attempt_after_collisions() {
    let repository = Arc::new(InMemoryRepository::new());
    repository.seed("Xx2xXx", "https://taken.example.com");

    let mut keys = vec!["Xx2xXx"; MAX_CREATE_ATTEMPTS - 1];
    keys.push("Qw2rTy");
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
        Arc::new(SequenceKeyGenerator::new(&keys)),
    );

    let link = store.create("https://example.com").await.unwrap();

    assert_eq!(link.key, "Qw2rTy");
    assert_eq!(repository.insert_calls(), MAX_CREATE_ATTEMPTS);
    assert_eq!(repository.len(), 2);
    assert_eq!(
        repository.get("Xx2xXx").unwrap().original_url,
        "https://taken.example.com"
    );
}

#[tokio::test]
async fn test_create_exhausted_after_max_collisions() {
    let repository = Arc::new(InMemoryRepository::new());
    repository.seed("Xx2xXx", "https://taken.example.com");
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
        Arc::new(SequenceKeyGenerator::new(&["Xx2xXx"])),
    );

    let result = store.create("https://example.com").await;

    assert!(matches!(
        result,
        Err(ShortLinkError::CreationExhausted { attempts }) if attempts == MAX_CREATE_ATTEMPTS
    ));
    assert_eq!(repository.insert_calls(), MAX_CREATE_ATTEMPTS);
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_all_operations_succeed_with_cache_down() {
    let repository = Arc::new(InMemoryRepository::new());
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(FailingCache),
        Arc::new(SequenceKeyGenerator::new(&["Qw2rTy"])),
    );

    let link = store.create("https://example.com").await.unwrap();
    assert_eq!(link.key, "Qw2rTy");

    assert_eq!(
        store.resolve("Qw2rTy").await.unwrap(),
        "https://example.com"
    );
    assert_eq!(
        store.expand("Qw2rTy").await.unwrap().original_url,
        "https://example.com"
    );
    assert_eq!(store.stats("Qw2rTy").await.unwrap().hits, 1);
    assert!(store.delete("Qw2rTy").await.is_ok());
    assert_eq!(repository.len(), 0);
}

#[tokio::test]
async fn test_store_failure_is_not_not_found() {
    let repository = Arc::new(InMemoryRepository::new());
    repository.go_down();
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
        Arc::new(RandomKeyGenerator::seeded(1)),
    );

    let resolve = store.resolve("Qw2rTy").await;
    assert!(matches!(resolve, Err(ShortLinkError::Store(_))));
    assert!(resolve.unwrap_err().is_transient());

    assert!(matches!(
        store.create("https://example.com").await,
        Err(ShortLinkError::Store(_))
    ));
    assert!(matches!(
        store.delete("Qw2rTy").await,
        Err(ShortLinkError::Store(_))
    ));
}

#[tokio::test]
async fn test_cache_entries_use_configured_ttl() {
    let cache = Arc::new(InMemoryCache::new());
    let store = common::create_link_store(
        Arc::new(InMemoryRepository::new()),
        cache.clone(),
        Arc::new(SequenceKeyGenerator::new(&["Qw2rTy"])),
    )
    .with_cache_ttl(Duration::from_secs(90));

    store.create("https://example.com").await.unwrap();

    assert_eq!(
        cache.ttl(&cache_key(CacheNamespace::OriginalUrl, "Qw2rTy")),
        Some(Duration::from_secs(90))
    );
    assert_eq!(
        cache.ttl(&cache_key(CacheNamespace::Entity, "Qw2rTy")),
        Some(Duration::from_secs(90))
    );
}

#[tokio::test]
async fn test_cached_url_is_served_after_store_record_vanishes() {
    let repository = Arc::new(InMemoryRepository::new());
    let cache = Arc::new(InMemoryCache::new());
    cache.put(
        &cache_key(CacheNamespace::OriginalUrl, "Qw2rTy"),
        "https://cached.example.com",
    );
    let store = common::create_link_store(
        repository.clone(),
        cache.clone(),
        Arc::new(RandomKeyGenerator::seeded(1)),
    );

    // Staleness is bounded by the TTL, not prevented.
    assert_eq!(
        store.resolve("Qw2rTy").await.unwrap(),
        "https://cached.example.com"
    );
}

#[tokio::test]
async fn test_concurrent_creates_with_same_first_key_get_distinct_keys() {
    let repository = Arc::new(InMemoryRepository::new());
    let store = common::create_link_store(
        repository.clone(),
        Arc::new(InMemoryCache::new()),
        Arc::new(SequenceKeyGenerator::new(&["Qw2rTy", "Qw2rTy", "Zz3xYy"])),
    );

    let (first, second) = tokio::join!(
        store.create("https://example.com/first"),
        store.create("https://example.com/second"),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_ne!(first.key, second.key);
    let mut keys = [first.key.as_str(), second.key.as_str()];
    keys.sort_unstable();
    assert_eq!(keys, ["Qw2rTy", "Zz3xYy"]);

    // Exactly one of the two lost the race on the shared key and retried.
    assert_eq!(repository.insert_calls(), 3);
    assert_eq!(repository.len(), 2);
    assert_eq!(
        repository.get(&first.key).unwrap().original_url,
        "https://example.com/first"
    );
    assert_eq!(
        repository.get(&second.key).unwrap().original_url,
        "https://example.com/second"
    );
}
