#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use short_link_store::application::services::{HealthService, LinkStore, ShortLinkService};
use short_link_store::domain::entities::{LinkStats, NewShortLink, ShortLink};
use short_link_store::domain::repositories::{RepositoryError, ShortLinkRepository};
use short_link_store::infrastructure::cache::{CacheError, CacheResult, CacheService};
use short_link_store::state::AppState;
use short_link_store::utils::key_generator::KeyGenerator;

pub const BASE_URL: &str = "https://s.example.com";
pub const API_SECRET: &str = "test-secret";

/// Short link repository backed by a `HashMap`.
#[derive(Default)]
pub struct InMemoryRepository {
    links: Mutex<HashMap<String, ShortLink>>,
    next_id: AtomicUsize,
    insert_calls: AtomicUsize,
    fail_increments: AtomicBool,
    down: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn get(&self, key: &str) -> Option<ShortLink> {
        self.links.lock().unwrap().get(key).cloned()
    }

    /// Stores a link directly, bypassing the link store.
    pub fn seed(&self, key: &str, original_url: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let link = ShortLink::new(
            id,
            key.to_string(),
            original_url.to_string(),
            format!("{BASE_URL}/api/shortener/{key}/redirect"),
            0,
            Utc::now(),
        );
        self.links.lock().unwrap().insert(key.to_string(), link);
    }

    pub fn fail_increments(&self) {
        self.fail_increments.store(true, Ordering::SeqCst);
    }

    /// Makes every operation fail with a database error.
    pub fn go_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), RepositoryError> {
        if self.down.load(Ordering::SeqCst) {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryRepository {
    async fn insert(&self, new_link: &NewShortLink) -> Result<i64, RepositoryError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_up()?;

        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.key) {
            return Err(RepositoryError::KeyExists);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        links.insert(new_link.key.clone(), new_link.clone().into_short_link(id));
        Ok(id)
    }

    async fn find_by_key(&self, key: &str) -> Result<ShortLink, RepositoryError> {
        self.check_up()?;
        self.get(key).ok_or(RepositoryError::NotFound)
    }

    async fn find_original_url_by_key(&self, key: &str) -> Result<String, RepositoryError> {
        self.check_up()?;
        self.get(key)
            .map(|link| link.original_url)
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError> {
        self.check_up()?;
        self.links.lock().unwrap().remove(key);
        Ok(())
    }

    async fn increment_hits(&self, key: &str) -> Result<(), RepositoryError> {
        self.check_up()?;
        if self.fail_increments.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        if let Some(link) = self.links.lock().unwrap().get_mut(key) {
            link.hits += 1;
        }
        Ok(())
    }

    async fn find_stats_by_key(&self, key: &str) -> Result<LinkStats, RepositoryError> {
        self.check_up()?;
        self.get(key)
            .map(|link| LinkStats {
                hits: link.hits,
                created_at: link.created_at,
            })
            .ok_or(RepositoryError::NotFound)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_up()
    }
}

/// Cache backed by a `HashMap`. TTLs are recorded but never enforced.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Duration)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    /// Writes an entry directly, bypassing the link store.
    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Duration::from_secs(60)));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Cache whose every operation fails.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Key generator replaying a fixed list of keys, then repeating the last one.
pub struct SequenceKeyGenerator {
    keys: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl SequenceKeyGenerator {
    pub fn new(keys: &[&str]) -> Self {
        Self {
            keys: Mutex::new(keys.iter().map(|k| k.to_string()).collect()),
            last: Mutex::new(keys.last().map(|k| k.to_string()).unwrap_or_default()),
        }
    }
}

impl KeyGenerator for SequenceKeyGenerator {
    fn generate(&self) -> String {
        match self.keys.lock().unwrap().pop_front() {
            Some(key) => key,
            None => self.last.lock().unwrap().clone(),
        }
    }
}

pub fn create_link_store(
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn KeyGenerator>,
) -> LinkStore {
    LinkStore::new(repository, cache, generator, BASE_URL)
}

pub fn create_test_state_with(
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<dyn CacheService>,
    generator: Arc<dyn KeyGenerator>,
    link_not_found_redirect_url: Option<&str>,
) -> AppState {
    let store = create_link_store(repository.clone(), cache.clone(), generator);

    AppState::new(
        Arc::new(ShortLinkService::new(store)),
        Arc::new(HealthService::new(repository, cache)),
        API_SECRET,
        link_not_found_redirect_url.map(str::to_string),
    )
}

/// State over fresh in-memory doubles; the repository and cache are returned
/// for inspection.
pub fn create_test_state(
    generator: Arc<dyn KeyGenerator>,
) -> (AppState, Arc<InMemoryRepository>, Arc<InMemoryCache>) {
    let repository = Arc::new(InMemoryRepository::new());
    let cache = Arc::new(InMemoryCache::new());

    let state = create_test_state_with(repository.clone(), cache.clone(), generator, None);

    (state, repository, cache)
}

pub fn bearer() -> String {
    format!("Bearer {API_SECRET}")
}
