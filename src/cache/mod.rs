pub(crate) mod hooks;

use crate::api::{ApiError, ApiResult};
use crate::util::now_ms;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Staleness policy for one cached resource.
///
/// Within `dedupe_ms` of a completed fetch the cached value is served as-is
/// and no request goes out; a fetch that fails is retried up to
/// `retry_count` times before the error is recorded. There is no
/// revalidate-on-focus or revalidate-on-reconnect behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CachePolicy {
    pub dedupe_ms: i64,
    pub retry_count: u32,
}

impl CachePolicy {
    /// Request-level dedupe only. Used for records that change under the
    /// user's feet (the single channel record during a sync).
    pub const fn short() -> Self {
        Self {
            dedupe_ms: 60_000,
            retry_count: 2,
        }
    }

    /// Five-minute window for slow-moving analytics aggregates.
    pub const fn long() -> Self {
        Self {
            dedupe_ms: 300_000,
            retry_count: 2,
        }
    }
}

/// Whether a fetch should be started for a key right now.
///
/// `fetched_at_ms == 0` means the key has never resolved. An in-flight
/// request always wins: at most one outstanding fetch per key.
pub(crate) fn should_fetch(now_ms: i64, fetched_at_ms: i64, in_flight: bool, dedupe_ms: i64) -> bool {
    if in_flight {
        return false;
    }
    fetched_at_ms == 0 || now_ms.saturating_sub(fetched_at_ms) >= dedupe_ms
}

/// Reactive state of one cache key, shared by every hook that asks for it.
#[derive(Clone, Copy)]
pub(crate) struct CacheSlot {
    pub data: RwSignal<Option<serde_json::Value>>,
    pub error: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    pub fetched_at_ms: RwSignal<i64>,
}

impl CacheSlot {
    fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            error: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            fetched_at_ms: RwSignal::new(0),
        }
    }
}

pub(crate) type FetchFuture = Pin<Box<dyn Future<Output = ApiResult<serde_json::Value>>>>;

/// Process-wide response cache keyed by resource + parameters.
///
/// Lives in `AppState` and is handed around by context, never a module
/// global. Slots are never evicted; the working set is bounded by the
/// number of distinct (resource, params) pairs a session can visit.
#[derive(Clone, Default)]
pub(crate) struct ResourceCache {
    slots: Arc<Mutex<HashMap<String, CacheSlot>>>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> CacheSlot {
        // Single-threaded wasm cannot realistically poison this mutex;
        // recover rather than panic into the render tree if it ever does.
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        *slots.entry(key.to_string()).or_insert_with(CacheSlot::new)
    }

    /// Serve `key` from cache, starting a fetch only when the slot is stale
    /// and idle. Concurrent callers within the dedupe window all observe the
    /// same slot and therefore the same resolved value.
    pub fn ensure(
        &self,
        key: &str,
        policy: CachePolicy,
        fetch: impl Fn() -> FetchFuture + 'static,
    ) -> CacheSlot {
        let slot = self.slot(key);
        if !should_fetch(
            now_ms(),
            slot.fetched_at_ms.get_untracked(),
            slot.is_loading.get_untracked(),
            policy.dedupe_ms,
        ) {
            return slot;
        }

        slot.is_loading.set(true);
        slot.error.set(None);

        let key = key.to_string();
        spawn_local(async move {
            let mut attempt: u32 = 0;
            loop {
                match fetch().await {
                    Ok(value) => {
                        slot.data.set(Some(value));
                        slot.error.set(None);
                        break;
                    }
                    Err(e) if attempt < policy.retry_count => {
                        attempt += 1;
                        leptos::logging::warn!("cache fetch retry {attempt} for {key}: {e}");
                    }
                    Err(e) => {
                        leptos::logging::warn!("cache fetch failed for {key}: {e}");
                        slot.error.set(Some(e.to_string()));
                        break;
                    }
                }
            }
            // A failed fetch also stamps the window, so a broken endpoint is
            // re-attempted once per window instead of on every render.
            slot.fetched_at_ms.set(now_ms());
            slot.is_loading.set(false);
        });

        slot
    }

    /// Force the next read of `key` to fetch, regardless of staleness.
    pub fn invalidate(&self, key: &str) {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = slots.get(key) {
            slot.fetched_at_ms.set(0);
        }
    }
}

/// What a cached-data hook hands to the view: the typed value plus
/// loading/error flags. A failed background refresh surfaces through
/// `error`; it never panics into the render tree.
pub(crate) struct CachedData<T: Send + Sync + 'static> {
    pub data: Signal<Option<T>>,
    pub is_loading: Signal<bool>,
    pub error: Signal<Option<String>>,
}

// Signals are Copy regardless of `T`; a derive would wrongly bound `T`.
impl<T: Send + Sync + 'static> Clone for CachedData<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for CachedData<T> {}

pub(crate) fn to_cache_value<T: Serialize>(value: T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(ApiError::parse)
}

/// Generic cached hook. `params` returning `None` (a required parameter is
/// absent) is a no-op: no request, `data` stays `None`.
pub(crate) fn use_cached<P, T>(
    cache: ResourceCache,
    params: impl Fn() -> Option<P> + 'static,
    key_of: impl Fn(&P) -> String + 'static,
    policy: CachePolicy,
    fetch: impl Fn(P) -> FetchFuture + 'static,
) -> CachedData<T>
where
    P: Clone + 'static,
    T: DeserializeOwned + Send + Sync + 'static,
{
    let raw: RwSignal<Option<serde_json::Value>> = RwSignal::new(None);
    let is_loading = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let fetch = Arc::new(fetch);

    Effect::new(move |_| match params() {
        None => {
            raw.set(None);
            is_loading.set(false);
            error.set(None);
        }
        Some(p) => {
            let key = key_of(&p);
            let fetch = Arc::clone(&fetch);
            let slot = cache.ensure(&key, policy, move || fetch(p.clone()));
            // Tracked reads: slot updates re-run this effect and retarget the
            // mirrors, including after a key change.
            raw.set(slot.data.get());
            is_loading.set(slot.is_loading.get());
            error.set(slot.error.get());
        }
    });

    CachedData {
        data: Signal::derive(move || {
            raw.get()
                .and_then(|v| serde_json::from_value(v).ok())
        }),
        is_loading: is_loading.into(),
        error: error.into(),
    }
}

// Cache keys. Deterministic strings; distinct parameter combinations must
// never collide.

pub(crate) fn channel_key(id: &str) -> String {
    format!("channel-{id}")
}

pub(crate) fn channel_summary_key(id: &str) -> String {
    format!("channel-summary-{id}")
}

pub(crate) fn sentiment_key(id: &str) -> String {
    format!("sentiment-{id}")
}

pub(crate) fn trends_key(id: &str, days: u32) -> String {
    format!("trends-{id}-{days}")
}

pub(crate) fn top_videos_key(id: &str, limit: u64) -> String {
    format!("top-videos-{id}-{limit}")
}

pub(crate) fn tags_key(id: &str) -> String {
    format!("tags-{id}")
}

pub(crate) fn community_stats_key(id: &str) -> String {
    format!("community-stats-{id}")
}

pub(crate) fn top_commenters_key(id: &str, limit: u64) -> String {
    format!("top-commenters-{id}-{limit}")
}

pub(crate) fn streaks_key(id: &str, limit: u64) -> String {
    format!("streaks-{id}-{limit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_key_is_not_refetched() {
        let policy = CachePolicy::long();
        // Resolved 10s ago, idle: still inside the 5 minute window.
        assert!(!should_fetch(100_000, 90_000, false, policy.dedupe_ms));
    }

    #[test]
    fn stale_key_is_refetched() {
        let policy = CachePolicy::short();
        assert!(should_fetch(200_000, 100_000, false, policy.dedupe_ms));
    }

    #[test]
    fn never_fetched_key_fetches() {
        assert!(should_fetch(5, 0, false, CachePolicy::short().dedupe_ms));
    }

    #[test]
    fn in_flight_key_is_never_refetched() {
        // Even a stale key must not start a second request while one is out.
        assert!(!should_fetch(10_000_000, 0, true, CachePolicy::short().dedupe_ms));
        assert!(!should_fetch(10_000_000, 1, true, CachePolicy::long().dedupe_ms));
    }

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(trends_key("UC123", 30), trends_key("UC123", 30));
        assert_eq!(channel_key("UC123"), "channel-UC123");
        assert_eq!(streaks_key("UC123", 20), "streaks-UC123-20");
    }

    #[test]
    fn distinct_params_get_distinct_keys() {
        assert_ne!(trends_key("UC123", 7), trends_key("UC123", 30));
        assert_ne!(trends_key("UC123", 30), trends_key("UC456", 30));
        assert_ne!(top_videos_key("UC123", 10), top_commenters_key("UC123", 10));
        assert_ne!(channel_key("UC123"), channel_summary_key("UC123"));
    }

    #[test]
    fn policies_match_documented_windows() {
        assert_eq!(CachePolicy::short().dedupe_ms, 60_000);
        assert_eq!(CachePolicy::long().dedupe_ms, 300_000);
        assert_eq!(CachePolicy::short().retry_count, 2);
        assert_eq!(CachePolicy::long().retry_count, 2);
    }
}
