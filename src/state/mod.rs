pub(crate) mod sync_stream;

use crate::api::ApiClient;
use crate::cache::ResourceCache;
use crate::models::{AccountInfo, Channel};
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

/// Whether `load_channels` should hit the network.
///
/// Loaded-and-unforced serves the cache; an in-flight load is never
/// duplicated, forced or not (best-effort single-flight — concurrent callers
/// observe the shared signal when the in-flight load lands).
pub(crate) fn should_start_load(has_loaded: bool, is_loading: bool, force: bool) -> bool {
    (!has_loaded || force) && !is_loading
}

/// Process-wide channel list: the single source of truth every page and the
/// sidebar read from. All mutation funnels through the three operations
/// below; no component holds a private copy.
#[derive(Clone, Copy)]
pub(crate) struct ChannelsStore {
    api_client: RwSignal<ApiClient>,
    pub channels: RwSignal<Vec<Channel>>,
    pub is_loading: RwSignal<bool>,
    has_loaded: RwSignal<bool>,
}

impl ChannelsStore {
    fn new(api_client: RwSignal<ApiClient>) -> Self {
        Self {
            api_client,
            channels: RwSignal::new(vec![]),
            is_loading: RwSignal::new(false),
            has_loaded: RwSignal::new(false),
        }
    }

    /// Returns the cached list when possible; otherwise fetches. A network
    /// failure logs and resolves to an empty list without touching whatever
    /// is already cached.
    pub async fn load_channels(&self, force: bool) -> Vec<Channel> {
        if !should_start_load(
            self.has_loaded.get_untracked(),
            self.is_loading.get_untracked(),
            force,
        ) {
            return self.channels.get_untracked();
        }

        self.is_loading.set(true);
        let api = self.api_client.get_untracked();
        let result = api.list_channels().await;
        self.is_loading.set(false);

        match result {
            Ok(list) => {
                self.channels.set(list.clone());
                self.has_loaded.set(true);
                list
            }
            Err(e) => {
                leptos::logging::warn!("failed to load channels: {e}");
                vec![]
            }
        }
    }

    /// Optimistic append after a successful add-channel call; no re-fetch.
    pub fn add_channel(&self, channel: Channel) {
        self.channels.update(|list| list.push(channel));
    }

    /// Optimistic removal after a successful delete call.
    pub fn remove_channel(&self, channel_id: &str) {
        self.channels
            .update(|list| retain_without(list, channel_id));
    }
}

fn retain_without(list: &mut Vec<Channel>, channel_id: &str) {
    list.retain(|c| c.channel_id != channel_id);
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<AccountInfo>>,
    pub channels: ChannelsStore,
    pub cache: ResourceCache,
}

impl AppState {
    pub fn new() -> Self {
        let api_client = RwSignal::new(ApiClient::load_from_storage());
        Self {
            api_client,
            current_user: RwSignal::new(load_user_from_storage()),
            channels: ChannelsStore::new(api_client),
            cache: ResourceCache::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SyncStatus;

    fn channel(id: &str) -> Channel {
        Channel {
            channel_id: id.to_string(),
            name: format!("channel {id}"),
            description: None,
            thumbnail_url: None,
            subscriber_count: None,
            video_count: None,
            created_at: String::new(),
            last_synced: None,
            sync_status: SyncStatus::Pending,
            total_comments: 0,
            total_videos_analyzed: 0,
        }
    }

    #[test]
    fn loaded_unforced_serves_cache() {
        assert!(!should_start_load(true, false, false));
    }

    #[test]
    fn unloaded_list_loads() {
        assert!(should_start_load(false, false, false));
    }

    #[test]
    fn force_reload_bypasses_cache() {
        assert!(should_start_load(true, false, true));
    }

    #[test]
    fn in_flight_load_is_never_duplicated() {
        assert!(!should_start_load(false, true, false));
        assert!(!should_start_load(true, true, true));
    }

    #[test]
    fn remove_filters_by_channel_id() {
        let mut list = vec![channel("UC1"), channel("UC2"), channel("UC3")];
        retain_without(&mut list, "UC2");
        assert_eq!(
            list.iter().map(|c| c.channel_id.as_str()).collect::<Vec<_>>(),
            vec!["UC1", "UC3"]
        );

        // Removing an unknown id is a no-op.
        retain_without(&mut list, "UC9");
        assert_eq!(list.len(), 2);
    }
}
