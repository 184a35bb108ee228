//! Typed cached-data hooks, one per backend resource.
//!
//! Each hook keys the shared [`ResourceCache`](super::ResourceCache) by
//! resource + parameters, so the same data requested from different pages
//! (or twice from one page) resolves through a single request. A `None`
//! channel id means "not ready yet" and issues nothing.

use super::{
    channel_key, channel_summary_key, community_stats_key, sentiment_key, streaks_key, tags_key,
    to_cache_value, top_commenters_key, top_videos_key, trends_key, use_cached, CachePolicy,
    CachedData, FetchFuture,
};
use crate::models::{
    Channel, ChannelSummary, Commenter, CommunityStats, SentimentBreakdown, SentimentTrend,
    TopVideo,
};
use crate::state::AppContext;
use leptos::prelude::*;
use std::collections::HashMap;

pub(crate) fn use_channel(
    channel_id: impl Fn() -> Option<String> + 'static,
) -> CachedData<Channel> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        |id: &String| channel_key(id),
        CachePolicy::short(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_channel(&id).await.and_then(to_cache_value) })
        },
    )
}

pub(crate) fn use_channel_summary(
    channel_id: impl Fn() -> Option<String> + 'static,
) -> CachedData<ChannelSummary> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        |id: &String| channel_summary_key(id),
        CachePolicy::short(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_channel_summary(&id).await.and_then(to_cache_value) })
        },
    )
}

pub(crate) fn use_sentiment(
    channel_id: impl Fn() -> Option<String> + 'static,
) -> CachedData<SentimentBreakdown> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        |id: &String| sentiment_key(id),
        CachePolicy::long(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_sentiment(&id).await.and_then(to_cache_value) })
        },
    )
}

/// Sentiment trend over a selectable day window. Distinct windows are
/// distinct cache entries.
pub(crate) fn use_trends(
    channel_id: impl Fn() -> Option<String> + 'static,
    days: impl Fn() -> u32 + 'static,
) -> CachedData<Vec<SentimentTrend>> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        move || channel_id().map(|id| (id, days())),
        |(id, days): &(String, u32)| trends_key(id, *days),
        CachePolicy::long(),
        move |(id, days): (String, u32)| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_trends(&id, days).await.and_then(to_cache_value) })
        },
    )
}

pub(crate) fn use_top_videos(
    channel_id: impl Fn() -> Option<String> + 'static,
    limit: u64,
) -> CachedData<Vec<TopVideo>> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        move |id: &String| top_videos_key(id, limit),
        CachePolicy::long(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_top_videos(&id, limit).await.and_then(to_cache_value) })
        },
    )
}

pub(crate) fn use_tag_counts(
    channel_id: impl Fn() -> Option<String> + 'static,
) -> CachedData<HashMap<String, u64>> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        |id: &String| tags_key(id),
        CachePolicy::long(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_tag_counts(&id).await.and_then(to_cache_value) })
        },
    )
}

pub(crate) fn use_community_stats(
    channel_id: impl Fn() -> Option<String> + 'static,
) -> CachedData<CommunityStats> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        |id: &String| community_stats_key(id),
        CachePolicy::long(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_community_stats(&id).await.and_then(to_cache_value) })
        },
    )
}

pub(crate) fn use_top_commenters(
    channel_id: impl Fn() -> Option<String> + 'static,
    limit: u64,
) -> CachedData<Vec<Commenter>> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        move |id: &String| top_commenters_key(id, limit),
        CachePolicy::long(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move {
                api.get_top_commenters(&id, limit).await.and_then(to_cache_value)
            })
        },
    )
}

pub(crate) fn use_streaks(
    channel_id: impl Fn() -> Option<String> + 'static,
    limit: u64,
) -> CachedData<Vec<Commenter>> {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    use_cached(
        app_state.0.cache.clone(),
        channel_id,
        move |id: &String| streaks_key(id, limit),
        CachePolicy::long(),
        move |id: String| -> FetchFuture {
            let api = api.get_untracked();
            Box::pin(async move { api.get_streaks(&id, limit).await.and_then(to_cache_value) })
        },
    )
}
