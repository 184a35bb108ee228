use serde::{Deserialize, Serialize};

/// Backend account info object.
///
/// The backend returns this from the auth exchange. We keep it flexible to
/// avoid breaking when backend fields evolve.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AccountInfo {
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SyncStatus {
    Pending,
    Syncing,
    Completed,
    Error,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Channel {
    pub channel_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub video_count: Option<u64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_synced: Option<String>,
    #[serde(default)]
    pub sync_status: SyncStatus,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_videos_analyzed: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SyncStatusResponse {
    pub channel_id: String,
    pub sync_status: SyncStatus,
    #[serde(default)]
    pub last_synced: Option<String>,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_videos_analyzed: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Video {
    pub video_id: String,
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub analyzed_comment_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Comment {
    pub comment_id: String,
    pub video_id: String,
    pub channel_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_channel_id: String,
    #[serde(default)]
    pub author_profile_image: Option<String>,
    pub text: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub reply_count: u64,
    pub published_at: String,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_bookmarked: bool,
    #[serde(default)]
    pub is_reply: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Commenter {
    pub author_channel_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_profile_image: Option<String>,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub total_likes_received: u64,
    #[serde(default)]
    pub videos_count: u64,
    #[serde(default)]
    pub streak_days: u64,
    #[serde(default)]
    pub first_comment_at: Option<String>,
    #[serde(default)]
    pub last_comment_at: Option<String>,
    #[serde(default)]
    pub is_repeat: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CommunityStats {
    #[serde(default)]
    pub total_commenters: u64,
    #[serde(default)]
    pub unique_commenters: u64,
    #[serde(default)]
    pub repeat_commenters: u64,
    #[serde(default)]
    pub repeat_percentage: f64,
    #[serde(default)]
    pub avg_comments_per_user: f64,
    #[serde(default)]
    pub top_commenters: Vec<Commenter>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub(crate) struct SentimentCounts {
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub(crate) struct SentimentShares {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub negative: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct SentimentBreakdown {
    #[serde(default)]
    pub breakdown: SentimentCounts,
    #[serde(default)]
    pub percentages: SentimentShares,
    #[serde(default)]
    pub total: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Tag {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub usage_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ReportStatus {
    Generating,
    Completed,
    Error,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Report {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    pub channel_id: String,
    pub title: String,
    pub date_from: String,
    pub date_to: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    pub status: ReportStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ChatMessage {
    pub user_message: String,
    pub ai_response: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct ChannelSummary {
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub unique_commenters: u64,
    #[serde(default)]
    pub bookmarked_comments: u64,
    #[serde(default)]
    pub sentiment: SentimentBreakdown,
    #[serde(default)]
    pub recent_comments_7d: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct TopVideo {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub positive_count: u64,
    #[serde(default)]
    pub negative_count: u64,
    #[serde(default)]
    pub sentiment_ratio: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SentimentTrend {
    pub date: String,
    #[serde(default)]
    pub positive: u64,
    #[serde(default)]
    pub neutral: u64,
    #[serde(default)]
    pub negative: u64,
    #[serde(default)]
    pub total: u64,
}

/// Severity of a sync log line. Unknown levels from the wire fold into
/// `Info` rather than failing the whole event.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LogLevel {
    Success,
    Warning,
    Error,
    #[serde(other)]
    Info,
}

/// One line of the backend-durable channel sync log. The same shape arrives
/// over the live stream and from the one-shot history endpoint (which adds
/// a Mongo `_id` we carry but never rely on).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SyncLogEntry {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    pub message: String,
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
    #[serde(default)]
    pub created_at: String,
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SubscriptionStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub max_channels: u64,
    #[serde(default)]
    pub authenticated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_contract_deserialize() {
        // Contract based on backend channels route: a freshly added channel.
        let json = r#"{
            "channel_id": "UC123",
            "name": "Creator",
            "thumbnail_url": "https://example.com/t.jpg",
            "subscriber_count": 15320,
            "video_count": 204,
            "created_at": "2025-11-01T10:00:00Z",
            "last_synced": null,
            "sync_status": "pending",
            "total_comments": 0,
            "total_videos_analyzed": 0
        }"#;
        let c: Channel = serde_json::from_str(json).expect("channel should parse");
        assert_eq!(c.channel_id, "UC123");
        assert_eq!(c.sync_status, SyncStatus::Pending);
        assert!(c.last_synced.is_none());
    }

    #[test]
    fn sync_status_roundtrip() {
        for (s, v) in [
            ("\"pending\"", SyncStatus::Pending),
            ("\"syncing\"", SyncStatus::Syncing),
            ("\"completed\"", SyncStatus::Completed),
            ("\"error\"", SyncStatus::Error),
        ] {
            let parsed: SyncStatus = serde_json::from_str(s).expect("status should parse");
            assert_eq!(parsed, v);
            assert_eq!(serde_json::to_string(&v).unwrap(), s);
        }
    }

    #[test]
    fn log_entry_contract_deserialize() {
        let json = r#"{"message": "Fetched 50 videos", "level": "info", "created_at": "2025-11-03T14:22:08Z"}"#;
        let e: SyncLogEntry = serde_json::from_str(json).expect("log entry should parse");
        assert_eq!(e.message, "Fetched 50 videos");
        assert_eq!(e.level, LogLevel::Info);
        assert!(e.id.is_none());
    }

    #[test]
    fn log_entry_unknown_level_folds_to_info() {
        let json = r#"{"message": "x", "level": "debug", "created_at": ""}"#;
        let e: SyncLogEntry = serde_json::from_str(json).expect("unknown level must not fail");
        assert_eq!(e.level, LogLevel::Info);
    }

    #[test]
    fn log_entry_missing_level_defaults_to_info() {
        let json = r#"{"message": "x"}"#;
        let e: SyncLogEntry = serde_json::from_str(json).expect("missing level must not fail");
        assert_eq!(e.level, LogLevel::Info);
        assert_eq!(e.created_at, "");
    }

    #[test]
    fn sentiment_breakdown_contract_deserialize() {
        let json = r#"{
            "breakdown": {"positive": 120, "neutral": 60, "negative": 20},
            "percentages": {"positive": 60.0, "neutral": 30.0, "negative": 10.0},
            "total": 200
        }"#;
        let b: SentimentBreakdown = serde_json::from_str(json).expect("breakdown should parse");
        assert_eq!(b.breakdown.positive, 120);
        assert_eq!(b.total, 200);
    }

    #[test]
    fn paginated_comments_contract_deserialize() {
        let json = r#"{
            "items": [{
                "comment_id": "c1",
                "video_id": "v1",
                "channel_id": "UC123",
                "author_name": "viewer",
                "text": "great video",
                "published_at": "2025-11-02T09:00:00Z",
                "sentiment": "positive",
                "tags": ["question"],
                "is_bookmarked": false
            }],
            "total": 1, "page": 1, "limit": 50, "pages": 1
        }"#;
        let p: Paginated<Comment> = serde_json::from_str(json).expect("page should parse");
        assert_eq!(p.items.len(), 1);
        assert_eq!(p.items[0].sentiment, Some(Sentiment::Positive));
        assert_eq!(p.items[0].tags, vec!["question".to_string()]);
    }

    #[test]
    fn status_display_is_lowercase() {
        assert_eq!(SyncStatus::Syncing.to_string(), "syncing");
        assert_eq!(LogLevel::Warning.to_string(), "warning");
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }
}
