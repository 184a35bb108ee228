use crate::models::{
    AccountInfo, Channel, ChannelSummary, ChatMessage, Comment, Commenter, CommunityStats,
    Paginated, Report, SentimentBreakdown, SentimentTrend, SubscriptionStatus, SyncLogEntry,
    SyncStatusResponse, Tag, TopVideo, Video,
};
use crate::storage::session_token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    /// Map a non-2xx response to a typed failure. The body is parsed as JSON,
    /// tolerating a parse failure by substituting an empty object, and the
    /// backend-provided `detail` message wins over the generic form.
    fn from_status(status: u16, body: &str) -> Self {
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Http
        };
        Self {
            kind,
            message: error_message_from_body(status, body),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

fn error_message_from_body(status: u16, body: &str) -> String {
    let parsed: serde_json::Value =
        serde_json::from_str(body).unwrap_or_else(|_| serde_json::json!({}));
    parsed
        .get("detail")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("API Error: {status}"))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    #[serde(default)]
    pub google_client_id: Option<String>,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self {
            api_url: "http://localhost:8000".to_string(),
            google_client_id: None,
        };

        // Deployments inject `window.ENV` into index.html; fall back to the
        // local backend for development.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            config.api_url = url_str;
                        }
                    }
                    if let Ok(client_id) = js_sys::Reflect::get(&env, &"GOOGLE_CLIENT_ID".into()) {
                        if let Some(id) = client_id.as_string() {
                            config.google_client_id = Some(id);
                        }
                    }
                }
            }
        }

        config
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// All backend routes live under `/api`; accept configured bases with or
/// without the suffix.
fn with_api_suffix(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/api") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/api")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AddChannelRequest {
    pub channel_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct GoogleAuthRequest {
    pub access_token: String,
    pub user: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct GoogleAuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<AccountInfo>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CreateReportRequest {
    pub channel_id: String,
    pub date_from: String,
    pub date_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CheckoutResponse {
    pub checkout_url: String,
}

/// Filter set for the channel comment browser. Only set fields appear in the
/// query string, in a fixed order, so equal filters produce equal URLs.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CommentFilter {
    pub sentiment: Option<String>,
    pub tags: Option<String>,
    pub video_id: Option<String>,
    pub is_bookmarked: Option<bool>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl CommentFilter {
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(v) = &self.sentiment {
            parts.push(format!("sentiment={v}"));
        }
        if let Some(v) = &self.tags {
            parts.push(format!("tags={}", urlencoding::encode(v)));
        }
        if let Some(v) = &self.video_id {
            parts.push(format!("video_id={v}"));
        }
        if let Some(v) = self.is_bookmarked {
            parts.push(format!("is_bookmarked={v}"));
        }
        if let Some(v) = &self.date_from {
            parts.push(format!("date_from={v}"));
        }
        if let Some(v) = &self.date_to {
            parts.push(format!("date_to={v}"));
        }
        if let Some(v) = &self.search {
            parts.push(format!("search={}", urlencoding::encode(v)));
        }
        if let Some(v) = self.page {
            parts.push(format!("page={v}"));
        }
        if let Some(v) = self.limit {
            parts.push(format!("limit={v}"));
        }
        parts.join("&")
    }
}

/// Profile lookup against the provider. The backend verifies the token
/// itself but wants the basic profile fields alongside it.
pub(crate) async fn fetch_google_userinfo(access_token: &str) -> ApiResult<serde_json::Value> {
    let client = reqwest::Client::new();
    let res = client
        .get("https://www.googleapis.com/oauth2/v3/userinfo")
        .header("Authorization", format!("Bearer {access_token}"))
        .send()
        .await
        .map_err(ApiError::network)?;

    let status = res.status();
    if status.is_success() {
        res.json().await.map_err(ApiError::parse)
    } else {
        let body = res.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}

/// Shape the provider's userinfo claims (`sub`/`picture`) into the profile
/// object the backend expects (`id`/`image`).
pub(crate) fn provider_user_payload(userinfo: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": userinfo.get("sub").and_then(|v| v.as_str()),
        "email": userinfo.get("email").and_then(|v| v.as_str()),
        "name": userinfo.get("name").and_then(|v| v.as_str()),
        "image": userinfo.get("picture").and_then(|v| v.as_str()),
    })
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: with_api_suffix(&base_url),
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        Self {
            base_url: with_api_suffix(&EnvConfig::new().api_url),
            token: session_token(),
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn logout(&mut self) {
        self.token = None;
        crate::storage::clear_session();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Token used for the Authorization header. Prefers the in-memory token
    /// and falls back to session storage; either lookup failing just means
    /// the request goes out unauthenticated.
    fn bearer_token(&self) -> Option<String> {
        self.token.clone().or_else(session_token)
    }

    async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);

        let mut req = client
            .request(method, url)
            .header("Content-Type", "application/json");
        if let Some(token) = self.bearer_token() {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        // Cookies ride along for session continuity with the auth provider.
        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }
        if let Some(b) = body {
            req = req.json(&b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();

        if status.is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::from_status(status.as_u16(), &body))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.dispatch(reqwest::Method::GET, path, None).await
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let value = serde_json::to_value(body).map_err(ApiError::parse)?;
        self.dispatch(method, path, Some(value)).await
    }

    async fn send_empty<T: serde::de::DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> ApiResult<T> {
        self.dispatch(method, path, None).await
    }

    // Auth

    pub async fn auth_google(
        &self,
        access_token: &str,
        user: serde_json::Value,
    ) -> ApiResult<GoogleAuthResponse> {
        self.send_json(
            reqwest::Method::POST,
            "/auth/google",
            &GoogleAuthRequest {
                access_token: access_token.to_string(),
                user,
            },
        )
        .await
    }

    // Channels

    pub async fn list_channels(&self) -> ApiResult<Vec<Channel>> {
        self.get_json("/channels").await
    }

    pub async fn get_channel(&self, channel_id: &str) -> ApiResult<Channel> {
        self.get_json(&format!("/channels/{channel_id}")).await
    }

    pub async fn add_channel(&self, channel_url: &str) -> ApiResult<Channel> {
        self.send_json(
            reqwest::Method::POST,
            "/channels",
            &AddChannelRequest {
                channel_url: channel_url.to_string(),
            },
        )
        .await
    }

    pub async fn delete_channel(&self, channel_id: &str) -> ApiResult<MessageResponse> {
        self.send_empty(reqwest::Method::DELETE, &format!("/channels/{channel_id}"))
            .await
    }

    pub async fn start_sync(
        &self,
        channel_id: &str,
        days_back: u32,
        max_videos: u32,
    ) -> ApiResult<MessageResponse> {
        self.send_empty(
            reqwest::Method::POST,
            &format!("/channels/{channel_id}/sync?days_back={days_back}&max_videos={max_videos}"),
        )
        .await
    }

    pub async fn get_sync_status(&self, channel_id: &str) -> ApiResult<SyncStatusResponse> {
        self.get_json(&format!("/channels/{channel_id}/sync-status"))
            .await
    }

    pub async fn get_sync_logs(&self, channel_id: &str) -> ApiResult<Vec<SyncLogEntry>> {
        self.get_json(&format!("/channels/{channel_id}/logs")).await
    }

    /// URL for the one-way sync log stream, consumed by `EventSource` (which
    /// cannot carry an Authorization header; the cookie session covers it).
    pub fn sync_log_stream_url(&self, channel_id: &str) -> String {
        format!("{}/channels/{channel_id}/logs/stream", self.base_url)
    }

    // Videos

    pub async fn list_channel_videos(
        &self,
        channel_id: &str,
        limit: u64,
        skip: u64,
    ) -> ApiResult<Vec<Video>> {
        self.get_json(&format!(
            "/videos/channel/{channel_id}?limit={limit}&skip={skip}"
        ))
        .await
    }

    // Analytics

    pub async fn get_channel_summary(&self, channel_id: &str) -> ApiResult<ChannelSummary> {
        self.get_json(&format!("/analytics/channel/{channel_id}/summary"))
            .await
    }

    pub async fn get_sentiment(&self, channel_id: &str) -> ApiResult<SentimentBreakdown> {
        self.get_json(&format!("/analytics/channel/{channel_id}/sentiment"))
            .await
    }

    pub async fn get_tag_counts(&self, channel_id: &str) -> ApiResult<HashMap<String, u64>> {
        self.get_json(&format!("/analytics/channel/{channel_id}/tags"))
            .await
    }

    pub async fn get_trends(&self, channel_id: &str, days: u32) -> ApiResult<Vec<SentimentTrend>> {
        self.get_json(&format!(
            "/analytics/channel/{channel_id}/trends?days={days}"
        ))
        .await
    }

    pub async fn get_top_videos(&self, channel_id: &str, limit: u64) -> ApiResult<Vec<TopVideo>> {
        self.get_json(&format!(
            "/analytics/channel/{channel_id}/top-videos?limit={limit}"
        ))
        .await
    }

    // Comments

    pub async fn list_channel_comments(
        &self,
        channel_id: &str,
        filter: &CommentFilter,
    ) -> ApiResult<Paginated<Comment>> {
        let qs = filter.to_query_string();
        let path = if qs.is_empty() {
            format!("/comments/channel/{channel_id}")
        } else {
            format!("/comments/channel/{channel_id}?{qs}")
        };
        self.get_json(&path).await
    }

    pub async fn toggle_bookmark(
        &self,
        comment_id: &str,
        is_bookmarked: bool,
    ) -> ApiResult<MessageResponse> {
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/comments/{comment_id}/bookmark"),
            &serde_json::json!({ "is_bookmarked": is_bookmarked }),
        )
        .await
    }

    pub async fn update_comment_tags(
        &self,
        comment_id: &str,
        tags: &[String],
    ) -> ApiResult<MessageResponse> {
        self.send_json(
            reqwest::Method::PATCH,
            &format!("/comments/{comment_id}/tags"),
            &serde_json::json!({ "tags": tags }),
        )
        .await
    }

    // Community

    pub async fn get_community_stats(&self, channel_id: &str) -> ApiResult<CommunityStats> {
        self.get_json(&format!("/community/channel/{channel_id}/stats"))
            .await
    }

    pub async fn get_top_commenters(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> ApiResult<Vec<Commenter>> {
        self.get_json(&format!(
            "/community/channel/{channel_id}/top-commenters?limit={limit}"
        ))
        .await
    }

    pub async fn get_streaks(&self, channel_id: &str, limit: u64) -> ApiResult<Vec<Commenter>> {
        self.get_json(&format!(
            "/community/channel/{channel_id}/streaks?limit={limit}"
        ))
        .await
    }

    // Tags

    pub async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        self.get_json("/tags").await
    }

    // Reports

    pub async fn list_reports(&self, channel_id: &str) -> ApiResult<Vec<Report>> {
        self.get_json(&format!("/reports/channel/{channel_id}"))
            .await
    }

    pub async fn create_report(&self, req: &CreateReportRequest) -> ApiResult<Report> {
        self.send_json(reqwest::Method::POST, "/reports", req).await
    }

    pub async fn delete_report(&self, report_id: &str) -> ApiResult<MessageResponse> {
        self.send_empty(reqwest::Method::DELETE, &format!("/reports/{report_id}"))
            .await
    }

    pub fn report_download_url(&self, report_id: &str) -> String {
        format!("{}/reports/{report_id}/download", self.base_url)
    }

    // Chat

    pub async fn send_chat(&self, channel_id: &str, message: &str) -> ApiResult<ChatResponse> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/chat/channel/{channel_id}"),
            &serde_json::json!({ "message": message }),
        )
        .await
    }

    pub async fn get_chat_history(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> ApiResult<Vec<ChatMessage>> {
        self.get_json(&format!("/chat/channel/{channel_id}/history?limit={limit}"))
            .await
    }

    pub async fn clear_chat_history(&self, channel_id: &str) -> ApiResult<MessageResponse> {
        self.send_empty(
            reqwest::Method::DELETE,
            &format!("/chat/channel/{channel_id}/history"),
        )
        .await
    }

    // Subscription

    pub async fn get_subscription_status(&self) -> ApiResult<SubscriptionStatus> {
        self.get_json("/webhooks/subscription/status").await
    }

    pub async fn create_checkout(&self) -> ApiResult<CheckoutResponse> {
        self.send_empty(reqwest::Method::POST, "/webhooks/checkout/create")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_backend_detail() {
        let msg = error_message_from_body(404, r#"{"detail": "Channel not found"}"#);
        assert_eq!(msg, "Channel not found");
    }

    #[test]
    fn error_message_falls_back_on_unparseable_body() {
        let msg = error_message_from_body(500, "<html>Internal Server Error</html>");
        assert_eq!(msg, "API Error: 500");
    }

    #[test]
    fn error_message_falls_back_on_missing_detail() {
        let msg = error_message_from_body(422, r#"{"errors": ["bad input"]}"#);
        assert_eq!(msg, "API Error: 422");
    }

    #[test]
    fn error_kind_distinguishes_unauthorized() {
        let e = ApiError::from_status(401, r#"{"detail": "Not authenticated"}"#);
        assert_eq!(e.kind, ApiErrorKind::Unauthorized);
        assert_eq!(e.message, "Not authenticated");

        let e = ApiError::from_status(404, "{}");
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.message, "API Error: 404");
    }

    #[test]
    fn api_suffix_is_appended_once() {
        assert_eq!(with_api_suffix("http://localhost:8000"), "http://localhost:8000/api");
        assert_eq!(with_api_suffix("http://localhost:8000/"), "http://localhost:8000/api");
        assert_eq!(
            with_api_suffix("https://api.creatorpulse.dev/api"),
            "https://api.creatorpulse.dev/api"
        );
    }

    #[test]
    fn comment_filter_query_is_deterministic() {
        let f = CommentFilter {
            sentiment: Some("positive".to_string()),
            is_bookmarked: Some(true),
            search: Some("love this".to_string()),
            page: Some(2),
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(
            f.to_query_string(),
            "sentiment=positive&is_bookmarked=true&search=love%20this&page=2&limit=50"
        );
    }

    #[test]
    fn comment_filter_empty_is_empty_string() {
        assert_eq!(CommentFilter::default().to_query_string(), "");
    }

    #[test]
    fn add_channel_request_serializes_channel_url() {
        let req = AddChannelRequest {
            channel_url: "https://youtube.com/@creator".to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["channel_url"], "https://youtube.com/@creator");
    }

    #[test]
    fn create_report_request_omits_missing_title() {
        let req = CreateReportRequest {
            channel_id: "UC123".to_string(),
            date_from: "2025-10-01".to_string(),
            date_to: "2025-10-31".to_string(),
            title: None,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert!(v.get("title").is_none());
    }

    #[test]
    fn provider_claims_map_to_backend_profile() {
        let userinfo = serde_json::json!({
            "sub": "108",
            "email": "creator@example.com",
            "name": "Creator",
            "picture": "https://example.com/p.jpg",
            "email_verified": true
        });
        let payload = provider_user_payload(&userinfo);
        assert_eq!(payload["id"], "108");
        assert_eq!(payload["email"], "creator@example.com");
        assert_eq!(payload["image"], "https://example.com/p.jpg");
        assert!(payload.get("picture").is_none());
    }

    #[test]
    fn provider_payload_tolerates_missing_claims() {
        let payload = provider_user_payload(&serde_json::json!({}));
        assert!(payload["email"].is_null());
        assert!(payload["id"].is_null());
    }

    #[test]
    fn client_token_plumbing() {
        let mut c = ApiClient::new("http://localhost:8000".to_string());
        assert!(!c.is_authenticated());
        c.set_token("jwt".to_string());
        assert!(c.is_authenticated());
        assert_eq!(c.base_url, "http://localhost:8000/api");
    }
}
