use crate::cache::{channel_key, channel_summary_key};
use crate::models::{LogLevel, SyncLogEntry};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, EventSourceInit, MessageEvent};

/// The stream is closed if neither `open` nor a first message arrives in
/// this window. There is no automatic reconnect; a retry means the user
/// re-invokes the sync action.
const CONNECT_TIMEOUT_MS: i32 = 15_000;

/// Substrings that mark the backend sync job as finished. Matched against
/// the message text in addition to the `success` level.
const COMPLETION_MARKERS: &[&str] = &["Sync completed", "Sync complete"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StreamPhase {
    /// No channel attached yet.
    Idle,
    /// EventSource created, nothing received.
    Connecting,
    /// Messages arriving.
    Streaming,
    /// Dismissed, torn down, or transport error. Buffer stays frozen.
    Closed,
}

/// One rendered log line. `row_id` is a locally generated list-rendering
/// key, never an identity — it is not used to dedupe against history rows.
#[derive(Clone, Debug)]
pub(crate) struct LogRow {
    pub row_id: u64,
    pub entry: SyncLogEntry,
}

pub(crate) fn parse_stream_event(raw: &str) -> Option<SyncLogEntry> {
    serde_json::from_str(raw).ok()
}

pub(crate) fn is_completion_event(entry: &SyncLogEntry) -> bool {
    entry.level == LogLevel::Success
        || COMPLETION_MARKERS.iter().any(|m| entry.message.contains(m))
}

/// A stream session triggers at most one forced channel-list refresh, even
/// when several completion-style lines arrive.
pub(crate) fn should_trigger_refresh(entry: &SyncLogEntry, already_latched: bool) -> bool {
    !already_latched && is_completion_event(entry)
}

/// Events mutate the buffer only while the stream is live.
pub(crate) fn accepts_events(phase: StreamPhase) -> bool {
    matches!(phase, StreamPhase::Connecting | StreamPhase::Streaming)
}

pub(crate) fn prepend_entry(rows: &mut Vec<LogRow>, row_id: u64, entry: SyncLogEntry) {
    rows.insert(0, LogRow { row_id, entry });
}

/// Live progress feed for a backend channel-sync job.
///
/// One instance per sync dialog session. `open` seeds the buffer with the
/// durable history, then attaches an `EventSource`; `close` is idempotent
/// and must run on every exit path — the consuming dialog ties it to
/// `on_cleanup` so teardown can never leak the connection.
#[derive(Clone)]
pub(crate) struct SyncLogStream {
    app_state: AppContext,
    pub phase: RwSignal<StreamPhase>,
    /// Newest-first.
    pub entries: RwSignal<Vec<LogRow>>,
    channel_id: RwSignal<Option<String>>,
    completion_latched: RwSignal<bool>,
    next_row_id: RwSignal<u64>,
    connect_timer: RwSignal<Option<i32>>,

    // EventSource and its callbacks are thread-bound JS values.
    source: StoredValue<Option<EventSource>, LocalStorage>,
    handlers: StoredValue<Option<StreamHandlers>, LocalStorage>,
}

struct StreamHandlers {
    _on_open: Closure<dyn FnMut(web_sys::Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl SyncLogStream {
    pub fn new(app_state: AppContext) -> Self {
        Self {
            app_state,
            phase: RwSignal::new(StreamPhase::Idle),
            entries: RwSignal::new(vec![]),
            channel_id: RwSignal::new(None),
            completion_latched: RwSignal::new(false),
            next_row_id: RwSignal::new(0),
            connect_timer: RwSignal::new(None),
            source: StoredValue::new_local(None),
            handlers: StoredValue::new_local(None),
        }
    }

    /// Start a fresh stream session for `channel_id`. Any previous session
    /// is closed first; the buffer resets.
    pub fn open(&self, channel_id: String) {
        self.close();

        self.channel_id.set(Some(channel_id.clone()));
        self.entries.set(vec![]);
        self.completion_latched.set(false);
        self.phase.set(StreamPhase::Connecting);

        // One-shot history replay. Best effort: a failure only costs the
        // backlog, not the live feed.
        let s = self.clone();
        let api = self.app_state.0.api_client.get_untracked();
        let seed_id = channel_id.clone();
        spawn_local(async move {
            match api.get_sync_logs(&seed_id).await {
                Ok(history) => s.seed_history(&seed_id, history),
                Err(e) => leptos::logging::warn!("sync log history unavailable: {e}"),
            }
        });

        let url = self
            .app_state
            .0
            .api_client
            .get_untracked()
            .sync_log_stream_url(&channel_id);
        // EventSource cannot carry an Authorization header; the cookie
        // session authenticates the stream.
        let init = EventSourceInit::new();
        init.set_with_credentials(true);
        let es = match EventSource::new_with_event_source_init_dict(&url, &init) {
            Ok(es) => es,
            Err(_) => {
                leptos::logging::error!("failed to open sync log stream for {channel_id}");
                self.phase.set(StreamPhase::Closed);
                return;
            }
        };

        let s = self.clone();
        let on_open = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            s.clear_connect_timer();
            if s.phase.get_untracked() == StreamPhase::Connecting {
                s.phase.set(StreamPhase::Streaming);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        let s = self.clone();
        let on_message = Closure::wrap(Box::new(move |ev: MessageEvent| {
            if !accepts_events(s.phase.get_untracked()) {
                return;
            }
            s.clear_connect_timer();
            if s.phase.get_untracked() != StreamPhase::Streaming {
                s.phase.set(StreamPhase::Streaming);
            }

            let Some(raw) = ev.data().as_string() else {
                return;
            };
            match parse_stream_event(&raw) {
                Some(entry) => s.push_live_entry(entry),
                None => leptos::logging::warn!("dropping unparseable sync log event: {raw}"),
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        let s = self.clone();
        let on_error = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            // No auto-reconnect; the buffer stays for inspection. The
            // handlers are dropped later by `close` (never from inside
            // their own invocation).
            s.clear_connect_timer();
            s.detach_source();
            s.phase.set(StreamPhase::Closed);
        }) as Box<dyn FnMut(web_sys::Event)>);

        es.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        es.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        es.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        self.source.set_value(Some(es));
        self.handlers.set_value(Some(StreamHandlers {
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
        }));

        self.start_connect_timer();
    }

    /// Idempotent teardown: detach and close the EventSource, stop the
    /// connect timer, release the callbacks.
    pub fn close(&self) {
        self.clear_connect_timer();
        self.detach_source();
        self.handlers.set_value(None);
        if self.phase.get_untracked() != StreamPhase::Idle {
            self.phase.set(StreamPhase::Closed);
        }
    }

    fn detach_source(&self) {
        if let Some(es) = self.source.with_value(|s| s.clone()) {
            es.set_onopen(None);
            es.set_onmessage(None);
            es.set_onerror(None);
            es.close();
        }
        self.source.set_value(None);
    }

    /// History rows arrive oldest-first from the backend; the buffer is
    /// newest-first, with any already-received live rows staying on top.
    fn seed_history(&self, channel_id: &str, history: Vec<SyncLogEntry>) {
        if self.channel_id.get_untracked().as_deref() != Some(channel_id) {
            return;
        }
        if !accepts_events(self.phase.get_untracked()) {
            return;
        }

        let rows: Vec<LogRow> = history
            .into_iter()
            .rev()
            .map(|entry| LogRow {
                row_id: self.take_row_id(),
                entry,
            })
            .collect();
        self.entries.update(|buf| buf.extend(rows));
    }

    fn push_live_entry(&self, entry: SyncLogEntry) {
        let row_id = self.take_row_id();
        self.entries
            .update(|rows| prepend_entry(rows, row_id, entry.clone()));

        if should_trigger_refresh(&entry, self.completion_latched.get_untracked()) {
            self.completion_latched.set(true);

            // Dependent views must see post-sync counts without a manual
            // reload: force the channel list and drop the channel-scoped
            // cache entries.
            if let Some(id) = self.channel_id.get_untracked() {
                self.app_state.0.cache.invalidate(&channel_key(&id));
                self.app_state.0.cache.invalidate(&channel_summary_key(&id));
            }
            let store = self.app_state.0.channels;
            spawn_local(async move {
                let _ = store.load_channels(true).await;
            });
        }
    }

    fn take_row_id(&self) -> u64 {
        let id = self.next_row_id.get_untracked() + 1;
        self.next_row_id.set(id);
        id
    }

    fn start_connect_timer(&self) {
        let Some(win) = web_sys::window() else {
            return;
        };

        let s = self.clone();
        let cb = Closure::once_into_js(move || {
            if s.phase.get_untracked() == StreamPhase::Connecting {
                leptos::logging::warn!("sync log stream connect timeout");
                s.push_local_notice("Log stream connection timed out");
                s.detach_source();
                s.phase.set(StreamPhase::Closed);
            }
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                CONNECT_TIMEOUT_MS,
            )
            .unwrap_or(0);
        self.connect_timer.set(Some(tid));
    }

    fn clear_connect_timer(&self) {
        if let Some(tid) = self.connect_timer.get_untracked() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(tid);
            }
            self.connect_timer.set(None);
        }
    }

    /// Client-generated status line (not part of the backend log).
    fn push_local_notice(&self, message: &str) {
        let row_id = self.take_row_id();
        let entry = SyncLogEntry {
            id: None,
            message: message.to_string(),
            level: LogLevel::Warning,
            created_at: String::from(js_sys::Date::new_0().to_iso_string()),
        };
        self.entries
            .update(|rows| prepend_entry(rows, row_id, entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, level: LogLevel) -> SyncLogEntry {
        SyncLogEntry {
            id: None,
            message: message.to_string(),
            level,
            created_at: "2025-11-03T14:22:08Z".to_string(),
        }
    }

    #[test]
    fn stream_event_parses_wire_shape() {
        let e = parse_stream_event(
            r#"{"message": "Analyzed 120 comments", "level": "info", "created_at": "2025-11-03T14:22:08Z"}"#,
        )
        .expect("well-formed event should parse");
        assert_eq!(e.message, "Analyzed 120 comments");
        assert_eq!(e.level, LogLevel::Info);
    }

    #[test]
    fn malformed_event_is_dropped_not_fatal() {
        assert!(parse_stream_event("not json").is_none());
        assert!(parse_stream_event(r#"{"level": "info"}"#).is_none()); // no message
        assert!(parse_stream_event("").is_none());
    }

    #[test]
    fn completion_matches_marker_or_success_level() {
        assert!(is_completion_event(&entry(
            "Sync completed: 120 comments analyzed",
            LogLevel::Info
        )));
        assert!(is_completion_event(&entry("All done", LogLevel::Success)));
        assert!(!is_completion_event(&entry(
            "Fetched 50 videos",
            LogLevel::Info
        )));
        assert!(!is_completion_event(&entry(
            "Quota exceeded",
            LogLevel::Error
        )));
    }

    #[test]
    fn refresh_fires_exactly_once_per_session() {
        let first = entry("Sync completed", LogLevel::Success);
        let second = entry("Sync completed", LogLevel::Success);

        let mut latched = false;
        let mut refreshes = 0;
        for e in [&first, &second] {
            if should_trigger_refresh(e, latched) {
                latched = true;
                refreshes += 1;
            }
        }
        assert_eq!(refreshes, 1);
    }

    #[test]
    fn buffer_is_newest_first() {
        let mut rows = Vec::new();
        prepend_entry(&mut rows, 1, entry("E1", LogLevel::Info));
        prepend_entry(&mut rows, 2, entry("E2", LogLevel::Info));
        prepend_entry(&mut rows, 3, entry("E3", LogLevel::Info));

        let order: Vec<&str> = rows.iter().map(|r| r.entry.message.as_str()).collect();
        assert_eq!(order, vec!["E3", "E2", "E1"]);
    }

    #[test]
    fn closed_stream_accepts_no_events() {
        assert!(accepts_events(StreamPhase::Connecting));
        assert!(accepts_events(StreamPhase::Streaming));
        assert!(!accepts_events(StreamPhase::Closed));
        assert!(!accepts_events(StreamPhase::Idle));
    }
}
