use crate::components::ui::{
    Badge, BadgeVariant, Dialog, DialogBody, DialogDescription, DialogHeader, DialogTitle, Spinner,
};
use crate::models::LogLevel;
use crate::state::sync_stream::{StreamPhase, SyncLogStream};
use crate::state::AppContext;
use crate::util::short_date;
use leptos::prelude::*;

fn level_variant(level: LogLevel) -> BadgeVariant {
    match level {
        LogLevel::Info => BadgeVariant::Neutral,
        LogLevel::Success => BadgeVariant::Success,
        LogLevel::Warning => BadgeVariant::Warning,
        LogLevel::Error => BadgeVariant::Destructive,
    }
}

/// Modal wrapper around the live sync feed. The feed component only exists
/// while the dialog is open, which is what guarantees the stream is closed
/// on dismissal.
#[component]
pub fn SyncLogDialog(
    #[prop(into)] open: RwSignal<bool>,
    #[prop(into)] channel_id: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Dialog open=open class="max-w-xl">
            <DialogHeader>
                <DialogTitle>"Sync in progress"</DialogTitle>
                <DialogDescription>"Live log from the analysis job"</DialogDescription>
            </DialogHeader>
            <DialogBody>
                <SyncLogFeed channel_id=channel_id />
            </DialogBody>
        </Dialog>
    }
}

#[component]
fn SyncLogFeed(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let stream = SyncLogStream::new(app_state);

    {
        let stream = stream.clone();
        Effect::new(move |_| {
            if let Some(id) = channel_id.get() {
                stream.open(id);
            }
        });
    }

    // Mandatory scoped-resource release: every exit path (close button,
    // backdrop, Esc, navigation) unmounts this component.
    {
        let stream = stream.clone();
        on_cleanup(move || stream.close());
    }

    let phase = stream.phase;
    let entries = stream.entries;

    view! {
        <div class="flex items-center gap-2 text-[10px] uppercase tracking-widest text-neutral-600">
            {move || match phase.get() {
                StreamPhase::Idle => view! { <span>"Waiting for channel"</span> }.into_any(),
                StreamPhase::Connecting => view! {
                    <Spinner class="size-3" />
                    <span>"Connecting"</span>
                }
                .into_any(),
                StreamPhase::Streaming => view! {
                    <span class="inline-block size-1.5 animate-pulse bg-emerald-400"></span>
                    <span>"Live"</span>
                }
                .into_any(),
                StreamPhase::Closed => view! { <span>"Stream closed"</span> }.into_any(),
            }}
        </div>

        <div class="max-h-80 overflow-y-auto border border-neutral-800">
            <Show
                when=move || !entries.get().is_empty()
                fallback=|| view! {
                    <div class="px-4 py-6 text-center text-xs text-neutral-600">
                        "No log lines yet."
                    </div>
                }
            >
                <ul class="divide-y divide-neutral-800">
                    <For
                        each=move || entries.get()
                        key=|row| row.row_id
                        children=move |row| {
                            let level = row.entry.level;
                            let message = row.entry.message.clone();
                            let stamp = short_date(&row.entry.created_at).to_string();
                            view! {
                                <li class="flex items-start gap-3 px-3 py-2">
                                    <Badge variant=level_variant(level)>{level.to_string()}</Badge>
                                    <span class="min-w-0 flex-1 text-sm text-neutral-300">{message}</span>
                                    <span class="shrink-0 text-[10px] text-neutral-600">{stamp}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>

        <p class="text-[10px] leading-relaxed text-neutral-600">
            "You can close this window; the sync keeps running on the server and the channel list refreshes automatically when it finishes."
        </p>
    }
}
