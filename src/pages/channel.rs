use super::{ChannelRouteParams, PageHeader, Workspace};
use crate::cache::hooks::{use_channel, use_channel_summary};
use crate::components::ui::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Spinner, StatLabel, StatValue,
};
use crate::models::{SyncStatus, SyncStatusResponse};
use crate::pages::sync_log::SyncLogDialog;
use crate::state::AppContext;
use crate::util::{format_count, short_date};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn status_variant(status: SyncStatus) -> BadgeVariant {
    match status {
        SyncStatus::Pending => BadgeVariant::Neutral,
        SyncStatus::Syncing => BadgeVariant::Warning,
        SyncStatus::Completed => BadgeVariant::Success,
        SyncStatus::Error => BadgeVariant::Destructive,
    }
}

#[component]
pub fn ChannelOverviewPage() -> impl IntoView {
    let params = leptos_router::hooks::use_params::<ChannelRouteParams>();
    let channel_id = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.channel_id)
            .filter(|id| !id.trim().is_empty())
    };

    view! {
        <Workspace channel_id=Signal::derive(channel_id)>
            <ChannelOverviewContent channel_id=Signal::derive(channel_id) />
        </Workspace>
    }
}

#[component]
fn ChannelOverviewContent(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    let channel = use_channel(move || channel_id.get());
    let summary = use_channel_summary(move || channel_id.get());

    let sync_open: RwSignal<bool> = RwSignal::new(false);
    let sync_target: RwSignal<Option<String>> = RwSignal::new(None);

    // Polled fallback for the status line; the cached channel record may be
    // up to a dedupe window old.
    let sync_status: RwSignal<Option<SyncStatusResponse>> = RwSignal::new(None);
    Effect::new(move |_| {
        let Some(id) = channel_id.get() else {
            sync_status.set(None);
            return;
        };
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.get_sync_status(&id).await {
                Ok(status) => sync_status.set(Some(status)),
                Err(e) => leptos::logging::warn!("sync status unavailable: {e}"),
            }
        });
    });

    let on_sync = move |_| {
        let Some(id) = channel_id.get_untracked() else {
            return;
        };
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.start_sync(&id, 30, 50).await {
                Ok(_) => {
                    sync_target.set(Some(id));
                    sync_open.set(true);
                }
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Failed to start sync: {e}"));
                }
            }
        });
    };

    let is_syncing = move || {
        channel
            .data
            .get()
            .map(|c| c.sync_status == SyncStatus::Syncing)
            .unwrap_or(false)
    };

    view! {
        <PageHeader
            title="Channel"
            subtitle=Signal::derive(move || {
                channel.data.get().map(|c| c.name).unwrap_or_else(|| "Loading".to_string())
            })
        >
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                attr:disabled=is_syncing
                on:click=on_sync
            >
                {move || if is_syncing() { "Syncing..." } else { "Sync comments" }}
            </Button>
        </PageHeader>

        <div class="flex flex-1 flex-col gap-6 p-8">
            <Show when=move || channel.error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    channel.error.get().map(|e| view! {
                        <div class="border border-red-900/60 px-4 py-3 text-sm text-red-400">{e}</div>
                    })
                }}
            </Show>

            <Show
                when=move || channel.data.get().is_some()
                fallback=move || view! {
                    <div class="flex h-40 items-center justify-center">
                        <Show when=move || channel.is_loading.get() fallback=|| view! {
                            <p class="text-xs text-neutral-600">"Channel not available."</p>
                        }>
                            <Spinner class="size-6 text-neutral-400" />
                        </Show>
                    </div>
                }
            >
                {move || channel.data.get().map(|c| view! {
                    <Card>
                        <CardContent class="flex items-center gap-6 py-6">
                            {c.thumbnail_url.clone().map(|src| view! {
                                <img src=src alt=c.name.clone() class="h-16 w-16 border border-neutral-800" />
                            })}
                            <div class="min-w-0 flex-1">
                                <h2 class="truncate font-serif text-2xl">{c.name.clone()}</h2>
                                <p class="mt-1 text-[10px] uppercase tracking-widest text-neutral-600">
                                    {format_count(c.subscriber_count.unwrap_or(0))}
                                    " subscribers · "
                                    {format_count(c.video_count.unwrap_or(0))}
                                    " videos"
                                </p>
                            </div>
                            <Badge variant=status_variant(c.sync_status)>{c.sync_status.to_string()}</Badge>
                        </CardContent>
                    </Card>
                })}
            </Show>

            {move || summary.data.get().map(|s| view! {
                <div class="grid grid-cols-2 gap-0 border border-neutral-800 md:grid-cols-5">
                    <div class="border-r border-neutral-800 p-4 text-center">
                        <StatValue>{format_count(s.total_comments)}</StatValue>
                        <StatLabel>"Comments"</StatLabel>
                    </div>
                    <div class="border-r border-neutral-800 p-4 text-center">
                        <StatValue>{s.total_videos.to_string()}</StatValue>
                        <StatLabel>"Videos"</StatLabel>
                    </div>
                    <div class="border-r border-neutral-800 p-4 text-center">
                        <StatValue>{format_count(s.unique_commenters)}</StatValue>
                        <StatLabel>"Commenters"</StatLabel>
                    </div>
                    <div class="border-r border-neutral-800 p-4 text-center">
                        <StatValue>{format_count(s.bookmarked_comments)}</StatValue>
                        <StatLabel>"Bookmarked"</StatLabel>
                    </div>
                    <div class="p-4 text-center">
                        <StatValue>{format_count(s.recent_comments_7d)}</StatValue>
                        <StatLabel>"Last 7 days"</StatLabel>
                    </div>
                </div>
            })}

            {move || sync_status.get().map(|s| view! {
                <Card>
                    <CardHeader>
                        <CardTitle class="text-sm">"Sync"</CardTitle>
                        <CardDescription>"Backend job state"</CardDescription>
                    </CardHeader>
                    <CardContent class="flex items-center gap-4 text-sm text-neutral-400">
                        <Badge variant=status_variant(s.sync_status)>{s.sync_status.to_string()}</Badge>
                        <span>
                            {match s.last_synced.clone() {
                                Some(ts) => format!("Last synced {}", short_date(&ts)),
                                None => "Never synced".to_string(),
                            }}
                        </span>
                        <span class="text-neutral-600">
                            {format!(
                                "{} comments · {} videos analyzed",
                                s.total_comments, s.total_videos_analyzed
                            )}
                        </span>
                    </CardContent>
                </Card>
            })}
        </div>

        <SyncLogDialog open=sync_open channel_id=sync_target />
    }
}
