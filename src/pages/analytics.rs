use super::{ChannelRouteParams, PageHeader, Workspace};
use crate::cache::hooks::{use_sentiment, use_tag_counts, use_top_videos, use_trends};
use crate::components::ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, Spinner};
use crate::util::format_count;
use leptos::prelude::*;

const TREND_WINDOWS: &[u32] = &[7, 30, 90];

#[component]
pub fn AnalyticsPage() -> impl IntoView {
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
            <AnalyticsContent channel_id=Signal::derive(channel_id) />
        </Workspace>
    }
}

#[component]
fn AnalyticsContent(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    // Trend day-window selection. Each window is its own cache entry, so
    // flipping back to an already-viewed window renders instantly.
    let trend_days: RwSignal<u32> = RwSignal::new(30);

    let sentiment = use_sentiment(move || channel_id.get());
    let trends = use_trends(move || channel_id.get(), move || trend_days.get());
    let top_videos = use_top_videos(move || channel_id.get(), 10);
    let tag_counts = use_tag_counts(move || channel_id.get());

    view! {
        <PageHeader title="Analytics" subtitle="Sentiment, themes, and standout videos".to_string() />

        <div class="grid flex-1 gap-6 p-8 lg:grid-cols-2">
            <Card>
                <CardHeader>
                    <CardTitle class="text-sm">"Sentiment"</CardTitle>
                    <CardDescription>"All analyzed comments"</CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || sentiment.data.get().is_some()
                        fallback=move || view! { <LoadingRow is_loading=sentiment.is_loading /> }
                    >
                        {move || sentiment.data.get().map(|s| view! {
                            <div class="flex flex-col gap-3">
                                <SentimentBar
                                    label="Positive"
                                    count=s.breakdown.positive
                                    percent=s.percentages.positive
                                    bar_class="bg-emerald-400"
                                />
                                <SentimentBar
                                    label="Neutral"
                                    count=s.breakdown.neutral
                                    percent=s.percentages.neutral
                                    bar_class="bg-neutral-500"
                                />
                                <SentimentBar
                                    label="Negative"
                                    count=s.breakdown.negative
                                    percent=s.percentages.negative
                                    bar_class="bg-red-400"
                                />
                                <p class="pt-1 text-[10px] uppercase tracking-widest text-neutral-600">
                                    {format!("{} comments total", format_count(s.total))}
                                </p>
                            </div>
                        })}
                    </Show>
                </CardContent>
            </Card>

            <Card>
                <CardHeader class="flex-row items-center justify-between">
                    <div>
                        <CardTitle class="text-sm">"Trend"</CardTitle>
                        <CardDescription>"Daily sentiment counts"</CardDescription>
                    </div>
                    <div class="flex gap-1">
                        {TREND_WINDOWS
                            .iter()
                            .map(|&days| {
                                let class = move || {
                                    if trend_days.get() == days {
                                        "h-8 px-3 text-xs uppercase tracking-widest bg-white/[0.04] text-[#e5e5e5] hover:cursor-pointer"
                                    } else {
                                        "h-8 px-3 text-xs uppercase tracking-widest text-neutral-500 transition-colors hover:text-[#e5e5e5] hover:cursor-pointer"
                                    }
                                };
                                view! {
                                    <button class=class on:click=move |_| trend_days.set(days)>
                                        {format!("{days}d")}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || trends.data.get().is_some()
                        fallback=move || view! { <LoadingRow is_loading=trends.is_loading /> }
                    >
                        {move || trends.data.get().map(|rows| {
                            let max_total = rows.iter().map(|t| t.total).max().unwrap_or(1).max(1);
                            view! {
                                <div class="flex h-32 items-end gap-px">
                                    {rows
                                        .iter()
                                        .map(|t| {
                                            let height = (t.total as f64 / max_total as f64 * 100.0).round();
                                            let pos_share = if t.total > 0 {
                                                t.positive as f64 / t.total as f64
                                            } else {
                                                0.0
                                            };
                                            let title = format!(
                                                "{}: {} comments ({} positive, {} negative)",
                                                t.date, t.total, t.positive, t.negative
                                            );
                                            let bar_class = if pos_share >= 0.5 {
                                                "w-full flex-1 bg-emerald-400/70"
                                            } else {
                                                "w-full flex-1 bg-red-400/70"
                                            };
                                            view! {
                                                <div
                                                    class="flex flex-1 flex-col justify-end"
                                                    style=format!("height: {height}%")
                                                    title=title
                                                >
                                                    <div class=bar_class></div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                        })}
                    </Show>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle class="text-sm">"Tags"</CardTitle>
                    <CardDescription>"What comments are about"</CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || tag_counts.data.get().is_some()
                        fallback=move || view! { <LoadingRow is_loading=tag_counts.is_loading /> }
                    >
                        {move || tag_counts.data.get().map(|counts| {
                            let mut rows: Vec<(String, u64)> = counts.into_iter().collect();
                            rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                            let max = rows.first().map(|(_, n)| *n).unwrap_or(1).max(1);
                            view! {
                                <ul class="flex flex-col gap-2">
                                    {rows
                                        .into_iter()
                                        .take(12)
                                        .map(|(tag, count)| {
                                            let width = (count as f64 / max as f64 * 100.0).round();
                                            view! {
                                                <li class="flex items-center gap-3">
                                                    <span class="w-28 truncate text-xs text-neutral-400">{tag}</span>
                                                    <div class="h-2 flex-1 bg-neutral-900">
                                                        <div
                                                            class="h-full bg-[#e5e5e5]/60"
                                                            style=format!("width: {width}%")
                                                        ></div>
                                                    </div>
                                                    <span class="w-10 text-right text-xs text-neutral-600">
                                                        {count.to_string()}
                                                    </span>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            }
                        })}
                    </Show>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle class="text-sm">"Top videos"</CardTitle>
                    <CardDescription>"By comment volume"</CardDescription>
                </CardHeader>
                <CardContent>
                    <Show
                        when=move || top_videos.data.get().is_some()
                        fallback=move || view! { <LoadingRow is_loading=top_videos.is_loading /> }
                    >
                        {move || top_videos.data.get().map(|videos| view! {
                            <ul class="flex flex-col divide-y divide-neutral-800">
                                {videos
                                    .into_iter()
                                    .map(|v| view! {
                                        <li class="flex items-center gap-3 py-2">
                                            {v.thumbnail_url.clone().map(|src| view! {
                                                <img src=src alt=v.title.clone() class="h-8 w-14 border border-neutral-800 object-cover" />
                                            })}
                                            <span class="min-w-0 flex-1 truncate text-sm text-neutral-300">
                                                {v.title.clone()}
                                            </span>
                                            <span class="text-xs text-emerald-400">{format!("+{}", v.positive_count)}</span>
                                            <span class="text-xs text-red-400">{format!("-{}", v.negative_count)}</span>
                                            <span class="w-14 text-right text-xs text-neutral-600">
                                                {format_count(v.comment_count)}
                                            </span>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        })}
                    </Show>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn SentimentBar(
    #[prop(into)] label: String,
    count: u64,
    percent: f64,
    #[prop(into)] bar_class: String,
) -> impl IntoView {
    view! {
        <div class="flex items-center gap-3">
            <span class="w-16 text-xs text-neutral-400">{label}</span>
            <div class="h-2 flex-1 bg-neutral-900">
                <div
                    class=format!("h-full {bar_class}")
                    style=format!("width: {}%", percent.clamp(0.0, 100.0))
                ></div>
            </div>
            <span class="w-16 text-right text-xs text-neutral-600">
                {format!("{} ({percent:.0}%)", format_count(count))}
            </span>
        </div>
    }
}

#[component]
fn LoadingRow(#[prop(into)] is_loading: Signal<bool>) -> impl IntoView {
    view! {
        <div class="flex h-24 items-center justify-center">
            <Show
                when=move || is_loading.get()
                fallback=|| view! { <p class="text-xs text-neutral-600">"No data yet."</p> }
            >
                <Spinner class="text-neutral-400" />
            </Show>
        </div>
    }
}
