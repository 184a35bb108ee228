use super::{ChannelRouteParams, PageHeader, Workspace};
use crate::cache::hooks::{use_community_stats, use_streaks, use_top_commenters};
use crate::components::ui::{
    Card, CardContent, CardDescription, CardHeader, CardTitle, Spinner, StatLabel, StatValue,
};
use crate::models::Commenter;
use crate::util::format_count;
use leptos::prelude::*;

#[component]
pub fn CommunityPage() -> impl IntoView {
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
            <CommunityContent channel_id=Signal::derive(channel_id) />
        </Workspace>
    }
}

#[component]
fn CommunityContent(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let stats = use_community_stats(move || channel_id.get());
    let top_commenters = use_top_commenters(move || channel_id.get(), 20);
    let streaks = use_streaks(move || channel_id.get(), 20);

    view! {
        <PageHeader title="Community" subtitle="Who keeps coming back".to_string() />

        <div class="flex flex-1 flex-col gap-6 p-8">
            <Show
                when=move || stats.data.get().is_some()
                fallback=move || view! {
                    <div class="flex h-24 items-center justify-center">
                        <Show when=move || stats.is_loading.get() fallback=|| view! {
                            <p class="text-xs text-neutral-600">"No community data yet."</p>
                        }>
                            <Spinner class="text-neutral-400" />
                        </Show>
                    </div>
                }
            >
                {move || stats.data.get().map(|s| view! {
                    <div class="grid grid-cols-2 gap-0 border border-neutral-800 md:grid-cols-4">
                        <div class="border-r border-neutral-800 p-4 text-center">
                            <StatValue>{format_count(s.unique_commenters)}</StatValue>
                            <StatLabel>"Unique commenters"</StatLabel>
                        </div>
                        <div class="border-r border-neutral-800 p-4 text-center">
                            <StatValue>{format_count(s.repeat_commenters)}</StatValue>
                            <StatLabel>"Repeat commenters"</StatLabel>
                        </div>
                        <div class="border-r border-neutral-800 p-4 text-center">
                            <StatValue>{format!("{:.0}%", s.repeat_percentage)}</StatValue>
                            <StatLabel>"Return rate"</StatLabel>
                        </div>
                        <div class="p-4 text-center">
                            <StatValue>{format!("{:.1}", s.avg_comments_per_user)}</StatValue>
                            <StatLabel>"Comments per person"</StatLabel>
                        </div>
                    </div>
                })}
            </Show>

            <div class="grid gap-6 lg:grid-cols-2">
                <Card>
                    <CardHeader>
                        <CardTitle class="text-sm">"Top commenters"</CardTitle>
                        <CardDescription>"By comment volume"</CardDescription>
                    </CardHeader>
                    <CardContent>
                        <CommenterList
                            commenters=top_commenters.data
                            is_loading=top_commenters.is_loading
                            metric=|c: &Commenter| format!("{} comments", c.comment_count)
                        />
                    </CardContent>
                </Card>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-sm">"Longest streaks"</CardTitle>
                        <CardDescription>"Consecutive days with a comment"</CardDescription>
                    </CardHeader>
                    <CardContent>
                        <CommenterList
                            commenters=streaks.data
                            is_loading=streaks.is_loading
                            metric=|c: &Commenter| format!("{} days", c.streak_days)
                        />
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
fn CommenterList(
    #[prop(into)] commenters: Signal<Option<Vec<Commenter>>>,
    #[prop(into)] is_loading: Signal<bool>,
    metric: fn(&Commenter) -> String,
) -> impl IntoView {
    view! {
        <Show
            when=move || commenters.get().is_some()
            fallback=move || view! {
                <div class="flex h-24 items-center justify-center">
                    <Show when=move || is_loading.get() fallback=|| view! {
                        <p class="text-xs text-neutral-600">"Nothing here yet."</p>
                    }>
                        <Spinner class="text-neutral-400" />
                    </Show>
                </div>
            }
        >
            {move || commenters.get().map(|list| view! {
                <ul class="flex flex-col divide-y divide-neutral-800">
                    {list
                        .into_iter()
                        .map(|c| {
                            let metric_text = metric(&c);
                            view! {
                                <li class="flex items-center gap-3 py-2">
                                    {c.author_profile_image.clone().map(|src| view! {
                                        <img src=src alt=c.author_name.clone() class="h-6 w-6 border border-neutral-800" />
                                    })}
                                    <span class="min-w-0 flex-1 truncate text-sm text-neutral-300">
                                        {c.author_name.clone()}
                                    </span>
                                    <Show when=move || c.is_repeat fallback=|| ().into_view()>
                                        <span class="text-[10px] uppercase tracking-widest text-emerald-400">
                                            "Repeat"
                                        </span>
                                    </Show>
                                    <span class="text-xs text-neutral-600">{metric_text}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            })}
        </Show>
    }
}
