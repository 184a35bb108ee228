use super::{ChannelRouteParams, PageHeader, Workspace};
use crate::api::CommentFilter;
use crate::components::ui::{Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Input, Spinner};
use crate::models::{Comment, Sentiment, Tag, Video};
use crate::state::AppContext;
use crate::util::short_date;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

const PAGE_SIZE: u64 = 50;

fn sentiment_variant(sentiment: Option<Sentiment>) -> BadgeVariant {
    match sentiment {
        Some(Sentiment::Positive) => BadgeVariant::Success,
        Some(Sentiment::Negative) => BadgeVariant::Destructive,
        _ => BadgeVariant::Neutral,
    }
}

fn select_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        .map(|s| s.value())
        .unwrap_or_default()
}

const SELECT_CLASS: &str = "h-8 border border-neutral-800 bg-[#0f0f0f] px-2 text-xs text-neutral-300 outline-none focus:border-neutral-500";

#[component]
pub fn CommentsPage() -> impl IntoView {
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
            <CommentsContent channel_id=Signal::derive(channel_id) />
        </Workspace>
    }
}

#[component]
fn CommentsContent(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    // Filters. Every change resets to page 1.
    let sentiment_filter: RwSignal<String> = RwSignal::new(String::new());
    let tag_filter: RwSignal<String> = RwSignal::new(String::new());
    let video_filter: RwSignal<String> = RwSignal::new(String::new());
    let bookmarked_only: RwSignal<bool> = RwSignal::new(false);
    let search_input: RwSignal<String> = RwSignal::new(String::new());
    let active_search: RwSignal<String> = RwSignal::new(String::new());
    let page: RwSignal<u64> = RwSignal::new(1);

    let comments: RwSignal<Vec<Comment>> = RwSignal::new(vec![]);
    let total: RwSignal<u64> = RwSignal::new(0);
    let total_pages: RwSignal<u64> = RwSignal::new(0);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    // Stale-response protection for overlapping filter changes.
    let request_id: RwSignal<u64> = RwSignal::new(0);

    // Filter vocabularies.
    let tag_vocab: RwSignal<Vec<Tag>> = RwSignal::new(vec![]);
    let videos: RwSignal<Vec<Video>> = RwSignal::new(vec![]);

    Effect::new(move |_| {
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.list_tags().await {
                Ok(tags) => tag_vocab.set(tags),
                Err(e) => leptos::logging::warn!("tag vocabulary unavailable: {e}"),
            }
        });
    });

    Effect::new(move |_| {
        let Some(id) = channel_id.get() else {
            videos.set(vec![]);
            return;
        };
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.list_channel_videos(&id, 50, 0).await {
                Ok(list) => videos.set(list),
                Err(e) => leptos::logging::warn!("video list unavailable: {e}"),
            }
        });
    });

    Effect::new(move |_| {
        let Some(id) = channel_id.get() else {
            comments.set(vec![]);
            total.set(0);
            total_pages.set(0);
            return;
        };

        let filter = CommentFilter {
            sentiment: Some(sentiment_filter.get()).filter(|s| !s.is_empty()),
            tags: Some(tag_filter.get()).filter(|s| !s.is_empty()),
            video_id: Some(video_filter.get()).filter(|s| !s.is_empty()),
            is_bookmarked: bookmarked_only.get().then_some(true),
            date_from: None,
            date_to: None,
            search: Some(active_search.get()).filter(|s| !s.trim().is_empty()),
            page: Some(page.get()),
            limit: Some(PAGE_SIZE),
        };

        let req_id = request_id.get_untracked().saturating_add(1);
        request_id.set(req_id);

        loading.set(true);
        error.set(None);

        let api = api_client.get_untracked();
        spawn_local(async move {
            let result = api.list_channel_comments(&id, &filter).await;

            // Ignore stale responses.
            if request_id.get_untracked() != req_id {
                return;
            }

            match result {
                Ok(pageful) => {
                    comments.set(pageful.items);
                    total.set(pageful.total);
                    total_pages.set(pageful.pages);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    let on_toggle_bookmark = move |comment: Comment| {
        let next = !comment.is_bookmarked;
        let comment_id = comment.comment_id.clone();
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.toggle_bookmark(&comment_id, next).await {
                Ok(_) => {
                    comments.update(|list| {
                        if let Some(c) = list.iter_mut().find(|c| c.comment_id == comment_id) {
                            c.is_bookmarked = next;
                        }
                    });
                }
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Failed to update bookmark: {e}"));
                }
            }
        });
    };

    let apply_tags = move |comment_id: String, tags: Vec<String>| {
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.update_comment_tags(&comment_id, &tags).await {
                Ok(_) => {
                    comments.update(|list| {
                        if let Some(c) = list.iter_mut().find(|c| c.comment_id == comment_id) {
                            c.tags = tags.clone();
                        }
                    });
                }
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Failed to update tags: {e}"));
                }
            }
        });
    };

    let run_search = move || {
        active_search.set(search_input.get_untracked());
        page.set(1);
    };

    view! {
        <PageHeader
            title="Comments"
            subtitle=Signal::derive(move || format!("{} matching", total.get()))
        />

        <div class="flex flex-1 flex-col gap-4 p-8">
            // Filter bar
            <div class="flex flex-wrap items-center gap-2">
                <select
                    class=SELECT_CLASS
                    prop:value=move || sentiment_filter.get()
                    on:change=move |ev| {
                        sentiment_filter.set(select_value(&ev));
                        page.set(1);
                    }
                >
                    <option value="">"All sentiment"</option>
                    <option value="positive">"Positive"</option>
                    <option value="neutral">"Neutral"</option>
                    <option value="negative">"Negative"</option>
                </select>

                <select
                    class=SELECT_CLASS
                    prop:value=move || tag_filter.get()
                    on:change=move |ev| {
                        tag_filter.set(select_value(&ev));
                        page.set(1);
                    }
                >
                    <option value="">"All tags"</option>
                    {move || {
                        tag_vocab
                            .get()
                            .into_iter()
                            .map(|t| view! { <option value=t.name.clone()>{t.name.clone()}</option> })
                            .collect_view()
                    }}
                </select>

                <select
                    class=SELECT_CLASS
                    prop:value=move || video_filter.get()
                    on:change=move |ev| {
                        video_filter.set(select_value(&ev));
                        page.set(1);
                    }
                >
                    <option value="">"All videos"</option>
                    {move || {
                        videos
                            .get()
                            .into_iter()
                            .map(|v| view! { <option value=v.video_id.clone()>{v.title.clone()}</option> })
                            .collect_view()
                    }}
                </select>

                <button
                    class=move || {
                        if bookmarked_only.get() {
                            "h-8 border border-neutral-500 px-3 text-xs uppercase tracking-widest text-[#e5e5e5] hover:cursor-pointer"
                        } else {
                            "h-8 border border-neutral-800 px-3 text-xs uppercase tracking-widest text-neutral-500 transition-colors hover:text-[#e5e5e5] hover:cursor-pointer"
                        }
                    }
                    on:click=move |_| {
                        bookmarked_only.update(|b| *b = !*b);
                        page.set(1);
                    }
                >
                    "Bookmarked"
                </button>

                <form
                    class="flex flex-1 items-center gap-2"
                    on:submit=move |ev: web_sys::SubmitEvent| {
                        ev.prevent_default();
                        run_search();
                    }
                >
                    <Input
                        class="h-8 max-w-xs text-xs"
                        placeholder="Search comment text"
                        bind_value=search_input
                    />
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm>
                        "Search"
                    </Button>
                </form>
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| view! {
                        <div class="border border-red-900/60 px-4 py-3 text-sm text-red-400">{e}</div>
                    })
                }}
            </Show>

            <div class="flex-1 border border-neutral-800">
                <Show
                    when=move || !comments.get().is_empty()
                    fallback=move || view! {
                        <div class="flex h-40 items-center justify-center">
                            <Show when=move || loading.get() fallback=|| view! {
                                <p class="text-xs text-neutral-600">"No comments match these filters."</p>
                            }>
                                <Spinner class="text-neutral-400" />
                            </Show>
                        </div>
                    }
                >
                    <ul class="divide-y divide-neutral-800">
                        <For
                            each=move || comments.get()
                            key=|c| (c.comment_id.clone(), c.is_bookmarked, c.tags.len())
                            children=move |c| {
                                let bookmarked = c.is_bookmarked;
                                let bookmark_class = move || {
                                    if bookmarked {
                                        "text-xs text-amber-400 hover:cursor-pointer"
                                    } else {
                                        "text-xs text-neutral-600 transition-colors hover:text-amber-400 hover:cursor-pointer"
                                    }
                                };
                                let bookmark_click = {
                                    let comment = c.clone();
                                    move |_| on_toggle_bookmark(comment.clone())
                                };
                                let comment_id_for_tags = c.comment_id.clone();
                                let tags_for_removal = c.tags.clone();
                                let comment_id_for_add = c.comment_id.clone();
                                let tags_for_add = c.tags.clone();
                                view! {
                                    <li class="flex flex-col gap-2 px-4 py-3">
                                        <div class="flex items-center gap-3">
                                            {c.author_profile_image.clone().map(|src| view! {
                                                <img src=src alt=c.author_name.clone() class="h-6 w-6 border border-neutral-800" />
                                            })}
                                            <span class="text-sm text-[#e5e5e5]">{c.author_name.clone()}</span>
                                            <Badge variant=sentiment_variant(c.sentiment)>
                                                {c.sentiment.map(|s| s.to_string()).unwrap_or_else(|| "unscored".to_string())}
                                            </Badge>
                                            <span class="flex-1"></span>
                                            <span class="text-[10px] text-neutral-600">
                                                {short_date(&c.published_at).to_string()}
                                            </span>
                                            <button
                                                class=bookmark_class
                                                aria-label="Toggle bookmark"
                                                on:click=bookmark_click
                                            >
                                                "★"
                                            </button>
                                        </div>

                                        <p class="text-sm leading-relaxed text-neutral-300">{c.text.clone()}</p>

                                        <div class="flex flex-wrap items-center gap-1.5">
                                            {c.tags
                                                .iter()
                                                .map(|tag| {
                                                    let tag_label = tag.clone();
                                                    let remove_click = {
                                                        let tag = tag.clone();
                                                        let comment_id = comment_id_for_tags.clone();
                                                        let current = tags_for_removal.clone();
                                                        move |_| {
                                                            let remaining: Vec<String> = current
                                                                .iter()
                                                                .filter(|t| **t != tag)
                                                                .cloned()
                                                                .collect();
                                                            apply_tags(comment_id.clone(), remaining);
                                                        }
                                                    };
                                                    view! {
                                                        <button
                                                            class="border border-neutral-800 px-2 py-0.5 text-[10px] uppercase tracking-widest text-neutral-400 transition-colors hover:border-red-900/60 hover:text-red-400 hover:cursor-pointer"
                                                            title="Remove tag"
                                                            on:click=remove_click
                                                        >
                                                            {tag_label}
                                                        </button>
                                                    }
                                                })
                                                .collect_view()}

                                            <select
                                                class="h-6 border border-neutral-800 bg-[#0f0f0f] px-1 text-[10px] uppercase tracking-widest text-neutral-600 outline-none"
                                                prop:value=""
                                                on:change=move |ev| {
                                                    let tag = select_value(&ev);
                                                    if tag.is_empty() || tags_for_add.contains(&tag) {
                                                        return;
                                                    }
                                                    let mut next = tags_for_add.clone();
                                                    next.push(tag);
                                                    apply_tags(comment_id_for_add.clone(), next);
                                                }
                                            >
                                                <option value="">"+ tag"</option>
                                                {move || {
                                                    tag_vocab
                                                        .get()
                                                        .into_iter()
                                                        .map(|t| view! { <option value=t.name.clone()>{t.name.clone()}</option> })
                                                        .collect_view()
                                                }}
                                            </select>
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>

            // Pagination
            <div class="flex items-center justify-between">
                <p class="text-[10px] uppercase tracking-widest text-neutral-600">
                    {move || format!("Page {} of {} · {} comments", page.get(), total_pages.get().max(1), total.get())}
                </p>
                <div class="flex gap-2">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || page.get() <= 1 || loading.get()
                        on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "Prev"
                    </Button>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || page.get() >= total_pages.get() || loading.get()
                        on:click=move |_| page.update(|p| *p += 1)
                    >
                        "Next"
                    </Button>
                </div>
            </div>
        </div>
    }
}
