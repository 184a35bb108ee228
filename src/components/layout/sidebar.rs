use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {MainContent, div, "flex min-h-screen flex-col pl-60"}
    clx! {SidebarSectionLabel, div, "px-4 pb-2 pt-5 text-[10px] uppercase tracking-[0.2em] text-neutral-600"}
}

#[allow(unused_imports)]
pub use components::*;

/// Fixed left navigation. Reads the channel list straight from the shared
/// store — together with the dashboard grid this is what makes the
/// one-list-for-everyone invariant visible.
#[component]
pub fn AppSidebar(#[prop(optional, into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let store = app_state.0.channels;
    let location = use_location();

    // Deduped by the store: navigating between pages does not re-fetch.
    Effect::new(move |_| {
        spawn_local(async move {
            let _ = store.load_channels(false).await;
        });
    });

    let channels = store.channels;
    let pathname = location.pathname;

    let nav_items = move || -> Vec<(String, String)> {
        match channel_id.get() {
            Some(id) => vec![
                ("Overview".to_string(), format!("/channel/{id}")),
                ("Comments".to_string(), format!("/channel/{id}/comments")),
                ("Analytics".to_string(), format!("/channel/{id}/analytics")),
                ("Community".to_string(), format!("/channel/{id}/community")),
                ("Reports".to_string(), format!("/channel/{id}/reports")),
                ("AI Chat".to_string(), format!("/channel/{id}/chat")),
            ],
            None => vec![],
        }
    };

    view! {
        <aside class="fixed inset-y-0 left-0 z-30 flex w-60 flex-col border-r border-neutral-800 bg-[#0f0f0f]">
            <div class="border-b border-neutral-800 px-4 py-5">
                <a href="/dashboard" class="font-serif text-lg text-[#e5e5e5]">"CreatorPulse"</a>
                <p class="text-[10px] uppercase tracking-[0.3em] text-neutral-600">"Comment intelligence"</p>
            </div>

            <nav class="flex-1 overflow-y-auto pb-6">
                <SidebarSectionLabel>"Workspace"</SidebarSectionLabel>
                <SidebarLink href="/dashboard" label="Dashboard" pathname=pathname />

                <Show when=move || !nav_items().is_empty() fallback=|| ().into_view()>
                    <SidebarSectionLabel>"Channel"</SidebarSectionLabel>
                    <For
                        each=nav_items
                        key=|(_, href)| href.clone()
                        children=move |(label, href)| {
                            view! { <SidebarLink href=href label=label pathname=pathname /> }
                        }
                    />
                </Show>

                <SidebarSectionLabel>"Channels"</SidebarSectionLabel>
                <Show
                    when=move || !channels.get().is_empty()
                    fallback=move || view! {
                        <div class="px-4 text-xs text-neutral-600">
                            {move || if store.is_loading.get() { "Loading..." } else { "None connected" }}
                        </div>
                    }
                >
                    <For
                        each=move || channels.get()
                        key=|c| c.channel_id.clone()
                        children=move |c| {
                            let href = format!("/channel/{}", c.channel_id);
                            view! {
                                <a
                                    href=href
                                    class="flex items-center gap-2 px-4 py-2 text-sm text-neutral-400 transition-colors hover:text-[#e5e5e5]"
                                >
                                    {c.thumbnail_url.clone().map(|src| view! {
                                        <img src=src alt=c.name.clone() class="h-5 w-5 border border-neutral-800" />
                                    })}
                                    <span class="truncate">{c.name.clone()}</span>
                                </a>
                            }
                        }
                    />
                </Show>
            </nav>

            <div class="border-t border-neutral-800 px-4 py-3">
                <p class="text-[10px] uppercase tracking-[0.3em] text-neutral-600">"CreatorPulse v0.1"</p>
            </div>
        </aside>
    }
}

#[component]
fn SidebarLink(
    #[prop(into)] href: String,
    #[prop(into)] label: String,
    #[prop(into)] pathname: Signal<String>,
) -> impl IntoView {
    let href_for_class = href.clone();
    let class = move || {
        let path = pathname.get();
        let active = path == href_for_class || path.starts_with(&format!("{href_for_class}/"));
        tw_merge!(
            "flex items-center gap-3 px-4 py-2 text-sm transition-colors hover:text-[#e5e5e5]",
            if active {
                "bg-white/[0.04] text-[#e5e5e5]"
            } else {
                "text-neutral-400"
            }
        )
    };

    view! {
        <a href=href class=class>
            {label}
        </a>
    }
}
