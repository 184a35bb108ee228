use super::{PageHeader, Workspace};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Corner, Dialog, DialogBody,
    DialogDescription, DialogHeader, DialogTitle, GridCorner, Input, Label, Spinner, StatLabel,
    StatValue,
};
use crate::models::SubscriptionStatus;
use crate::pages::sync_log::SyncLogDialog;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <Workspace>
            <DashboardContent />
        </Workspace>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let current_user = app_state.0.current_user;
    let store = app_state.0.channels;

    let add_open: RwSignal<bool> = RwSignal::new(false);
    let channel_url: RwSignal<String> = RwSignal::new(String::new());
    let adding: RwSignal<bool> = RwSignal::new(false);
    let add_error: RwSignal<Option<String>> = RwSignal::new(None);

    let sync_open: RwSignal<bool> = RwSignal::new(false);
    let sync_channel_id: RwSignal<Option<String>> = RwSignal::new(None);

    let subscription: RwSignal<Option<SubscriptionStatus>> = RwSignal::new(None);

    Effect::new(move |_| {
        spawn_local(async move {
            let _ = store.load_channels(false).await;
        });
    });

    Effect::new(move |_| {
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.get_subscription_status().await {
                Ok(status) => subscription.set(Some(status)),
                Err(e) => leptos::logging::warn!("subscription status unavailable: {e}"),
            }
        });
    });

    let on_add = move |_| {
        let url = channel_url.get_untracked().trim().to_string();
        if url.is_empty() {
            return;
        }

        adding.set(true);
        add_error.set(None);

        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.add_channel(&url).await {
                Ok(channel) => {
                    let id = channel.channel_id.clone();
                    store.add_channel(channel);
                    channel_url.set(String::new());
                    add_open.set(false);

                    // Kick the backend job and watch its log stream live.
                    if let Err(e) = api.start_sync(&id, 30, 50).await {
                        leptos::logging::warn!("failed to start sync for {id}: {e}");
                    }
                    sync_channel_id.set(Some(id));
                    sync_open.set(true);
                }
                Err(e) => add_error.set(Some(e.to_string())),
            }
            adding.set(false);
        });
    };

    let on_delete = move |channel_id: String, name: String| {
        let confirmed = window()
            .confirm_with_message(&format!(
                "Delete {name}? All analyzed comments for this channel will be removed."
            ))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.delete_channel(&channel_id).await {
                Ok(_) => store.remove_channel(&channel_id),
                Err(e) => {
                    leptos::logging::error!("failed to delete channel {channel_id}: {e}");
                    let _ = window().alert_with_message(&format!("Failed to delete channel: {e}"));
                }
            }
        });
    };

    let on_upgrade = move |_| {
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.create_checkout().await {
                Ok(resp) => {
                    let _ = window().location().set_href(&resp.checkout_url);
                }
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Checkout unavailable: {e}"));
                }
            }
        });
    };

    let on_sign_out = move |_| {
        let mut client = api_client.get_untracked();
        client.logout();
        api_client.set(client);
        current_user.set(None);
        let _ = window().location().set_href("/");
    };

    let channels = store.channels;
    let channel_count = move || channels.get().len();

    view! {
        <PageHeader
            title="Dashboard"
            subtitle=Signal::derive(move || format!("{} channels connected", channel_count()))
        >
            {move || current_user.get().map(|u| {
                let label = u.extra["name"]
                    .as_str()
                    .or_else(|| u.extra["email"].as_str())
                    .unwrap_or("Signed in")
                    .to_string();
                view! { <span class="text-sm text-neutral-400">{label}</span> }
            })}
            {move || subscription.get().map(|s| view! {
                <span class="text-[10px] uppercase tracking-widest text-neutral-600">
                    {format!("{} plan", s.plan)}
                </span>
            })}
            <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_upgrade>
                "Upgrade"
            </Button>
            <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| add_open.set(true)>
                "+ Add channel"
            </Button>
            <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_sign_out>
                "Sign out"
            </Button>
        </PageHeader>

        <div class="flex-1 p-8">
            <Show
                when=move || !channels.get().is_empty()
                fallback=move || view! {
                    <Show
                        when=move || store.is_loading.get()
                        fallback=move || view! { <EmptyState on_add=move || add_open.set(true) /> }
                    >
                        <div class="flex h-64 items-center justify-center">
                            <Spinner class="size-8 text-neutral-400" />
                        </div>
                    </Show>
                }
            >
                <div class="grid gap-0 border border-neutral-800 md:grid-cols-2 lg:grid-cols-3">
                    <For
                        each=move || channels.get()
                        key=|c| c.channel_id.clone()
                        children=move |c| {
                            let id = c.channel_id.clone();
                            let name = c.name.clone();
                            let href = format!("/channel/{id}");
                            let delete_id = id.clone();
                            let delete_name = name.clone();
                            view! {
                                <div class="relative border-b border-r border-neutral-800 p-6 transition-colors hover:bg-white/[0.02]">
                                    <div class="flex items-start gap-4">
                                        {c.thumbnail_url.clone().map(|src| view! {
                                            <img src=src alt=name.clone() class="h-12 w-12 border border-neutral-800" />
                                        })}
                                        <div class="min-w-0 flex-1">
                                            <a href=href class="block truncate font-serif text-lg text-[#e5e5e5] hover:underline">
                                                {name.clone()}
                                            </a>
                                            <p class="mt-1 text-[10px] uppercase tracking-widest text-neutral-600">
                                                {crate::util::format_count(c.subscriber_count.unwrap_or(0))}
                                                " subscribers"
                                            </p>
                                        </div>
                                        <button
                                            class="p-2 text-neutral-600 transition-colors hover:text-red-400"
                                            aria-label="Delete channel"
                                            on:click=move |_| on_delete(delete_id.clone(), delete_name.clone())
                                        >
                                            "×"
                                        </button>
                                    </div>

                                    <div class="mt-6 grid grid-cols-3 gap-4 border-t border-neutral-800 pt-4">
                                        <div class="text-center">
                                            <StatValue>{crate::util::format_count(c.total_comments)}</StatValue>
                                            <StatLabel>"Comments"</StatLabel>
                                        </div>
                                        <div class="text-center">
                                            <StatValue>{c.total_videos_analyzed.to_string()}</StatValue>
                                            <StatLabel>"Analyzed"</StatLabel>
                                        </div>
                                        <div class="text-center">
                                            <StatValue>{crate::util::format_count(c.video_count.unwrap_or(0))}</StatValue>
                                            <StatLabel>"Videos"</StatLabel>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>
        </div>

        <Dialog open=add_open>
            <DialogHeader>
                <DialogTitle>"Add YouTube channel"</DialogTitle>
                <DialogDescription>"Comments are analyzed after the first sync"</DialogDescription>
            </DialogHeader>
            <DialogBody>
                <div class="flex flex-col gap-1.5">
                    <Label html_for="channel_url">"Channel URL or ID"</Label>
                    <Input
                        id="channel_url"
                        placeholder="https://youtube.com/@channelname"
                        bind_value=channel_url
                    />
                </div>

                <Show when=move || add_error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        add_error.get().map(|e| view! {
                            <Alert class="border-red-900/60">
                                <AlertDescription class="text-red-400 text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                <Button
                    class="w-full"
                    attr:disabled=move || adding.get() || channel_url.get().trim().is_empty()
                    on:click=on_add
                >
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || adding.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if adding.get() { "Adding..." } else { "Add channel" }}
                    </span>
                </Button>
            </DialogBody>
        </Dialog>

        <SyncLogDialog open=sync_open channel_id=sync_channel_id />
    }
}

#[component]
fn EmptyState(on_add: impl Fn() + Clone + Send + Sync + 'static) -> impl IntoView {
    view! {
        <div class="relative border border-neutral-800">
            <GridCorner corner=Corner::TopLeft />
            <GridCorner corner=Corner::TopRight />
            <GridCorner corner=Corner::BottomLeft />
            <GridCorner corner=Corner::BottomRight />
            <div class="flex flex-col items-center justify-center py-20">
                <h2 class="mb-2 font-serif text-xl text-[#e5e5e5]">"No channels yet"</h2>
                <p class="mb-6 max-w-sm text-center text-sm text-neutral-500">
                    "Add your first YouTube channel to start analyzing comments."
                </p>
                <Button on:click=move |_| on_add()>"+ Add channel"</Button>
            </div>
        </div>
    }
}
