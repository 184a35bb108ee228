use super::{ChannelRouteParams, PageHeader, Workspace};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Spinner};
use crate::models::ChatMessage;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

const HISTORY_LIMIT: u64 = 20;

#[component]
pub fn ChatPage() -> impl IntoView {
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
            <ChatContent channel_id=Signal::derive(channel_id) />
        </Workspace>
    }
}

#[component]
fn ChatContent(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    let history: RwSignal<Vec<ChatMessage>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let sending: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let draft: RwSignal<String> = RwSignal::new(String::new());

    Effect::new(move |_| {
        let Some(id) = channel_id.get() else {
            history.set(vec![]);
            return;
        };
        loading.set(true);
        error.set(None);
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.get_chat_history(&id, HISTORY_LIMIT).await {
                Ok(messages) => history.set(messages),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    });

    let on_send = move || {
        let Some(id) = channel_id.get_untracked() else {
            return;
        };
        let message = draft.get_untracked().trim().to_string();
        if message.is_empty() || sending.get_untracked() {
            return;
        }

        sending.set(true);
        error.set(None);

        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.send_chat(&id, &message).await {
                Ok(resp) => {
                    draft.set(String::new());
                    history.update(|h| {
                        h.push(ChatMessage {
                            user_message: message,
                            ai_response: resp.response,
                            timestamp: resp.timestamp,
                        })
                    });
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            sending.set(false);
        });
    };

    let on_clear = move |_| {
        let Some(id) = channel_id.get_untracked() else {
            return;
        };
        let confirmed = window()
            .confirm_with_message("Clear the chat history for this channel?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.clear_chat_history(&id).await {
                Ok(_) => history.set(vec![]),
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Failed to clear history: {e}"));
                }
            }
        });
    };

    view! {
        <PageHeader title="AI Chat" subtitle="Ask about your comments".to_string()>
            <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_clear>
                "Clear history"
            </Button>
        </PageHeader>

        <div class="flex flex-1 flex-col gap-4 p-8">
            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| view! {
                        <div class="border border-red-900/60 px-4 py-3 text-sm text-red-400">{e}</div>
                    })
                }}
            </Show>

            <div class="flex-1 overflow-y-auto border border-neutral-800 p-4">
                <Show
                    when=move || !history.get().is_empty()
                    fallback=move || view! {
                        <div class="flex h-40 items-center justify-center">
                            <Show when=move || loading.get() fallback=|| view! {
                                <p class="max-w-sm text-center text-xs leading-relaxed text-neutral-600">
                                    "Ask anything about this channel's comments — recurring complaints, video ideas people request, how sentiment shifted after an upload."
                                </p>
                            }>
                                <Spinner class="text-neutral-400" />
                            </Show>
                        </div>
                    }
                >
                    <ul class="flex flex-col gap-4">
                        {move || {
                            history
                                .get()
                                .into_iter()
                                .map(|m| view! {
                                    <li class="flex flex-col gap-2">
                                        <div class="self-end border border-neutral-700 bg-white/[0.04] px-3 py-2 text-sm text-[#e5e5e5]">
                                            {m.user_message.clone()}
                                        </div>
                                        <div class="max-w-[85%] self-start border border-neutral-800 px-3 py-2 text-sm leading-relaxed text-neutral-300">
                                            {m.ai_response.clone()}
                                        </div>
                                    </li>
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </div>

            <form
                class="flex items-center gap-2"
                on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    on_send();
                }
            >
                <Input
                    class="flex-1"
                    placeholder="Ask about your comments..."
                    bind_value=draft
                />
                <Button attr:disabled=move || sending.get() || draft.get().trim().is_empty()>
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || sending.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if sending.get() { "Thinking..." } else { "Send" }}
                    </span>
                </Button>
            </form>
        </div>
    }
}
