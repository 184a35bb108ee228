mod analytics;
mod channel;
mod chat;
mod comments;
mod community;
mod dashboard;
mod reports;
mod sync_log;

pub use analytics::AnalyticsPage;
pub use channel::ChannelOverviewPage;
pub use chat::ChatPage;
pub use comments::CommentsPage;
pub use community::CommunityPage;
pub use dashboard::DashboardPage;
pub use reports::ReportsPage;

use crate::components::layout::{AppSidebar, MainContent};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Corner, GridCorner, Spinner,
};
use crate::state::AppContext;
use crate::storage::{save_session_token, save_user_to_storage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ChannelRouteParams {
    pub channel_id: Option<String>,
}

/// Authenticated shell: sidebar plus page content. Unauthenticated visitors
/// see the login screen instead.
#[component]
pub fn Workspace(
    #[prop(optional, into)] channel_id: Signal<Option<String>>,
    children: ChildrenFn,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=move || view! { <LoginPage /> }>
            <div class="min-h-screen bg-[#0f0f0f] text-[#e5e5e5]">
                <AppSidebar channel_id=channel_id />
                <MainContent>
                    {move || children.with_value(|c| c())}
                </MainContent>
            </div>
        </Show>
    }
}

/// Page banner in the product's grid look: serif title, tracking subtitle,
/// action slot on the right.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Signal<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <header class="relative border-b border-neutral-800 bg-[#0f0f0f]">
            <GridCorner corner=Corner::TopLeft />
            <GridCorner corner=Corner::TopRight />
            <div class="flex h-16 items-center justify-between px-8">
                <div>
                    <h1 class="font-serif text-lg text-[#e5e5e5]">{title}</h1>
                    <p class="text-[10px] uppercase tracking-[0.2em] text-neutral-600">
                        {move || subtitle.get()}
                    </p>
                </div>
                <div class="flex items-center gap-4">{children.map(|c| c())}</div>
            </div>
        </header>
    }
}

/// Pull the provider access token out of the OAuth redirect fragment
/// (`#access_token=...&token_type=Bearer&...`).
fn token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .trim_start_matches('?')
        .split('&')
        .find_map(|kv| kv.strip_prefix("access_token="))
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn google_oauth_url(client_id: &str, origin: &str) -> String {
    format!(
        "https://accounts.google.com/o/oauth2/v2/auth?client_id={client_id}&redirect_uri={}&response_type=token&scope=openid%20email%20profile",
        urlencoding::encode(&format!("{origin}/login"))
    )
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;
    let current_user = app_state.0.current_user;

    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let exchanging: RwSignal<bool> = RwSignal::new(false);

    // Returning from the provider: exchange its access token for a backend
    // session, persist it, and land on the dashboard.
    Effect::new(move |_| {
        if exchanging.get_untracked() {
            return;
        }
        let fragment = window().location().hash().unwrap_or_default();
        let Some(provider_token) = token_from_fragment(&fragment) else {
            return;
        };

        exchanging.set(true);
        error.set(None);

        let api = api_client.get_untracked();
        spawn_local(async move {
            // Best effort: the backend insists on an email, so a failed
            // profile lookup surfaces as its error message.
            let userinfo = match crate::api::fetch_google_userinfo(&provider_token).await {
                Ok(info) => info,
                Err(e) => {
                    leptos::logging::warn!("provider profile lookup failed: {e}");
                    serde_json::json!({})
                }
            };
            let user = crate::api::provider_user_payload(&userinfo);

            match api.auth_google(&provider_token, user).await {
                Ok(resp) => {
                    save_session_token(&resp.access_token);
                    if let Some(user) = resp.user.clone() {
                        save_user_to_storage(&user);
                        current_user.set(Some(user));
                    }
                    let mut client = api_client.get_untracked();
                    client.set_token(resp.access_token);
                    api_client.set(client);
                    let _ = window().location().set_href("/dashboard");
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    exchanging.set(false);
                }
            }
        });
    });

    let sign_in_href = {
        let client_id = crate::api::EnvConfig::new().google_client_id;
        let origin = window().location().origin().unwrap_or_default();
        client_id.map(|id| google_oauth_url(&id, &origin))
    };
    let has_provider = sign_in_href.is_some();

    view! {
        <div class="min-h-screen bg-[#0f0f0f] text-[#e5e5e5]">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 text-center">
                    <a href="/" class="font-serif text-lg text-[#e5e5e5]">"CreatorPulse"</a>
                    <p class="text-[10px] uppercase tracking-[0.3em] text-neutral-600">
                        "Comment intelligence"
                    </p>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle>"Sign in"</CardTitle>
                        <CardDescription>"Connect with your Google account"</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <div class="flex flex-col gap-4">
                            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                                {move || {
                                    error.get().map(|e| view! {
                                        <Alert class="border-red-900/60">
                                            <AlertDescription class="text-red-400 text-xs">{e}</AlertDescription>
                                        </Alert>
                                    })
                                }}
                            </Show>

                            <Show
                                when=move || !exchanging.get()
                                fallback=|| view! {
                                    <div class="flex items-center gap-2 text-xs text-neutral-400">
                                        <Spinner />
                                        "Completing sign-in..."
                                    </div>
                                }
                            >
                                {match sign_in_href.clone() {
                                    Some(href) => view! {
                                        <Button class="w-full" href=href>
                                            "Continue with Google"
                                        </Button>
                                    }
                                    .into_any(),
                                    None => view! {
                                        <p class="text-xs text-neutral-500">
                                            "Sign-in is not configured for this deployment (missing GOOGLE_CLIENT_ID)."
                                        </p>
                                    }
                                    .into_any(),
                                }}
                            </Show>

                            <Show when=move || has_provider fallback=|| ().into_view()>
                                <p class="text-[10px] leading-relaxed text-neutral-600">
                                    "You will be redirected back here after signing in."
                                </p>
                            </Show>
                        </div>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    // Signed-in visitors land on the dashboard directly.
    Effect::new(move |_| {
        if api_client.get_untracked().is_authenticated() {
            let _ = window().location().set_href("/dashboard");
        }
    });

    view! {
        <div class="min-h-screen bg-[#0f0f0f] text-[#e5e5e5]">
            <div class="mx-auto flex min-h-screen w-full max-w-2xl flex-col items-center justify-center px-4 text-center">
                <p class="text-[10px] uppercase tracking-[0.3em] text-neutral-600">
                    "CreatorPulse"
                </p>
                <h1 class="mt-4 font-serif text-4xl leading-tight">
                    "Know what your audience is really saying."
                </h1>
                <p class="mt-4 max-w-md text-sm text-neutral-400">
                    "Connect a YouTube channel, let the backend read every comment, and browse sentiment, tags, community stats, and AI answers in one dashboard."
                </p>
                <div class="mt-8">
                    <Button href="/login" variant=ButtonVariant::Default>
                        "Get started"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_token_is_extracted() {
        assert_eq!(
            token_from_fragment("#access_token=ya29.abc&token_type=Bearer&expires_in=3599"),
            Some("ya29.abc".to_string())
        );
        assert_eq!(
            token_from_fragment("access_token=tok"),
            Some("tok".to_string())
        );
    }

    #[test]
    fn fragment_without_token_yields_none() {
        assert_eq!(token_from_fragment(""), None);
        assert_eq!(token_from_fragment("#state=xyz&scope=email"), None);
        assert_eq!(token_from_fragment("#access_token="), None);
    }

    #[test]
    fn oauth_url_encodes_redirect() {
        let url = google_oauth_url("client-1", "https://app.creatorpulse.dev");
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.creatorpulse.dev%2Flogin"));
        assert!(url.contains("response_type=token"));
    }
}
