use crate::pages::{
    AnalyticsPage, ChannelOverviewPage, ChatPage, CommentsPage, CommunityPage, DashboardPage,
    LoginPage, ReportsPage, RootPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-neutral-600">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("dashboard") view=DashboardPage />
                <Route path=path!("channel/:channel_id") view=ChannelOverviewPage />
                <Route path=path!("channel/:channel_id/comments") view=CommentsPage />
                <Route path=path!("channel/:channel_id/analytics") view=AnalyticsPage />
                <Route path=path!("channel/:channel_id/community") view=CommunityPage />
                <Route path=path!("channel/:channel_id/reports") view=ReportsPage />
                <Route path=path!("channel/:channel_id/chat") view=ChatPage />
                <Route path=path!("") view=RootPage />
            </Routes>
        </Router>
    }
}
