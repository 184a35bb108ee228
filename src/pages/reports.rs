use super::{ChannelRouteParams, PageHeader, Workspace};
use crate::api::CreateReportRequest;
use crate::components::ui::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::models::{Report, ReportStatus};
use crate::state::AppContext;
use crate::util::{short_date, yyyy_mm_dd_days_ago};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn report_variant(status: ReportStatus) -> BadgeVariant {
    match status {
        ReportStatus::Generating => BadgeVariant::Warning,
        ReportStatus::Completed => BadgeVariant::Success,
        ReportStatus::Error => BadgeVariant::Destructive,
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
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
            <ReportsContent channel_id=Signal::derive(channel_id) />
        </Workspace>
    }
}

#[component]
fn ReportsContent(#[prop(into)] channel_id: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    let reports: RwSignal<Vec<Report>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let title: RwSignal<String> = RwSignal::new(String::new());
    let date_from: RwSignal<String> = RwSignal::new(String::new());
    let date_to: RwSignal<String> = RwSignal::new(String::new());
    let creating: RwSignal<bool> = RwSignal::new(false);

    // Default range: the last 30 days.
    Effect::new(move |_| {
        if date_from.get_untracked().is_empty() {
            date_from.set(yyyy_mm_dd_days_ago(30));
            date_to.set(yyyy_mm_dd_days_ago(0));
        }
    });

    let reload = move |id: String| {
        loading.set(true);
        error.set(None);
        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.list_reports(&id).await {
                Ok(list) => reports.set(list),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        match channel_id.get() {
            Some(id) => reload(id),
            None => reports.set(vec![]),
        }
    });

    let on_create = move |_| {
        let Some(id) = channel_id.get_untracked() else {
            return;
        };
        let from = date_from.get_untracked();
        let to = date_to.get_untracked();
        if from.is_empty() || to.is_empty() {
            return;
        }

        creating.set(true);
        let api = api_client.get_untracked();
        spawn_local(async move {
            let req = CreateReportRequest {
                channel_id: id.clone(),
                date_from: from,
                date_to: to,
                title: Some(title.get_untracked())
                    .filter(|t| !t.trim().is_empty()),
            };
            match api.create_report(&req).await {
                Ok(report) => {
                    title.set(String::new());
                    reports.update(|list| list.insert(0, report));
                }
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Failed to create report: {e}"));
                }
            }
            creating.set(false);
        });
    };

    let on_delete = move |report: Report| {
        let Some(report_id) = report.id.clone() else {
            return;
        };
        let confirmed = window()
            .confirm_with_message(&format!("Delete report \"{}\"?", report.title))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let api = api_client.get_untracked();
        spawn_local(async move {
            match api.delete_report(&report_id).await {
                Ok(_) => {
                    reports.update(|list| list.retain(|r| r.id.as_deref() != Some(report_id.as_str())));
                }
                Err(e) => {
                    let _ = window().alert_with_message(&format!("Failed to delete report: {e}"));
                }
            }
        });
    };

    view! {
        <PageHeader title="Reports" subtitle="Periodic summaries for sharing".to_string() />

        <div class="flex flex-1 flex-col gap-6 p-8">
            <Card>
                <CardHeader>
                    <CardTitle class="text-sm">"New report"</CardTitle>
                    <CardDescription>"Aggregates comments in the chosen date range"</CardDescription>
                </CardHeader>
                <CardContent class="flex flex-wrap items-end gap-4">
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="report_title">"Title (optional)"</Label>
                        <Input id="report_title" class="h-8 w-56 text-xs" placeholder="October wrap-up" bind_value=title />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="report_from">"From"</Label>
                        <Input id="report_from" r#type="date" class="h-8 text-xs" bind_value=date_from />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="report_to">"To"</Label>
                        <Input id="report_to" r#type="date" class="h-8 text-xs" bind_value=date_to />
                    </div>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || creating.get() || channel_id.get().is_none()
                        on:click=on_create
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || creating.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || if creating.get() { "Generating..." } else { "Generate" }}
                        </span>
                    </Button>
                </CardContent>
            </Card>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| view! {
                        <div class="border border-red-900/60 px-4 py-3 text-sm text-red-400">{e}</div>
                    })
                }}
            </Show>

            <div class="border border-neutral-800">
                <Show
                    when=move || !reports.get().is_empty()
                    fallback=move || view! {
                        <div class="flex h-32 items-center justify-center">
                            <Show when=move || loading.get() fallback=|| view! {
                                <p class="text-xs text-neutral-600">"No reports yet."</p>
                            }>
                                <Spinner class="text-neutral-400" />
                            </Show>
                        </div>
                    }
                >
                    <ul class="divide-y divide-neutral-800">
                        <For
                            each=move || reports.get()
                            key=|r| (r.id.clone(), r.status)
                            children=move |r| {
                                let download_href = r
                                    .id
                                    .clone()
                                    .filter(|_| r.status == ReportStatus::Completed)
                                    .map(|id| api_client.get_untracked().report_download_url(&id));
                                let report_for_delete = r.clone();
                                view! {
                                    <li class="flex items-center gap-4 px-4 py-3">
                                        <div class="min-w-0 flex-1">
                                            <p class="truncate text-sm text-[#e5e5e5]">{r.title.clone()}</p>
                                            <p class="text-[10px] uppercase tracking-widest text-neutral-600">
                                                {format!("{} – {}", short_date(&r.date_from), short_date(&r.date_to))}
                                            </p>
                                        </div>
                                        <Badge variant=report_variant(r.status)>{r.status.to_string()}</Badge>
                                        {download_href.map(|href| view! {
                                            <Button variant=ButtonVariant::Outline size=ButtonSize::Sm href=href>
                                                "Download"
                                            </Button>
                                        })}
                                        <Button
                                            variant=ButtonVariant::Destructive
                                            size=ButtonSize::Sm
                                            on:click=move |_| on_delete(report_for_delete.clone())
                                        >
                                            "Delete"
                                        </Button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>
        </div>
    }
}
