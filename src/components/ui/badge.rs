use leptos::prelude::*;
use tw_merge::*;

/// Small uppercase status chip used for sync states and log levels.
#[component]
pub fn Badge(
    #[prop(into, optional)] variant: Signal<BadgeVariant>,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let merged_class = move || {
        let variant = variant.get();
        let badge = BadgeClass { variant };
        badge.with_class(class.clone())
    };

    view! {
        <span class=merged_class data-name="Badge">
            {children()}
        </span>
    }
}

/* ========================================================== */
/*                       🧬 STRUCT 🧬                         */
/* ========================================================== */

#[derive(TwClass, Default)]
#[tw(class = "inline-flex items-center border px-2 py-0.5 text-[10px] uppercase tracking-widest")]
pub struct BadgeClass {
    variant: BadgeVariant,
}

#[derive(TwVariant)]
pub enum BadgeVariant {
    #[tw(default, class = "border-neutral-800 text-neutral-400")]
    Neutral,
    #[tw(class = "border-emerald-900/60 text-emerald-400")]
    Success,
    #[tw(class = "border-amber-900/60 text-amber-400")]
    Warning,
    #[tw(class = "border-red-900/60 text-red-400")]
    Destructive,
}
