use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "relative flex flex-col border border-neutral-800 bg-[#0f0f0f] text-[#e5e5e5]"}
    clx! {CardHeader, div, "flex flex-col gap-1.5 border-b border-neutral-800 px-6 py-4"}
    clx! {CardTitle, h2, "font-serif text-lg leading-none"}
    clx! {CardDescription, p, "text-[10px] uppercase tracking-[0.2em] text-neutral-600"}
    clx! {CardContent, div, "px-6 py-4"}
    clx! {CardFooter, footer, "flex items-center gap-2 border-t border-neutral-800 px-6 py-4"}

    clx! {CardList, ul, "flex flex-col divide-y divide-neutral-800"}
    clx! {CardItem, li, "flex items-center gap-3 py-3"}

    // Stat tiles used across dashboard/analytics/community.
    clx! {StatValue, p, "font-serif text-lg text-[#e5e5e5]"}
    clx! {StatLabel, p, "text-[10px] uppercase tracking-wider text-neutral-600"}
}

#[allow(unused_imports)]
pub use components::*;
