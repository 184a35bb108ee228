use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full border border-neutral-800 bg-[#0f0f0f] px-4 py-3 text-sm"}
    clx! {AlertTitle, h4, "mb-1 font-medium tracking-tight leading-none"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

#[allow(unused_imports)]
pub use components::*;
