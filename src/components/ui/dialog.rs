#![allow(dead_code)]

use icons::X;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_ui::clx;
use tw_merge::*;

mod components {
    use super::*;
    clx! {DialogHeader, div, "flex flex-col gap-2 pr-8"}
    clx! {DialogTitle, h3, "font-serif text-xl leading-none text-[#e5e5e5]"}
    clx! {DialogDescription, p, "text-[10px] uppercase tracking-[0.2em] text-neutral-600"}
    clx! {DialogBody, div, "flex flex-col gap-4 pt-4"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 pt-4 sm:flex-row sm:justify-end"}
}

#[allow(unused_imports)]
pub use components::*;

/// Signal-driven modal.
///
/// The panel's children are unmounted while `open` is false, so anything
/// mounted inside (like the sync log stream) gets its `on_cleanup` run on
/// close — that is load-bearing for scoped-resource release, do not swap
/// this for a visibility toggle.
#[component]
pub fn Dialog(
    #[prop(into)] open: RwSignal<bool>,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let panel_class = tw_merge!(
        "fixed left-1/2 top-1/2 z-50 w-full max-w-lg -translate-x-1/2 -translate-y-1/2 border border-neutral-800 bg-[#0f0f0f] p-6 text-[#e5e5e5] shadow-2xl",
        class
    );

    // Esc closes while open. The listener unregisters with this component.
    let _esc_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && open.get_untracked() {
            open.set(false);
        }
    });

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-40 bg-black/60"
                on:click=move |_| open.set(false)
            />
            <div class=panel_class.clone() data-name="DialogContent">
                <button
                    type="button"
                    class="absolute right-4 top-4 p-1 text-neutral-600 transition-colors hover:text-[#e5e5e5] [&_svg]:size-4"
                    aria-label="Close dialog"
                    on:click=move |_| open.set(false)
                >
                    <X />
                </button>
                {children()}
            </div>
        </Show>
    }
}
