#![allow(dead_code)]

use leptos::prelude::*;
use tw_merge::*;

#[allow(dead_code)]
#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "flex items-center gap-2 text-[10px] uppercase tracking-widest text-neutral-600 leading-none select-none",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}
