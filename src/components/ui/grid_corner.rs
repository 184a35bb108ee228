#![allow(dead_code)]

use icons::Plus;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// The small "+" registration marks sitting on panel corners — the product's
/// signature grid look.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn position_class(self) -> &'static str {
        match self {
            Corner::TopLeft => "-top-[5px] -left-[5px]",
            Corner::TopRight => "-top-[5px] -right-[5px]",
            Corner::BottomLeft => "-bottom-[5px] -left-[5px]",
            Corner::BottomRight => "-bottom-[5px] -right-[5px]",
        }
    }
}

#[component]
pub fn GridCorner(
    #[prop(optional)] corner: Corner,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "absolute z-10 text-neutral-600 bg-[#0f0f0f]",
        corner.position_class(),
        class
    );

    view! {
        <div class=merged_class>
            <Plus class="size-2.5" />
        </div>
    }
}

/// All four corners at once. The parent needs `relative` positioning.
#[component]
pub fn GridCorners() -> impl IntoView {
    view! {
        <GridCorner corner=Corner::TopLeft />
        <GridCorner corner=Corner::TopRight />
        <GridCorner corner=Corner::BottomLeft />
        <GridCorner corner=Corner::BottomRight />
    }
}
