use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap text-xs uppercase tracking-widest font-medium transition-colors disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 [&_svg]:shrink-0 outline-none hover:cursor-pointer select-none touch-manipulation [-webkit-tap-highlight-color:transparent]",
        variants: {
            variant: {
                Default: "bg-[#e5e5e5] text-[#0f0f0f] hover:bg-white",
                Destructive: "bg-transparent border border-red-900/60 text-red-400 hover:bg-red-950/40",
                Outline: "bg-transparent border border-neutral-800 text-neutral-400 hover:text-[#e5e5e5] hover:bg-white/[0.02]",
                Ghost: "bg-transparent text-neutral-500 hover:text-[#e5e5e5]",
                Link: "text-[#e5e5e5] underline underline-offset-4 hover:text-white normal-case tracking-normal"
            },
            size: {
                Default: "h-9 px-4 py-2",
                Sm: "h-8 px-3 gap-1.5",
                Lg: "h-10 px-6",
                Icon: "size-9"
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
