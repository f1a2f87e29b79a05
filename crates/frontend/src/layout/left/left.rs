use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Левая зона с меню справочников. Свёрнутая зона оставляет только кнопку.
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let collapsed = move || !ctx.left_open.get();

    view! {
        <div data-zone="left" class="left" class:left--collapsed=collapsed>
            <button
                class="left__toggle"
                title=move || if collapsed() { "Показать меню" } else { "Скрыть меню" }
                on:click=move |_| ctx.toggle_left()
            >
                {move || if collapsed() { icon("layers") } else { icon("arrow-left") }}
            </button>
            <div class="left__content" class:hidden=collapsed>
                {children()}
            </div>
        </div>
    }
}
