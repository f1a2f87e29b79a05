//! Центральная зона: полоса табов и их контент.

use crate::layout::global_context::{AppGlobalContext, Tab};
use crate::layout::tabs::TabPage;
use leptos::ev;
use leptos::prelude::*;

const CONFIRM_CLOSE_DIRTY: &str = "Есть несохранённые изменения. Закрыть вкладку?";

/// Вкладку с несохранёнными изменениями закрываем только после подтверждения.
fn may_close(tab: &Tab, confirm: impl FnOnce() -> bool) -> bool {
    !tab.dirty || confirm()
}

fn confirm_in_browser() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(CONFIRM_CLOSE_DIRTY).ok())
        .unwrap_or(true)
}

#[component]
fn TabHeader(tab: Tab) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let key = StoredValue::new(tab.key.clone());
    let is_active =
        Memo::new(move |_| key.with_value(|k| ctx.active.get().as_deref() == Some(k.as_str())));

    let on_close = {
        let tab = tab.clone();
        move |ev: ev::MouseEvent| {
            ev.stop_propagation();
            if may_close(&tab, confirm_in_browser) {
                ctx.close_tab(&tab.key);
            }
        }
    };

    view! {
        <div
            class="tab"
            class:active=is_active
            class:tab--dirty=tab.dirty
            title=tab.title.clone()
            on:click=move |_| key.with_value(|k| ctx.activate_tab(k))
        >
            <span>{tab.title.clone()}</span>
            {tab.dirty.then_some(" ●")}
            <button class="tab-close" on:click=on_close>"×"</button>
        </div>
    }
}

#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <div class="tabs-bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| (tab.key.clone(), tab.title.clone(), tab.dirty)
                    children=move |tab| view! { <TabHeader tab=tab /> }
                />
            </div>
            <Show
                when=move || ctx.opened.with(|tabs| !tabs.is_empty())
                fallback=|| view! { <div class="tab-content__empty">"Выберите справочник в меню слева"</div> }
            >
                <div class="tab-content">
                    <For
                        each=move || ctx.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: Tab| view! { <TabPage tab=tab tabs_store=ctx /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(dirty: bool) -> Tab {
        Tab {
            key: "a001_object_detail_1".into(),
            title: "P-1 Насос".into(),
            dirty,
        }
    }

    #[test]
    fn test_clean_tab_closes_without_asking() {
        assert!(may_close(&tab(false), || panic!("must not ask")));
    }

    #[test]
    fn test_dirty_tab_follows_confirmation() {
        assert!(may_close(&tab(true), || true));
        assert!(!may_close(&tab(true), || false));
    }
}
