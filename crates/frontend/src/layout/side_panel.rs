use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

/// Сервис боковой панели редактирования (одна на приложение)
#[derive(Clone, Copy)]
pub struct SidePanelService {
    is_visible: RwSignal<bool>,
}

impl SidePanelService {
    pub fn new() -> Self {
        Self {
            is_visible: RwSignal::new(false),
        }
    }

    pub fn show(&self) {
        self.is_visible.set(true);
    }

    pub fn hide(&self) {
        self.is_visible.set(false);
    }

    /// Hides on the next tick, after the current DOM event has finished dispatching.
    pub fn hide_deferred(&self) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.hide();
        });
    }

    pub fn is_open(&self) -> bool {
        self.is_visible.get()
    }
}

/// Панель справа поверх контента таба.
#[component]
pub fn SidePanel(
    #[prop(into)] title: Signal<String>,
    service: SidePanelService,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || service.is_open()>
            <aside class="side-panel">
                <div class="side-panel__header">
                    <span class="side-panel__title">{move || title.get()}</span>
                    <button class="side-panel__close" on:click=move |_| service.hide()>
                        {icon("x")}
                    </button>
                </div>
                <div class="side-panel__body">{children()}</div>
            </aside>
        </Show>
    }
}
