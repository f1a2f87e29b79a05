use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::tabs::registry::TAB_OBJECT_LIST;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::Shell;
use leptos::prelude::*;

/// Корень приложения: один layout с табами.
///
/// Tabs are restored from the address bar; with nothing to restore the
/// objects list is opened.
#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    ctx.init_router_integration();
    if ctx.opened.with_untracked(|tabs| tabs.is_empty()) {
        ctx.open_tab(TAB_OBJECT_LIST, tab_label_for_key(TAB_OBJECT_LIST));
    }

    view! {
        <Shell>
            <Sidebar />
        </Shell>
    }
}
