use crate::config::{default_config, load_config, AppConfig};
use crate::domain::a001_object::api::{HttpObjectService, SharedObjectService};
use crate::domain::a002_object_type::events::TypeEditorEvent;
use crate::domain::catalogs::CatalogEvent;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::SidePanelService;
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::set_api_port;
use crate::shared::event_bus::EventBus;
use crate::shared::storage::{LocalStorageStore, SharedStore};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = RwSignal::new(default_config());
    spawn_local(async move {
        let loaded: AppConfig = load_config().await;
        set_api_port(loaded.api_port);
        log::info!("config loaded: client={:?}", loaded.client);
        config.set(loaded);
    });
    provide_context(config);

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());
    provide_context(SidePanelService::new());

    let store: SharedStore = Arc::new(LocalStorageStore);
    provide_context(store);
    let service: SharedObjectService = Arc::new(HttpObjectService);
    provide_context(service);

    provide_context(EventBus::<TypeEditorEvent>::new());
    provide_context(EventBus::<CatalogEvent>::new());

    view! {
        <ConfigProvider>
            <AppRoutes />
        </ConfigProvider>
    }
}
