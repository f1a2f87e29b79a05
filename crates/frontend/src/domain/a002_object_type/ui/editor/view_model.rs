use contracts::domain::a002_object_type::ObjectType;
use contracts::domain::common::soft_delete::active_only;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model::{self, TypeEditorState};
use crate::domain::a001_object::api::{use_object_service, SharedObjectService};
use crate::domain::a002_object_type::events::TypeEditorEvent;
use crate::domain::catalogs::CatalogEvent;
use crate::layout::SidePanelService;
use crate::shared::event_bus::EventBus;

/// Редактор типа объекта в боковой панели
#[derive(Clone, Copy)]
pub struct ObjectTypeEditorVm {
    pub state: RwSignal<TypeEditorState>,
    pub submitted: RwSignal<bool>,
    panel: SidePanelService,
    service: StoredValue<SharedObjectService>,
    events: StoredValue<EventBus<TypeEditorEvent>>,
    catalog_events: StoredValue<EventBus<CatalogEvent>>,
}

impl ObjectTypeEditorVm {
    /// The side panel is hidden when the owning view is disposed.
    pub fn new() -> Self {
        let panel = use_context::<SidePanelService>().expect("SidePanelService not provided");
        on_cleanup(move || panel.hide());

        Self {
            state: RwSignal::new(TypeEditorState::default()),
            submitted: RwSignal::new(false),
            panel,
            service: StoredValue::new(use_object_service()),
            events: StoredValue::new(
                use_context::<EventBus<TypeEditorEvent>>().expect("TypeEditorEvent bus not provided"),
            ),
            catalog_events: StoredValue::new(
                use_context::<EventBus<CatalogEvent>>().expect("CatalogEvent bus not provided"),
            ),
        }
    }

    fn is_busy(&self) -> bool {
        self.state.with_untracked(|s| s.disable_save)
    }

    pub fn create(&self) {
        if self.is_busy() {
            return;
        }
        self.state.update(|s| s.create());
        self.submitted.set(false);
        self.panel.show();
    }

    pub fn edit(&self, entity: ObjectType) {
        if self.is_busy() {
            return;
        }
        self.state.update(|s| s.edit(entity));
        self.submitted.set(false);
        self.panel.show();
    }

    /// Form edits are dropped while save or archive is in flight, so the
    /// state written back after the request never loses input.
    pub fn update_field(&self, update: impl FnOnce(&mut ObjectType)) {
        self.state.update(|s| {
            s.apply_edit(update);
        });
    }

    pub fn title(&self) -> String {
        self.state.with(|s| {
            if s.is_create {
                "Новый тип объекта".to_string()
            } else {
                s.snapshot().object_type_name.clone()
            }
        })
    }

    pub fn submit(&self) {
        self.submitted.set(true);
        let ready = self
            .state
            .with_untracked(|s| s.is_form_valid() && !s.disable_save && !s.readonly);
        if !ready {
            return;
        }
        self.state.update(|s| s.disable_save = true);
        let vm = *self;
        let service = self.service.get_value();
        spawn_local(async move {
            let mut state = vm.state.get_untracked();
            let result = model::submit(&*service, &mut state).await;
            vm.state.set(state);
            match result {
                Ok(saved) => {
                    vm.emit(TypeEditorEvent::Changed(Some(saved)));
                    vm.emit(TypeEditorEvent::Updated);
                    vm.republish_types();
                    vm.panel.hide();
                }
                Err(e) => log::warn!("object type not saved: {}", e.user_message()),
            }
        });
    }

    pub fn change_delete_flag(&self) {
        self.state.update(|s| s.disable_save = true);
        let vm = *self;
        let service = self.service.get_value();
        spawn_local(async move {
            let mut state = vm.state.get_untracked();
            let result = model::change_delete_flag(&*service, &mut state).await;
            vm.state.set(state);
            match result {
                Ok(_) => {
                    vm.emit(TypeEditorEvent::Filter);
                    vm.emit(TypeEditorEvent::Changed(None));
                    vm.republish_types();
                }
                Err(e) => log::warn!("object type not saved: {}", e.user_message()),
            }
        });
    }

    pub fn hide(&self) {
        self.panel.hide_deferred();
    }

    fn emit(&self, event: TypeEditorEvent) {
        self.events.with_value(|bus| bus.emit(event));
    }

    /// Рассылает актуальный список типов выпадающим спискам карточек.
    fn republish_types(&self) {
        let service = self.service.get_value();
        let bus = self.catalog_events.get_value();
        spawn_local(async move {
            match service.object_types().await {
                Ok(types) => bus.emit(CatalogEvent::ObjectTypesChanged {
                    active: active_only(&types),
                }),
                Err(e) => log::warn!("object types not reloaded: {}", e),
            }
        });
    }
}
