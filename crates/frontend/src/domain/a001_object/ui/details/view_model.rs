//! Object details - ViewModel
//!
//! Reactive state of one object card. Loading, saving and archiving go
//! through [`ObjectService`] from context; rules live in [`super::model`].

use contracts::domain::a001_object::{ObjectId, ObjectRecord};
use contracts::domain::a004_object_competency::ObjectCompetencyId;
use contracts::domain::common::{AggregateId, SoftDeletable};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model::{self, ObjectRefField, SaveOutcome, DIRTY_FIELDS};
use crate::config::AppConfig;
use crate::domain::a001_object::api::{use_object_service, SharedObjectService, INSPECTION_OBJECTS};
use crate::domain::catalogs::{fetch_catalog, CatalogEvent, Catalogs, DropdownKind};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::layout::tabs::registry::{object_detail_key, TAB_OBJECT_LIST};
use crate::shared::dirty::Snapshot;
use crate::shared::dropdown::{filter_active, DropdownOption};
use crate::shared::event_bus::EventBus;
use crate::shared::list_utils::append_unique;
use crate::shared::print;

#[derive(Clone, Copy)]
pub struct ObjectDetailsVm {
    pub id: Option<ObjectId>,
    tab_key: StoredValue<String>,
    service: StoredValue<SharedObjectService>,
    ctx: AppGlobalContext,

    pub record: RwSignal<ObjectRecord>,
    snapshot: RwSignal<Snapshot<ObjectRecord>>,
    pub competencies: RwSignal<Vec<ObjectCompetencyId>>,

    pub readonly: RwSignal<bool>,
    pub is_changed: RwSignal<bool>,
    pub submitted: RwSignal<bool>,
    pub is_saving: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,

    pub catalogs: RwSignal<Catalogs>,
    pub uses_zones: Signal<bool>,
    searches: [RwSignal<String>; 5],
    options: [Memo<Vec<DropdownOption>>; 5],

    /// Кандидаты в родители (без удалённых)
    pub parents: RwSignal<Vec<ObjectRecord>>,
    pub parent_search: RwSignal<String>,
}

impl ObjectDetailsVm {
    pub fn new(id: Option<ObjectId>, tab_key: String) -> Self {
        let config = use_context::<RwSignal<AppConfig>>().expect("AppConfig not provided");
        let catalogs = RwSignal::new(Catalogs::default());
        let searches: [RwSignal<String>; 5] = std::array::from_fn(|_| RwSignal::new(String::new()));
        let options = DropdownKind::ALL.map(|kind| {
            let search = searches[kind.index()];
            Memo::new(move |_| {
                let text = search.get();
                catalogs.with(|c| c.options(kind, &text))
            })
        });

        Self {
            id,
            tab_key: StoredValue::new(tab_key),
            service: StoredValue::new(use_object_service()),
            ctx: use_context::<AppGlobalContext>().expect("AppGlobalContext not found"),
            record: RwSignal::new(ObjectRecord::default()),
            snapshot: RwSignal::new(Snapshot::take(&ObjectRecord::default())),
            competencies: RwSignal::new(Vec::new()),
            readonly: RwSignal::new(false),
            is_changed: RwSignal::new(false),
            submitted: RwSignal::new(false),
            is_saving: RwSignal::new(false),
            loading: RwSignal::new(id.is_some()),
            error: RwSignal::new(None),
            catalogs,
            uses_zones: Signal::derive(move || config.with(|c| c.uses_zones())),
            searches,
            options,
            parents: RwSignal::new(Vec::new()),
            parent_search: RwSignal::new(String::new()),
        }
    }

    fn service(&self) -> SharedObjectService {
        self.service.get_value()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.id.is_some()
    }

    pub fn search(&self, kind: DropdownKind) -> RwSignal<String> {
        self.searches[kind.index()]
    }

    pub fn options(&self, kind: DropdownKind) -> Memo<Vec<DropdownOption>> {
        self.options[kind.index()]
    }

    /// Non-deleted parents matching the parent search text.
    pub fn parent_options(&self) -> Vec<DropdownOption> {
        let search = self.parent_search.get();
        let own_id = self.id;
        self.parents.with(|parents| {
            filter_active(parents, &search, |o| &o.object_name)
                .into_iter()
                .filter(|o| o.object_id.is_some() && o.object_id != own_id)
                .filter_map(|o| {
                    o.object_id.map(|id| DropdownOption {
                        id: id.value(),
                        label: o.display_value(),
                    })
                })
                .collect()
        })
    }

    /// Starts every load of the card. Call once after construction.
    pub fn init(&self) {
        let vm = *self;
        let ctx = self.ctx;

        Effect::new(move |_| {
            let dirty = vm.is_changed.get();
            vm.tab_key.with_value(|key| ctx.set_tab_dirty(key, dirty));
        });

        let types_bus = use_context::<EventBus<CatalogEvent>>().expect("CatalogEvent bus not provided");
        let subscription = types_bus.subscribe(move |event| match event {
            CatalogEvent::ObjectTypesChanged { active } => {
                let active = active.clone();
                vm.catalogs.update(|c| c.types = active);
            }
        });
        on_cleanup(move || drop(subscription));

        self.load_catalogs();
        self.load_parents();
        match self.id {
            Some(id) => self.load(id),
            None => {
                let blank = ObjectRecord::default();
                self.snapshot.set(Snapshot::take(&blank));
                self.record.set(blank);
            }
        }
    }

    fn load_catalogs(&self) {
        let uses_zones = self.uses_zones.get_untracked();
        for kind in DropdownKind::enabled(uses_zones) {
            let catalogs = self.catalogs;
            let service = self.service();
            spawn_local(async move {
                match fetch_catalog(&*service, kind).await {
                    Ok(data) => catalogs.update(|c| c.apply(data)),
                    Err(e) => log::warn!("catalog {:?} not loaded: {}", kind, e),
                }
            });
        }
    }

    fn load_parents(&self) {
        let vm = *self;
        let service = self.service();
        spawn_local(async move {
            match service.all_objects().await {
                Ok(objects) => {
                    let active: Vec<ObjectRecord> =
                        objects.into_iter().filter(|o| o.is_active()).collect();
                    vm.parents.update(|p| {
                        append_unique(p, active, |o| o.object_id);
                    });
                    vm.ensure_parent();
                }
                Err(e) => log::warn!("objects for parent selector not loaded: {}", e),
            }
        });
    }

    fn load(&self, id: ObjectId) {
        let vm = *self;
        let service = self.service();
        spawn_local(async move {
            match service.get_object(id).await {
                Ok(mut record) => {
                    if record.qr.is_none() {
                        match service.generate_qr(id, false).await {
                            Ok(qr) => record.qr = qr,
                            Err(e) => log::warn!("QR of {} not loaded: {}", id, e),
                        }
                    }
                    let title = detail_tab_label(&record.object_code, &record.object_name, &id.as_string());
                    vm.tab_key.with_value(|key| vm.ctx.update_tab_title(key, &title));
                    vm.snapshot.set(Snapshot::take(&record));
                    vm.readonly.set(record.delete_flag);
                    vm.record.set(record);
                    vm.is_changed.set(false);
                    vm.loading.set(false);
                    vm.ensure_parent();
                }
                Err(e) => {
                    vm.loading.set(false);
                    vm.error.set(Some(format!("Ошибка загрузки: {}", e.user_message())));
                }
            }
            match service.get_competencies(id).await {
                Ok(links) => vm
                    .competencies
                    .set(links.into_iter().map(|l| l.competency_id).collect()),
                Err(e) => log::warn!("competencies of {} not loaded: {}", id, e),
            }
        });
    }

    /// Fetches the current parent when the selector list does not have it.
    fn ensure_parent(&self) {
        let missing = self
            .record
            .with_untracked(|r| self.parents.with_untracked(|p| model::missing_parent(r, p)));
        let Some(parent_id) = missing else {
            return;
        };
        let parents = self.parents;
        let service = self.service();
        spawn_local(async move {
            match service.get_object(parent_id).await {
                Ok(parent) => parents.update(|p| {
                    append_unique(p, vec![parent], |o| o.object_id);
                }),
                Err(e) => log::warn!("parent {} not loaded: {}", parent_id, e),
            }
        });
    }

    /// Remote search of parent candidates by name.
    pub fn find_objects_in_list(&self, text: String) {
        self.parent_search.set(text.clone());
        if text.trim().is_empty() {
            return;
        }
        let parents = self.parents;
        let service = self.service();
        spawn_local(async move {
            match service.search(INSPECTION_OBJECTS, "search", &text).await {
                Ok(found) => parents.update(|p| {
                    let found = found.into_iter().filter(|o| o.is_active()).collect();
                    append_unique(p, found, |o| o.object_id);
                }),
                Err(e) => log::warn!("object search failed: {}", e),
            }
        });
    }

    pub fn on_form_change(&self) {
        let dirty = self
            .record
            .with_untracked(|r| self.snapshot.with_untracked(|s| s.is_dirty(r, &DIRTY_FIELDS)));
        self.is_changed.set(dirty);
    }

    pub fn set_text(&self, update: impl FnOnce(&mut ObjectRecord)) {
        self.record.update(update);
        self.on_form_change();
    }

    pub fn selected_item_change(&self, field: ObjectRefField, id: Option<i64>) {
        self.record
            .update(|r| model::selected_item_change(r, field, id));
        if field == ObjectRefField::Parent {
            self.ensure_parent();
        }
    }

    pub fn add_competency(&self, id: ObjectCompetencyId) {
        let mut added = false;
        self.competencies
            .update(|list| added = model::add_competency(list, id));
        if added {
            self.is_changed.set(true);
        }
    }

    pub fn delete_competence(&self, id: ObjectCompetencyId) {
        let mut removed = false;
        self.competencies
            .update(|list| removed = model::delete_competence(list, id));
        if removed {
            self.is_changed.set(true);
        }
    }

    pub fn qr_src(&self) -> Option<String> {
        self.record
            .with(|r| r.qr.as_deref().map(model::qr_image_src))
    }

    pub fn generate_qr(&self) {
        let Some(id) = self.id else {
            return;
        };
        let record = self.record;
        let service = self.service();
        spawn_local(async move {
            match service.generate_qr(id, true).await {
                Ok(qr) => record.update(|r| r.qr = qr),
                Err(e) => log::warn!("QR of {} not generated: {}", id, e),
            }
        });
    }

    pub fn print_qr(&self) {
        let Some(src) = self.qr_src() else {
            return;
        };
        let caption = self.record.with_untracked(|r| r.object_code.clone());
        if let Err(e) = print::print_html(&print::image_document(&src, &caption)) {
            log::warn!("print failed: {}", e);
        }
    }

    pub fn save(&self) {
        self.submitted.set(true);
        let record = self.record.get_untracked();
        if !model::is_form_valid(&record) || self.is_saving.get_untracked() {
            return;
        }
        let competencies = self.competencies.get_untracked();
        let vm = *self;
        let service = self.service();
        let ctx = self.ctx;

        vm.is_saving.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = model::save_object(&*service, &record, &competencies).await;
            vm.is_saving.set(false);
            match result {
                Ok(SaveOutcome::Updated) => {
                    vm.snapshot.set(Snapshot::take(&record));
                    vm.on_form_change();
                    vm.tab_key.with_value(|key| {
                        ctx.update_tab_title(
                            key,
                            &detail_tab_label(
                                &record.object_code,
                                &record.object_name,
                                &vm.id.map(|id| id.as_string()).unwrap_or_default(),
                            ),
                        )
                    });
                }
                Ok(SaveOutcome::Created { id, .. }) => {
                    log::info!("object {} created", id);
                    vm.is_changed.set(false);
                    let title = detail_tab_label(&record.object_code, &record.object_name, &id.as_string());
                    vm.tab_key
                        .with_value(|key| ctx.replace_tab(key, &object_detail_key(id), &title));
                }
                Ok(SaveOutcome::CreatedWithoutId) => {
                    vm.is_changed.set(false);
                }
                Err(e) => {
                    log::warn!("object save failed: {}", e);
                    vm.error.set(Some(e.user_message()));
                }
            }
        });
    }

    /// Архивирует или восстанавливает объект.
    pub fn change_delete_flag(&self) {
        let vm = *self;
        let service = self.service();
        spawn_local(async move {
            let mut snapshot = vm.snapshot.get_untracked();
            let mut live = vm.record.get_untracked();
            let result = model::change_delete_flag(&*service, &mut snapshot, &mut live).await;
            vm.snapshot.set(snapshot);
            match result {
                Ok(flag) => {
                    vm.record.update(|r| r.delete_flag = live.delete_flag);
                    vm.readonly.set(flag);
                }
                Err(e) => {
                    log::warn!("delete flag not changed: {}", e);
                    alert(&e.user_message());
                }
            }
        });
    }

    pub fn back_to_list(&self) {
        self.ctx.open_tab(TAB_OBJECT_LIST, "Объекты");
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
