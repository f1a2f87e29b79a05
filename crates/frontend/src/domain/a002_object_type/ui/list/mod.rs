use contracts::domain::a002_object_type::ObjectType;
use contracts::domain::common::SoftDeletable;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_object::api::use_object_service;
use crate::domain::a002_object_type::events::TypeEditorEvent;
use crate::domain::a002_object_type::ui::editor::{ObjectTypeEditor, ObjectTypeEditorVm};
use crate::shared::event_bus::EventBus;
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, highlight_matches, Searchable};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};

impl Searchable for ObjectType {
    fn matches_filter(&self, filter: &str) -> bool {
        let filter = filter.trim().to_lowercase();
        self.object_type_code.to_lowercase().contains(&filter)
            || self.object_type_name.to_lowercase().contains(&filter)
    }
}

/// Типы для показа: активные или архивные, затем текстовый фильтр.
fn visible_types(types: &[ObjectType], archived: bool, filter: &str) -> Vec<ObjectType> {
    let by_flag: Vec<ObjectType> = types
        .iter()
        .filter(|t| t.is_deleted() == archived)
        .cloned()
        .collect();
    filter_list(&by_flag, filter)
}

/// `Updated` follows every `Changed` and only syncs the editor form.
fn needs_reload(event: &TypeEditorEvent) -> bool {
    matches!(event, TypeEditorEvent::Changed(_) | TypeEditorEvent::Filter)
}

#[component]
pub fn ObjectTypeList() -> impl IntoView {
    let service = StoredValue::new(use_object_service());
    let editor = ObjectTypeEditorVm::new();
    let types = RwSignal::new(Vec::<ObjectType>::new());
    let archived = RwSignal::new(false);
    let filter = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        let service = service.get_value();
        spawn_local(async move {
            match service.object_types().await {
                Ok(list) => {
                    set_error.set(None);
                    types.set(list);
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    let bus = use_context::<EventBus<TypeEditorEvent>>().expect("TypeEditorEvent bus not provided");
    let subscription = bus.subscribe(move |event| {
        if needs_reload(event) {
            log!("ObjectTypeList: {:?}", event);
            load();
        }
    });
    on_cleanup(move || drop(subscription));

    load();

    let visible = Memo::new(move |_| {
        let filter = filter.get();
        types.with(|t| visible_types(t, archived.get(), &filter))
    });

    view! {
        <PageFrame page_id="a002_object_type--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || if archived.get() { "Типы объектов (архив)" } else { "Типы объектов" }}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Input value=filter placeholder="Поиск по коду и наименованию" />
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| editor.create()>
                            {icon("plus")}
                            " Новый тип"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| archived.update(|a| *a = !*a)
                        >
                            {move || if archived.get() { icon("restore") } else { icon("archive") }}
                            {move || if archived.get() { " Активные" } else { " Архив" }}
                        </Button>
                    </Space>
                </div>
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Код"</TableHeaderCell>
                        <TableHeaderCell>"Наименование"</TableHeaderCell>
                        <TableHeaderCell>"Описание"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || visible.get()
                        key=|t| (t.object_type_id, t.object_type_code.clone(), t.object_type_name.clone())
                        children=move |t: ObjectType| {
                            let code = t.object_type_code.clone();
                            let name = t.object_type_name.clone();
                            let desc = t.object_type_desc.clone();
                            view! {
                                <TableRow on:click=move |_| editor.edit(t.clone()) attr:style="cursor: pointer;">
                                    <TableCell>
                                        <TableCellLayout>{move || highlight_matches(&code, &filter.get())}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{move || highlight_matches(&name, &filter.get())}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{desc}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
            <Show when=move || visible.with(|v| v.is_empty())>
                <div class="table__empty">"Типы не найдены"</div>
            </Show>

            <ObjectTypeEditor vm=editor />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_object_type::ObjectTypeId;

    fn object_type(id: i64, code: &str, name: &str, deleted: bool) -> ObjectType {
        ObjectType {
            object_type_id: Some(ObjectTypeId(id)),
            object_type_code: code.into(),
            object_type_name: name.into(),
            object_type_desc: String::new(),
            delete_flag: deleted,
        }
    }

    #[test]
    fn test_visible_types_split_by_archive_flag() {
        let types = vec![
            object_type(1, "PMP", "Насос", false),
            object_type(2, "VLV", "Клапан", true),
        ];
        let active = visible_types(&types, false, "");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].object_type_code, "PMP");
        let archived = visible_types(&types, true, "");
        assert_eq!(archived[0].object_type_code, "VLV");
    }

    #[test]
    fn test_visible_types_filter_by_code_or_name() {
        let types = vec![
            object_type(1, "PMP", "Насос", false),
            object_type(2, "MTR", "Двигатель", false),
        ];
        assert_eq!(visible_types(&types, false, "нас").len(), 1);
        assert_eq!(visible_types(&types, false, "mtr").len(), 1);
        assert!(visible_types(&types, false, "кран").is_empty());
    }

    #[test]
    fn test_reload_on_change_and_filter_only() {
        assert!(needs_reload(&TypeEditorEvent::Changed(None)));
        assert!(needs_reload(&TypeEditorEvent::Changed(Some(object_type(1, "PMP", "Насос", false)))));
        assert!(needs_reload(&TypeEditorEvent::Filter));
        assert!(!needs_reload(&TypeEditorEvent::Updated));
    }
}
