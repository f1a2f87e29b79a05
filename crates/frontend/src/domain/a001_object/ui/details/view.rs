//! Object details - View Component

use contracts::domain::a001_object::ObjectId;
use contracts::domain::a004_object_competency::ObjectCompetencyId;
use leptos::prelude::*;
use thaw::*;

use super::model::{self, ObjectRefField};
use super::view_model::ObjectDetailsVm;
use crate::domain::catalogs::DropdownKind;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};

fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

#[component]
#[allow(non_snake_case)]
pub fn ObjectDetails(
    id: Option<ObjectId>,
    tab_key: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let vm = ObjectDetailsVm::new(id, tab_key);
    vm.init();

    let is_edit_mode = vm.is_edit_mode();
    let readonly = vm.readonly;
    let invalid = Signal::derive(move || vm.submitted.get() && !vm.record.with(model::is_form_valid));

    view! {
        <PageFrame page_id="a001_object--detail" category=PAGE_CAT_DETAIL>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center class="details-header">
                <h2 class="details-title">
                    {move || {
                        if !is_edit_mode {
                            "Новый объект".to_string()
                        } else if readonly.get() {
                            format!("{} (в архиве)", vm.record.with(|r| r.object_name.clone()))
                        } else {
                            vm.record.with(|r| r.object_name.clone())
                        }
                    }}
                </h2>
                <Space>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.back_to_list()>
                        {icon("arrow-left")}
                        " К списку"
                    </Button>
                    <Show when=move || !readonly.get()>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.save()
                            disabled=Signal::derive(move || vm.is_saving.get() || (is_edit_mode && !vm.is_changed.get()))
                        >
                            {icon("save")}
                            {move || if vm.is_saving.get() { " Сохранение..." } else { " Сохранить" }}
                        </Button>
                    </Show>
                    <Show when=move || is_edit_mode>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.change_delete_flag()>
                            {move || if readonly.get() { icon("restore") } else { icon("archive") }}
                            {move || if readonly.get() { " Восстановить" } else { " В архив" }}
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_close.run(())>
                        {icon("x")}
                    </Button>
                </Space>
            </Flex>

            {move || vm.error.get().map(|e| view! { <div class="details-error">{e}</div> })}
            <Show when=move || invalid.get()>
                <div class="details-error">"Заполните код и наименование"</div>
            </Show>
            <Show when=move || vm.loading.get()>
                <Spinner label="Загрузка..." />
            </Show>

            <div class="details-body">
                <div class="details-form">
                    <Show
                        when=move || !readonly.get()
                        fallback=move || view! { <ReadonlyFields vm=vm /> }
                    >
                        <TextField
                            label="Код"
                            value=Signal::derive(move || vm.record.with(|r| r.object_code.clone()))
                            on_input=Callback::new(move |v: String| vm.set_text(|r| r.object_code = v))
                        />
                        <TextField
                            label="Наименование"
                            value=Signal::derive(move || vm.record.with(|r| r.object_name.clone()))
                            on_input=Callback::new(move |v: String| vm.set_text(|r| r.object_name = v))
                        />
                        <TextField
                            label="Наименование на табличке"
                            value=Signal::derive(move || vm.record.with(|r| r.object_label_name.clone()))
                            on_input=Callback::new(move |v: String| vm.set_text(|r| r.object_label_name = v))
                        />

                        <CatalogSelect
                            vm=vm
                            kind=DropdownKind::Class
                            field=ObjectRefField::Class
                            value=Signal::derive(move || vm.record.with(|r| r.object_class_id.map(|i| i.value())))
                        />
                        <CatalogSelect
                            vm=vm
                            kind=DropdownKind::Type
                            field=ObjectRefField::Type
                            value=Signal::derive(move || vm.record.with(|r| r.object_type_id.map(|i| i.value())))
                        />
                        <Show when=move || vm.uses_zones.get()>
                            <CatalogSelect
                                vm=vm
                                kind=DropdownKind::Zone
                                field=ObjectRefField::Zone
                                value=Signal::derive(move || vm.record.with(|r| r.zone_id().map(|i| i.value())))
                            />
                            <CatalogSelect
                                vm=vm
                                kind=DropdownKind::WbsTitle
                                field=ObjectRefField::WbsTitle
                                value=Signal::derive(move || vm.record.with(|r| r.title_id().map(|i| i.value())))
                            />
                        </Show>
                        <ParentSelect vm=vm />

                        <div class="form-group">
                            <Label>"Описание"</Label>
                            <textarea
                                rows="4"
                                prop:value=move || vm.record.with(|r| r.object_desc.clone())
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.set_text(|r| r.object_desc = v);
                                }
                            />
                        </div>
                    </Show>

                    <Competencies vm=vm />
                </div>

                <Show when=move || is_edit_mode>
                    <QrBlock vm=vm />
                </Show>
            </div>
        </PageFrame>
    }
}

#[component]
fn TextField(
    label: &'static str,
    value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <Label>{label}</Label>
            <input
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Справочник с полем поиска над списком.
#[component]
fn CatalogSelect(
    vm: ObjectDetailsVm,
    kind: DropdownKind,
    field: ObjectRefField,
    value: Signal<Option<i64>>,
) -> impl IntoView {
    let search = vm.search(kind);
    let options = vm.options(kind);

    view! {
        <div class="form-group form-group--catalog">
            <Label>{kind.label()}</Label>
            <input
                type="search"
                class="form-group__search"
                placeholder="Поиск..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <select
                prop:value=move || value.get().map(|v| v.to_string()).unwrap_or_default()
                on:change=move |ev| vm.selected_item_change(field, parse_id(&event_target_value(&ev)))
            >
                <option value="">"—"</option>
                <For
                    each=move || options.get()
                    key=|o| o.id
                    children=move |o| {
                        let selected = move || value.get() == Some(o.id);
                        view! { <option value=o.id.to_string() selected=selected>{o.label}</option> }
                    }
                />
            </select>
        </div>
    }
}

/// Родитель выбирается из загруженного списка; поиск дозапрашивает сервер.
#[component]
fn ParentSelect(vm: ObjectDetailsVm) -> impl IntoView {
    let value = Signal::derive(move || vm.record.with(|r| r.parent_object_id.map(|i| i.value())));

    view! {
        <div class="form-group form-group--catalog">
            <Label>"Родительский объект"</Label>
            <input
                type="search"
                class="form-group__search"
                placeholder="Поиск объекта..."
                prop:value=move || vm.parent_search.get()
                on:input=move |ev| vm.find_objects_in_list(event_target_value(&ev))
            />
            <select
                prop:value=move || value.get().map(|v| v.to_string()).unwrap_or_default()
                on:change=move |ev| {
                    vm.selected_item_change(ObjectRefField::Parent, parse_id(&event_target_value(&ev)))
                }
            >
                <option value="">"—"</option>
                <For
                    each=move || vm.parent_options()
                    key=|o| o.id
                    children=move |o| {
                        let selected = move || value.get() == Some(o.id);
                        view! { <option value=o.id.to_string() selected=selected>{o.label}</option> }
                    }
                />
            </select>
        </div>
    }
}

#[component]
fn Competencies(vm: ObjectDetailsVm) -> impl IntoView {
    let readonly = vm.readonly;
    let search = vm.search(DropdownKind::Competency);
    let options = vm.options(DropdownKind::Competency);

    view! {
        <div class="form-group competencies">
            <Label>{DropdownKind::Competency.label()}</Label>
            <ul class="competencies__list">
                <For
                    each=move || vm.competencies.get()
                    key=|id| *id
                    children=move |id: ObjectCompetencyId| {
                        view! {
                            <li class="competencies__item">
                                <span>{move || vm.catalogs.with(|c| c.competency_caption(id))}</span>
                                <Show when=move || !readonly.get()>
                                    <button class="competencies__remove" on:click=move |_| vm.delete_competence(id)>
                                        {icon("x")}
                                    </button>
                                </Show>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || !readonly.get()>
                <input
                    type="search"
                    class="form-group__search"
                    placeholder="Поиск компетенции..."
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select
                    prop:value=""
                    on:change=move |ev| {
                        if let Some(id) = parse_id(&event_target_value(&ev)) {
                            vm.add_competency(ObjectCompetencyId(id));
                        }
                    }
                >
                    <option value="">"Добавить компетенцию..."</option>
                    <For
                        each=move || options.get()
                        key=|o| o.id
                        children=move |o| view! { <option value=o.id.to_string()>{o.label}</option> }
                    />
                </select>
            </Show>
        </div>
    }
}

/// Карточка архивного объекта: только просмотр.
#[component]
fn ReadonlyFields(vm: ObjectDetailsVm) -> impl IntoView {
    let row = move |label: &'static str, value: Signal<String>| {
        view! {
            <div class="readonly-row">
                <span class="readonly-row__label">{label}</span>
                <span class="readonly-row__value">{move || value.get()}</span>
            </div>
        }
    };
    let record = vm.record;
    let catalogs = vm.catalogs;

    view! {
        <div class="readonly-fields">
            {row("Код", Signal::derive(move || record.with(|r| r.object_code.clone())))}
            {row("Наименование", Signal::derive(move || record.with(|r| r.object_name.clone())))}
            {row("Наименование на табличке", Signal::derive(move || record.with(|r| r.object_label_name.clone())))}
            {row("Класс", Signal::derive(move || {
                let id = record.with(|r| r.object_class_id);
                catalogs.with(|c| c.class_full_name(id))
            }))}
            {row("Тип", Signal::derive(move || {
                let id = record.with(|r| r.object_type_id);
                catalogs.with(|c| c.type_name(id))
            }))}
            <Show when=move || vm.uses_zones.get()>
                {row("Зона", Signal::derive(move || {
                    let id = record.with(|r| r.zone_id());
                    catalogs.with(|c| c.zone_name(id))
                }))}
                {row("Титул WBS", Signal::derive(move || {
                    let id = record.with(|r| r.title_id());
                    catalogs.with(|c| c.wbs_title_name(id))
                }))}
            </Show>
            {row("Родительский объект", Signal::derive(move || {
                record.with(|r| r.parent_object_name.clone()).unwrap_or_else(|| {
                    let parent = record.with(|r| r.parent_object_id);
                    vm.parents.with(|p| {
                        p.iter()
                            .find(|o| parent.is_some() && o.object_id == parent)
                            .map(|o| o.display_value())
                            .unwrap_or_default()
                    })
                })
            }))}
            <div class="readonly-row">
                <span class="readonly-row__label">"Описание"</span>
                <span class="readonly-row__value" style="white-space: pre-line;">
                    {move || record.with(|r| r.object_desc.clone())}
                </span>
            </div>
        </div>
    }
}

#[component]
fn QrBlock(vm: ObjectDetailsVm) -> impl IntoView {
    view! {
        <div class="qr-block">
            {move || match vm.qr_src() {
                Some(src) => view! { <img class="qr-block__image" src=src alt="QR" /> }.into_any(),
                None => view! { <div class="qr-block__empty">"QR-код не сформирован"</div> }.into_any(),
            }}
            <Space>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.generate_qr()>
                    {icon("qr")}
                    " Сформировать"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.print_qr()
                    disabled=Signal::derive(move || vm.record.with(|r| r.qr.is_none()))
                >
                    {icon("print")}
                    " Печать"
                </Button>
            </Space>
        </div>
    }
}
