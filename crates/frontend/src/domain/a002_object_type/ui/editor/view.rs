use contracts::domain::a002_object_type::ObjectType;
use leptos::prelude::*;
use thaw::*;

use super::view_model::ObjectTypeEditorVm;
use crate::layout::{SidePanel, SidePanelService};
use crate::shared::icons::icon;

#[component]
fn TypeField(
    vm: ObjectTypeEditorVm,
    label: &'static str,
    get: fn(&ObjectType) -> String,
    set: fn(&mut ObjectType, String),
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let value = move || vm.state.with(|s| get(&s.entity));
    let busy = move || vm.state.with(|s| s.disable_save);
    let on_input = move |ev: leptos::ev::Event| {
        let v = event_target_value(&ev);
        vm.update_field(|t| set(t, v));
    };
    view! {
        <div class="form-group">
            <Label>{label}</Label>
            {if multiline {
                view! { <textarea rows="3" prop:value=value prop:disabled=busy on:input=on_input /> }.into_any()
            } else {
                view! { <input type="text" prop:value=value prop:disabled=busy on:input=on_input /> }.into_any()
            }}
        </div>
    }
}

/// Форма типа объекта внутри боковой панели.
#[component]
#[allow(non_snake_case)]
pub fn ObjectTypeEditor(vm: ObjectTypeEditorVm) -> impl IntoView {
    let panel = use_context::<SidePanelService>().expect("SidePanelService not provided");
    let readonly = Signal::derive(move || vm.state.with(|s| s.readonly));
    let is_create = Signal::derive(move || vm.state.with(|s| s.is_create));
    let invalid = Signal::derive(move || vm.submitted.get() && !vm.state.with(|s| s.is_form_valid()));

    view! {
        <SidePanel title=Signal::derive(move || vm.title()) service=panel>
            <Show
                when=move || !readonly.get()
                fallback=move || view! {
                    <div class="readonly-fields">
                        <div class="readonly-row">
                            <span class="readonly-row__label">"Код"</span>
                            <span class="readonly-row__value">{move || vm.state.with(|s| s.entity.object_type_code.clone())}</span>
                        </div>
                        <div class="readonly-row">
                            <span class="readonly-row__label">"Наименование"</span>
                            <span class="readonly-row__value">{move || vm.state.with(|s| s.entity.object_type_name.clone())}</span>
                        </div>
                        <div class="readonly-row">
                            <span class="readonly-row__label">"Описание"</span>
                            <span class="readonly-row__value" style="white-space: pre-line;">
                                {move || vm.state.with(|s| s.entity.object_type_desc.clone())}
                            </span>
                        </div>
                    </div>
                }
            >
                <TypeField
                    vm=vm
                    label="Код"
                    get=|t| t.object_type_code.clone()
                    set=|t, v| t.object_type_code = v
                />
                <TypeField
                    vm=vm
                    label="Наименование"
                    get=|t| t.object_type_name.clone()
                    set=|t, v| t.object_type_name = v
                />
                <TypeField
                    vm=vm
                    label="Описание"
                    get=|t| t.object_type_desc.clone()
                    set=|t, v| t.object_type_desc = v
                    multiline=true
                />
                <Show when=move || invalid.get()>
                    <div class="details-error">"Заполните код и наименование"</div>
                </Show>
            </Show>

            <Space class="side-panel__actions">
                <Show when=move || !readonly.get()>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.submit()
                        disabled=Signal::derive(move || {
                            vm.state.with(|s| s.disable_save || (!s.is_create && !s.is_changed))
                        })
                    >
                        {icon("save")}
                        " Сохранить"
                    </Button>
                </Show>
                <Show when=move || !is_create.get()>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.change_delete_flag()
                        disabled=Signal::derive(move || vm.state.with(|s| s.disable_save))
                    >
                        {move || if readonly.get() { icon("restore") } else { icon("archive") }}
                        {move || if readonly.get() { " Восстановить" } else { " В архив" }}
                    </Button>
                </Show>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.hide()>
                    "Закрыть"
                </Button>
            </Space>
        </SidePanel>
    }
}
