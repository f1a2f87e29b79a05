pub mod state;

use self::state::{create_state, ObjectListState, PageApply, PageTracker};
use crate::config::AppConfig;
use crate::domain::a001_object::api::use_object_service;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::layout::tabs::registry::{object_detail_key, TAB_OBJECT_LIST, TAB_OBJECT_NEW};
use crate::shared::icons::icon;
use crate::shared::list_utils::{append_unique, get_sort_indicator};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::storage::{SharedStore, TableViewStateStore};
use contracts::domain::a001_object::{ObjectId, ObjectRecord, ObjectSortField, QueryPairs};
use contracts::domain::common::AggregateId;
use gloo_timers::future::TimeoutFuture;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Ключ сохранённого состояния таблицы (`itr-table-objects6`)
pub const TABLE_KEY: &str = "objects6";

/// Distance to the bottom, in px, at which the next page is requested.
const SCROLL_THRESHOLD: i32 = 40;

struct Column {
    field: &'static str,
    title: &'static str,
    sort: Option<ObjectSortField>,
    value: fn(&ObjectRecord) -> String,
}

const COLUMNS: [Column; 8] = [
    Column {
        field: "object_code",
        title: "Код",
        sort: Some(ObjectSortField::ObjectCode),
        value: |r| r.object_code.clone(),
    },
    Column {
        field: "object_name",
        title: "Наименование",
        sort: Some(ObjectSortField::ObjectName),
        value: |r| r.object_name.clone(),
    },
    Column {
        field: "object_label_name",
        title: "Табличка",
        sort: Some(ObjectSortField::ObjectLabelName),
        value: |r| r.object_label_name.clone(),
    },
    Column {
        field: "org_name",
        title: "Организация",
        sort: Some(ObjectSortField::OrgName),
        value: |r| r.org_name.clone(),
    },
    Column {
        field: "department_name",
        title: "Подразделение",
        sort: Some(ObjectSortField::DepartmentName),
        value: |r| r.department_name.clone(),
    },
    Column {
        field: "competenceString",
        title: "Компетенции",
        sort: None,
        value: |r| r.competence_string.clone().unwrap_or_default(),
    },
    Column {
        field: "object_class_name",
        title: "Класс",
        sort: None,
        value: |r| r.object_class_name.clone().unwrap_or_default(),
    },
    Column {
        field: "parent_object_name",
        title: "Родитель",
        sort: Some(ObjectSortField::ParentObject),
        value: |r| r.parent_object_name.clone().unwrap_or_default(),
    },
];

fn row_dom_id(id: ObjectId) -> String {
    format!("object-row-{}", id.as_string())
}

fn scroll_to_row(id: ObjectId) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(&row_dom_id(id)));
    if let Some(element) = element {
        element.scroll_into_view_with_bool(true);
    }
}

#[component]
pub fn ObjectList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let config = use_context::<RwSignal<AppConfig>>().expect("AppConfig not provided");
    let store = use_context::<SharedStore>().expect("SharedStore not provided");
    let service = StoredValue::new(use_object_service());
    let view_state = StoredValue::new(TableViewStateStore::new(store, TABLE_KEY));

    let initial = ObjectListState::enter(
        &tabs_store.tab_query(TAB_OBJECT_LIST),
        view_state.with_value(|s| s.load()),
    );
    let state = create_state(initial);
    let tracker = RwSignal::new(PageTracker::default());
    let rows = RwSignal::new(Vec::<ObjectRecord>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move |page: u32| {
        let generation = tracker.with_untracked(|t| t.generation);
        let query = state.with_untracked(|s| s.query.clone());
        let (page_size, delay) =
            config.with_untracked(|c| (c.list_page_size, c.scroll_restore_delay_ms));
        let service = service.get_value();
        set_loading.set(true);
        spawn_local(async move {
            let result = service.list_objects(&query, page, page_size).await;
            set_loading.set(false);
            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("objects page {} not loaded: {}", page, e);
                    set_error.set(Some(e.user_message()));
                    return;
                }
            };
            set_error.set(None);
            let total_pages = response.pagination.map(|p| p.pages_count).unwrap_or(0);
            log::debug!(
                "loaded page {} length {} total pages {}",
                page,
                response.data.len(),
                total_pages
            );

            let mut apply = None;
            tracker.update(|t| apply = t.accept_page(generation, response.pagination));
            match apply {
                Some(PageApply::Replace) => {
                    rows.set(response.data);
                    if let Some(selected) = query.object_id {
                        TimeoutFuture::new(delay).await;
                        let present = rows
                            .with_untracked(|r| r.iter().any(|o| o.object_id == Some(selected)));
                        if present {
                            scroll_to_row(selected);
                        }
                    }
                }
                Some(PageApply::Append) => rows.update(|r| {
                    append_unique(r, response.data, |o| o.object_id);
                }),
                None => log::debug!("stale page {} dropped", page),
            }
        });
    };

    let handle_query = move |pairs: &QueryPairs| {
        let mut persist = QueryPairs::new();
        state.update(|s| persist = s.on_query_echo(pairs));
        view_state.with_value(|s| s.save(&persist));
        fetch(tracker.with_untracked(|t| t.page_index));
    };

    let navigate = move || {
        let pairs = state.with_untracked(|s| s.query.to_pairs());
        tabs_store.set_tab_query(TAB_OBJECT_LIST, pairs.clone());
        handle_query(&pairs);
    };

    let refresh = move || {
        rows.set(Vec::new());
        tracker.update(|t| t.refresh());
    };

    let on_sort = move |field: ObjectSortField| {
        let mut changed = false;
        state.update(|s| changed = s.toggle_sort(field));
        if changed {
            refresh();
            navigate();
        }
    };

    let on_update_search = move |field: &'static str, value: String| {
        let mut changed = false;
        state.update(|s| changed = s.on_update_search(field, &value));
        if changed {
            refresh();
            navigate();
        }
    };

    let toggle_active = move || {
        state.update(|s| s.toggle_active());
        refresh();
        navigate();
    };

    let select_obj = move |id: ObjectId| {
        let mut changed = false;
        state.update(|s| changed = s.select_row(id));
        if changed {
            navigate();
        }
    };

    let create_object = move || tabs_store.open_tab(TAB_OBJECT_NEW, "Новый объект");

    let edit_object = move |record: &ObjectRecord| {
        if let Some(id) = record.object_id {
            tabs_store.open_tab(
                &object_detail_key(id),
                &detail_tab_label(&record.object_code, &record.object_name, &id.as_string()),
            );
        }
    };

    let on_scroll = move |ev: leptos::ev::Event| {
        let el: web_sys::Element = event_target(&ev);
        if el.scroll_top() + el.client_height() < el.scroll_height() - SCROLL_THRESHOLD {
            return;
        }
        let mut next = None;
        tracker.update(|t| next = t.on_next_page(t.page_index));
        if let Some(page) = next {
            fetch(page);
        }
    };

    log!("ObjectList mounted");
    navigate();

    let is_active = Signal::derive(move || state.with(|s| s.is_active()));
    let is_empty = Signal::derive(move || {
        tracker.with(|t| t.is_loaded) && rows.with(|r| r.is_empty()) && !loading.get()
    });

    view! {
        <PageFrame page_id="a001_object--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || if is_active.get() { "Объекты" } else { "Объекты (архив)" }}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button appearance=ButtonAppearance::Primary on_click=move |_| create_object()>
                            {icon("plus")}
                            " Новый объект"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| state.update(|s| s.toggle_search())
                        >
                            {icon("search")}
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| toggle_active()>
                            {move || if is_active.get() { icon("archive") } else { icon("restore") }}
                            {move || if is_active.get() { " Архив" } else { " Активные" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| {
                                refresh();
                                navigate();
                            }
                            disabled=Signal::derive(move || loading.get())
                        >
                            {icon("refresh")}
                        </Button>
                    </Space>
                </div>
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <div class="table-wrapper objects-table" on:scroll=on_scroll>
                <Table attr:style="width: 100%; min-width: 900px;">
                    <TableHeader>
                        <TableRow>
                            {COLUMNS
                                .iter()
                                .map(|col| {
                                    let field = col.field;
                                    let title = col.title;
                                    match col.sort {
                                        Some(sort) => view! {
                                            <TableHeaderCell>
                                                <div class="table__sortable-header" on:click=move |_| on_sort(sort)>
                                                    {title}
                                                    <span class="table__sort-indicator">
                                                        {move || state.with(|s| {
                                                            let current = s.query.order_by.map(|f| f.as_str()).unwrap_or_default();
                                                            get_sort_indicator(current, sort.as_str(), s.query.asc)
                                                        })}
                                                    </span>
                                                </div>
                                            </TableHeaderCell>
                                        }
                                        .into_any(),
                                        None => view! {
                                            <TableHeaderCell attr:data-field=field>{title}</TableHeaderCell>
                                        }
                                        .into_any(),
                                    }
                                })
                                .collect_view()}
                        </TableRow>
                        <Show when=move || state.with(|s| s.search_shown || !s.query.filters.is_empty())>
                            <TableRow attr:data-row="search">
                                {COLUMNS
                                    .iter()
                                    .map(|col| {
                                        let field = col.field;
                                        view! {
                                            <TableCell>
                                                <input
                                                    type="search"
                                                    class="table__search-input"
                                                    placeholder="Поиск"
                                                    prop:value=move || state.with(|s| s.query.filters.get(field).cloned().unwrap_or_default())
                                                    on:change=move |ev| on_update_search(field, event_target_value(&ev))
                                                />
                                            </TableCell>
                                        }
                                    })
                                    .collect_view()}
                            </TableRow>
                        </Show>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || rows.get()
                            key=|r| r.object_id
                            children=move |record: ObjectRecord| {
                                let id = record.object_id;
                                let is_selected = move || {
                                    id.is_some() && state.with(|s| s.query.object_id) == id
                                };
                                let record_for_open = record.clone();
                                let cells = COLUMNS
                                    .iter()
                                    .map(|col| {
                                        let text = (col.value)(&record);
                                        view! {
                                            <TableCell>
                                                <TableCellLayout>{text}</TableCellLayout>
                                            </TableCell>
                                        }
                                    })
                                    .collect_view();
                                view! {
                                    <TableRow
                                        attr:id=id.map(row_dom_id).unwrap_or_default()
                                        attr:data-selected=move || is_selected().to_string()
                                        on:click=move |_| {
                                            if let Some(id) = id {
                                                select_obj(id);
                                            }
                                        }
                                        on:dblclick=move |_| edit_object(&record_for_open)
                                        attr:style="cursor: pointer;"
                                    >
                                        {cells}
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                <Show when=move || is_empty.get()>
                    <div class="table__empty">"Объекты не найдены"</div>
                </Show>
                <Show when=move || loading.get()>
                    <Spinner label="Загрузка..." />
                </Show>
            </div>
        </PageFrame>
    }
}
