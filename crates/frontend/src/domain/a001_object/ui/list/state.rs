use contracts::domain::a001_object::{ObjectId, ObjectListQuery, ObjectSortField, QueryPairs};
use contracts::shared::pagination::Pagination;
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Учёт подгруженных страниц бесконечного списка.
///
/// A page is requested at most once per generation. `refresh` starts a new
/// generation; responses tagged with an older one are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct PageTracker {
    pub loaded_pages: BTreeSet<u32>,
    pub page_index: u32,
    pub next_page: Option<u32>,
    pub is_loaded: bool,
    pub generation: u64,
    pub pages_count: Option<u32>,
}

/// Как применить пришедшую страницу к списку
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageApply {
    Replace,
    Append,
}

impl Default for PageTracker {
    fn default() -> Self {
        Self {
            loaded_pages: BTreeSet::new(),
            page_index: 1,
            next_page: None,
            is_loaded: false,
            generation: 0,
            pages_count: None,
        }
    }
}

impl PageTracker {
    /// Scroll reached the end of page `requested`.
    ///
    /// Returns the page to fetch, or `None` when it is the same request as
    /// the previous one, already loaded, not yet known, or out of range.
    pub fn on_next_page(&mut self, requested: u32) -> Option<u32> {
        let next = requested.saturating_add(1);
        if self.next_page == Some(next) {
            return None;
        }
        self.next_page = Some(next);

        let pages_count = self.pages_count?;
        if self.loaded_pages.contains(&next) || next < 1 || next > pages_count {
            return None;
        }
        self.loaded_pages.insert(next);
        self.page_index = next;
        Some(next)
    }

    pub fn refresh(&mut self) {
        self.loaded_pages.clear();
        self.page_index = 1;
        self.next_page = None;
        self.is_loaded = false;
        self.pages_count = None;
        self.generation += 1;
    }

    /// Registers a response of `generation`. `None` means it is stale.
    pub fn accept_page(
        &mut self,
        generation: u64,
        pagination: Option<Pagination>,
    ) -> Option<PageApply> {
        if generation != self.generation {
            return None;
        }
        if let Some(p) = pagination {
            self.pages_count = Some(p.pages_count);
        }
        if self.is_loaded {
            return Some(PageApply::Append);
        }
        self.is_loaded = true;
        let page = pagination.map(|p| p.page).unwrap_or(self.page_index);
        self.loaded_pages.insert(page);
        Some(PageApply::Replace)
    }
}

/// Запрос и флаги отображения списка объектов
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectListState {
    pub query: ObjectListQuery,
    /// The next query echo keeps the restored query instead of reading it
    pub is_init_params: bool,
    pub search_shown: bool,
}

impl ObjectListState {
    /// Начальное состояние при открытии списка.
    ///
    /// List parameters already in the address bar win. Otherwise the stored
    /// view state is restored and the next echo is told to keep it.
    pub fn enter(url_pairs: &QueryPairs, stored: Option<QueryPairs>) -> Self {
        let url_query = ObjectListQuery::from_pairs(url_pairs);
        match stored {
            Some(stored) if url_query.is_empty() => Self {
                query: ObjectListQuery::from_pairs(&stored),
                is_init_params: true,
                search_shown: false,
            },
            _ => Self {
                query: url_query,
                is_init_params: false,
                search_shown: false,
            },
        }
    }

    /// Address bar changed to `pairs`. Returns the pairs to persist.
    pub fn on_query_echo(&mut self, pairs: &QueryPairs) -> QueryPairs {
        if self.is_init_params {
            self.is_init_params = false;
        } else {
            self.query = ObjectListQuery::from_pairs(pairs);
        }
        self.query.to_pairs()
    }

    pub fn is_active(&self) -> bool {
        !self.query.archive
    }

    /// Returns `false` when field and direction are unchanged.
    pub fn on_sort_change(&mut self, field: ObjectSortField, asc: bool) -> bool {
        if self.query.order_by == Some(field) && self.query.asc == asc {
            return false;
        }
        self.query.order_by = Some(field);
        self.query.asc = asc;
        true
    }

    /// Click on a header: a new column sorts descending, the same column flips.
    pub fn toggle_sort(&mut self, field: ObjectSortField) -> bool {
        let asc = if self.query.order_by == Some(field) {
            !self.query.asc
        } else {
            false
        };
        self.on_sort_change(field, asc)
    }

    /// Фильтр колонки. Поле `"0"` - пустое стартовое значение, игнорируется.
    pub fn on_update_search(&mut self, field: &str, value: &str) -> bool {
        if field == "0" {
            return false;
        }
        let before = self.query.filters.clone();
        self.query.set_filter(field, value);
        before != self.query.filters
    }

    pub fn toggle_active(&mut self) {
        self.query.archive = !self.query.archive;
    }

    /// Selection only changes the query; loaded pages stay as they are.
    /// Returns `false` when the row is already selected.
    pub fn select_row(&mut self, id: ObjectId) -> bool {
        if self.query.object_id == Some(id) {
            return false;
        }
        self.query.object_id = Some(id);
        true
    }

    /// Search row can be hidden only when no column filter is set.
    pub fn toggle_search(&mut self) {
        if self.query.filters.is_empty() {
            self.search_shown = !self.search_shown;
        }
    }
}

pub fn create_state(initial: ObjectListState) -> RwSignal<ObjectListState> {
    RwSignal::new(initial)
}
