use crate::layout::tabs::tab_label_for_key;
use crate::shared::url_query::{self, QueryPairs};
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
    /// View parameters of each tab, mirrored to the address bar while the tab is active
    pub tab_queries: RwSignal<HashMap<String, QueryPairs>>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
            tab_queries: RwSignal::new(HashMap::new()),
        }
    }

    pub fn tab_query(&self, key: &str) -> QueryPairs {
        self.tab_queries
            .with_untracked(|queries| queries.get(key).cloned())
            .unwrap_or_default()
    }

    /// Сохраняет параметры таба и, если он активен, переписывает адресную строку.
    pub fn set_tab_query(&self, key: &str, pairs: QueryPairs) {
        self.tab_queries.update(|queries| {
            queries.insert(key.to_string(), pairs.clone());
        });
        let is_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        if is_active {
            url_query::replace_location(&url_query::compose(Some(key), &pairs));
        }
    }

    pub fn init_router_integration(&self) {
        let (active, view_pairs) = url_query::split_active(url_query::read_location());
        if let Some(active_key) = active {
            if !view_pairs.is_empty() {
                self.tab_queries.update(|queries| {
                    queries.insert(active_key.clone(), view_pairs);
                });
            }
            let exists = self
                .opened
                .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == active_key));
            if !exists {
                self.open_tab(&active_key, tab_label_for_key(&active_key));
            } else {
                self.activate_tab(&active_key);
            }
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let pairs = this.tab_query(&active_key);
                url_query::replace_location(&url_query::compose(Some(&active_key), &pairs));
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("🔷 open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            let tab = Tab {
                key: key.to_string(),
                title: title.to_string(),
                dirty: false,
            };
            self.opened.update(|tabs| {
                tabs.push(tab);
                leptos::logging::log!("✅ Tab added. Total tabs: {}", tabs.len());
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn set_tab_dirty(&self, key: &str, dirty: bool) {
        let changed = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|t| t.key == key && t.dirty != dirty));
        if changed {
            self.opened.update(|tabs| {
                if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                    tab.dirty = dirty;
                }
            });
        }
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("🔴 close_tab: key='{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    /// Replaces tab `from` with `to` keeping its position (create form → saved record).
    pub fn replace_tab(&self, from: &str, to: &str, title: &str) {
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == to));
        if exists {
            self.close_tab(from);
            self.activate_tab(to);
            return;
        }
        self.opened.update(|tabs| match tabs.iter_mut().find(|t| t.key == from) {
            Some(tab) => {
                tab.key = to.to_string();
                tab.title = title.to_string();
                tab.dirty = false;
            }
            None => tabs.push(Tab {
                key: to.to_string(),
                title: title.to_string(),
                dirty: false,
            }),
        });
        self.activate_tab(to);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
    pub dirty: bool,
}
