//! Tab content registry - единственный источник правды для маппинга tab.key → View

use crate::domain::a001_object::ui::details::ObjectDetails;
use crate::domain::a001_object::ui::list::ObjectList;
use crate::domain::a002_object_type::ui::list::ObjectTypeList;
use crate::layout::global_context::AppGlobalContext;
use contracts::domain::a001_object::ObjectId;
use contracts::domain::common::AggregateId;
use leptos::logging::log;
use leptos::prelude::*;

pub const TAB_OBJECT_LIST: &str = "a001_object";
pub const TAB_OBJECT_NEW: &str = "a001_object_new";
pub const TAB_OBJECT_DETAIL_PREFIX: &str = "a001_object_detail_";
pub const TAB_OBJECT_TYPES: &str = "a002_object_type";

pub fn object_detail_key(id: ObjectId) -> String {
    format!("{}{}", TAB_OBJECT_DETAIL_PREFIX, id.as_string())
}

/// Id of an object detail tab key, if `key` is one.
pub fn parse_object_detail_key(key: &str) -> Option<ObjectId> {
    key.strip_prefix(TAB_OBJECT_DETAIL_PREFIX)
        .and_then(|rest| ObjectId::from_string(rest).ok())
}

/// Рендерит контент таба по его ключу.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();

    match key {
        // a001: Objects
        TAB_OBJECT_LIST => view! { <ObjectList /> }.into_any(),
        TAB_OBJECT_NEW => view! {
            <ObjectDetails
                id=None
                tab_key=key_for_close.clone()
                on_close=Callback::new({
                    let key_for_close = key_for_close.clone();
                    move |_| tabs_store.close_tab(&key_for_close)
                })
            />
        }
        .into_any(),
        k if k.starts_with(TAB_OBJECT_DETAIL_PREFIX) => match parse_object_detail_key(k) {
            Some(id) => {
                log!("✅ Creating ObjectDetails with id: {}", id);
                view! {
                    <ObjectDetails
                        id=Some(id)
                        tab_key=key_for_close.clone()
                        on_close=Callback::new({
                            let key_for_close = key_for_close.clone();
                            move |_| tabs_store.close_tab(&key_for_close)
                        })
                    />
                }
                .into_any()
            }
            None => {
                log!("⚠️ Bad object tab key: {}", k);
                view! { <div class="placeholder">{"Bad object tab key"}</div> }.into_any()
            }
        },

        // a002: Object types
        TAB_OBJECT_TYPES => view! { <ObjectTypeList /> }.into_any(),

        _ => {
            log!("⚠️ Unknown tab type: {}", key);
            view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_key_roundtrip() {
        let key = object_detail_key(ObjectId(42));
        assert_eq!(key, "a001_object_detail_42");
        assert_eq!(parse_object_detail_key(&key), Some(ObjectId(42)));
        assert_eq!(parse_object_detail_key("a001_object_detail_x"), None);
        assert_eq!(parse_object_detail_key(TAB_OBJECT_NEW), None);
    }
}
