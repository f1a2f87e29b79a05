/// Универсальные утилиты для работы со списками (поиск, подгрузка, UI)
use leptos::prelude::*;
use std::collections::HashSet;
use std::hash::Hash;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Фильтрует список по поисковому запросу
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    if filter.trim().is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}

/// Дописывает в конец только строки с ещё не встречавшимся ключом.
///
/// Returns the number of appended rows.
pub fn append_unique<T, K, F>(list: &mut Vec<T>, incoming: Vec<T>, key: F) -> usize
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen: HashSet<K> = list.iter().map(&key).collect();
    let before = list.len();
    for item in incoming {
        if seen.insert(key(&item)) {
            list.push(item);
        }
    }
    list.len() - before
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let Some((start, end)) = find_ci(text, filter) else {
        return view! { <span>{text.to_string()}</span> }.into_any();
    };

    view! {
        <span>
            {text[..start].to_string()}
            <mark class="list__match">{text[start..end].to_string()}</mark>
            {text[end..].to_string()}
        </span>
    }
    .into_any()
}

/// Byte range of the first case-insensitive occurrence of `needle`.
fn find_ci(text: &str, needle: &str) -> Option<(usize, usize)> {
    let needle_lower = needle.to_lowercase();
    text.char_indices().find_map(|(start, _)| {
        let rest = &text[start..];
        let mut end = start;
        let mut lowered = String::new();
        for (offset, ch) in rest.char_indices() {
            lowered.extend(ch.to_lowercase());
            end = start + offset + ch.len_utf8();
            if lowered.len() >= needle_lower.len() {
                break;
            }
        }
        (lowered == needle_lower).then_some((start, end))
    })
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}
