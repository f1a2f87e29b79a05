//! Фильтрация выпадающих списков справочников.

use contracts::domain::common::SoftDeletable;

/// Пункт выпадающего списка
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub id: i64,
    pub label: String,
}

/// Non-deleted entries whose `field` contains `search`, case-insensitively.
/// An empty search keeps every non-deleted entry.
pub fn filter_active<'a, T>(items: &'a [T], search: &str, field: fn(&T) -> &str) -> Vec<&'a T>
where
    T: SoftDeletable,
{
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| item.is_active())
        .filter(|item| needle.is_empty() || field(item).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        name: &'static str,
        deleted: bool,
    }

    impl SoftDeletable for Entry {
        fn is_deleted(&self) -> bool {
            self.deleted
        }
    }

    fn name(e: &Entry) -> &str {
        e.name
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { name: "Насос", deleted: false },
            Entry { name: "НАСОСНАЯ станция", deleted: false },
            Entry { name: "Насос старый", deleted: true },
            Entry { name: "Клапан", deleted: false },
        ]
    }

    #[test]
    fn test_matches_case_insensitively_and_skips_deleted() {
        let items = entries();
        let found: Vec<&str> = filter_active(&items, "насос", name)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(found, vec!["Насос", "НАСОСНАЯ станция"]);
    }

    #[test]
    fn test_empty_search_returns_all_active() {
        let items = entries();
        assert_eq!(filter_active(&items, "", name).len(), 3);
        assert_eq!(filter_active(&items, "  ", name).len(), 3);
    }
}
