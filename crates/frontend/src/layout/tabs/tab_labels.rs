//! Tab labels - единственный источник правды для заголовков табов.

use super::registry::{TAB_OBJECT_LIST, TAB_OBJECT_NEW, TAB_OBJECT_TYPES};

/// Возвращает читаемый заголовок таба для данного ключа. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> &str {
    match key {
        TAB_OBJECT_LIST => "Объекты",
        TAB_OBJECT_NEW => "Новый объект",
        TAB_OBJECT_TYPES => "Типы объектов",
        other => other,
    }
}

/// Заголовок таба карточки: `"{код} {наименование}"` или id, если оба пусты.
pub fn detail_tab_label(code: &str, name: &str, id: &str) -> String {
    let label = format!("{} {}", code.trim(), name.trim());
    let label = label.trim();
    if label.is_empty() {
        format!("Объект #{}", id)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a001_object"), "Объекты");
        assert_eq!(tab_label_for_key("a001_object_detail_7"), "a001_object_detail_7");
        assert_eq!(detail_tab_label("P-1", " Насос ", "7"), "P-1 Насос");
        assert_eq!(detail_tab_label("", "", "7"), "Объект #7");
    }
}
