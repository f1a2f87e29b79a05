use std::collections::BTreeMap;

use super::aggregate::ObjectId;
use crate::domain::common::AggregateId;

/// Плоское представление запроса: параметры URL / запись в localStorage.
pub type QueryPairs = BTreeMap<String, String>;

pub const PARAM_PAGE: &str = "page";
pub const PARAM_PAGE_SIZE: &str = "pageSize";
pub const PARAM_ORDER_BY: &str = "orderBy";
pub const PARAM_ASC: &str = "asc";
pub const PARAM_ARCHIVE: &str = "archive";
pub const PARAM_OBJECT_ID: &str = "object_id";

const RESERVED: [&str; 6] = [
    PARAM_PAGE,
    PARAM_PAGE_SIZE,
    PARAM_ORDER_BY,
    PARAM_ASC,
    PARAM_ARCHIVE,
    PARAM_OBJECT_ID,
];

/// Колонки, по которым сервер умеет сортировать список объектов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectSortField {
    ObjectCode,
    ObjectName,
    ObjectLabelName,
    OrgName,
    DepartmentName,
    ParentObject,
}

impl ObjectSortField {
    pub const ALL: [ObjectSortField; 6] = [
        ObjectSortField::ObjectCode,
        ObjectSortField::ObjectName,
        ObjectSortField::ObjectLabelName,
        ObjectSortField::OrgName,
        ObjectSortField::DepartmentName,
        ObjectSortField::ParentObject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectSortField::ObjectCode => "object_code",
            ObjectSortField::ObjectName => "object_name",
            ObjectSortField::ObjectLabelName => "object_label_name",
            ObjectSortField::OrgName => "org_name",
            ObjectSortField::DepartmentName => "department_name",
            ObjectSortField::ParentObject => "parent_object",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

/// Typed list query.
///
/// Round-trips through [`QueryPairs`] for the address bar and for the stored
/// table state. `asc` is written only when true and `archive` is a
/// presence flag with an empty value. Unknown keys are column filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub order_by: Option<ObjectSortField>,
    pub asc: bool,
    pub archive: bool,
    /// Выделенная строка, а не фильтр
    pub object_id: Option<ObjectId>,
    pub filters: BTreeMap<String, String>,
}

impl ObjectListQuery {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Устанавливает фильтр колонки; пустое значение снимает фильтр.
    pub fn set_filter(&mut self, field: &str, value: &str) {
        if RESERVED.contains(&field) {
            return;
        }
        if value.is_empty() {
            self.filters.remove(field);
        } else {
            self.filters.insert(field.to_string(), value.to_string());
        }
    }

    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(page) = self.page {
            pairs.insert(PARAM_PAGE.into(), page.to_string());
        }
        if let Some(size) = self.page_size {
            pairs.insert(PARAM_PAGE_SIZE.into(), size.to_string());
        }
        if let Some(field) = self.order_by {
            pairs.insert(PARAM_ORDER_BY.into(), field.as_str().into());
        }
        if self.asc {
            pairs.insert(PARAM_ASC.into(), "true".into());
        }
        if self.archive {
            pairs.insert(PARAM_ARCHIVE.into(), String::new());
        }
        if let Some(id) = self.object_id {
            pairs.insert(PARAM_OBJECT_ID.into(), id.as_string());
        }
        for (k, v) in &self.filters {
            pairs.insert(k.clone(), v.clone());
        }
        pairs
    }

    /// Malformed numbers and unknown sort fields are dropped, not rejected.
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        let mut query = Self {
            page: pairs.get(PARAM_PAGE).and_then(|v| v.parse().ok()),
            page_size: pairs.get(PARAM_PAGE_SIZE).and_then(|v| v.parse().ok()),
            order_by: pairs
                .get(PARAM_ORDER_BY)
                .and_then(|v| ObjectSortField::parse(v)),
            asc: pairs.get(PARAM_ASC).is_some_and(|v| v == "true"),
            archive: pairs.contains_key(PARAM_ARCHIVE),
            object_id: pairs
                .get(PARAM_OBJECT_ID)
                .and_then(|v| ObjectId::from_string(v).ok()),
            filters: BTreeMap::new(),
        };
        for (k, v) in pairs {
            if !RESERVED.contains(&k.as_str()) && !v.is_empty() {
                query.filters.insert(k.clone(), v.clone());
            }
        }
        query
    }

    /// Параметры запроса к серверу для страницы `page`.
    ///
    /// `archive` is sent as an explicit boolean; the selected row is not sent.
    pub fn request_pairs(&self, page: u32, page_size: u32) -> Vec<(String, String)> {
        let mut pairs = vec![
            (PARAM_PAGE.to_string(), page.to_string()),
            (PARAM_PAGE_SIZE.to_string(), page_size.to_string()),
        ];
        if let Some(field) = self.order_by {
            pairs.push((PARAM_ORDER_BY.into(), field.as_str().into()));
        }
        pairs.push((PARAM_ASC.into(), self.asc.to_string()));
        pairs.push((PARAM_ARCHIVE.into(), self.archive.to_string()));
        for (k, v) in &self.filters {
            pairs.push((k.clone(), v.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_splits_reserved_and_filters() {
        let q = ObjectListQuery::from_pairs(&pairs(&[
            ("orderBy", "org_name"),
            ("asc", "true"),
            ("archive", ""),
            ("object_id", "17"),
            ("org_name", "Цех 1"),
            ("competences", ""),
        ]));
        assert_eq!(q.order_by, Some(ObjectSortField::OrgName));
        assert!(q.asc);
        assert!(q.archive);
        assert_eq!(q.object_id, Some(ObjectId(17)));
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.filters.get("org_name").map(String::as_str), Some("Цех 1"));
    }

    #[test]
    fn test_to_pairs_omits_false_asc_and_active_archive() {
        let q = ObjectListQuery {
            order_by: Some(ObjectSortField::ObjectCode),
            ..Default::default()
        };
        let p = q.to_pairs();
        assert_eq!(p.get("orderBy").map(String::as_str), Some("object_code"));
        assert!(!p.contains_key("asc"));
        assert!(!p.contains_key("archive"));
    }

    #[test]
    fn test_bad_values_are_dropped() {
        let q = ObjectListQuery::from_pairs(&pairs(&[
            ("orderBy", "nope"),
            ("object_id", "x"),
            ("page", "-1"),
        ]));
        assert_eq!(q.order_by, None);
        assert_eq!(q.object_id, None);
        assert_eq!(q.page, None);
    }

    #[test]
    fn test_set_filter_empty_removes() {
        let mut q = ObjectListQuery::default();
        q.set_filter("department_name", "ОГМ");
        assert_eq!(q.filters.len(), 1);
        q.set_filter("department_name", "");
        assert!(q.filters.is_empty());
        q.set_filter("orderBy", "x");
        assert!(q.is_empty());
    }

    #[test]
    fn test_request_pairs_send_archive_as_bool() {
        let q = ObjectListQuery {
            archive: true,
            object_id: Some(ObjectId(3)),
            ..Default::default()
        };
        let p = q.request_pairs(2, 50);
        assert!(p.contains(&("page".into(), "2".into())));
        assert!(p.contains(&("archive".into(), "true".into())));
        assert!(!p.iter().any(|(k, _)| k == "object_id"));
    }
}
