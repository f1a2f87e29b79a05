use serde::{Deserialize, Serialize};

/// Метаданные постраничной выдачи, возвращаемые списочными эндпоинтами.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based номер отданной страницы
    pub page: u32,
    pub page_size: u32,
    pub pages_count: u32,
    #[serde(default)]
    pub total: u64,
}

impl Pagination {
    /// Page exists on the server (`1..=pages_count`).
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.pages_count
    }

    pub fn is_last(&self, page: u32) -> bool {
        page >= self.pages_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_uses_camel_case_on_the_wire() {
        let p: Pagination =
            serde_json::from_str(r#"{"page":2,"pageSize":50,"pagesCount":3,"total":120}"#).unwrap();
        assert_eq!(p.page, 2);
        assert_eq!(p.page_size, 50);
        assert_eq!(p.pages_count, 3);
        assert_eq!(p.total, 120);
    }

    #[test]
    fn test_contains_checks_bounds() {
        let p = Pagination {
            page: 1,
            page_size: 50,
            pages_count: 3,
            total: 0,
        };
        assert!(!p.contains(0));
        assert!(p.contains(1));
        assert!(p.contains(3));
        assert!(!p.contains(4));
        assert!(p.is_last(3));
    }
}
