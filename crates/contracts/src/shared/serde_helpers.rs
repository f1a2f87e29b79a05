//! Serde adapters for legacy wire shapes.

/// Single optional relation stored on the wire as a zero-or-one element array.
///
/// `"zone_id": [{"zone_id": 3}]` ⇄ `Some(ZoneLink { zone_id: 3 })`,
/// `"zone_id": []` / `null` / missing ⇄ `None`. Extra elements are ignored.
pub mod first_of_array {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_seq(value.iter())
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let items: Option<Vec<T>> = Option::deserialize(deserializer)?;
        Ok(items.and_then(|v| v.into_iter().next()))
    }
}

/// Reads JSON `null` as the type's default.
///
/// `#[serde(default)]` only covers missing keys; the backend also sends
/// `null` for empty text columns.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Link {
        id: i64,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(default, with = "super::first_of_array")]
        link: Option<Link>,
    }

    #[test]
    fn test_reads_first_element() {
        let h: Holder = serde_json::from_str(r#"{"link":[{"id":3},{"id":4}]}"#).unwrap();
        assert_eq!(h.link, Some(Link { id: 3 }));
    }

    #[test]
    fn test_empty_null_and_missing_are_none() {
        for raw in [r#"{"link":[]}"#, r#"{"link":null}"#, r#"{}"#] {
            let h: Holder = serde_json::from_str(raw).unwrap();
            assert_eq!(h.link, None, "input: {raw}");
        }
    }

    #[test]
    fn test_writes_array() {
        let some = Holder {
            link: Some(Link { id: 9 }),
        };
        assert_eq!(serde_json::to_string(&some).unwrap(), r#"{"link":[{"id":9}]}"#);
        let none = Holder { link: None };
        assert_eq!(serde_json::to_string(&none).unwrap(), r#"{"link":[]}"#);
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Row {
        #[serde(deserialize_with = "super::null_as_default")]
        name: String,
        #[serde(deserialize_with = "super::null_as_default")]
        deleted: bool,
    }

    #[test]
    fn test_null_reads_as_default() {
        let row: Row = serde_json::from_str(r#"{"name":null,"deleted":null}"#).unwrap();
        assert_eq!(row, Row::default());

        let row: Row = serde_json::from_str(r#"{"name":"Насос","deleted":true}"#).unwrap();
        assert_eq!(row.name, "Насос");
        assert!(row.deleted);

        let missing: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(missing, Row::default());
    }
}
