use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::SoftDeletable;
use crate::shared::api_response::ApiResponse;
use crate::shared::serde_helpers::null_as_default;

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Идентификатор типа объекта
    ObjectTypeId
);

// ============================================================================
// Catalog entry
// ============================================================================

/// Тип объекта (справочник, редактируется в боковой панели)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type_id: Option<ObjectTypeId>,
    #[serde(deserialize_with = "null_as_default")]
    pub object_type_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object_type_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object_type_desc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub delete_flag: bool,
}

impl ObjectType {
    pub fn is_new(&self) -> bool {
        self.object_type_id.is_none()
    }
}

impl SoftDeletable for ObjectType {
    fn is_deleted(&self) -> bool {
        self.delete_flag
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `data` of a create/update answer; create returns the assigned id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTypeSaved {
    pub object_type_id: Option<ObjectTypeId>,
}

pub type ObjectTypeSaveResponse = ApiResponse<ObjectTypeSaved>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_type_is_sent_without_id() {
        let draft = ObjectType {
            object_type_code: "PMP".into(),
            object_type_name: "Насос".into(),
            ..Default::default()
        };
        assert!(draft.is_new());

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("object_type_id").is_none());
        assert_eq!(json["delete_flag"], false);
    }

    #[test]
    fn test_partial_payload_uses_defaults() {
        let t: ObjectType =
            serde_json::from_str(r#"{"object_type_id":5,"object_type_code":"V"}"#).unwrap();
        assert_eq!(t.object_type_id, Some(ObjectTypeId(5)));
        assert_eq!(t.object_type_name, "");
        assert!(t.is_active());
    }

    #[test]
    fn test_null_desc_reads_as_empty() {
        let t: ObjectType = serde_json::from_str(
            r#"{"object_type_id":5,"object_type_code":"V","object_type_desc":null,"delete_flag":null}"#,
        )
        .unwrap();
        assert_eq!(t.object_type_desc, "");
        assert!(!t.delete_flag);
    }
}
