use serde::{Deserialize, Serialize};

use crate::domain::a002_object_type::ObjectTypeId;
use crate::domain::a003_object_class::ObjectClassId;
use crate::domain::a004_object_competency::ObjectCompetencyId;
use crate::domain::a005_object_zone::ObjectZoneId;
use crate::domain::a006_object_wbs_title::ObjectWbsTitleId;
use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::SoftDeletable;
use crate::shared::api_response::ApiResponse;
use crate::shared::pagination::Pagination;
use crate::shared::serde_helpers::{first_of_array, null_as_default};

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Идентификатор объекта (оборудования)
    ObjectId
);

// ============================================================================
// Relations
// ============================================================================

/// Связь с зоной. На проводе передаётся массивом из одного элемента.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLink {
    pub zone_id: ObjectZoneId,
}

/// Связь с титулом WBS. На проводе передаётся массивом из одного элемента.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbsTitleLink {
    pub title_id: ObjectWbsTitleId,
}

/// Строка связи объекта с компетенцией
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCompetencyLink {
    pub competency_id: ObjectCompetencyId,
}

/// Тело запроса на полную замену компетенций объекта
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCompetenciesRequest {
    pub competencies: Vec<ObjectCompetencyId>,
}

impl SetCompetenciesRequest {
    pub fn from_links(links: &[ObjectCompetencyLink]) -> Self {
        Self {
            competencies: links.iter().map(|l| l.competency_id).collect(),
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Объект (единица оборудования)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(deserialize_with = "null_as_default")]
    pub object_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object_label_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object_desc: String,
    pub object_class_id: Option<ObjectClassId>,
    pub object_type_id: Option<ObjectTypeId>,
    #[serde(deserialize_with = "null_as_default")]
    pub org_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub department_name: String,
    pub parent_object_id: Option<ObjectId>,
    pub parent_object_name: Option<String>,
    #[serde(rename = "zone_id", with = "first_of_array")]
    pub zone: Option<ZoneLink>,
    #[serde(rename = "title_id", with = "first_of_array")]
    pub title: Option<WbsTitleLink>,
    #[serde(deserialize_with = "null_as_default")]
    pub delete_flag: bool,
    /// Закэшированный QR-код (непрозрачная строка от сервера)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,

    // Поля только для списка
    #[serde(rename = "competenceString", skip_serializing_if = "Option::is_none")]
    pub competence_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type_code: Option<String>,
}

impl ObjectRecord {
    /// Подпись в селекторе родителя: `"{код типа} {наименование}"`
    pub fn display_value(&self) -> String {
        format!(
            "{} {}",
            self.object_type_code.as_deref().unwrap_or_default(),
            self.object_name
        )
        .trim()
        .to_string()
    }

    pub fn zone_id(&self) -> Option<ObjectZoneId> {
        self.zone.map(|z| z.zone_id)
    }

    pub fn title_id(&self) -> Option<ObjectWbsTitleId> {
        self.title.map(|t| t.title_id)
    }
}

impl SoftDeletable for ObjectRecord {
    fn is_deleted(&self) -> bool {
        self.delete_flag
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `data` of the create answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedObject {
    pub object_id: Option<ObjectId>,
}

pub type CreateObjectResponse = ApiResponse<CreatedObject>;

/// Страница списка объектов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectListResponse {
    pub status: bool,
    pub data: Vec<ObjectRecord>,
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_and_title_are_one_element_arrays() {
        let json = r#"{
            "object_id": 10,
            "object_code": "P-1",
            "object_name": "Насос",
            "zone_id": [{"zone_id": 3}],
            "title_id": [],
            "competenceString": "Механика"
        }"#;
        let rec: ObjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.object_id, Some(ObjectId(10)));
        assert_eq!(rec.zone_id(), Some(ObjectZoneId(3)));
        assert_eq!(rec.title, None);
        assert_eq!(rec.competence_string.as_deref(), Some("Механика"));

        let back = serde_json::to_value(&rec).unwrap();
        assert_eq!(back["zone_id"], serde_json::json!([{"zone_id": 3}]));
        assert_eq!(back["title_id"], serde_json::json!([]));
    }

    #[test]
    fn test_display_value() {
        let rec = ObjectRecord {
            object_name: "Насос".into(),
            object_type_code: Some("PMP".into()),
            ..Default::default()
        };
        assert_eq!(rec.display_value(), "PMP Насос");

        let untyped = ObjectRecord {
            object_name: "Насос".into(),
            ..Default::default()
        };
        assert_eq!(untyped.display_value(), "Насос");
    }

    #[test]
    fn test_create_response_with_id() {
        let resp: CreateObjectResponse =
            serde_json::from_str(r#"{"status":true,"data":{"object_id":42}}"#).unwrap();
        assert!(resp.status);
        assert_eq!(resp.data.and_then(|d| d.object_id), Some(ObjectId(42)));
    }

    #[test]
    fn test_list_response_with_pagination() {
        let resp: ObjectListResponse = serde_json::from_str(
            r#"{"status":true,"data":[{"object_id":1}],"pagination":{"page":1,"pageSize":50,"pagesCount":3}}"#,
        )
        .unwrap();
        assert_eq!(resp.data.len(), 1);
        assert_eq!(resp.pagination.map(|p| p.pages_count), Some(3));
    }

    #[test]
    fn test_null_text_fields_read_as_empty() {
        let rec: ObjectRecord = serde_json::from_str(
            r#"{"object_id":1,"object_code":"P-1","object_name":null,"object_label_name":null,
                "object_desc":null,"org_name":null,"department_name":null,"delete_flag":null}"#,
        )
        .unwrap();
        assert_eq!(rec.object_id, Some(ObjectId(1)));
        assert_eq!(rec.object_code, "P-1");
        assert_eq!(rec.object_name, "");
        assert_eq!(rec.object_desc, "");
        assert_eq!(rec.org_name, "");
        assert!(!rec.delete_flag);
    }

    #[test]
    fn test_list_page_keeps_rows_with_null_fields() {
        let resp: ObjectListResponse = serde_json::from_str(
            r#"{"status":true,"data":[
                {"object_id":1,"object_code":"P-1","org_name":null},
                {"object_id":2,"object_code":"P-2","org_name":"Цех"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[0].org_name, "");
        assert_eq!(resp.data[1].org_name, "Цех");
    }
}
