use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::SoftDeletable;
use crate::shared::serde_helpers::null_as_default;

numeric_id!(
    /// Идентификатор компетенции
    ObjectCompetencyId
);

/// Компетенция (справочник), привязывается к объекту списком
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectCompetency {
    pub competency_id: Option<ObjectCompetencyId>,
    #[serde(deserialize_with = "null_as_default")]
    pub competency_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub competency_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub delete_flag: bool,
}

impl ObjectCompetency {
    /// Подпись в формате `код / наименование`
    pub fn caption(&self) -> String {
        format!("{} / {}", self.competency_code, self.competency_name)
    }
}

impl SoftDeletable for ObjectCompetency {
    fn is_deleted(&self) -> bool {
        self.delete_flag
    }
}
