use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::SoftDeletable;
use crate::shared::serde_helpers::null_as_default;

numeric_id!(
    /// Идентификатор зоны
    ObjectZoneId
);

/// Зона размещения объекта
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectZone {
    pub zone_id: Option<ObjectZoneId>,
    #[serde(deserialize_with = "null_as_default")]
    pub zone_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub delete_flag: bool,
}

impl SoftDeletable for ObjectZone {
    fn is_deleted(&self) -> bool {
        self.delete_flag
    }
}
