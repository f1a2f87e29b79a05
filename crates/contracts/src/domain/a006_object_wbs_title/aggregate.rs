use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::SoftDeletable;
use crate::shared::serde_helpers::null_as_default;

numeric_id!(
    /// Идентификатор титула WBS
    ObjectWbsTitleId
);

/// Титул WBS
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectWbsTitle {
    pub title_id: Option<ObjectWbsTitleId>,
    #[serde(deserialize_with = "null_as_default")]
    pub title_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub delete_flag: bool,
}

impl SoftDeletable for ObjectWbsTitle {
    fn is_deleted(&self) -> bool {
        self.delete_flag
    }
}
