use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::domain::common::SoftDeletable;
use crate::shared::serde_helpers::null_as_default;

numeric_id!(
    /// Идентификатор класса объекта
    ObjectClassId
);

/// Класс объекта (справочник)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectClass {
    pub object_class_id: Option<ObjectClassId>,
    #[serde(deserialize_with = "null_as_default")]
    pub object_class_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub object_class_name: String,
    /// Полное наименование, показывается в карточке объекта
    pub object_class_full: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub delete_flag: bool,
}

impl ObjectClass {
    pub fn full_name(&self) -> &str {
        self.object_class_full
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.object_class_name)
    }
}

impl SoftDeletable for ObjectClass {
    fn is_deleted(&self) -> bool {
        self.delete_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_falls_back_to_name() {
        let mut class = ObjectClass {
            object_class_id: Some(ObjectClassId(1)),
            object_class_name: "Насос".into(),
            ..Default::default()
        };
        assert_eq!(class.full_name(), "Насос");

        class.object_class_full = Some("Насос центробежный".into());
        assert_eq!(class.full_name(), "Насос центробежный");
    }
}
