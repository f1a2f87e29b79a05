use contracts::domain::a002_object_type::ObjectType;

/// Оповещения редактора типов для списков, где типы показаны
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEditorEvent {
    /// Тип создан или изменён
    Changed(Option<ObjectType>),
    /// Сохранение прошло, форма синхронизирована со снимком
    Updated,
    /// Признак архива изменился; списки заново применяют фильтр активных
    Filter,
}
