//! Object type editor - business logic.

use contracts::domain::a002_object_type::ObjectType;

use crate::domain::a001_object::api::ObjectService;
use crate::shared::dirty::{Snapshot, TextField};
use crate::shared::error::AppError;

pub const DIRTY_FIELDS: [TextField<ObjectType>; 3] = [
    |t| &t.object_type_code,
    |t| &t.object_type_name,
    |t| &t.object_type_desc,
];

/// Состояние формы редактора типа объекта
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEditorState {
    pub entity: ObjectType,
    snapshot: Snapshot<ObjectType>,
    pub readonly: bool,
    pub is_create: bool,
    pub is_changed: bool,
    pub disable_save: bool,
}

impl Default for TypeEditorState {
    fn default() -> Self {
        Self {
            entity: ObjectType::default(),
            snapshot: Snapshot::take(&ObjectType::default()),
            readonly: false,
            is_create: true,
            is_changed: false,
            disable_save: false,
        }
    }
}

impl TypeEditorState {
    pub fn create(&mut self) {
        *self = Self::default();
    }

    pub fn edit(&mut self, entity: ObjectType) {
        self.snapshot = Snapshot::take(&entity);
        self.readonly = entity.delete_flag;
        self.entity = entity;
        self.is_create = false;
        self.is_changed = false;
        self.disable_save = false;
    }

    pub fn snapshot(&self) -> &ObjectType {
        self.snapshot.get()
    }

    pub fn on_form_change(&mut self) -> bool {
        self.is_changed = self.snapshot.is_dirty(&self.entity, &DIRTY_FIELDS);
        self.is_changed
    }

    /// Applies a form edit. Refused while a request is in flight or the
    /// type is archived.
    pub fn apply_edit(&mut self, update: impl FnOnce(&mut ObjectType)) -> bool {
        if self.disable_save || self.readonly {
            return false;
        }
        update(&mut self.entity);
        self.on_form_change();
        true
    }

    pub fn is_form_valid(&self) -> bool {
        !self.entity.object_type_code.trim().is_empty()
            && !self.entity.object_type_name.trim().is_empty()
    }

    /// Drops unsaved edits.
    fn reset_form(&mut self) {
        self.entity = self.snapshot.get().clone();
        self.is_changed = false;
    }
}

/// Создаёт или обновляет тип по наличию id.
///
/// Save stays disabled for the duration of the call. On success the
/// snapshot follows the saved entity.
pub async fn submit(
    service: &dyn ObjectService,
    state: &mut TypeEditorState,
) -> Result<ObjectType, AppError> {
    state.disable_save = true;
    let result = match state.entity.object_type_id {
        Some(_) => service.update_object_type(&state.entity).await.map(|_| None),
        None => service.create_object_type(&state.entity).await,
    };
    state.disable_save = false;

    let created_id = result?;
    if state.entity.is_new() {
        state.entity.object_type_id = created_id;
        state.entity.delete_flag = false;
        state.is_create = false;
    }
    state.snapshot.replace(&state.entity);
    state.on_form_change();
    Ok(state.entity.clone())
}

/// Переключает признак архива сохранённого типа.
///
/// Unsaved edits are dropped and the snapshot with the flipped flag is sent.
/// On failure the snapshot flag is restored. Returns the flag in effect.
pub async fn change_delete_flag(
    service: &dyn ObjectService,
    state: &mut TypeEditorState,
) -> Result<bool, AppError> {
    if state.entity.object_type_id.is_none() {
        return Ok(state.entity.delete_flag);
    }
    let flag = !state.snapshot.get().delete_flag;
    state.snapshot.get_mut().delete_flag = flag;
    state.reset_form();
    state.disable_save = true;

    let result = service.update_object_type(state.snapshot.get()).await;
    state.disable_save = false;
    match result {
        Ok(()) => {
            state.entity.delete_flag = flag;
            state.readonly = flag;
            state.snapshot.replace(&state.entity);
            state.is_changed = false;
            Ok(flag)
        }
        Err(e) => {
            state.snapshot.get_mut().delete_flag = !flag;
            state.entity.delete_flag = !flag;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_object::api::mock::{Call, MockObjectService};
    use contracts::domain::a002_object_type::ObjectTypeId;

    fn saved_type(id: i64) -> ObjectType {
        ObjectType {
            object_type_id: Some(ObjectTypeId(id)),
            object_type_code: "PMP".into(),
            object_type_name: "Насос".into(),
            object_type_desc: String::new(),
            delete_flag: false,
        }
    }

    #[test]
    fn test_create_resets_form() {
        let mut state = TypeEditorState::default();
        state.edit(saved_type(1));
        state.create();
        assert!(state.is_create);
        assert!(!state.readonly);
        assert!(!state.is_changed);
        assert!(!state.disable_save);
        assert!(state.entity.is_new());
    }

    #[test]
    fn test_edit_archived_is_readonly() {
        let mut state = TypeEditorState::default();
        let mut t = saved_type(1);
        t.delete_flag = true;
        state.edit(t);
        assert!(state.readonly);
        assert!(!state.is_create);
    }

    #[test]
    fn test_form_change_result_is_stored() {
        let mut state = TypeEditorState::default();
        state.edit(saved_type(1));
        state.entity.object_type_name = "Насос ".into();
        assert!(!state.on_form_change());
        state.entity.object_type_name = "Клапан".into();
        assert!(state.on_form_change());
        assert!(state.is_changed);
    }

    #[test]
    fn test_edit_refused_while_saving() {
        let mut state = TypeEditorState::default();
        state.edit(saved_type(1));
        state.disable_save = true;
        assert!(!state.apply_edit(|t| t.object_type_name = "Клапан".into()));
        assert_eq!(state.entity.object_type_name, "Насос");

        state.disable_save = false;
        assert!(state.apply_edit(|t| t.object_type_name = "Клапан".into()));
        assert!(state.is_changed);
    }

    #[tokio::test]
    async fn test_submit_create_takes_server_id() {
        let service = MockObjectService::default();
        *service.created_type_id.lock().unwrap() = Some(ObjectTypeId(11));
        let mut state = TypeEditorState::default();
        state.entity.object_type_code = "VLV".into();
        state.entity.object_type_name = "Клапан".into();
        state.on_form_change();

        let saved = submit(&service, &mut state).await.unwrap();

        assert_eq!(saved.object_type_id, Some(ObjectTypeId(11)));
        assert!(!state.is_create);
        assert!(!state.is_changed);
        assert!(!state.disable_save);
        assert_eq!(service.calls(), vec![Call::CreateType]);
    }

    #[tokio::test]
    async fn test_submit_failure_reenables_save() {
        let service = MockObjectService::default();
        *service.reject.lock().unwrap() = Some(AppError::Rejected("Код занят".into()));
        let mut state = TypeEditorState::default();
        state.edit(saved_type(1));
        state.entity.object_type_code = "X".into();
        state.on_form_change();

        let err = submit(&service, &mut state).await.unwrap_err();

        assert_eq!(err.user_message(), "Код занят");
        assert!(!state.disable_save);
        assert!(state.is_changed);
        assert_eq!(state.snapshot().object_type_code, "PMP");
    }

    #[tokio::test]
    async fn test_change_delete_flag_sends_snapshot() {
        let service = MockObjectService::default();
        let mut state = TypeEditorState::default();
        state.edit(saved_type(1));
        state.entity.object_type_name = "несохранённое".into();

        let flag = change_delete_flag(&service, &mut state).await.unwrap();

        assert!(flag);
        assert!(state.readonly);
        assert!(state.entity.delete_flag);
        assert_eq!(state.entity.object_type_name, "Насос");
        let mut sent = saved_type(1);
        sent.delete_flag = true;
        assert_eq!(service.calls(), vec![Call::UpdateType(sent)]);
    }

    #[tokio::test]
    async fn test_change_delete_flag_failure_restores() {
        let service = MockObjectService::default();
        *service.reject.lock().unwrap() = Some(AppError::Http {
            status: 500,
            message: None,
        });
        let mut state = TypeEditorState::default();
        state.edit(saved_type(1));

        let err = change_delete_flag(&service, &mut state).await.unwrap_err();

        assert_eq!(err.user_message(), "Ошибка сохранения");
        assert!(!state.snapshot().delete_flag);
        assert!(!state.entity.delete_flag);
        assert!(!state.readonly);
    }
}
