//! Object details - business logic.
//!
//! Everything here works on plain values and an [`ObjectService`], so the
//! save and archive flows are testable without a browser.

use contracts::domain::a001_object::{
    ObjectCompetencyLink, ObjectId, ObjectRecord, WbsTitleLink, ZoneLink,
};
use contracts::domain::a002_object_type::ObjectTypeId;
use contracts::domain::a003_object_class::ObjectClassId;
use contracts::domain::a004_object_competency::ObjectCompetencyId;
use contracts::domain::a005_object_zone::ObjectZoneId;
use contracts::domain::a006_object_wbs_title::ObjectWbsTitleId;

use crate::domain::a001_object::api::ObjectService;
use crate::shared::dirty::{Snapshot, TextField};
use crate::shared::error::AppError;

/// Поля, изменение которых делает форму "грязной"
pub const DIRTY_FIELDS: [TextField<ObjectRecord>; 3] = [
    |r| &r.object_code,
    |r| &r.object_name,
    |r| &r.object_desc,
];

/// Ссылочные поля карточки, выбираемые из выпадающих списков
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRefField {
    Class,
    Type,
    Parent,
    Zone,
    WbsTitle,
}

/// Sets the reference `field` to `id`; `None` clears it.
pub fn selected_item_change(record: &mut ObjectRecord, field: ObjectRefField, id: Option<i64>) {
    match field {
        ObjectRefField::Class => record.object_class_id = id.map(ObjectClassId),
        ObjectRefField::Type => record.object_type_id = id.map(ObjectTypeId),
        ObjectRefField::Parent => {
            record.parent_object_id = id.map(ObjectId);
            record.parent_object_name = None;
        }
        ObjectRefField::Zone => {
            record.zone = id.map(|id| ZoneLink {
                zone_id: ObjectZoneId(id),
            })
        }
        ObjectRefField::WbsTitle => {
            record.title = id.map(|id| WbsTitleLink {
                title_id: ObjectWbsTitleId(id),
            })
        }
    }
}

pub fn is_form_valid(record: &ObjectRecord) -> bool {
    !record.object_code.trim().is_empty() && !record.object_name.trim().is_empty()
}

/// Добавляет компетенцию, если её ещё нет в списке.
pub fn add_competency(list: &mut Vec<ObjectCompetencyId>, id: ObjectCompetencyId) -> bool {
    if list.contains(&id) {
        return false;
    }
    list.push(id);
    true
}

pub fn delete_competence(list: &mut Vec<ObjectCompetencyId>, id: ObjectCompetencyId) -> bool {
    let before = list.len();
    list.retain(|c| *c != id);
    list.len() != before
}

pub fn competency_links(list: &[ObjectCompetencyId]) -> Vec<ObjectCompetencyLink> {
    list.iter()
        .map(|id| ObjectCompetencyLink { competency_id: *id })
        .collect()
}

/// Parent to fetch separately: set on the record but not in `objects`.
pub fn missing_parent(record: &ObjectRecord, objects: &[ObjectRecord]) -> Option<ObjectId> {
    let parent = record.parent_object_id?;
    if objects.iter().any(|o| o.object_id == Some(parent)) {
        None
    } else {
        Some(parent)
    }
}

/// `src` картинки для QR-кода.
///
/// The server answers with a data URL, a plain URL, raw SVG markup or bare
/// base64 PNG.
pub fn qr_image_src(payload: &str) -> String {
    let payload = payload.trim();
    if payload.starts_with("data:") || payload.starts_with("http") || payload.starts_with('/') {
        payload.to_string()
    } else if payload.starts_with("<svg") || payload.starts_with("<?xml") {
        format!("data:image/svg+xml;utf8,{}", urlencoding::encode(payload))
    } else {
        format!("data:image/png;base64,{}", payload)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Updated,
    /// Сервер присвоил id; `qr` - свежесгенерированный код
    Created { id: ObjectId, qr: Option<String> },
    /// Запись создана, но id не вернулся
    CreatedWithoutId,
}

/// Saves the record and its competencies.
///
/// With an id: update, then replace competencies. Without: create, then
/// generate the QR code and replace competencies of the new record.
/// Competency and QR failures are logged and do not fail the save.
pub async fn save_object(
    service: &dyn ObjectService,
    record: &ObjectRecord,
    competencies: &[ObjectCompetencyId],
) -> Result<SaveOutcome, AppError> {
    let links = competency_links(competencies);

    if let Some(id) = record.object_id {
        let updated = service.update_object(record).await;
        if let Err(e) = service.set_competencies(id, &links).await {
            log::warn!("set competencies of {} failed: {}", id, e);
        }
        return updated.map(|_| SaveOutcome::Updated);
    }

    let Some(id) = service.create_object(record).await? else {
        log::warn!("object created without id in response");
        return Ok(SaveOutcome::CreatedWithoutId);
    };
    let qr = match service.generate_qr(id, true).await {
        Ok(qr) => qr,
        Err(e) => {
            log::warn!("QR generation for {} failed: {}", id, e);
            None
        }
    };
    if let Err(e) = service.set_competencies(id, &links).await {
        log::warn!("set competencies of {} failed: {}", id, e);
    }
    Ok(SaveOutcome::Created { id, qr })
}

/// Переключает признак архива через снимок.
///
/// The snapshot flag is flipped and the snapshot is sent. On success the
/// flag is copied to `live`; on failure the snapshot is restored. Returns
/// the flag now in effect.
pub async fn change_delete_flag(
    service: &dyn ObjectService,
    snapshot: &mut Snapshot<ObjectRecord>,
    live: &mut ObjectRecord,
) -> Result<bool, AppError> {
    if snapshot.get().object_id.is_none() {
        return Ok(live.delete_flag);
    }
    let flag = !snapshot.get().delete_flag;
    snapshot.get_mut().delete_flag = flag;

    match service.update_object(snapshot.get()).await {
        Ok(()) => {
            live.delete_flag = flag;
            Ok(flag)
        }
        Err(e) => {
            snapshot.get_mut().delete_flag = !flag;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_object::api::mock::{Call, MockObjectService};
    use crate::layout::tabs::registry::object_detail_key;

    fn record(id: Option<i64>) -> ObjectRecord {
        ObjectRecord {
            object_id: id.map(ObjectId),
            object_code: "P-1".into(),
            object_name: "Насос".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dirty_fields_ignore_whitespace() {
        let snap = Snapshot::take(&record(Some(1)));
        let mut edited = record(Some(1));
        edited.object_name = " Насос ".into();
        assert!(!snap.is_dirty(&edited, &DIRTY_FIELDS));
        edited.object_desc = "новое".into();
        assert!(snap.is_dirty(&edited, &DIRTY_FIELDS));
    }

    #[test]
    fn test_selected_item_change_sets_typed_refs() {
        let mut r = ObjectRecord::default();
        selected_item_change(&mut r, ObjectRefField::Zone, Some(3));
        selected_item_change(&mut r, ObjectRefField::Type, Some(7));
        assert_eq!(r.zone_id(), Some(ObjectZoneId(3)));
        assert_eq!(r.object_type_id, Some(ObjectTypeId(7)));
        selected_item_change(&mut r, ObjectRefField::Zone, None);
        assert_eq!(r.zone, None);
    }

    #[test]
    fn test_competency_list_has_no_duplicates() {
        let mut list = vec![];
        assert!(add_competency(&mut list, ObjectCompetencyId(1)));
        assert!(!add_competency(&mut list, ObjectCompetencyId(1)));
        assert!(add_competency(&mut list, ObjectCompetencyId(2)));
        assert!(delete_competence(&mut list, ObjectCompetencyId(1)));
        assert_eq!(list, vec![ObjectCompetencyId(2)]);
    }

    #[test]
    fn test_missing_parent() {
        let mut r = record(Some(5));
        assert_eq!(missing_parent(&r, &[]), None);
        r.parent_object_id = Some(ObjectId(9));
        assert_eq!(missing_parent(&r, &[record(Some(1))]), Some(ObjectId(9)));
        assert_eq!(missing_parent(&r, &[record(Some(9))]), None);
    }

    #[test]
    fn test_qr_image_src() {
        assert_eq!(qr_image_src("data:image/png;base64,AAA"), "data:image/png;base64,AAA");
        assert_eq!(qr_image_src("AAA"), "data:image/png;base64,AAA");
        assert!(qr_image_src("<svg></svg>").starts_with("data:image/svg+xml;utf8,%3Csvg"));
    }

    #[tokio::test]
    async fn test_create_generates_qr_sets_competencies_and_returns_new_id() {
        let service = MockObjectService::default();
        *service.created_id.lock().unwrap() = Some(ObjectId(42));
        *service.qr.lock().unwrap() = Some("QR".into());

        let outcome = save_object(&service, &record(None), &[ObjectCompetencyId(3)])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SaveOutcome::Created {
                id: ObjectId(42),
                qr: Some("QR".into())
            }
        );
        assert_eq!(
            service.calls(),
            vec![
                Call::Create,
                Call::Qr(ObjectId(42), true),
                Call::SetCompetencies(
                    ObjectId(42),
                    vec![ObjectCompetencyLink {
                        competency_id: ObjectCompetencyId(3)
                    }]
                ),
            ]
        );
        assert_eq!(object_detail_key(ObjectId(42)), "a001_object_detail_42");
    }

    #[tokio::test]
    async fn test_create_without_id_stops_after_create() {
        let service = MockObjectService::default();
        let outcome = save_object(&service, &record(None), &[]).await.unwrap();
        assert_eq!(outcome, SaveOutcome::CreatedWithoutId);
        assert_eq!(service.calls(), vec![Call::Create]);
    }

    #[tokio::test]
    async fn test_update_replaces_competencies_even_when_rejected() {
        let service = MockObjectService::default();
        *service.reject.lock().unwrap() = Some(AppError::Rejected("Код занят".into()));

        let rec = record(Some(7));
        let err = save_object(&service, &rec, &[]).await.unwrap_err();

        assert_eq!(err.user_message(), "Код занят");
        assert_eq!(
            service.calls(),
            vec![Call::Update(rec), Call::SetCompetencies(ObjectId(7), vec![])]
        );
    }

    #[tokio::test]
    async fn test_change_delete_flag_success_propagates() {
        let service = MockObjectService::default();
        let mut live = record(Some(7));
        live.object_name = "Несохранённое имя".into();
        let mut snapshot = Snapshot::take(&record(Some(7)));

        let flag = change_delete_flag(&service, &mut snapshot, &mut live).await.unwrap();

        assert!(flag);
        assert!(live.delete_flag);
        assert!(snapshot.get().delete_flag);
        let mut sent = record(Some(7));
        sent.delete_flag = true;
        assert_eq!(service.calls(), vec![Call::Update(sent)]);
    }

    #[tokio::test]
    async fn test_change_delete_flag_failure_restores_snapshot() {
        let service = MockObjectService::default();
        *service.reject.lock().unwrap() = Some(AppError::Rejected("Нельзя".into()));
        let mut live = record(Some(7));
        let mut snapshot = Snapshot::take(&live);

        let err = change_delete_flag(&service, &mut snapshot, &mut live).await;

        assert!(err.is_err());
        assert!(!live.delete_flag);
        assert!(!snapshot.get().delete_flag);
    }

    #[tokio::test]
    async fn test_change_delete_flag_needs_saved_record() {
        let service = MockObjectService::default();
        let mut live = record(None);
        let mut snapshot = Snapshot::take(&live);
        assert_eq!(change_delete_flag(&service, &mut snapshot, &mut live).await.unwrap(), false);
        assert!(service.calls().is_empty());
    }
}
