//! Доступ к backend справочника объектов.
//!
//! Controllers depend on [`ObjectService`]; the browser build injects
//! [`HttpObjectService`] through context.

use async_trait::async_trait;
use contracts::domain::a001_object::{
    CreateObjectResponse, ObjectCompetencyLink, ObjectId, ObjectListQuery, ObjectListResponse,
    ObjectRecord, SetCompetenciesRequest,
};
use contracts::domain::a002_object_type::{ObjectType, ObjectTypeId, ObjectTypeSaveResponse};
use contracts::domain::a003_object_class::ObjectClass;
use contracts::domain::a004_object_competency::ObjectCompetency;
use contracts::domain::a005_object_zone::ObjectZone;
use contracts::domain::a006_object_wbs_title::ObjectWbsTitle;
use contracts::domain::common::AggregateId;
use contracts::shared::api_response::{ListPayload, QrCodePayload, StatusResponse};
use leptos::prelude::*;
use std::sync::Arc;

use crate::shared::api_utils::{api_url, query_string};
use crate::shared::error::AppError;
use crate::shared::http::{accept, get_json, post_json, put_json};

#[async_trait(?Send)]
pub trait ObjectService {
    async fn get_object(&self, id: ObjectId) -> Result<ObjectRecord, AppError>;

    async fn list_objects(
        &self,
        query: &ObjectListQuery,
        page: u32,
        page_size: u32,
    ) -> Result<ObjectListResponse, AppError>;

    /// Полный список для селектора родителя.
    async fn all_objects(&self) -> Result<Vec<ObjectRecord>, AppError>;

    /// Generic search: `GET {endpoint}?{param}={text}`.
    async fn search(
        &self,
        endpoint: &str,
        param: &str,
        text: &str,
    ) -> Result<Vec<ObjectRecord>, AppError>;

    /// Returns the id assigned by the server, if it sent one.
    async fn create_object(&self, record: &ObjectRecord) -> Result<Option<ObjectId>, AppError>;

    async fn update_object(&self, record: &ObjectRecord) -> Result<(), AppError>;

    async fn get_competencies(&self, id: ObjectId) -> Result<Vec<ObjectCompetencyLink>, AppError>;

    async fn set_competencies(
        &self,
        id: ObjectId,
        links: &[ObjectCompetencyLink],
    ) -> Result<(), AppError>;

    async fn generate_qr(&self, id: ObjectId, regenerate: bool) -> Result<Option<String>, AppError>;

    async fn object_types(&self) -> Result<Vec<ObjectType>, AppError>;

    async fn create_object_type(&self, t: &ObjectType) -> Result<Option<ObjectTypeId>, AppError>;

    async fn update_object_type(&self, t: &ObjectType) -> Result<(), AppError>;

    async fn object_classes(&self) -> Result<Vec<ObjectClass>, AppError>;

    async fn competencies(&self) -> Result<Vec<ObjectCompetency>, AppError>;

    async fn zones(&self) -> Result<Vec<ObjectZone>, AppError>;

    async fn wbs_titles(&self) -> Result<Vec<ObjectWbsTitle>, AppError>;
}

pub type SharedObjectService = Arc<dyn ObjectService + Send + Sync>;

pub fn use_object_service() -> SharedObjectService {
    use_context::<SharedObjectService>().expect("ObjectService not provided in context")
}

const OBJECTS: &str = "/api/catalog/objects";
const OBJECT_TYPES: &str = "/api/catalog/object-types";
pub const INSPECTION_OBJECTS: &str = "/api/inspection/objects";

/// Реализация поверх HTTP API backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpObjectService;

impl HttpObjectService {
    async fn catalog<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>, AppError> {
        let payload: ListPayload<T> = get_json(&api_url(path)).await?;
        Ok(payload.into_items())
    }
}

#[async_trait(?Send)]
impl ObjectService for HttpObjectService {
    async fn get_object(&self, id: ObjectId) -> Result<ObjectRecord, AppError> {
        get_json(&api_url(&format!("{}/{}", INSPECTION_OBJECTS, id.as_string()))).await
    }

    async fn list_objects(
        &self,
        query: &ObjectListQuery,
        page: u32,
        page_size: u32,
    ) -> Result<ObjectListResponse, AppError> {
        let qs = query_string(&query.request_pairs(page, page_size));
        get_json(&api_url(&format!("{}?{}", OBJECTS, qs))).await
    }

    async fn all_objects(&self) -> Result<Vec<ObjectRecord>, AppError> {
        Self::catalog(OBJECTS).await
    }

    async fn search(
        &self,
        endpoint: &str,
        param: &str,
        text: &str,
    ) -> Result<Vec<ObjectRecord>, AppError> {
        let qs = query_string(&[(param, text)]);
        let payload: ListPayload<ObjectRecord> =
            get_json(&api_url(&format!("{}?{}", endpoint, qs))).await?;
        Ok(payload.into_items())
    }

    async fn create_object(&self, record: &ObjectRecord) -> Result<Option<ObjectId>, AppError> {
        let resp: CreateObjectResponse = post_json(&api_url(OBJECTS), record).await?;
        let resp = accept(resp)?;
        Ok(resp.data.and_then(|d| d.object_id))
    }

    async fn update_object(&self, record: &ObjectRecord) -> Result<(), AppError> {
        let id = record
            .object_id
            .ok_or_else(|| AppError::Rejected("object_id is missing".into()))?;
        let resp: StatusResponse =
            put_json(&api_url(&format!("{}/{}", OBJECTS, id.as_string())), record).await?;
        accept(resp).map(|_| ())
    }

    async fn get_competencies(&self, id: ObjectId) -> Result<Vec<ObjectCompetencyLink>, AppError> {
        Self::catalog(&format!("{}/{}/competencies", OBJECTS, id.as_string())).await
    }

    async fn set_competencies(
        &self,
        id: ObjectId,
        links: &[ObjectCompetencyLink],
    ) -> Result<(), AppError> {
        let body = SetCompetenciesRequest::from_links(links);
        let resp: StatusResponse = put_json(
            &api_url(&format!("{}/{}/competencies", OBJECTS, id.as_string())),
            &body,
        )
        .await?;
        accept(resp).map(|_| ())
    }

    async fn generate_qr(&self, id: ObjectId, regenerate: bool) -> Result<Option<String>, AppError> {
        let payload: QrCodePayload = get_json(&api_url(&format!(
            "{}/{}/qr?regenerate={}",
            OBJECTS,
            id.as_string(),
            regenerate
        )))
        .await?;
        Ok(payload.into_payload())
    }

    async fn object_types(&self) -> Result<Vec<ObjectType>, AppError> {
        Self::catalog(OBJECT_TYPES).await
    }

    async fn create_object_type(&self, t: &ObjectType) -> Result<Option<ObjectTypeId>, AppError> {
        let resp: ObjectTypeSaveResponse = post_json(&api_url(OBJECT_TYPES), t).await?;
        let resp = accept(resp)?;
        Ok(resp.data.and_then(|d| d.object_type_id))
    }

    async fn update_object_type(&self, t: &ObjectType) -> Result<(), AppError> {
        let id = t
            .object_type_id
            .ok_or_else(|| AppError::Rejected("object_type_id is missing".into()))?;
        let resp: StatusResponse =
            put_json(&api_url(&format!("{}/{}", OBJECT_TYPES, id.as_string())), t).await?;
        accept(resp).map(|_| ())
    }

    async fn object_classes(&self) -> Result<Vec<ObjectClass>, AppError> {
        Self::catalog("/api/catalog/object-classes").await
    }

    async fn competencies(&self) -> Result<Vec<ObjectCompetency>, AppError> {
        Self::catalog("/api/catalog/object-competencies").await
    }

    async fn zones(&self) -> Result<Vec<ObjectZone>, AppError> {
        Self::catalog("/api/catalog/object-zones").await
    }

    async fn wbs_titles(&self) -> Result<Vec<ObjectWbsTitle>, AppError> {
        Self::catalog("/api/catalog/object-wbs-titles").await
    }
}

/// In-memory backend for controller tests. Records every call in order.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        GetObject(ObjectId),
        Create,
        Update(ObjectRecord),
        SetCompetencies(ObjectId, Vec<ObjectCompetencyLink>),
        Qr(ObjectId, bool),
        CreateType,
        UpdateType(ObjectType),
    }

    #[derive(Default)]
    pub struct MockObjectService {
        pub calls: Mutex<Vec<Call>>,
        pub objects: Mutex<Vec<ObjectRecord>>,
        pub created_id: Mutex<Option<ObjectId>>,
        pub created_type_id: Mutex<Option<ObjectTypeId>>,
        pub qr: Mutex<Option<String>>,
        /// When set, mutating calls fail with this error
        pub reject: Mutex<Option<AppError>>,
        pub competency_links: Mutex<Vec<ObjectCompetencyLink>>,
        pub types: Mutex<Vec<ObjectType>>,
    }

    impl MockObjectService {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn check(&self) -> Result<(), AppError> {
            match self.reject.lock().unwrap().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ObjectService for MockObjectService {
        async fn get_object(&self, id: ObjectId) -> Result<ObjectRecord, AppError> {
            self.record(Call::GetObject(id));
            self.objects
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.object_id == Some(id))
                .cloned()
                .ok_or(AppError::Http { status: 404, message: None })
        }

        async fn list_objects(
            &self,
            _query: &ObjectListQuery,
            _page: u32,
            _page_size: u32,
        ) -> Result<ObjectListResponse, AppError> {
            Ok(ObjectListResponse {
                status: true,
                data: self.objects.lock().unwrap().clone(),
                pagination: None,
            })
        }

        async fn all_objects(&self) -> Result<Vec<ObjectRecord>, AppError> {
            Ok(self.objects.lock().unwrap().clone())
        }

        async fn search(&self, _endpoint: &str, _param: &str, text: &str) -> Result<Vec<ObjectRecord>, AppError> {
            Ok(self
                .objects
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.object_name.contains(text))
                .cloned()
                .collect())
        }

        async fn create_object(&self, _record: &ObjectRecord) -> Result<Option<ObjectId>, AppError> {
            self.record(Call::Create);
            self.check()?;
            Ok(*self.created_id.lock().unwrap())
        }

        async fn update_object(&self, record: &ObjectRecord) -> Result<(), AppError> {
            self.record(Call::Update(record.clone()));
            self.check()
        }

        async fn get_competencies(&self, _id: ObjectId) -> Result<Vec<ObjectCompetencyLink>, AppError> {
            Ok(self.competency_links.lock().unwrap().clone())
        }

        async fn set_competencies(
            &self,
            id: ObjectId,
            links: &[ObjectCompetencyLink],
        ) -> Result<(), AppError> {
            self.record(Call::SetCompetencies(id, links.to_vec()));
            Ok(())
        }

        async fn generate_qr(&self, id: ObjectId, regenerate: bool) -> Result<Option<String>, AppError> {
            self.record(Call::Qr(id, regenerate));
            Ok(self.qr.lock().unwrap().clone())
        }

        async fn object_types(&self) -> Result<Vec<ObjectType>, AppError> {
            Ok(self.types.lock().unwrap().clone())
        }

        async fn create_object_type(&self, _t: &ObjectType) -> Result<Option<ObjectTypeId>, AppError> {
            self.record(Call::CreateType);
            self.check()?;
            Ok(*self.created_type_id.lock().unwrap())
        }

        async fn update_object_type(&self, t: &ObjectType) -> Result<(), AppError> {
            self.record(Call::UpdateType(t.clone()));
            self.check()
        }

        async fn object_classes(&self) -> Result<Vec<ObjectClass>, AppError> {
            Ok(vec![])
        }

        async fn competencies(&self) -> Result<Vec<ObjectCompetency>, AppError> {
            Ok(vec![])
        }

        async fn zones(&self) -> Result<Vec<ObjectZone>, AppError> {
            Ok(vec![])
        }

        async fn wbs_titles(&self) -> Result<Vec<ObjectWbsTitle>, AppError> {
            Ok(vec![])
        }
    }
}
