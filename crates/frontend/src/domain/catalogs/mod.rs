//! Справочники, используемые карточкой объекта: классы, типы, компетенции,
//! зоны и титулы WBS.
//!
//! Each catalog is fetched on its own, so one failing endpoint leaves the
//! other dropdowns usable.

use contracts::domain::a002_object_type::{ObjectType, ObjectTypeId};
use contracts::domain::a003_object_class::{ObjectClass, ObjectClassId};
use contracts::domain::a004_object_competency::{ObjectCompetency, ObjectCompetencyId};
use contracts::domain::a005_object_zone::{ObjectZone, ObjectZoneId};
use contracts::domain::a006_object_wbs_title::{ObjectWbsTitle, ObjectWbsTitleId};
use contracts::domain::common::SoftDeletable;

use crate::domain::a001_object::api::ObjectService;
use crate::shared::dropdown::{filter_active, DropdownOption};
use crate::shared::error::AppError;

/// Оповещения об изменении справочников
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// Актуальный (без удалённых) список типов объектов
    ObjectTypesChanged { active: Vec<ObjectType> },
}

/// Выпадающие списки карточки объекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownKind {
    Class,
    Type,
    Competency,
    Zone,
    WbsTitle,
}

impl DropdownKind {
    pub const ALL: [DropdownKind; 5] = [
        DropdownKind::Class,
        DropdownKind::Type,
        DropdownKind::Competency,
        DropdownKind::Zone,
        DropdownKind::WbsTitle,
    ];

    /// Zones and WBS titles exist only outside the `MAIN` client mode.
    pub fn enabled(kinds_with_zones: bool) -> Vec<DropdownKind> {
        Self::ALL
            .into_iter()
            .filter(|k| kinds_with_zones || !matches!(k, DropdownKind::Zone | DropdownKind::WbsTitle))
            .collect()
    }

    /// Позиция в таблицах, индексируемых видом списка.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            DropdownKind::Class => "Класс",
            DropdownKind::Type => "Тип",
            DropdownKind::Competency => "Компетенции",
            DropdownKind::Zone => "Зона",
            DropdownKind::WbsTitle => "Титул WBS",
        }
    }
}

/// Результат загрузки одного справочника
#[derive(Debug, Clone)]
pub enum CatalogData {
    Classes(Vec<ObjectClass>),
    Types(Vec<ObjectType>),
    Competencies(Vec<ObjectCompetency>),
    Zones(Vec<ObjectZone>),
    WbsTitles(Vec<ObjectWbsTitle>),
}

pub async fn fetch_catalog(
    service: &dyn ObjectService,
    kind: DropdownKind,
) -> Result<CatalogData, AppError> {
    Ok(match kind {
        DropdownKind::Class => CatalogData::Classes(service.object_classes().await?),
        DropdownKind::Type => CatalogData::Types(service.object_types().await?),
        DropdownKind::Competency => CatalogData::Competencies(service.competencies().await?),
        DropdownKind::Zone => CatalogData::Zones(service.zones().await?),
        DropdownKind::WbsTitle => CatalogData::WbsTitles(service.wbs_titles().await?),
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub classes: Vec<ObjectClass>,
    pub types: Vec<ObjectType>,
    pub competencies: Vec<ObjectCompetency>,
    pub zones: Vec<ObjectZone>,
    pub wbs_titles: Vec<ObjectWbsTitle>,
}

fn option<T>(items: Vec<&T>, id: fn(&T) -> Option<i64>, label: fn(&T) -> String) -> Vec<DropdownOption> {
    items
        .into_iter()
        .filter_map(|item| {
            id(item).map(|id| DropdownOption {
                id,
                label: label(item),
            })
        })
        .collect()
}

impl Catalogs {
    pub fn apply(&mut self, data: CatalogData) {
        match data {
            CatalogData::Classes(v) => self.classes = v,
            CatalogData::Types(v) => self.types = v,
            CatalogData::Competencies(v) => self.competencies = v,
            CatalogData::Zones(v) => self.zones = v,
            CatalogData::WbsTitles(v) => self.wbs_titles = v,
        }
    }

    /// Пункты списка `kind`, отфильтрованные по строке поиска.
    ///
    /// Each kind searches one display field and never offers deleted entries.
    pub fn options(&self, kind: DropdownKind, search: &str) -> Vec<DropdownOption> {
        match kind {
            DropdownKind::Class => option(
                filter_active(&self.classes, search, |c| &c.object_class_name),
                |c| c.object_class_id.map(|id| id.value()),
                |c| c.object_class_name.clone(),
            ),
            DropdownKind::Type => option(
                filter_active(&self.types, search, |t| &t.object_type_name),
                |t| t.object_type_id.map(|id| id.value()),
                |t| format!("{} {}", t.object_type_code, t.object_type_name),
            ),
            DropdownKind::Competency => option(
                filter_active(&self.competencies, search, |c| &c.competency_name),
                |c| c.competency_id.map(|id| id.value()),
                |c| c.caption(),
            ),
            DropdownKind::Zone => option(
                filter_active(&self.zones, search, |z| &z.zone_name),
                |z| z.zone_id.map(|id| id.value()),
                |z| z.zone_name.clone(),
            ),
            DropdownKind::WbsTitle => option(
                filter_active(&self.wbs_titles, search, |t| &t.title_name),
                |t| t.title_id.map(|id| id.value()),
                |t| t.title_name.clone(),
            ),
        }
    }

    pub fn class_full_name(&self, id: Option<ObjectClassId>) -> String {
        self.classes
            .iter()
            .find(|c| id.is_some() && c.object_class_id == id)
            .map(|c| c.full_name().to_string())
            .unwrap_or_default()
    }

    pub fn type_name(&self, id: Option<ObjectTypeId>) -> String {
        self.types
            .iter()
            .find(|t| id.is_some() && t.object_type_id == id)
            .map(|t| t.object_type_name.clone())
            .unwrap_or_default()
    }

    pub fn zone_name(&self, id: Option<ObjectZoneId>) -> String {
        self.zones
            .iter()
            .find(|z| id.is_some() && z.zone_id == id)
            .map(|z| z.zone_name.clone())
            .unwrap_or_default()
    }

    pub fn wbs_title_name(&self, id: Option<ObjectWbsTitleId>) -> String {
        self.wbs_titles
            .iter()
            .find(|t| id.is_some() && t.title_id == id)
            .map(|t| t.title_name.clone())
            .unwrap_or_default()
    }

    /// `"код / наименование"` или пустая строка.
    pub fn competency_caption(&self, id: ObjectCompetencyId) -> String {
        self.competencies
            .iter()
            .find(|c| c.competency_id == Some(id))
            .map(ObjectCompetency::caption)
            .unwrap_or_default()
    }

    pub fn active_types(&self) -> Vec<ObjectType> {
        self.types.iter().filter(|t| t.is_active()).cloned().collect()
    }
}
