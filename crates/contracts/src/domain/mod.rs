pub mod a001_object;
pub mod a002_object_type;
pub mod a003_object_class;
pub mod a004_object_competency;
pub mod a005_object_zone;
pub mod a006_object_wbs_title;
pub mod common;
