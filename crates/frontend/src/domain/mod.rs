pub mod a001_object;
pub mod a002_object_type;
pub mod catalogs;
