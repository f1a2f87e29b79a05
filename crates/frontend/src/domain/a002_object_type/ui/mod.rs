pub mod editor;
pub mod list;
