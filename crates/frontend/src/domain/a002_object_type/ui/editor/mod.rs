//! Редактор типа объекта (боковая панель).

pub mod model;
pub mod view;
pub mod view_model;

pub use view::ObjectTypeEditor;
pub use view_model::ObjectTypeEditorVm;
