//! Карточка объекта: просмотр, создание и редактирование.

pub mod model;
pub mod view;
pub mod view_model;

pub use view::ObjectDetails;
