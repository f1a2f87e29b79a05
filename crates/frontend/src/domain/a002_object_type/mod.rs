pub mod events;
pub mod ui;
