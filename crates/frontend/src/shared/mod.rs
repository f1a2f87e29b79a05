pub mod api_utils;
pub mod dirty;
pub mod dropdown;
pub mod error;
pub mod event_bus;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod page_frame;
pub mod print;
pub mod storage;
pub mod url_query;
