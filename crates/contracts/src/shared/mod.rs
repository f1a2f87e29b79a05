pub mod api_response;
pub mod pagination;
pub mod serde_helpers;
