//! Common types and traits for all aggregates and catalogs

pub mod aggregate_id;
pub mod soft_delete;

// Re-exports
pub use aggregate_id::AggregateId;
pub use soft_delete::SoftDeletable;
