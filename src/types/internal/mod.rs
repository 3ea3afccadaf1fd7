// Internal types - never serialized to clients directly
pub mod auth;
pub mod catalog;
pub mod context;
