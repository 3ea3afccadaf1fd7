// Request and response payloads
pub mod auth;
pub mod cocktail;
pub mod common;
pub mod review;
pub mod user;
