// Services layer - Pure credential and token logic, no I/O
pub mod password_hasher;
pub mod token_service;

pub use password_hasher::PasswordHasher;
pub use token_service::TokenService;
