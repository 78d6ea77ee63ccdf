pub mod engine;
pub mod platform;
pub mod services;
pub mod tools;
