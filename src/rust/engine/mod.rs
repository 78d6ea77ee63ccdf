pub mod csound;
pub mod mapping;
pub mod voices;
