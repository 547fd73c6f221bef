// Application layer - Use cases
pub mod aqi_service;
pub mod error;
