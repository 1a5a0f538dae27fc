pub mod config;
pub mod provider_client;
pub mod services;
