pub mod commands;
pub mod configuration;
pub mod constants;
pub mod domain;
pub mod email_client;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod schemas;
pub mod startup;
pub mod stores;
pub mod telemetry;
pub mod utils;
