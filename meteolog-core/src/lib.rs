//! Core library for the `meteolog` weather logger.
//!
//! This crate defines:
//! - Environment-based configuration (database, Yandex Weather API)
//! - The normalized [`WeatherRecord`] model and its coded-field translators
//! - The HTTP weather provider, the PostgreSQL record store, the xlsx
//!   exporter, and the cancellable ingestion loop
//!
//! It is used by `meteolog-cli`, but can also be reused by other binaries or
//! services.

pub mod config;
pub mod export;
pub mod ingest;
pub mod model;
pub mod provider;
pub mod store;
pub mod translate;

pub use config::{DbConfig, YandexConfig};
pub use export::ExportOutcome;
pub use model::WeatherRecord;
pub use provider::WeatherProvider;
pub use store::WeatherStore;
