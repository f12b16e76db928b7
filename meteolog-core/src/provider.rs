use crate::model::WeatherRecord;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod yandex;

/// Source of current weather observations for the configured point.
///
/// There is exactly one real implementation (Yandex Weather); the trait is
/// the seam that lets tests and other binaries substitute their own source.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self) -> anyhow::Result<WeatherRecord>;
}
