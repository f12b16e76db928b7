use std::future::Future;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use meteolog_core::{
    config::{DbConfig, YandexConfig},
    export::{self, ExportOutcome},
    ingest,
    provider::{WeatherProvider, yandex::YandexWeatherProvider},
    store::WeatherStore,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "meteolog",
    version,
    about = "Periodically logs Yandex Weather observations to PostgreSQL \
             and exports the last ten records to an xlsx file"
)]
pub struct Cli {
    /// Polling interval of the ingestion loop, in minutes.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub frequency: Option<u64>,

    /// Export the ten most recent records to weather_data.xlsx and exit.
    #[arg(long)]
    pub excel: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if self.frequency.is_none() && !self.excel {
            anyhow::bail!(
                "Для работы скрипта должен быть указан один из флагов: --excel, --frequency <int>"
            );
        }

        // The interrupt is caught exactly once, here; connecting, the export
        // branch and the ingestion loop all observe the same future.
        let interrupted = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        tokio::pin!(interrupted);

        let db = DbConfig::from_env()?;
        let Some(store) = race_interrupt(&mut interrupted, WeatherStore::connect(&db)).await
        else {
            return Ok(stopped());
        };
        let store = store?;

        // With both flags set, the export completes before ingestion starts.
        if self.excel {
            let export = export::export_last_ten(&store, Path::new(export::EXPORT_FILE));
            let Some(outcome) = race_interrupt(&mut interrupted, export).await else {
                return Ok(stopped());
            };

            match outcome? {
                ExportOutcome::Written(_) => {
                    println!(
                        "Экспорт данных в файл \"{}\" успешно выполнен.",
                        export::EXPORT_FILE
                    );
                }
                ExportOutcome::NotEnoughData => {
                    println!("Количество записей в БД меньше 10. Экспорт данных не выполнен.");
                }
            }
        }

        if let Some(minutes) = self.frequency {
            let provider = YandexWeatherProvider::new(YandexConfig::from_env()?);
            store.ensure_table().await?;

            ingest::run_until(
                Duration::from_secs(minutes * 60),
                &mut interrupted,
                async || {
                    let record = provider.current().await?;
                    store.insert(&record).await?;
                    println!("В БД добавлена новая запись: {record}.");
                    Ok(())
                },
            )
            .await?;

            // The loop only returns cleanly on the interrupt; the store
            // drops with the connection.
            stopped();
        }

        Ok(())
    }
}

fn stopped() {
    println!("\nРабота скрипта остановлена.");
}

/// Race one phase of the program against the shared interrupt future.
/// `None` means the interrupt won and the phase was abandoned.
async fn race_interrupt<I, F>(interrupted: &mut I, work: F) -> Option<F::Output>
where
    I: Future<Output = ()> + Unpin,
    F: Future,
{
    tokio::select! {
        biased;
        () = &mut *interrupted => None,
        out = work => Some(out),
    }
}
