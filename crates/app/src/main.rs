use database::DatabaseRemote;
use engine::{MemoryRemote, RemoteStore, Store};
use migration::{Migrator, MigratorTrait};
use postgrest::PostgrestRemote;
use settings::{Remote, Settings};

use crate::{error::Result, report::ReportView};

mod error;
mod report;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "hotelpro={level},engine={level},database={level},postgrest={level}",
            level = settings.app.level
        ))
        .init();

    match &settings.remote {
        Remote::Memory => {
            tracing::info!("using in-memory remote, nothing will be persisted");
            run(MemoryRemote::new(), &settings).await
        }
        Remote::Sqlite { path } => {
            tracing::info!("using sqlite database {path}");
            run(parse_database(path).await?, &settings).await
        }
        Remote::Postgrest { url, api_key } => {
            tracing::info!("using postgrest at {url}");
            run(PostgrestRemote::new(url, api_key)?, &settings).await
        }
    }
}

async fn run<R: RemoteStore>(remote: R, settings: &Settings) -> Result<()> {
    let mut builder = Store::builder(remote);
    if let Some(date) = settings.report.date {
        builder = builder.selected_date(date);
    }
    let store = builder.build();

    let loaded = store.initialize().await;

    let snapshot = store.snapshot();
    println!(
        "{}",
        ReportView::new(&snapshot, store.selected_date(), &settings.report)
    );

    loaded.map_err(|err| engine::EngineError::from(err).into())
}

async fn parse_database(path: &str) -> Result<DatabaseRemote> {
    let url = if path == ":memory:" {
        String::from("sqlite::memory:")
    } else {
        format!("sqlite:{path}?mode=rwc")
    };

    let remote = DatabaseRemote::connect(&url).await?;
    Migrator::up(remote.connection(), None).await?;
    Ok(remote)
}
