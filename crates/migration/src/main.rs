use clap::{Parser, Subcommand};
use sea_orm::{Database, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::filter::LevelFilter;

use migration::Migrator;

const DEFAULT_DATABASE_URL: &str = "sqlite:./hotelpro.db?mode=rwc";

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Schema of the HotelPro ledger")]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Apply pending migrations, all of them by default.
    Up {
        #[arg(short = 'n', long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations.
    Down {
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop every table, then apply all migrations.
    Fresh,
    /// Roll back all migrations, then apply them again.
    Refresh,
    /// Roll back all migrations.
    Reset,
    Status,
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .init();

    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => Migrator::up(&db, steps).await,
        Command::Down { steps } => Migrator::down(&db, Some(steps)).await,
        Command::Fresh => Migrator::fresh(&db).await,
        Command::Refresh => Migrator::refresh(&db).await,
        Command::Reset => Migrator::reset(&db).await,
        Command::Status => Migrator::status(&db).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_up_on_the_local_database() {
        let cli = Cli::try_parse_from(["migration"]).unwrap();
        assert!(cli.command.is_none());
        if std::env::var("DATABASE_URL").is_err() {
            assert_eq!(cli.database_url, DEFAULT_DATABASE_URL);
        }
    }

    #[test]
    fn parses_steps() {
        let cli = Cli::try_parse_from(["migration", "down", "-n", "2"]).unwrap();
        assert_eq!(cli.command, Some(Command::Down { steps: 2 }));

        let cli = Cli::try_parse_from(["migration", "--database-url", "sqlite::memory:", "up"])
            .unwrap();
        assert_eq!(cli.database_url, "sqlite::memory:");
        assert_eq!(cli.command, Some(Command::Up { steps: None }));
    }
}
