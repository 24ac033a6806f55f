use atelier_config::Config;
use atelier_persistence_postgres::MigrationStatus;
use clap::Subcommand;

use crate::database;

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// List all pending and applied migrations
    #[command(aliases(["status", "s", "l"]))]
    List,
    /// Apply all pending migrations
    #[command(aliases(["u"]))]
    Up {
        /// Only apply the next `n` migrations
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Revert the last migration
    #[command(aliases(["d"]))]
    Down {
        /// Revert the last `n` migrations
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
        #[arg(long, required = true)]
        force: bool,
    },
    /// Reset the database and delete all data
    Reset {
        #[arg(long, required = true)]
        force: bool,
    },
}

impl MigrateCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let db = database::connect(&config.database).await?;
        match self {
            Self::List => {
                for MigrationStatus { migration, applied } in db.list_migrations().await? {
                    let state = if applied { "applied" } else { "pending" };
                    println!("[{state}] {}", migration.name);
                }
            }
            Self::Up { count } => report(&db.run_migrations(count).await?, "applied"),
            Self::Down { count, force: _ } => {
                report(&db.revert_migrations(Some(count)).await?, "reverted");
            }
            Self::Reset { force: _ } => {
                db.reset().await?;
                println!("Database reset successful");
            }
        }

        Ok(())
    }
}

fn report(names: &[&str], action: &str) {
    if names.is_empty() {
        println!("No migrations have been {action}.");
    }
    for name in names {
        println!("[{action}] {name}");
    }
}
