use atelier_config::Config;
use atelier_persistence_contracts::{contact::ContactMessageRepository, Database as _, Transaction};
use atelier_persistence_postgres::contact::PostgresContactMessageRepository;
use clap::Subcommand;

use crate::{database, environment::Environment};

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Inspect stored contact messages
    #[command(aliases(["c"]))]
    Contact {
        #[command(subcommand)]
        command: AdminContactCommand,
    },
}

impl AdminCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            AdminCommand::Contact { command } => command.invoke(config).await,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum AdminContactCommand {
    /// List all stored contact messages, oldest first
    #[command(aliases(["ls", "l"]))]
    List,
}

impl AdminContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            AdminContactCommand::List => list(config).await,
        }
    }
}

async fn list(config: Config) -> anyhow::Result<()> {
    let database = database::connect(&config.database).await?;
    let environment = Environment::new(&config, database);

    let db = environment.database();
    let mut txn = db.begin_transaction().await?;
    let messages = PostgresContactMessageRepository.list(&mut txn).await?;
    txn.rollback().await?;

    for message in messages {
        println!(
            "[{}] {} <{}>{}{}",
            message.created_at.format("%Y-%m-%d %H:%M:%S"),
            *message.name,
            message.email,
            message
                .phone
                .as_ref()
                .map(|phone| format!(" phone: {}", **phone))
                .unwrap_or_default(),
            message
                .company
                .as_ref()
                .map(|company| format!(" company: {}", **company))
                .unwrap_or_default(),
        );
        println!("{}", *message.message);
        println!();
    }

    Ok(())
}
