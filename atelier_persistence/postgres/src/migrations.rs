use std::collections::HashSet;

use anyhow::Context;

use crate::PgClient;

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

// generated by `build.rs` script
pub const MIGRATIONS: &[Migration] = include!(env!("MIGRATIONS"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

pub(crate) async fn status(conn: &PgClient) -> anyhow::Result<Vec<MigrationStatus>> {
    conn.execute(
        "create table if not exists _migrations (name text primary key);",
        &[],
    )
    .await
    .context("Failed to create migrations table")?;

    let applied = conn
        .query("select name from _migrations;", &[])
        .await
        .context("Failed to query applied migrations")?
        .into_iter()
        .map(|row| row.get(0))
        .collect::<HashSet<String>>();

    Ok(MIGRATIONS
        .iter()
        .map(|&migration| MigrationStatus {
            migration,
            applied: applied.contains(migration.name),
        })
        .collect())
}

pub(crate) async fn apply(
    conn: &mut PgClient,
    cnt: Option<usize>,
) -> anyhow::Result<Vec<&'static str>> {
    step(conn, cnt, Direction::Up).await
}

pub(crate) async fn revert(
    conn: &mut PgClient,
    cnt: Option<usize>,
) -> anyhow::Result<Vec<&'static str>> {
    step(conn, cnt, Direction::Down).await
}

/// Walks the migration list in the requested direction, running each step in
/// its own transaction so a failure leaves the bookkeeping consistent.
async fn step(
    conn: &mut PgClient,
    cnt: Option<usize>,
    direction: Direction,
) -> anyhow::Result<Vec<&'static str>> {
    let mut all = status(conn).await?;
    if direction == Direction::Down {
        all.reverse();
    }
    let selected = all
        .into_iter()
        .filter_map(|MigrationStatus { migration, applied }| {
            (applied == (direction == Direction::Down)).then_some(migration)
        })
        .take(cnt.unwrap_or(usize::MAX))
        .collect::<Vec<_>>();

    let mark = match direction {
        Direction::Up => conn.prepare("insert into _migrations (name) values ($1);"),
        Direction::Down => conn.prepare("delete from _migrations where name=$1;"),
    }
    .await?;

    let mut out = Vec::new();
    for migration in selected {
        let sql = match direction {
            Direction::Up => migration.up,
            Direction::Down => migration.down,
        };
        let txn = conn
            .transaction()
            .await
            .context("Failed to begin transaction")?;
        txn.batch_execute(sql)
            .await
            .with_context(|| format!("Migration {} failed", migration.name))?;
        txn.execute(&mark, &[&migration.name])
            .await
            .with_context(|| format!("Failed to record migration {}", migration.name))?;
        txn.commit().await.context("Failed to commit transaction")?;
        out.push(migration.name);
    }

    Ok(out)
}
