//! 数据库初始化脚本
//!
//! `db/init.sql` is mounted into the MySQL entrypoint directory and runs once
//! on a fresh volume. The same script is embedded here so `init_db` can apply
//! it to a database that is already running.

use sqlx::mysql::MySqlPool;
use tracing::{debug, info};

pub const INIT_SCRIPT: &str = include_str!("../../db/init.sql");

/// Splits a script into executable statements, dropping `--` comment lines
/// and empty statements.
pub fn statements(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_string)
        .collect()
}

/// Executes every statement of `script` in order. Returns the number of
/// statements run.
pub async fn apply(pool: &MySqlPool, script: &str) -> Result<usize, sqlx::Error> {
    let stmts = statements(script);
    for stmt in &stmts {
        debug!(statement = %stmt, "Executing init statement");
        sqlx::query(stmt).execute(pool).await?;
    }
    info!(count = stmts.len(), "Initialization script applied");
    Ok(stmts.len())
}
