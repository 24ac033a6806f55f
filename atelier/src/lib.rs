pub mod commands;
pub mod database;
pub mod environment;
