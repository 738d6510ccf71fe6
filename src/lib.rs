//! Seeds the storefront's Postgres database from the static products catalog.
pub mod catalog;
pub mod cli;
pub mod database_ops;
pub mod env_boot;
pub mod logging;
pub mod normalization;

pub mod util {
    pub mod db;
    pub mod env;
}
