//! sqlx/MySQL storage: pool, repositories and migrations

pub mod connection;
pub mod mysql;


pub use connection::{DatabasePool, MySqlRepositories, PoolStatistics};
pub use mysql::{MySqlAccountRepository, MySqlBlogRepository, MySqlTokenRepository};
