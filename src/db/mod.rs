// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Row/constraint helpers shared by repositories

pub mod connection;
pub mod migrations;

pub use connection::{
    constraint_violation, create_connection_pool, create_memory_pool, format_timestamp,
    get_connection, get_database_path, is_foreign_key_violation, is_unique_violation,
    parse_timestamp, with_connection, ConnectionPool, PooledConn,
};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};
