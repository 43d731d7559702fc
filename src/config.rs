// src/config.rs
//
// Runtime configuration.
//
// Each section has a `Default` usable from tests; the binary fills them
// from command-line flags and environment variables (see `Cli`).

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// Upper bound for a single request, including store and provider calls
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `None` selects `{data_dir}/bookshelf/bookshelf.db`
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 15,
            busy_timeout: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Minimum spacing between provider requests; zero disables throttling
    pub min_request_interval: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GOOGLE_BOOKS_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            min_request_interval: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Usernames that receive the admin role at registration
    pub admin_usernames: Vec<String>,
    /// bcrypt work factor (4..=31)
    pub password_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_usernames: Vec::new(),
            password_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    pub fn is_admin_username(&self, username: &str) -> bool {
        self.admin_usernames
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(username.trim()))
    }
}

/// Command-line interface of the `bookshelf` binary
#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Book catalog and review service")]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, env = "BOOKSHELF_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "BOOKSHELF_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Disable permissive CORS headers
    #[arg(long, env = "BOOKSHELF_DISABLE_CORS")]
    pub disable_cors: bool,

    /// Per-request deadline in seconds
    #[arg(long, env = "BOOKSHELF_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// SQLite database file
    #[arg(long, env = "BOOKSHELF_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Connection pool size
    #[arg(long, env = "BOOKSHELF_DB_POOL_SIZE", default_value_t = 15)]
    pub db_pool_size: u32,

    /// Google Books API base URL
    #[arg(long, env = "BOOKSHELF_GOOGLE_BOOKS_URL", default_value = DEFAULT_GOOGLE_BOOKS_URL)]
    pub google_books_url: String,

    /// Google Books API key
    #[arg(long, env = "BOOKSHELF_GOOGLE_BOOKS_KEY")]
    pub google_books_key: Option<String>,

    /// Provider HTTP timeout in seconds
    #[arg(long, env = "BOOKSHELF_GATEWAY_TIMEOUT_SECS", default_value_t = 10)]
    pub gateway_timeout_secs: u64,

    /// Minimum milliseconds between provider requests
    #[arg(long, env = "BOOKSHELF_GATEWAY_INTERVAL_MS", default_value_t = 0)]
    pub gateway_interval_ms: u64,

    /// Comma-separated usernames granted the admin role on registration
    #[arg(long, env = "BOOKSHELF_ADMINS", value_delimiter = ',')]
    pub admins: Vec<String>,

    /// bcrypt work factor for new password hashes
    #[arg(
        long,
        env = "BOOKSHELF_PASSWORD_COST",
        default_value_t = bcrypt::DEFAULT_COST,
        value_parser = clap::value_parser!(u32).range(4..=31)
    )]
    pub password_cost: u32,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            server: ServerConfig {
                host: cli.host,
                port: cli.port,
                enable_cors: !cli.disable_cors,
                request_timeout: Duration::from_secs(cli.request_timeout_secs),
            },
            database: DatabaseConfig {
                path: cli.db_path,
                max_connections: cli.db_pool_size.max(1),
                ..DatabaseConfig::default()
            },
            gateway: GatewayConfig {
                base_url: cli.google_books_url.trim_end_matches('/').to_string(),
                api_key: cli.google_books_key.filter(|k| !k.trim().is_empty()),
                timeout: Duration::from_secs(cli.gateway_timeout_secs),
                min_request_interval: Duration::from_millis(cli.gateway_interval_ms),
            },
            auth: AuthConfig {
                admin_usernames: cli
                    .admins
                    .into_iter()
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect(),
                password_cost: cli.password_cost,
            },
        }
    }
}
