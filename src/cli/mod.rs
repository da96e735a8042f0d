use clap::Parser;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "users-api-rust")]
#[command(about = "Users API - CRUD service for user records")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides USERS_API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Postgres connection string (overrides DATABASE_URL)")]
    pub database_url: Option<String>,

    #[arg(long, help = "Keep users in memory even when a database is configured")]
    pub in_memory: bool,
}

impl Cli {
    /// Flags win over environment values
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
    }
}
