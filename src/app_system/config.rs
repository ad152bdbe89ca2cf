use clap::Parser;

/// Runtime configuration. Every option can come from a flag or the environment.
#[derive(Parser, Clone)]
#[command(name = "user_store_service", version, about = "In-memory user CRUD service")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Enable debug logging (`true` in any case turns it on)
    #[arg(long, env = "DEBUG", default_value = "false", value_parser = parse_flag, action = clap::ArgAction::Set)]
    pub debug: bool,

    /// Deployment environment; `development` also enables debug logging
    #[arg(long, env = "APP_ENV", default_value = "production")]
    pub app_env: String,

    /// Secret key carried as framework configuration
    #[arg(long, env = "SECRET_KEY", default_value = "your-secret-key-here", hide_env_values = true)]
    pub secret_key: String,
}

impl Config {
    /// Whether debug-level logging should be on.
    pub fn debug_enabled(&self) -> bool {
        self.debug || self.app_env == "development"
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .field("app_env", &self.app_env)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

fn parse_flag(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(value.eq_ignore_ascii_case("true"))
}
