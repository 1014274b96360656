use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub registration: RegistrationMode,
    pub log_level: String,
}

/// Whether anonymous callers may create accounts through the API.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationMode {
    Open,
    Closed,
}

impl RegistrationMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => RegistrationMode::Open,
            _ => RegistrationMode::Closed,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let host: IpAddr = or("USERBASE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid USERBASE_HOST: {e}"))?;

        let port: u16 = or("USERBASE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid USERBASE_PORT: {e}"))?;

        let registration = RegistrationMode::parse(&or("USERBASE_REGISTRATION", "closed"));
        let log_level = or("USERBASE_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            registration,
            log_level,
        })
    }
}
