use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

pub const DEFAULT_LOCATION_HEADER: &str = "CF-IPCountry";
pub const DEFAULT_VISITOR_SALT: &str = "linkshrink_salt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// A preferred code that is already taken replaces the previous link
    Overwrite,
    /// A preferred code that is already taken is refused
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "reject" => Ok(CollisionPolicy::Reject),
            other => Err(anyhow!("unknown collision policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackendKind {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverMode {
    Local,
    Remote(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub public_base_url: String,
    pub backend: StoreBackendKind,
    pub resolver: ResolverMode,
    pub collision_policy: CollisionPolicy,
    pub enforce_expiry: bool,
    pub location_header: String,
    pub visitor_salt: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(p) => p.parse::<u16>().context("PORT must be a port number")?,
            None => 8080,
        };
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());
        let public_base_url = get("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        let backend = match get("STORE_BACKEND").as_deref().unwrap_or("file") {
            "file" => StoreBackendKind::File(PathBuf::from(
                get("DATA_DIR").unwrap_or_else(|| "./data".to_string()),
            )),
            "memory" => StoreBackendKind::Memory,
            other => bail!("unknown STORE_BACKEND: {}", other),
        };

        let resolver = match get("RESOLVER_MODE").as_deref().unwrap_or("local") {
            "local" => ResolverMode::Local,
            "remote" => {
                let url = get("REMOTE_RESOLVER_URL")
                    .context("REMOTE_RESOLVER_URL is required when RESOLVER_MODE=remote")?;
                ResolverMode::Remote(url.trim_end_matches('/').to_string())
            }
            other => bail!("unknown RESOLVER_MODE: {}", other),
        };

        let collision_policy = match get("COLLISION_POLICY") {
            Some(p) => p.parse()?,
            None => CollisionPolicy::Overwrite,
        };

        let enforce_expiry = match get("ENFORCE_EXPIRY") {
            Some(v) => parse_bool(&v).context("ENFORCE_EXPIRY must be true or false")?,
            None => false,
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        };

        Ok(Self {
            bind_addr,
            port,
            public_base_url,
            backend,
            resolver,
            collision_policy,
            enforce_expiry,
            location_header: get("LOCATION_HEADER")
                .unwrap_or_else(|| DEFAULT_LOCATION_HEADER.to_string()),
            visitor_salt: get("VISITOR_SALT").unwrap_or_else(|| DEFAULT_VISITOR_SALT.to_string()),
            cors_origins,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("not a boolean: {}", other)),
    }
}
