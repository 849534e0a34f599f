use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use murmur_crypto::tokens::normalize_credential;

/// Runtime settings, read from the environment (after `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage_path: PathBuf,
    /// Skip loading and saving storage entirely.
    pub amnesia: bool,
    /// Normalized admin token; `None` turns the admin endpoint off.
    pub admin_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("MURMUR_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("MURMUR_PORT")
            .unwrap_or_else(|| "5500".into())
            .parse()
            .context("MURMUR_PORT must be a port number")?;
        let storage_path: PathBuf = lookup("MURMUR_STORAGE_PATH")
            .unwrap_or_else(|| "storage.json".into())
            .into();
        let amnesia = match lookup("MURMUR_AMNESIA") {
            Some(v) => parse_bool(&v).context("MURMUR_AMNESIA must be true or false")?,
            None => false,
        };
        let admin_token = lookup("MURMUR_ADMIN_TOKEN")
            .map(|v| normalize_credential(&v))
            .filter(|t| !t.is_empty());

        Ok(Self {
            host,
            port,
            storage_path,
            amnesia,
            admin_token,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("not a boolean: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5500);
        assert_eq!(cfg.storage_path, PathBuf::from("storage.json"));
        assert!(!cfg.amnesia);
        assert!(cfg.admin_token.is_none());
    }

    #[test]
    fn admin_token_is_normalized() {
        let cfg = config(&[("MURMUR_ADMIN_TOKEN", "  S3cret!  ")]).unwrap();
        assert_eq!(cfg.admin_token.as_deref(), Some("s3cret!"));

        let cfg = config(&[("MURMUR_ADMIN_TOKEN", "   ")]).unwrap();
        assert!(cfg.admin_token.is_none());
    }

    #[test]
    fn bad_values_are_fatal() {
        assert!(config(&[("MURMUR_PORT", "http")]).is_err());
        assert!(config(&[("MURMUR_AMNESIA", "maybe")]).is_err());
        assert!(config(&[("MURMUR_AMNESIA", "YES")]).unwrap().amnesia);
    }
}
