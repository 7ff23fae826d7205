//! Runtime configuration from environment variables.
//!
//! | Variable            | Meaning                                   | Default              |
//! |---------------------|-------------------------------------------|----------------------|
//! | `WORDDAY_STORE`     | `file` or `memory`                        | `file`               |
//! | `WORDDAY_DATA_PATH` | storage file for the `file` backend       | platform data dir    |
//! | `WORDDAY_CATALOG`   | JSON catalog file replacing built-in list | built-in word list   |

use std::path::PathBuf;

use wordday_domain::{DomainError, WordCatalog};

use super::file_store::JsonFileStore;

/// Which key-value store backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                variable: "WORDDAY_STORE",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreBackend,
    pub data_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = match non_empty("WORDDAY_STORE") {
            Some(value) => value.parse()?,
            None => StoreBackend::File,
        };
        let data_path = non_empty("WORDDAY_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(JsonFileStore::default_path);
        let catalog_path = non_empty("WORDDAY_CATALOG").map(PathBuf::from);

        Ok(Self {
            store,
            data_path,
            catalog_path,
        })
    }

    /// Load the configured catalog, or the built-in word list.
    pub async fn load_catalog(&self) -> Result<WordCatalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(WordCatalog::builtin());
        };

        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::CatalogRead {
                path: path.clone(),
                source: e,
            })?;
        let catalog = WordCatalog::from_json(&json).map_err(|e| ConfigError::InvalidCatalog {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), words = catalog.len(), "Loaded word catalog");
        Ok(catalog)
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
///
/// Variables already set in the environment win.
pub fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {variable}")]
    InvalidValue {
        variable: &'static str,
        value: String,
    },
    #[error("Failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid catalog {}: {source}", path.display())]
    InvalidCatalog {
        path: PathBuf,
        source: DomainError,
    },
}
