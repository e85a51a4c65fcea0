use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_URL: &str = "sqlite://resolution.sqlite3";

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug)]
pub enum ArgsError {
    MissingUser,
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingUser => write!(f, "--user (or RESOLUTION_USER) is required"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Turn a `--db` value into an absolute `sqlite://` URL. In-memory URLs pass
/// through unchanged.
pub fn normalize_sqlite_url(raw: &str) -> Result<String, ArgsError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: raw.to_string() });
    }
    if trimmed == MEMORY_URL || trimmed.contains("mode=memory") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match path_str.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_str, None),
    };
    if path_str.is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: raw.to_string() });
    }

    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    })
}

/// Make sure the database file and its parent directory exist so sqlx can
/// open it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == MEMORY_URL || db_url.contains("mode=memory") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
