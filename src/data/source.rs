use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TradeError};

// ---------------------------------------------------------------------------
// DataSource – where the raw CSV bytes come from
// ---------------------------------------------------------------------------

/// Location of the raw trade CSV.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// File on the local filesystem.
    Local(PathBuf),
    /// `http://` or `https://` URL fetched with a blocking client.
    Remote { url: String, timeout: Duration },
}

impl DataSource {
    /// Interpret a user-supplied location: URLs become [`DataSource::Remote`],
    /// anything else is a local path.
    pub fn parse(location: &str, timeout: Duration) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Remote {
                url: location.to_string(),
                timeout,
            }
        } else {
            DataSource::Local(PathBuf::from(location))
        }
    }

    /// Read the whole source into memory.
    ///
    /// Every I/O or HTTP failure, including a non-success status code, maps to
    /// [`TradeError::SourceUnavailable`].
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Local(path) => std::fs::read(path)
                .map_err(|e| TradeError::source_unavailable(path.display().to_string(), e)),
            DataSource::Remote { url, timeout } => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(*timeout)
                    .build()
                    .map_err(|e| TradeError::source_unavailable(url.as_str(), e))?;

                let response = client
                    .get(url)
                    .send()
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| TradeError::source_unavailable(url.as_str(), e))?;

                let body = response
                    .bytes()
                    .map_err(|e| TradeError::source_unavailable(url.as_str(), e))?;
                Ok(body.to_vec())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Remote { url, .. } => write!(f, "{url}"),
        }
    }
}
