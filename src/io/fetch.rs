//! Page sources: the network, or a directory of saved pages.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::error::{Result, StatsError};

const USER_AGENT: &str = concat!("season-stats/", env!("CARGO_PKG_VERSION"));

/// Something that can hand back the markup of a season page.
pub trait PageSource {
    /// Returns the markup for `url`; `file_name` is the page's
    /// `<season>-<page>.html` name for sources that work offline.
    fn fetch_page(&self, url: &str, file_name: &str) -> Result<String>;
}

/// Blocking HTTP source.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    #[instrument(level = "info", skip(self, _file_name))]
    fn fetch_page(&self, url: &str, _file_name: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Extraction {
                location: url.to_string(),
                reason: format!("HTTP status {status}"),
            });
        }
        let body = response.text()?;
        debug!(bytes = body.len(), "page downloaded");
        Ok(body)
    }
}

/// Reads previously saved pages from a directory instead of the network.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PageSource for DirectorySource {
    #[instrument(level = "info", skip(self, _url), fields(dir = %self.dir.display()))]
    fn fetch_page(&self, _url: &str, file_name: &str) -> Result<String> {
        let path = self.dir.join(file_name);
        if !path.is_file() {
            return Err(StatsError::Extraction {
                location: path.display().to_string(),
                reason: "saved page not found".to_string(),
            });
        }
        Ok(std::fs::read_to_string(&path)?)
    }
}
