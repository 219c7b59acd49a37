pub mod file;
pub mod http;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::core::shared::ConfigType;
pub use file::FileFetcher;
pub use http::HttpFetcher;

/// Bytes received so far. `total` is known only when the source announces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl Progress {
    /// Fraction in `[0, 1]`, if the total is known and non-zero.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some((self.loaded as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}


#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whole-request timeout for HTTP fetches. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Route HTTP requests through the proxies named in the environment.
    #[serde(default = "default_system_proxy")]
    pub system_proxy: bool,
}

fn default_system_proxy() -> bool {
    true
}

fn default_user_agent() -> String {
    concat!("draco-loader/", env!("CARGO_PKG_VERSION")).to_owned()
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
            system_proxy: default_system_proxy(),
        }
    }
}


#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("Unsupported URL scheme in {0}")]
    UnsupportedScheme(String),
}


/// Retrieves the raw bytes behind a URL.
pub trait ByteFetcher {
    /// Fetches everything behind `url`, calling `on_progress` as bytes arrive.
    fn fetch<P>(&self, url: &str, on_progress: P) -> impl Future<Output = Result<Vec<u8>, Err>> + Send
        where P: FnMut(Progress) + Send;
}


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scheme {
    Http,
    File,
}

impl Scheme {
    fn of(url: &str) -> Result<Self, Err> {
        let Some((scheme, _)) = url.split_once("://") else {
            return Ok(Scheme::File);
        };
        if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
            Ok(Scheme::Http)
        } else if scheme.eq_ignore_ascii_case("file") {
            Ok(Scheme::File)
        } else {
            Err(Err::UnsupportedScheme(url.to_owned()))
        }
    }
}

/// Sends `http://` and `https://` URLs over the network and treats everything else as a
/// local path, with or without a `file://` prefix.
#[derive(Clone, Debug)]
pub struct DefaultFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl DefaultFetcher {
    pub fn new(cfg: &Config) -> Result<Self, Err> {
        Ok(Self {
            http: HttpFetcher::new(cfg)?,
            file: FileFetcher,
        })
    }
}

impl ByteFetcher for DefaultFetcher {
    async fn fetch<P>(&self, url: &str, on_progress: P) -> Result<Vec<u8>, Err>
        where P: FnMut(Progress) + Send
    {
        match Scheme::of(url)? {
            Scheme::Http => self.http.fetch(url, on_progress).await,
            Scheme::File => self.file.fetch(url, on_progress).await,
        }
    }
}
