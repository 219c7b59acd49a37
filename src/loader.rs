use serde::{Deserialize, Serialize};

use crate::convert::GeometryBuffer;
use crate::core::shared::ConfigType;
use crate::decode::{self, Decoder};
use crate::fetch::{self, ByteFetcher, DefaultFetcher, Progress};
use crate::report::{ReportSink, TracingSink};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix prepended verbatim to every URL passed to a load.
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_fetch_config")]
    pub fetch: fetch::Config,
}

fn default_fetch_config() -> fetch::Config {
    <fetch::Config as ConfigType>::default()
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            path: String::new(),
            fetch: default_fetch_config(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}


#[remain::sorted]
#[derive(thiserror::Error, Debug)]
pub enum Err {
    #[error("Decode error: {0}")]
    Decode(#[from] decode::Err),
    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::Err),
}


/// Fetches Draco files and converts them into [GeometryBuffer]s.
///
/// Loads share nothing but the configuration, so one loader can serve any number of
/// concurrent loads.
pub struct DracoLoader<D, F = DefaultFetcher, S = TracingSink> {
    decoder: D,
    fetcher: F,
    sink: S,
    path: String,
}

impl<D: Decoder> DracoLoader<D> {
    pub fn new(decoder: D) -> Result<Self, Err> {
        Self::from_config(decoder, &<Config as ConfigType>::default())
    }

    pub fn from_config(decoder: D, cfg: &Config) -> Result<Self, Err> {
        let mut loader = Self::from_parts(decoder, DefaultFetcher::new(&cfg.fetch)?, TracingSink);
        loader.set_path(cfg.path.as_str());
        Ok(loader)
    }
}

impl<D, F, S> DracoLoader<D, F, S>
    where
        D: Decoder,
        F: ByteFetcher,
        S: ReportSink,
{
    pub fn from_parts(decoder: D, fetcher: F, sink: S) -> Self {
        Self { decoder, fetcher, sink, path: String::new() }
    }

    pub fn with_fetcher<G: ByteFetcher>(self, fetcher: G) -> DracoLoader<D, G, S> {
        DracoLoader { decoder: self.decoder, fetcher, sink: self.sink, path: self.path }
    }

    pub fn with_sink<T: ReportSink>(self, sink: T) -> DracoLoader<D, F, T> {
        DracoLoader { decoder: self.decoder, fetcher: self.fetcher, sink, path: self.path }
    }

    /// Sets the prefix for subsequent loads.
    pub fn set_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The URL a load of `url` actually fetches.
    pub fn resolve_url(&self, url: &str) -> String {
        format!("{}{}", self.path, url)
    }

    /// Converts bytes that are already in memory.
    pub fn decode(&self, data: &[u8]) -> Result<GeometryBuffer, Err> {
        Ok(decode::decode(data, &self.decoder, &self.sink)?)
    }

    /// Fetches `url` (after the path prefix) and converts it.
    pub async fn load_async<P>(&self, url: &str, on_progress: P) -> Result<GeometryBuffer, Err>
        where P: FnMut(Progress) + Send
    {
        let url = self.resolve_url(url);
        tracing::debug!(url = url.as_str(), "Loading");
        let data = self.fetcher.fetch(&url, on_progress).await?;
        self.decode(&data)
    }

    /// Callback form of [Self::load_async]. Exactly one of `on_load` and `on_error` runs.
    pub async fn load<L, P, E>(&self, url: &str, on_load: L, on_progress: P, on_error: E)
        where
            L: FnOnce(GeometryBuffer),
            P: FnMut(Progress) + Send,
            E: FnOnce(Err),
    {
        match self.load_async(url, on_progress).await {
            Ok(buffer) => on_load(buffer),
            Err(e) => {
                tracing::debug!("Load failed: {}", e);
                on_error(e)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::core::geometry::GeometryType;
    use crate::core::mesh::Mesh;
    use crate::decode::FnDecoder;
    use crate::report::NoopSink;
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("unused")]
    struct Unused;

    fn loader() -> DracoLoader<impl Decoder, crate::fetch::FileFetcher, NoopSink> {
        let decoder = FnDecoder(|_: &[u8], _: GeometryType| Result::<Mesh, Unused>::Err(Unused));
        DracoLoader::from_parts(decoder, crate::fetch::FileFetcher, NoopSink)
    }

    #[test]
    fn path_is_a_plain_prefix() {
        let mut loader = loader();
        assert_eq!(loader.resolve_url("bunny.drc"), "bunny.drc");

        loader.set_path("https://example.com/models/");
        assert_eq!(loader.path(), "https://example.com/models/");
        assert_eq!(loader.resolve_url("bunny.drc"), "https://example.com/models/bunny.drc");

        // no separator is inserted
        loader.set_path("/data");
        assert_eq!(loader.resolve_url("bunny.drc"), "/databunny.drc");
    }

    #[test]
    fn config_from_json() {
        let cfg = Config::from_json(r#"{ "path": "assets/", "fetch": { "timeout_secs": 5 } }"#).unwrap();
        assert_eq!(cfg.path, "assets/");
        assert_eq!(cfg.fetch.timeout_secs, Some(5));

        let cfg = Config::from_json("{}").unwrap();
        assert_eq!(cfg, <Config as ConfigType>::default());
    }

    #[test]
    fn decode_errors_are_wrapped() {
        let err = loader().decode(b"not draco").unwrap_err();
        assert!(matches!(err, Err::Decode(decode::Err::Header(_))));
    }

    #[tokio::test]
    async fn fetch_failure_reaches_on_error() {
        let loader = loader();
        let mut loaded = false;
        let mut failed = None;
        loader.load(
            "/nonexistent/draco-loader/missing.drc",
            |_| loaded = true,
            |_| {},
            |e| failed = Some(e),
        ).await;
        assert!(!loaded);
        assert!(matches!(failed, Some(Err::Fetch(fetch::Err::Io { .. }))));
    }
}
