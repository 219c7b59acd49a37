use super::{ByteFetcher, Err, Progress};

const FILE_SCHEME: &str = "file://";

/// Reads a local file. A leading `file://`, in any case, is stripped.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

impl ByteFetcher for FileFetcher {
    async fn fetch<P>(&self, url: &str, mut on_progress: P) -> Result<Vec<u8>, Err>
        where P: FnMut(Progress) + Send
    {
        let path = match url.get(..FILE_SCHEME.len()) {
            Some(scheme) if scheme.eq_ignore_ascii_case(FILE_SCHEME) => &url[FILE_SCHEME.len()..],
            _ => url,
        };
        let bytes = tokio::fs::read(path).await
            .map_err(|source| Err::Io { path: path.to_owned(), source })?;

        let len = bytes.len() as u64;
        on_progress(Progress { loaded: len, total: Some(len) });
        Ok(bytes)
    }
}
