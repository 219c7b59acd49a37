use std::time::Duration;

use super::{ByteFetcher, Config, Err, Progress};

/// Streams a response body over HTTP(S), reporting progress after every chunk.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(cfg: &Config) -> Result<Self, Err> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.as_str());
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !cfg.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self { client: builder.build()? })
    }
}

impl ByteFetcher for HttpFetcher {
    async fn fetch<P>(&self, url: &str, mut on_progress: P) -> Result<Vec<u8>, Err>
        where P: FnMut(Progress) + Send
    {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Err::Status { url: url.to_owned(), status: status.as_u16() });
        }

        let total = response.content_length();
        let capacity = total.and_then(|n| usize::try_from(n).ok()).unwrap_or(0);
        let mut bytes = Vec::with_capacity(capacity);
        while let Some(chunk) = response.chunk().await? {
            bytes.extend_from_slice(&chunk);
            on_progress(Progress { loaded: bytes.len() as u64, total });
        }
        tracing::debug!(url, len = bytes.len(), "Fetched");
        Ok(bytes)
    }
}


#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use crate::core::shared::ConfigType;
    use super::*;

    const BODY: &[u8] = b"DRACO\x02\x02\x01\x01\x00\x00\x11\x22\x33";

    fn fetcher() -> HttpFetcher {
        let cfg = Config {
            timeout_secs: Some(10),
            system_proxy: false,
            ..<Config as ConfigType>::default()
        };
        HttpFetcher::new(&cfg).unwrap()
    }

    /// Answers a single request with `parts`, written one at a time with a pause in
    /// between so they reach the client as separate reads.
    async fn serve_once(parts: Vec<Vec<u8>>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            for part in parts {
                socket.write_all(&part).await.unwrap();
                socket.flush().await.unwrap();
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            let _ = socket.shutdown().await;
        });
        format!("http://{}/models/quad.drc", addr)
    }

    #[tokio::test]
    async fn error_status() {
        let url = serve_once(vec![
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
        ]).await;

        let mut calls = 0;
        let err = fetcher().fetch(&url, |_| calls += 1).await.unwrap_err();
        match err {
            Err::Status { url: failed, status } => {
                assert_eq!(failed, url);
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn progress_per_chunk() {
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            BODY.len()
        );
        let url = serve_once(vec![
            head.into_bytes(),
            BODY[..7].to_vec(),
            BODY[7..].to_vec(),
        ]).await;

        let mut seen = Vec::new();
        let bytes = fetcher().fetch(&url, |p| seen.push(p)).await.unwrap();

        assert_eq!(bytes, BODY);
        assert!(seen.len() >= 2, "expected one report per chunk, got {:?}", seen);
        assert!(seen.iter().all(|p| p.total == Some(BODY.len() as u64)));
        assert!(seen.windows(2).all(|w| w[0].loaded < w[1].loaded));
        assert_eq!(seen.last(), Some(&Progress { loaded: 14, total: Some(14) }));
    }
}
