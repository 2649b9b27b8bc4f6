use anyhow::Result;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::config::WebContentConfig;

/// Raw page as served after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub final_url: String,
    pub body: String,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("not an http(s) url")]
    UnsupportedUrl,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("non-html content type {0:?}")]
    NotHtml(String),
}

pub struct PageFetcher {
    client: Client,
    config: WebContentConfig,
}

impl PageFetcher {
    pub fn new(config: WebContentConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("mail-phish-guard/{}", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::limited(config.max_redirects))
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Single attempt; every failure is logged and reported as an absent page.
    pub async fn fetch(&self, raw_url: &str) -> Option<FetchedPage> {
        match self.try_fetch(raw_url).await {
            Ok(page) => {
                tracing::debug!(
                    target: "fetch",
                    url = raw_url,
                    final_url = %page.final_url,
                    bytes = page.body.len(),
                    "page fetched"
                );
                Some(page)
            }
            Err(err) => {
                warn!(target: "fetch", error = %err, url = raw_url, "page unavailable; using document defaults");
                None
            }
        }
    }

    async fn try_fetch(&self, raw_url: &str) -> Result<FetchedPage, FetchError> {
        let url = match Url::parse(raw_url.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => url,
            _ => return Err(FetchError::UnsupportedUrl),
        };

        let response = self
            .client
            .get(url)
            .timeout(self.config.fetch_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(target: "fetch", url = raw_url, %status, "scoring error page body");
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !content_type.to_ascii_lowercase().contains("html") {
                return Err(FetchError::NotHtml(content_type.to_string()));
            }
        }

        let final_url = response.url().to_string();
        let limit = self.config.max_body_bytes;
        let mut response = response;
        let mut bytes = Vec::new();
        while bytes.len() < limit {
            match response.chunk().await? {
                Some(chunk) => bytes.extend_from_slice(&chunk),
                None => break,
            }
        }
        bytes.truncate(limit);

        Ok(FetchedPage {
            final_url,
            body: decode_body(bytes),
        })
    }
}

/// Lossy UTF-8 decode; a sequence cut short by the size cap is dropped.
fn decode_body(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let utf8_error = err.utf8_error();
            let mut bytes = err.into_bytes();
            if utf8_error.error_len().is_none() {
                bytes.truncate(utf8_error.valid_up_to());
            }
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}/landing")
    }

    fn http_response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    fn fetcher() -> PageFetcher {
        PageFetcher::new(WebContentConfig {
            fetch_timeout: Duration::from_secs(2),
            ..WebContentConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_html_page() {
        let body = "<html><body><a href='#'>x</a></body></html>";
        let url = serve_once(http_response("200 OK", "text/html; charset=utf-8", body)).await;

        let page = fetcher().fetch(&url).await.expect("page");
        assert_eq!(page.body, body);
        assert_eq!(page.final_url, url);
    }

    #[tokio::test]
    async fn non_html_is_absent() {
        let url = serve_once(http_response("200 OK", "application/json", "{}")).await;
        assert!(fetcher().fetch(&url).await.is_none());
    }

    #[tokio::test]
    async fn error_status_page_is_still_scored() {
        let body = "<html><form action='http://evil.net/x'></form></html>";
        let url = serve_once(http_response("404 Not Found", "text/html", body)).await;

        let page = fetcher().fetch(&url).await.expect("404 html page");
        assert_eq!(page.body, body);
        assert_eq!(page.final_url, url);
    }

    #[tokio::test]
    async fn body_is_capped_while_downloading() {
        let body = "<html>".to_string() + &"x".repeat(10_000) + "</html>";
        let url = serve_once(http_response("200 OK", "text/html", &body)).await;
        let fetcher = PageFetcher::new(WebContentConfig {
            fetch_timeout: Duration::from_secs(2),
            max_body_bytes: 64,
            ..WebContentConfig::default()
        })
        .unwrap();

        let page = fetcher.fetch(&url).await.expect("page");
        assert_eq!(page.body.len(), 64);
        assert!(page.body.starts_with("<html>xxx"));
    }

    #[tokio::test]
    async fn unsupported_urls_are_absent() {
        let fetcher = fetcher();
        assert!(fetcher.fetch("paypal-login.example/verify").await.is_none());
        assert!(fetcher.fetch("ftp://files.example.com/").await.is_none());
        assert!(fetcher.fetch("").await.is_none());
    }

    #[tokio::test]
    async fn refused_connection_is_absent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(fetcher().fetch(&format!("http://{addr}/")).await.is_none());
    }

    #[test]
    fn decode_drops_a_sequence_cut_by_the_cap() {
        let mut bytes = "héllo".as_bytes().to_vec();
        bytes.truncate(2);
        assert_eq!(decode_body(bytes), "h");
        assert_eq!(decode_body(b"abc".to_vec()), "abc");
        assert_eq!(decode_body(vec![b'a', 0xff, b'b']), "a\u{fffd}b");
    }
}
