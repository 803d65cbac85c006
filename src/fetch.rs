//! HTTP fetching with bounded retry
//!
//! - One blocking client, built once from `HttpConfig` and passed by reference
//! - Retries on configured server-error statuses and on connect/timeout errors
//! - Exponential backoff between attempts

use crate::config::HttpConfig;
use crate::error::{FetchError, FetchResult};
use reqwest::blocking::Client;
use std::thread;
use tracing::{debug, warn};

/// Source of page bodies.
pub trait Fetch {
    fn fetch(&self, url: &str) -> FetchResult<String>;
}

pub struct HttpFetcher {
    client: Client,
    config: HttpConfig,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn should_retry_status(&self, status: u16) -> bool {
        self.config.retry_statuses.contains(&status)
    }

    fn wait_before_retry(&self, url: &str, attempt: u32, reason: &str) {
        let backoff = self.config.backoff(attempt);
        warn!(
            "{} on {} (attempt {}/{}), retrying in {:.1}s",
            reason,
            url,
            attempt + 1,
            self.config.max_retries,
            backoff.as_secs_f64()
        );
        thread::sleep(backoff);
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchResult<String> {
        let mut attempt = 0;

        loop {
            debug!("GET {}", url);
            match self.client.get(url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.text().map_err(|source| FetchError::Request {
                            url: url.to_string(),
                            source,
                        });
                    }

                    let code = status.as_u16();
                    if self.should_retry_status(code) && attempt < self.config.max_retries {
                        self.wait_before_retry(url, attempt, &format!("HTTP {}", code));
                        attempt += 1;
                        continue;
                    }

                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: code,
                    });
                }
                Err(e) => {
                    if (e.is_connect() || e.is_timeout()) && attempt < self.config.max_retries {
                        self.wait_before_retry(url, attempt, "Connection error");
                        attempt += 1;
                        continue;
                    }

                    return Err(FetchError::Request {
                        url: url.to_string(),
                        source: e,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn test_config(max_retries: u32) -> HttpConfig {
        HttpConfig {
            max_retries,
            backoff_factor: 0.0,
            timeout_secs: 5,
            ..HttpConfig::default()
        }
    }

    #[test]
    fn test_fetch_success_sends_user_agent() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/scholarships/test")
            .match_header("user-agent", "eduvision-scraper/1.0")
            .with_status(200)
            .with_body("<html>ok</html>")
            .expect(1)
            .create();

        let fetcher = HttpFetcher::new(&test_config(2)).unwrap();
        let body = fetcher
            .fetch(&format!("{}/scholarships/test", server.url()))
            .unwrap();

        assert_eq!(body, "<html>ok</html>");
        mock.assert();
    }

    #[test]
    fn test_fetch_retries_server_errors_until_exhausted() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/flaky")
            .with_status(503)
            .expect(3)
            .create();

        let fetcher = HttpFetcher::new(&test_config(2)).unwrap();
        let result = fetcher.fetch(&format!("{}/flaky", server.url()));

        match result {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected status error, got {:?}", other),
        }
        mock.assert();
    }

    #[test]
    fn test_fetch_does_not_retry_client_errors() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(1)
            .create();

        let fetcher = HttpFetcher::new(&test_config(3)).unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.url()));

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        mock.assert();
    }
}
