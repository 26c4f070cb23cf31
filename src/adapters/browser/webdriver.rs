//! W3C WebDriver client implementing the HeadlessBrowser port.
//!
//! Talks to a chromedriver (or any W3C-compliant driver) over HTTP. Every
//! `open` creates a new driver session, so pages never share cookies or
//! storage.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ports::{BrowserError, BrowserPage, HeadlessBrowser};

/// Interval between element lookups while waiting for a selector.
const SELECTOR_POLL: Duration = Duration::from_millis(100);

/// Settings for [`WebDriverBrowser`].
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// Driver endpoint, e.g. `http://localhost:9515`.
    pub endpoint: String,
    /// User agent the browser presents to sites.
    pub user_agent: String,
    /// Upper bound on any single driver command.
    pub command_timeout: Duration,
}

/// Headless Chrome driven through WebDriver.
pub struct WebDriverBrowser {
    client: Client,
    config: WebDriverConfig,
}

impl WebDriverBrowser {
    pub fn new(config: WebDriverConfig) -> Result<Self, BrowserError> {
        let client = Client::builder()
            .timeout(config.command_timeout)
            .build()
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn new_session_body(&self) -> Value {
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "pageLoadStrategy": "normal",
                    "goog:chromeOptions": {
                        "args": [
                            "--headless=new",
                            "--no-sandbox",
                            "--disable-gpu",
                            "--disable-dev-shm-usage",
                            format!("--user-agent={}", self.config.user_agent),
                        ]
                    }
                }
            }
        })
    }
}

#[async_trait]
impl HeadlessBrowser for WebDriverBrowser {
    async fn open(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        let endpoint = self.config.endpoint.trim_end_matches('/').to_string();
        let value = send(
            &self.client,
            Method::POST,
            &format!("{}/session", endpoint),
            Some(self.new_session_body()),
        )
        .await
        .map_err(|e| BrowserError::SessionStart(e.to_string()))?;

        let session: NewSession = serde_json::from_value(value)
            .map_err(|e| BrowserError::SessionStart(format!("unexpected reply: {}", e)))?;

        tracing::debug!(session_id = %session.session_id, "Opened WebDriver session");

        Ok(Box::new(WebDriverPage {
            client: self.client.clone(),
            session_url: format!("{}/session/{}", endpoint, session.session_id),
        }))
    }
}

/// One WebDriver session.
pub struct WebDriverPage {
    client: Client,
    session_url: String,
}

impl WebDriverPage {
    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, BrowserError> {
        send(&self.client, method, &format!("{}{}", self.session_url, path), body).await
    }
}

#[async_trait]
impl BrowserPage for WebDriverPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        self.command(
            Method::POST,
            "/timeouts",
            Some(json!({ "pageLoad": timeout.as_millis() as u64 })),
        )
        .await?;

        // The driver returns once the load event fires (pageLoadStrategy=normal)
        let navigation = self.command(Method::POST, "/url", Some(json!({ "url": url })));
        match tokio::time::timeout(timeout, navigation).await {
            Err(_) | Ok(Err(BrowserError::Timeout(_))) => Err(BrowserError::Timeout(timeout)),
            Ok(Err(e)) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Ok(Ok(_)) => Ok(()),
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            let found = self
                .command(
                    Method::POST,
                    "/elements",
                    Some(json!({ "using": "css selector", "value": selector })),
                )
                .await?;

            if found.as_array().is_some_and(|elements| !elements.is_empty()) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(timeout));
            }
            tokio::time::sleep(SELECTOR_POLL).await;
        }
    }

    async fn execute(&mut self, script: &str) -> Result<Value, BrowserError> {
        self.command(
            Method::POST,
            "/execute/sync",
            Some(json!({ "script": script, "args": [] })),
        )
        .await
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        send(&self.client, Method::DELETE, &self.session_url, None).await?;
        tracing::debug!(session = %self.session_url, "Closed WebDriver session");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct DriverError {
    error: String,
    #[serde(default)]
    message: String,
}

/// Sends one WebDriver command and unwraps the `value` envelope.
async fn send(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> Result<Value, BrowserError> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            BrowserError::Protocol(format!("driver did not answer: {}", e))
        } else {
            BrowserError::Protocol(e.to_string())
        }
    })?;

    let status = response.status();
    let envelope: Value = response
        .json()
        .await
        .map_err(|e| BrowserError::Protocol(format!("invalid driver reply: {}", e)))?;

    unwrap_envelope(status.is_success(), envelope)
}

/// Extracts `value` from a driver reply, mapping error replies.
fn unwrap_envelope(success: bool, mut envelope: Value) -> Result<Value, BrowserError> {
    let value = envelope.get_mut("value").map(Value::take).unwrap_or(Value::Null);
    if success {
        return Ok(value);
    }

    match serde_json::from_value::<DriverError>(value) {
        Ok(err) if err.error == "timeout" || err.error == "script timeout" => {
            Err(BrowserError::Timeout(Duration::ZERO))
        }
        Ok(err) if err.error == "javascript error" => Err(BrowserError::Script(err.message)),
        Ok(err) => Err(BrowserError::Protocol(format!("{}: {}", err.error, err.message))),
        Err(_) => Err(BrowserError::Protocol("driver returned an error without details".to_string())),
    }
}
