//! Authenticated, retried execution of a single remote call.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::credential::Credential;
use crate::error::{Error, Result};

/// Header carrying the API token.
pub const AUTH_HEADER: &str = "X-TrackerToken";

/// Negotiated representation for request and response bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verb of a logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
}

impl Verb {
    /// Look up a verb by name, ignoring case. Unknown names are `Get`.
    pub fn from_name(name: &str) -> Self {
        const VERBS: [(&str, Verb); 7] = [
            ("GET", Verb::Get),
            ("POST", Verb::Post),
            ("PUT", Verb::Put),
            ("DELETE", Verb::Delete),
            ("HEAD", Verb::Head),
            ("OPTIONS", Verb::Options),
            ("TRACE", Verb::Trace),
        ];
        VERBS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, verb)| *verb)
            .unwrap_or(Verb::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
            Self::Head => Method::HEAD,
            Self::Options => Method::OPTIONS,
            Self::Trace => Method::TRACE,
        }
    }
}

/// Request body of a logical call: nothing, or a typed value.
#[derive(Debug)]
pub enum Payload<'a, S> {
    Empty,
    Body(&'a S),
}

impl Payload<'static, ()> {
    /// A call without a body.
    pub const NONE: Self = Payload::Empty;
}

impl<S: Serialize> Payload<'_, S> {
    /// Serialized body, or `None` when there is nothing to send.
    fn encode(&self) -> Result<Option<Vec<u8>>> {
        match self {
            Payload::Empty => Ok(None),
            Payload::Body(value) => {
                let body = serde_json::to_vec(value).map_err(Error::Payload)?;
                if body.as_slice() == b"null".as_slice() {
                    Ok(None)
                } else {
                    Ok(Some(body))
                }
            }
        }
    }
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Pause before each retry.
    pub delay: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

/// Performs one logical remote call per [`Dispatcher::send`].
///
/// A dispatcher is created for each repository and holds no mutable state;
/// the credential is shared read-only with the rest of the chain.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    credential: Arc<Credential>,
    client: Client,
    retry: RetryPolicy,
}

impl Dispatcher {
    pub fn new(credential: Arc<Credential>, client: Client, retry: RetryPolicy) -> Self {
        Self {
            credential,
            client,
            retry,
        }
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Send `payload` to `path` and decode the response body into `R`.
    ///
    /// Transient failures are retried up to the policy's attempt count; the
    /// last failure is returned unchanged. A body that does not decode into
    /// `R` is reported as [`Error::MalformedResponse`] and never retried.
    pub async fn send<R, S>(&self, path: &str, verb: Verb, payload: Payload<'_, S>) -> Result<R>
    where
        R: DeserializeOwned,
        S: Serialize,
    {
        let url = self.credential.resolve(path)?;
        let body = payload.encode()?;

        let attempts = self.retry.attempts.max(1);
        let mut remaining = attempts;
        loop {
            let attempt = attempts - remaining + 1;
            remaining -= 1;
            tracing::debug!(method = verb.as_str(), %url, attempt, "sending request");

            match self.attempt(&url, verb, body.as_deref()).await {
                Ok(bytes) => return decode(&url, &bytes),
                Err(err) if err.is_transient() && remaining > 0 => {
                    tracing::warn!(
                        method = verb.as_str(),
                        %url,
                        attempt,
                        remaining,
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(err) => {
                    tracing::debug!(method = verb.as_str(), %url, attempt, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, url: &Url, verb: Verb, body: Option<&[u8]>) -> Result<Vec<u8>> {
        let mut request = self
            .client
            .request(verb.method(), url.clone())
            .header(AUTH_HEADER, self.credential.api_key())
            .header(ACCEPT, JSON_CONTENT_TYPE);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_vec());
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => Error::NotFound(format!("{} {}", verb.as_str(), url)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized,
            s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => Error::Server {
                status: s.as_u16(),
                body,
            },
            s => Error::Rejected {
                status: s.as_u16(),
                body,
            },
        })
    }
}

/// Decode a response body; an empty body reads as JSON `null`.
fn decode<R: DeserializeOwned>(url: &Url, bytes: &[u8]) -> Result<R> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|source| Error::MalformedResponse {
        url: url.to_string(),
        source,
    })
}
