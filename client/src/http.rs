use crate::{ClientError, Result};
use std::fmt::{self, Display};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://whalebooks.com/api/";

static BOOKS_PATH: &str = "books";
static USERS_PATH: &str = "organization/users";

#[derive(Clone)]
pub struct Client {
    base_url: String,
    api_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Client {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at another deployment. Any number of trailing
    /// slashes collapses to exactly one.
    pub fn with_base_url<S: AsRef<str>>(mut self, base_url: S) -> Self {
        self.base_url = format!("{}/", base_url.as_ref().trim_end_matches('/'));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    // Book endpoints
    pub fn list_books(&self) -> Result<Value> {
        self.request::<Value>(HttpMethod::GET, BOOKS_PATH, None)
    }

    /// Fetch a single book. Non-numeric ids are rejected before any request
    /// is sent.
    pub fn get_book<I: Display>(&self, id: I) -> Result<Value> {
        let id = id.to_string();
        let id = id.trim_matches(is_php_space);
        if !is_numeric(id) {
            warn!(id = id, "rejecting non-numeric book id");
            return Err(ClientError::InvalidId { id: id.to_string() });
        }
        let path = format!("{}/{}", BOOKS_PATH, id);
        self.request::<Value>(HttpMethod::GET, &path, None)
    }

    // Organization user endpoints
    pub fn create_user<B: Serialize + ?Sized>(&self, data: &B) -> Result<Value> {
        self.request(HttpMethod::POST, USERS_PATH, Some(data))
    }

    pub fn get_user<I: Display>(&self, id: I) -> Result<Value> {
        let path = format!("{}/{}", USERS_PATH, id);
        self.request::<Value>(HttpMethod::GET, &path, None)
    }

    pub fn update_user<I: Display, B: Serialize + ?Sized>(&self, id: I, data: &B) -> Result<Value> {
        let path = format!("{}/{}", USERS_PATH, id);
        self.request(HttpMethod::PUT, &path, Some(data))
    }

    pub fn delete_user<I: Display>(&self, id: I) -> Result<Value> {
        let path = format!("{}/{}", USERS_PATH, id);
        self.request::<Value>(HttpMethod::DELETE, &path, None)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let client = reqwest::blocking::Client::new();
        let headers = self.headers()?;

        debug!(method = %method, url = %url, "sending request");
        let builder = match method {
            HttpMethod::GET => client.get(&url),
            HttpMethod::POST => client.post(&url),
            HttpMethod::PUT => client.put(&url),
            HttpMethod::DELETE => client.delete(&url),
        };
        let builder = match body {
            Some(body) => builder.headers(headers).json(body),
            None => builder.headers(headers),
        };
        let response = builder.send()?;

        self.handle_response(method, &url, response)
    }

    fn handle_response(
        &self,
        method: HttpMethod,
        url: &str,
        response: reqwest::blocking::Response,
    ) -> Result<Value> {
        let status = response.status();
        let raw_body = response.text()?;
        if status.is_success() {
            debug!(method = %method, url = url, status = status.as_u16(), "request succeeded");
            // An empty reply decodes to null rather than failing
            if raw_body.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&raw_body)?)
        } else {
            warn!(method = %method, url = url, status = status.as_u16(), "request failed");
            Err(ClientError::Http {
                status: status.as_u16(),
                body: raw_body,
            })
        }
    }
}

/// The whitespace PHP skips around numeric strings. Wider Unicode spaces
/// such as U+00A0 are not included.
fn is_php_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

/// Whether `s` reads as a number: optional sign, decimal digits with an
/// optional fraction, optional exponent. Surrounding whitespace is the
/// caller's job.
fn is_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
