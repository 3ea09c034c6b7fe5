//! HTTP fetcher implementation
//!
//! This module handles the single request made for each source page:
//! - Building the HTTP client with user agent and timeouts
//! - Applying the source's extra headers
//! - Rejecting any status other than 200
//! - Inflating gzip bodies
//! - Handing the body to the source's extractor
//!
//! There are no retries; a failed page is reported and skipped for this run.

use crate::config::HttpConfig;
use crate::crawler::SourceDescriptor;
use crate::extract::PetLinks;
use crate::FetchError;
use flate2::read::GzDecoder;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_ENCODING};
use reqwest::{Client, Request, StatusCode};
use std::borrow::Cow;
use std::io::Read;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// reqwest's own gzip decoding is switched off, so a gzip body reaches
/// [`decode_body`] untouched and a corrupt stream is reported as a decode
/// error for that source.
///
/// # Example
///
/// ```no_run
/// use pet_crossref::config::HttpConfig;
/// use pet_crossref::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .no_gzip()
        .brotli(true)
        .build()
}

/// Fetches one source page and extracts its pets
///
/// # Request Flow
///
/// 1. Build a GET request for `site + page` with the source headers
/// 2. Send it once
/// 3. Require HTTP 200
/// 4. Inflate the body if `Content-Encoding: gzip`
/// 5. Run the source's extractor over the body
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Bad URL or header | `Request` |
/// | Timeout | `Timeout` |
/// | Connection or transfer failure | `Network` |
/// | Status other than 200 | `Status` |
/// | Corrupt gzip stream | `Decode` |
/// | Body the extractor cannot parse | `Extraction` |
pub async fn fetch_source(
    client: &Client,
    source: &SourceDescriptor,
) -> Result<PetLinks, FetchError> {
    let url = source.url();
    let request = build_request(client, source, &url)?;

    tracing::debug!("GET {} ({} extractor)", url, source.extractor.kind());

    let response = client
        .execute(request)
        .await
        .map_err(|e| classify_error(&url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let encoding = response
        .headers()
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let raw = response
        .bytes()
        .await
        .map_err(|e| classify_error(&url, e))?;

    let body = decode_body(encoding.as_deref(), &raw).map_err(|source| FetchError::Decode {
        url: url.clone(),
        source,
    })?;

    tracing::debug!("{}: {} bytes after decoding", url, body.len());

    source
        .extractor
        .extract(&body)
        .map_err(|source| FetchError::Extraction { url, source })
}

/// Builds the GET request for a source, applying its extra headers
fn build_request(
    client: &Client,
    source: &SourceDescriptor,
    url: &str,
) -> Result<Request, FetchError> {
    let request_error = |message: String| FetchError::Request {
        url: url.to_string(),
        message,
    };

    let parsed = Url::parse(url).map_err(|e| request_error(e.to_string()))?;
    let mut builder = client.get(parsed);

    for (name, value) in &source.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| request_error(format!("header '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| request_error(format!("header '{}' value: {}", name, e)))?;
        builder = builder.header(name, value);
    }

    builder.build().map_err(|e| request_error(e.to_string()))
}

/// Maps a reqwest failure onto the per-source taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Returns the body with gzip content encoding removed
///
/// Any encoding other than gzip is passed through as-is.
pub fn decode_body<'a>(encoding: Option<&str>, raw: &'a [u8]) -> std::io::Result<Cow<'a, [u8]>> {
    match encoding.map(str::trim) {
        Some(enc) if enc.eq_ignore_ascii_case("gzip") => {
            let mut inflated = Vec::new();
            GzDecoder::new(raw).read_to_end(&mut inflated)?;
            Ok(Cow::Owned(inflated))
        }
        _ => Ok(Cow::Borrowed(raw)),
    }
}
