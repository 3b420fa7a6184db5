//! HTTP client for the region-parameterized moment endpoint.
//!
//! One GET per call, no retry, no cross-call state: the poll loop owns the
//! cadence and simply calls [`Fetcher::fetch`] again on the next tick.
//! Parsing is an explicit step ([`parse_body`]) producing a typed payload,
//! so malformed bodies surface as typed failures instead of untyped JSON
//! leaking into classification.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::ENDPOINT_BASE;

/// Failure taxonomy for one fetch attempt.
///
/// The split matters downstream: both kinds degrade to an error snapshot,
/// but the detail text must let a consumer tell a dead network from a
/// misbehaving endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or non-success HTTP status.
    #[error("transport failure: {detail}")]
    Transport { detail: String },

    /// Body is not valid JSON or does not form a usable moment payload.
    /// Carries the verbatim body for diagnostics.
    #[error("malformed response: {detail}")]
    Malformed { detail: String, raw: String },
}

impl FetchError {
    /// The verbatim response body, when one was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            FetchError::Transport { .. } => None,
            FetchError::Malformed { raw, .. } => Some(raw),
        }
    }
}

/// Milliseconds since the Unix epoch.
///
/// The endpoint serves `startDate`/`endDate` as RFC 3339 strings, while the
/// classification engine works in epoch milliseconds; both that form and a
/// raw integer normalize to milliseconds here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpochMs(pub i64);

impl<'de> Deserialize<'de> for EpochMs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EpochMsVisitor;

        impl<'de> Visitor<'de> for EpochMsVisitor {
            type Value = EpochMs;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("epoch milliseconds or an RFC 3339 timestamp")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(EpochMs(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(EpochMs)
                    .map_err(|_| E::custom(format!("timestamp {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                DateTime::parse_from_rfc3339(v)
                    .map(|parsed| EpochMs(parsed.timestamp_millis()))
                    .map_err(|e| E::custom(format!("invalid timestamp `{v}`: {e}")))
            }
        }

        deserializer.deserialize_any(EpochMsVisitor)
    }
}

/// Structured moment payload as served by the endpoint.
///
/// `startDate`/`endDate` are required for a usable window but kept optional
/// here: presence is enforced by the window constructor so that a missing
/// field is reported by name rather than as a generic JSON error. Fields the
/// endpoint adds beyond the known set are preserved for the `api_parsed`
/// attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<EpochMs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<EpochMs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Outcome of one successful fetch: the verbatim body plus its parsed form,
/// unmodified by any business logic.
#[derive(Debug, Clone)]
pub struct RawFetchResult {
    pub raw: String,
    pub payload: MomentPayload,
}

/// Stateless client for the moment endpoint. Safe to invoke repeatedly and
/// concurrently; it holds no cross-call state.
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    /// Build a client with the given transport timeout. No other deadline is
    /// enforced internally; callers wanting a harder bound impose it at the
    /// call site.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// Endpoint URL for a region.
    pub fn endpoint_url(region: &str) -> String {
        format!("{ENDPOINT_BASE}/{region}")
    }

    /// Fetch and parse the latest moment announcement for `region`.
    ///
    /// The only local region check is non-emptiness; invalid regions are the
    /// server's to reject. A non-success status is a transport failure even
    /// if the body happens to parse; a success status with an unusable body
    /// is malformed regardless of transport health.
    pub fn fetch(&self, region: &str) -> Result<RawFetchResult, FetchError> {
        if region.trim().is_empty() {
            return Err(FetchError::Transport {
                detail: "region must be a non-empty identifier".to_string(),
            });
        }

        let url = Self::endpoint_url(region);
        let response = self.client.get(&url).send().map_err(|e| FetchError::Transport {
            detail: e.to_string(),
        })?;

        let status = response.status();
        let raw = response.text().map_err(|e| FetchError::Transport {
            detail: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(FetchError::Transport {
                detail: format!("unexpected HTTP status {status} from {url}"),
            });
        }

        let payload = parse_body(&raw)?;
        Ok(RawFetchResult { raw, payload })
    }
}

/// Parse a response body into the typed payload.
pub fn parse_body(raw: &str) -> Result<MomentPayload, FetchError> {
    serde_json::from_str(raw).map_err(|e| FetchError::Malformed {
        detail: format!("body is not a moment payload: {e}"),
        raw: raw.to_string(),
    })
}
