//! HTTP client for the simulation server.

use std::time::Duration;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use crate::model::Trace;
use crate::request::SimulationRequest;
use crate::traits::TraceReader;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a trace could not be fetched. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not reach simulation server at {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("simulation server answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to read simulation response: {0}")]
    Read(#[source] reqwest::Error),

    #[error("simulation response does not match the trace schema: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Blocking client for `POST {base_url}/simulate`.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    http: Client,
    base_url: String,
}

impl SimulationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}/simulate", self.base_url.trim_end_matches('/'))
    }

    /// Submits `request` as a URL-encoded form and decodes the trace.
    pub fn simulate(&self, request: &SimulationRequest) -> Result<Trace, FetchError> {
        let url = self.endpoint();
        tracing::info!(
            url = %url,
            policy = request.policy.wire_name(),
            processes = request.processes.len(),
            "requesting simulation"
        );

        let response = self
            .http
            .post(&url)
            .form(&request.form_fields())
            .send()
            .map_err(|source| FetchError::Transport { url: url.clone(), source })?;

        let status = response.status();
        let body = response.text().map_err(FetchError::Read)?;
        let trace = decode_response(status, &body)?;
        tracing::info!(steps = trace.step_count(), "simulation received");
        Ok(trace)
    }

    /// Binds a request to this client so it can be loaded like any other source.
    pub fn reader(&self, request: SimulationRequest) -> SimulationReader {
        SimulationReader {
            client: self.clone(),
            request,
        }
    }
}

/// Turns a raw server response into a trace.
pub fn decode_response(status: StatusCode, body: &str) -> Result<Trace, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            body: body.chars().take(200).collect(),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// A pending simulation request, read on a loader thread.
#[derive(Debug, Clone)]
pub struct SimulationReader {
    client: SimulationClient,
    request: SimulationRequest,
}

impl SimulationReader {
    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }
}

impl TraceReader for SimulationReader {
    fn read(&self) -> anyhow::Result<Trace> {
        Ok(self.client.simulate(&self.request)?)
    }

    fn describe(&self) -> String {
        format!("{} ({} processes)", self.client.endpoint(), self.request.processes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"{
        "history": [
            {"time": 0, "running": {"pid": 1, "color": "#f00", "remaining_time": 1}, "queue": []}
        ],
        "statistics": {
            "average_waiting_time": 0,
            "average_turnaround_time": 1,
            "average_response_time": 0,
            "completion_order": [1],
            "process_details": [
                {"pid": 1, "priority": 1, "waiting_time": 0, "turnaround_time": 1, "completion_time": 1}
            ]
        }
    }"##;

    #[test]
    fn test_decode_success() {
        let trace = decode_response(StatusCode::OK, BODY).unwrap();
        assert_eq!(trace.step_count(), 1);
        assert_eq!(trace.statistics.completion_order, vec![1]);
    }

    #[test]
    fn test_decode_error_status() {
        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, "boom").unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_schema_mismatch() {
        let err = decode_response(StatusCode::OK, r#"{"history": 3}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().contains("trace schema"));
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = SimulationClient::new("http://localhost:5000/", DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/simulate");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is essentially never listening.
        let client = SimulationClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let request = SimulationRequest::new(
            crate::request::SchedulingPolicy::NonPreemptive,
            vec![crate::request::ProcessRow::default()],
        );
        let err = client.simulate(&request).unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
