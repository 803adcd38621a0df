use log::{debug, warn};
use lpform_model::SolveResult;

use crate::error::SolveError;
use crate::request::SolveRequest;
use crate::response::decode_response;

/// Address of the solving service when nothing else is configured
pub const DEFAULT_SOLVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOLVER_URL.to_string(),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/solve", self.base_url.trim_end_matches('/'))
    }
}

/// Raw outcome of an HTTP exchange that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends one JSON body and returns whatever came back
pub trait Transport {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, SolveError>;
}

/// Round trip to the external solver. One request per call, no retries.
pub struct SolveGateway<T> {
    config: GatewayConfig,
    transport: T,
}

impl<T: Transport> SolveGateway<T> {
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn solve(&self, request: &SolveRequest) -> Result<SolveResult, SolveError> {
        let url = self.config.endpoint();
        let body = request.to_json()?;
        debug!("POST {} ({} bytes, method {})", url, body.len(), request.method);

        let reply = self.transport.post_json(&url, &body)?;
        if !(200..300).contains(&reply.status) {
            warn!("solver answered {}: {}", reply.status, reply.body);
            return Err(SolveError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        let result = decode_response(&reply.body)?;
        debug!(
            "solver returned {} variables and {} iterations",
            result.optimal_solution.len(),
            result.iterations.len()
        );
        Ok(result)
    }
}

/// Blocking HTTP transport
#[cfg(feature = "http")]
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "http")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            agent: ureq::Agent::new(),
        }
    }
}

#[cfg(feature = "http")]
impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, SolveError> {
        let response = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(body);
        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(SolveError::Transport(e.to_string())),
        };
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| SolveError::Transport(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}

#[cfg(feature = "http")]
impl SolveGateway<HttpTransport> {
    pub fn http(config: GatewayConfig) -> Self {
        Self::new(config, HttpTransport::default())
    }
}
