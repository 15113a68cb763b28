//! Production HTTP client backed by ureq.

use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use crate::config::TransportConfig;
use crate::error::TransportError;

use super::{BodyReader, HttpClient, HttpRequest, HttpResponse, ResponseBody, basic_authorization};

/// Blocking client with two pooled agents: one carrying an overall request
/// deadline for request/response calls, and one with only a per-read timeout
/// so long-lived streaming bodies are never cut off by a total deadline.
pub struct UreqClient {
    agent: Agent,
    stream_agent: Agent,
}

impl UreqClient {
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
        stream_read_timeout: Duration,
    ) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(request_timeout)
            .build();
        let stream_agent = AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout_read(stream_read_timeout)
            .build();
        Self {
            agent,
            stream_agent,
        }
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(
            config.connect_timeout,
            config.request_timeout,
            config.stream_read_timeout,
        )
    }

    fn send(agent: &Agent, request: &HttpRequest) -> Result<ureq::Response, Box<ureq::Error>> {
        let mut req = agent
            .post(&request.url)
            .set("Content-Type", "application/json");
        if let Some(auth) = &request.auth {
            req = req.set("Authorization", &basic_authorization(auth));
        }
        req.send_string(&request.body.to_string()).map_err(Box::new)
    }

    fn read_response(response: ureq::Response) -> Result<HttpResponse, TransportError> {
        let status = response.status();
        let text = response
            .into_string()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let body = if text.is_empty() {
            ResponseBody::Empty
        } else {
            ResponseBody::Text(text)
        };
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for UreqClient {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // ureq reports non-2xx statuses as errors; recover the response so
        // the caller sees the status instead of a lost reply.
        match Self::send(&self.agent, request) {
            Ok(response) => Self::read_response(response),
            Err(err) => match *err {
                ureq::Error::Status(_, response) => Self::read_response(response),
                ureq::Error::Transport(transport) => {
                    Err(TransportError::Request(transport.to_string()))
                }
            },
        }
    }

    fn open_stream(&self, request: &HttpRequest) -> Result<BodyReader, TransportError> {
        match Self::send(&self.stream_agent, request) {
            Ok(response) => Ok(Box::new(response.into_reader())),
            Err(err) => match *err {
                ureq::Error::Status(code, _) => Err(TransportError::Status(code)),
                ureq::Error::Transport(transport) => {
                    Err(TransportError::Request(transport.to_string()))
                }
            },
        }
    }
}
