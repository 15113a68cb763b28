//! Turns operation descriptors into fully-specified HTTP requests.
//!
//! URL derivation lives here: webhook URLs pass through verbatim, team
//! endpoints expand to the hosted incoming-webhook path with the legacy
//! token as a query parameter, and stream paths are joined without doubling
//! slashes. The wire body is always the JSON-serialized payload.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::client::HttpRequest;
use crate::config::{BasicAuth, Endpoint, TransportConfig};
use crate::error::TransportError;
use crate::payload::MessagePayload;

/// Characters percent-encoded in query parameter values.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'=')
    .add(b'?');

/// The three webhook operations a transport performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operation {
    Collect,
    Query,
    Stream,
}

impl Operation {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Collect => "collect",
            Self::Query => "query",
            Self::Stream => "stream",
        }
    }
}

/// Everything needed to build one request.
pub(crate) struct RequestSpec {
    pub(crate) operation: Operation,
    pub(crate) payload: MessagePayload,
    /// Extra path segment appended to the resolved URL (stream only).
    pub(crate) path: Option<String>,
    /// Basic credentials forwarded to the client (stream only).
    pub(crate) auth: Option<BasicAuth>,
}

impl RequestSpec {
    pub(crate) fn collect(payload: MessagePayload) -> Self {
        Self {
            operation: Operation::Collect,
            payload,
            path: None,
            auth: None,
        }
    }

    pub(crate) fn query(payload: MessagePayload) -> Self {
        Self {
            operation: Operation::Query,
            payload,
            path: None,
            auth: None,
        }
    }

    pub(crate) fn stream(
        payload: MessagePayload,
        path: Option<String>,
        auth: Option<BasicAuth>,
    ) -> Self {
        Self {
            operation: Operation::Stream,
            payload,
            path,
            auth,
        }
    }
}

pub(crate) fn build_request(
    config: &TransportConfig,
    spec: RequestSpec,
) -> Result<HttpRequest, TransportError> {
    let mut url = base_url(&config.endpoint);
    if let Some(path) = &spec.path {
        url = join_path(&url, path);
    }
    // Token goes last so it lands after any stream path segment.
    if let Endpoint::Team { token, .. } = &config.endpoint {
        url = append_query(&url, "token", token);
    }
    let body = serde_json::to_value(&spec.payload)?;
    log::debug!("dispatching {} request", spec.operation.as_str());

    Ok(HttpRequest {
        url,
        body,
        auth: spec.auth,
    })
}

fn base_url(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Webhook { url } => url.clone(),
        Endpoint::Team { domain, .. } => {
            format!("https://{domain}.slack.com/services/hooks/incoming-webhook")
        }
    }
}

fn join_path(url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn append_query(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    let encoded = utf8_percent_encode(value, QUERY_ENCODE_SET);
    format!("{url}{separator}{key}={encoded}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use crate::config::{BasicAuth, Endpoint, TransportConfig};
    use crate::payload::envelope;

    use super::{Operation, RequestSpec, build_request};

    fn webhook_config(url: &str) -> TransportConfig {
        TransportConfig::new(Endpoint::Webhook {
            url: url.to_string(),
        })
    }

    fn team_config(domain: &str, token: &str) -> TransportConfig {
        TransportConfig::new(Endpoint::Team {
            domain: domain.to_string(),
            token: token.to_string(),
        })
    }

    #[rstest]
    fn webhook_url_passes_through_verbatim() {
        let config = webhook_config("https://hooks.slack.com/services/T0/B0/XYZ");
        let request =
            build_request(&config, RequestSpec::collect(envelope(&config))).expect("build");
        assert_eq!(request.url, "https://hooks.slack.com/services/T0/B0/XYZ");
        assert!(request.auth.is_none());
    }

    #[rstest]
    fn team_endpoint_derives_hosted_url_with_token() {
        let config = team_config("myteam", "sekrit");
        let request =
            build_request(&config, RequestSpec::collect(envelope(&config))).expect("build");
        assert_eq!(
            request.url,
            "https://myteam.slack.com/services/hooks/incoming-webhook?token=sekrit"
        );
    }

    #[rstest]
    fn token_values_are_percent_encoded() {
        let config = team_config("myteam", "a b&c=d");
        let request =
            build_request(&config, RequestSpec::collect(envelope(&config))).expect("build");
        assert!(request.url.ends_with("?token=a%20b%26c%3Dd"), "{}", request.url);
    }

    #[rstest]
    #[case("https://hooks.example.com/base", "extra", "https://hooks.example.com/base/extra")]
    #[case("https://hooks.example.com/base/", "/extra", "https://hooks.example.com/base/extra")]
    #[case("https://hooks.example.com/base", "/deep/path", "https://hooks.example.com/base/deep/path")]
    fn stream_path_joins_without_doubled_slashes(
        #[case] base: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let config = webhook_config(base);
        let spec = RequestSpec::stream(envelope(&config), Some(path.to_string()), None);
        let request = build_request(&config, spec).expect("build");
        assert_eq!(request.url, expected);
    }

    #[rstest]
    fn token_lands_after_stream_path() {
        let config = team_config("myteam", "tok");
        let spec = RequestSpec::stream(envelope(&config), Some("tail".to_string()), None);
        let request = build_request(&config, spec).expect("build");
        assert_eq!(
            request.url,
            "https://myteam.slack.com/services/hooks/incoming-webhook/tail?token=tok"
        );
    }

    #[rstest]
    fn existing_query_string_extends_with_ampersand() {
        let config = webhook_config("https://hooks.example.com/hook?version=2");
        let request =
            build_request(&config, RequestSpec::collect(envelope(&config))).expect("build");
        // Webhook URLs keep their query; only team tokens append.
        assert_eq!(request.url, "https://hooks.example.com/hook?version=2");

        let team = TransportConfig::new(Endpoint::Team {
            domain: "t".to_string(),
            token: "x".to_string(),
        });
        let spec = RequestSpec::stream(envelope(&team), Some("p?q=1".to_string()), None);
        let request = build_request(&team, spec).expect("build");
        assert!(request.url.ends_with("/p?q=1&token=x"), "{}", request.url);
    }

    #[rstest]
    fn body_is_serialized_payload(#[values(Operation::Collect, Operation::Query)] op: Operation) {
        let config = webhook_config("https://hooks.example.com/hook");
        let spec = RequestSpec {
            operation: op,
            payload: envelope(&config),
            path: None,
            auth: None,
        };
        let request = build_request(&config, spec).expect("build");
        assert_eq!(request.body.get("channel"), Some(&json!("#general")));
        assert_eq!(request.body.get("username"), Some(&json!("logger")));
    }

    #[rstest]
    fn stream_auth_rides_on_the_request() {
        let config = webhook_config("https://hooks.example.com/hook");
        let auth = BasicAuth::new("user", "pass");
        let spec = RequestSpec::stream(envelope(&config), None, Some(auth.clone()));
        let request = build_request(&config, spec).expect("build");
        assert_eq!(request.auth, Some(auth));
    }
}
