use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use toolgen_core::config::EndpointConfig;
use toolgen_core::SubmissionError;
use toolgen_core::ToolSpec;

use crate::contracts::parse_generate_response;
use crate::error::TransportError;

/// Something that can turn a validated [`ToolSpec`] into generated code.
pub trait GenerationTransport: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, spec: &ToolSpec) -> Result<String, SubmissionError>;
}

/// `POST <base>/generate_tool` with the [`ToolSpec`] as a JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(endpoint: &EndpointConfig) -> Result<Self, TransportError> {
        let raw = endpoint.generate_url();
        let url = Url::parse(&raw).map_err(|_| TransportError::InvalidEndpoint(raw.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(raw));
        }
        let timeout = Duration::from_secs(endpoint.timeout_secs.max(1));
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }
}

impl GenerationTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    fn generate(&self, spec: &ToolSpec) -> Result<String, SubmissionError> {
        tracing::debug!(url = %self.url, tool = %spec.tool_name, "sending generate request");

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(spec)
            .send()
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response.text().map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generation service rejected request");
            return Err(SubmissionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let code = parse_generate_response(&body)?;
        tracing::debug!(
            status = status.as_u16(),
            bytes = code.len(),
            "generate request succeeded"
        );
        Ok(code)
    }
}

impl HttpTransport {
    fn transport_error(&self, err: reqwest::Error) -> SubmissionError {
        if err.is_timeout() {
            SubmissionError::Transport(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        } else if err.is_connect() {
            SubmissionError::Transport(format!("could not connect to {}", self.url))
        } else {
            SubmissionError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use axum::extract::State;
    use axum::http::header;
    use axum::http::HeaderMap;
    use axum::http::Method;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use pretty_assertions::assert_eq;
    use toolgen_core::CodeStyle;

    use super::*;

    struct Captured {
        method: Method,
        content_type: Option<String>,
        body: String,
    }

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        body: &'static str,
        tx: mpsc::Sender<Captured>,
    }

    async fn generate_tool(
        State(stub): State<Stub>,
        method: Method,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let _ = stub.tx.send(Captured {
            method,
            content_type,
            body,
        });
        (
            stub.status,
            [(header::CONTENT_TYPE, "application/json")],
            stub.body,
        )
    }

    /// Starts a generation stub on a background runtime. Every request it
    /// receives is reported on the returned channel.
    fn serve(status: u16, body: &'static str) -> (EndpointConfig, mpsc::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.set_nonblocking(true).expect("nonblocking");
        let addr = listener.local_addr().expect("addr");
        let (tx, rx) = mpsc::channel();
        let stub = Stub {
            status: StatusCode::from_u16(status).expect("status"),
            body,
            tx,
        };

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                let app = Router::new()
                    .route("/generate_tool", post(generate_tool))
                    .with_state(stub);
                if let Err(err) = axum::serve(listener, app).await {
                    eprintln!("generation stub error: {err}");
                }
            });
        });

        let endpoint = EndpointConfig {
            base_url: format!("http://{addr}"),
            timeout_secs: 5,
        };
        (endpoint, rx)
    }

    fn spec() -> ToolSpec {
        ToolSpec {
            tool_name: "MyTool".to_string(),
            description: "desc".to_string(),
            language: "python".to_string(),
            frameworks: vec!["flask".to_string()],
            input_type: "text".to_string(),
            output_type: "json".to_string(),
            additional_features: vec!["logging".to_string()],
            include_comments: true,
            code_style: CodeStyle::Compact,
        }
    }

    #[test]
    fn posts_camel_case_json_once() {
        let (endpoint, rx) = serve(200, r#"{"code":"print(1)"}"#);
        let transport = HttpTransport::new(&endpoint).expect("transport");

        assert_eq!(transport.generate(&spec()), Ok("print(1)".to_string()));

        let captured = rx.recv().expect("captured request");
        assert_eq!(captured.method, Method::POST);
        assert_eq!(captured.content_type.as_deref(), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(&captured.body).expect("json body");
        assert_eq!(body["toolName"], "MyTool");
        assert_eq!(body["language"], "python");
        assert_eq!(body["frameworks"], serde_json::json!(["flask"]));
        assert_eq!(body["inputType"], "text");
        assert_eq!(body["additionalFeatures"], serde_json::json!(["logging"]));
        assert_eq!(body["includeComments"], true);
        assert_eq!(body["codeStyle"], "compact");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn non_success_status_is_a_service_error() {
        let (endpoint, _rx) = serve(500, r#"{"error":"boom"}"#);
        let transport = HttpTransport::new(&endpoint).expect("transport");

        match transport.generate(&spec()) {
            Err(SubmissionError::Service { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error":"boom"}"#);
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn success_without_code_is_malformed() {
        let (endpoint, _rx) = serve(200, r#"{"message":"ok"}"#);
        let transport = HttpTransport::new(&endpoint).expect("transport");

        assert!(matches!(
            transport.generate(&spec()),
            Err(SubmissionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr")
        };
        let endpoint = EndpointConfig {
            base_url: format!("http://{addr}"),
            timeout_secs: 2,
        };
        let transport = HttpTransport::new(&endpoint).expect("transport");

        assert!(matches!(
            transport.generate(&spec()),
            Err(SubmissionError::Transport(_))
        ));
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let endpoint = EndpointConfig {
            base_url: "ftp://example.com".to_string(),
            timeout_secs: 5,
        };
        assert!(matches!(
            HttpTransport::new(&endpoint),
            Err(TransportError::InvalidEndpoint(_))
        ));
    }
}
