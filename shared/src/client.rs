use crate::config::ApiConfig;
use crate::error::RequestError;
use crate::models::{PredictionRequest, PredictionResponse};
use crate::transport::{HttpRequest, Transport};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct PredictionClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> PredictionClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sends one prediction request with `token` as the bearer credential.
    /// Exactly one HTTP call per invocation; no retry.
    pub async fn submit(
        &self,
        request: &PredictionRequest,
        token: &str,
    ) -> Result<PredictionResponse, RequestError> {
        let body = serde_json::to_value(request).map_err(|e| RequestError::Build(e.to_string()))?;
        let url = self.config.endpoint("predict");

        log::info!(
            "POST {} (context {}, service {}, metric {})",
            url,
            request.context.context_id,
            request.service_id,
            request.metric_name
        );

        let response = self
            .transport
            .send(HttpRequest::post(url, body).bearer(token))
            .await?;
        let raw = response.into_json::<Value>()?;
        PredictionResponse::from_value(raw).map_err(|e| RequestError::Decode(e.to_string()))
    }

    pub async fn check_health(&self) -> Result<Value, RequestError> {
        let url = self.config.endpoint("health");
        log::debug!("GET {}", url);
        self.transport.send(HttpRequest::get(url)).await?.into_json()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{PredictionContext, RuntimeEnv, ServiceType, TimeSlot};
    use crate::transport::{HttpMethod, HttpResponse};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use uuid::Uuid;

    /// Replays canned responses and records every request it was handed.
    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        pub responses: Rc<RefCell<VecDeque<Result<HttpResponse, RequestError>>>>,
        pub sent: Rc<RefCell<Vec<HttpRequest>>>,
    }

    impl ScriptedTransport {
        pub fn respond(self, status: u16, status_text: &str, body: &str) -> Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                status_text: status_text.into(),
                body: body.into(),
            }));
            self
        }

        pub fn fail(self, err: RequestError) -> Self {
            self.responses.borrow_mut().push_back(Err(err));
            self
        }

        pub fn calls(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
            self.sent.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(RequestError::Transport("no scripted response".into())))
        }
    }

    fn sample_request() -> PredictionRequest {
        PredictionRequest {
            service_id: "svc-01".into(),
            metric_name: "cpu_usage".into(),
            context: PredictionContext {
                context_id: Uuid::new_v4(),
                timestamp: "2025-03-01T09:30:00Z".into(),
                service_type: ServiceType::Web,
                runtime_env: RuntimeEnv::Prod,
                time_slot: TimeSlot::Peak,
                weight: 1.0,
                expected_users: 100,
            },
        }
    }

    #[test]
    fn submit_posts_json_with_bearer_token() {
        let transport = ScriptedTransport::default().respond(
            200,
            "OK",
            r#"{"predictions":[[1,2],[3,4]],"confidence":0.8}"#,
        );
        let client = PredictionClient::new(ApiConfig::new("http://svc/"), transport.clone());
        let request = sample_request();

        let response = block_on(client.submit(&request, "tok1")).unwrap();
        assert_eq!(response.result.confidence, Some(0.8));

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url, "http://svc/predict");
        assert_eq!(sent[0].bearer.as_deref(), Some("tok1"));
        let body = sent[0].body.as_ref().unwrap();
        assert_eq!(body["service_id"], json!("svc-01"));
        assert_eq!(body["context"]["time_slot"], json!("peak"));
        assert_eq!(
            body["context"]["context_id"],
            json!(request.context.context_id.to_string())
        );
    }

    #[test]
    fn server_detail_is_surfaced() {
        let transport =
            ScriptedTransport::default().respond(400, "Bad Request", r#"{"detail":"bad input"}"#);
        let client = PredictionClient::new(ApiConfig::default(), transport);

        let err = block_on(client.submit(&sample_request(), "tok1")).unwrap_err();
        assert_eq!(err.to_string(), "bad input");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn non_object_body_is_a_decode_error() {
        let transport = ScriptedTransport::default().respond(200, "OK", "[1, 2, 3]");
        let client = PredictionClient::new(ApiConfig::default(), transport);

        let err = block_on(client.submit(&sample_request(), "tok1")).unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[test]
    fn transport_failure_is_passed_through() {
        let transport =
            ScriptedTransport::default().fail(RequestError::Transport("connection refused".into()));
        let client = PredictionClient::new(ApiConfig::default(), transport);

        let err = block_on(client.submit(&sample_request(), "tok1")).unwrap_err();
        assert_eq!(err, RequestError::Transport("connection refused".into()));
    }

    #[test]
    fn health_check_is_unauthenticated_get() {
        let transport = ScriptedTransport::default().respond(200, "OK", r#"{"status":"ok"}"#);
        let client = PredictionClient::new(ApiConfig::default(), transport.clone());

        let health = block_on(client.check_health()).unwrap();
        assert_eq!(health["status"], json!("ok"));
        let sent = transport.sent.borrow();
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert!(sent[0].bearer.is_none());
        assert!(sent[0].url.ends_with("/health"));
    }
}
