//! Gemini LLM Gateway implementation

use super::types::{
    ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    SafetySetting,
};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use kelly_application::ports::llm_gateway::{GatewayError, LlmGateway};
use kelly_domain::core::string::truncate;
use kelly_domain::{GenerationOutcome, GenerationRequest, Model, PersonaPrompt};
use std::time::Duration;
use tracing::{debug, info};

const API_VERSION: &str = "v1beta";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// LLM Gateway implementation for the Gemini REST API
///
/// Each call sends the Kelly persona as the system instruction and the
/// (possibly paraphrased) question as a single user turn. No conversation
/// history is forwarded.
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GeminiGateway {
    /// Create a gateway with an explicit API key
    pub fn new(api_key: impl Into<String>, config: &FileGeminiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        info!("GeminiGateway initialized ({})", config.base_url);

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
                top_p: config.top_p,
            },
            safety_settings: config
                .relaxed_categories
                .iter()
                .map(SafetySetting::relaxed)
                .collect(),
        })
    }

    /// Create a gateway, resolving the API key from the config or the
    /// environment variable it names
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GatewayError> {
        let api_key = Self::resolve_api_key(config)?;
        Self::new(api_key, config)
    }

    fn resolve_api_key(config: &FileGeminiConfig) -> Result<String, GatewayError> {
        config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&config.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| GatewayError::MissingApiKey(config.api_key_env.clone()))
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/{}/{}:generateContent",
            self.base_url,
            API_VERSION,
            model.resource_path()
        )
    }

    fn build_body(&self, request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content::system(PersonaPrompt::system())),
            contents: vec![Content::user(PersonaPrompt::user_turn(
                request.prompt_text(),
            ))],
            generation_config: self.generation_config,
            safety_settings: self.safety_settings.clone(),
        }
    }

    async fn call(&self, request: &GenerationRequest) -> Result<GenerateContentResponse, GatewayError> {
        let url = self.endpoint(request.model());
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| truncate(body.trim(), 200));
            return Err(if status.as_u16() == 429 {
                GatewayError::RateLimited(message)
            } else {
                GatewayError::HttpStatus {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        match self.call(request).await {
            Ok(response) => response.into_outcome(),
            Err(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kelly_domain::Question;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single HTTP response and hand back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(split) = text.find("\r\n\r\n") {
                    let length = text[..split]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= split + 4 + length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
        });

        (format!("http://{}", addr), rx)
    }

    fn gateway(base_url: &str) -> GeminiGateway {
        let config = FileGeminiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        GeminiGateway::new("test-key", &config).unwrap()
    }

    fn request(model: Model) -> GenerationRequest {
        GenerationRequest::new(Question::new("What is a GAN?"), model, 0, None)
    }

    #[test]
    fn test_endpoint_uses_resource_path() {
        let gateway = gateway("https://example.test/");
        assert_eq!(
            gateway.endpoint(&Model::GeminiPro25),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
        assert_eq!(
            gateway.endpoint(&Model::Custom("tunedModels/kelly-1".to_string())),
            "https://example.test/v1beta/tunedModels/kelly-1:generateContent"
        );
    }

    #[test]
    fn test_body_carries_persona_and_question() {
        let gateway = gateway("https://example.test");
        let body = serde_json::to_value(gateway.build_body(&request(Model::default()))).unwrap();

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            PersonaPrompt::system()
        );
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "User: What is a GAN?\nKelly:"
        );
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_inline_key_beats_env() {
        let config = FileGeminiConfig {
            api_key: Some("inline".to_string()),
            api_key_env: "KELLY_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(GeminiGateway::resolve_api_key(&config).unwrap(), "inline");
    }

    #[test]
    fn test_missing_key_names_variable() {
        let config = FileGeminiConfig {
            api_key: Some("  ".to_string()),
            api_key_env: "KELLY_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        let err = GeminiGateway::resolve_api_key(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key not found (set KELLY_TEST_UNSET_KEY_VAR)"
        );
    }

    #[tokio::test]
    async fn test_success_response() {
        let (url, raw) = serve_once(
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"A poem"}]},"finishReason":"STOP"}]}"#,
        )
        .await;

        let outcome = gateway(&url).generate(&request(Model::GeminiFlash25)).await;
        assert_eq!(outcome, GenerationOutcome::Success("A poem".to_string()));

        let raw = raw.await.unwrap();
        assert!(raw.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
        assert!(raw.to_lowercase().contains("x-goog-api-key: test-key"));
    }

    #[tokio::test]
    async fn test_blocked_response_is_refusal() {
        let (url, _raw) = serve_once("200 OK", r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).await;
        let outcome = gateway(&url).generate(&request(Model::default())).await;
        assert_eq!(outcome, GenerationOutcome::Refused("PROMPT_SAFETY".to_string()));
        assert!(outcome.is_policy_block());
    }

    #[tokio::test]
    async fn test_http_error_is_transport_error() {
        let (url, _raw) = serve_once(
            "400 Bad Request",
            r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;
        let outcome = gateway(&url).generate(&request(Model::default())).await;
        assert_eq!(
            outcome,
            GenerationOutcome::TransportError("HTTP 400: API key not valid".to_string())
        );
    }

    #[tokio::test]
    async fn test_rate_limit_is_transport_error() {
        let (url, _raw) = serve_once("429 Too Many Requests", "slow down").await;
        let outcome = gateway(&url).generate(&request(Model::default())).await;
        assert_eq!(
            outcome,
            GenerationOutcome::TransportError("Rate limited: slow down".to_string())
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let (url, _raw) = serve_once("200 OK", "not json").await;
        let outcome = gateway(&url).generate(&request(Model::default())).await;
        assert!(matches!(outcome, GenerationOutcome::TransportError(ref d) if d.starts_with("Malformed response")));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let outcome = gateway(&format!("http://{}", addr))
            .generate(&request(Model::default()))
            .await;
        assert_eq!(outcome.label(), "transport_error");
    }
}
