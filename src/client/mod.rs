//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::domain::{
    ApiKey, ContextMessage, ContextSchedule, DeliveryRecord, DetailedReportQuery,
    OperationResult, ProviderFailure, ReplyRecord, ReportQuery, ScheduleMessage, SendMessage,
};

#[cfg(test)]
pub(crate) mod fake;

/// Default Comtele REST API root.
pub const DEFAULT_ENDPOINT: &str = "https://sms.comtele.com.br/api/v2";

const SEND_PATH: &str = "send";
const SCHEDULE_PATH: &str = "schedule";
const CONTEXT_MESSAGE_PATH: &str = "contextmessage";
const REPLY_REPORT_PATH: &str = "replyreporting";
const DETAILED_REPORT_PATH: &str = "detailedreporting";

pub(crate) type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: Url,
        api_key: &'a ApiKey,
        body: Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get<'a>(
        &'a self,
        url: Url,
        api_key: &'a ApiKey,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: Url,
        api_key: &'a ApiKey,
        body: Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(ApiKey::HEADER, api_key.as_str())
                .json(&body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(
        &'a self,
        url: Url,
        api_key: &'a ApiKey,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .header(ApiKey::HEADER, api_key.as_str())
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ComteleClient`].
///
/// A response with `Success: false` is not an error at this level; it comes back as a
/// failed [`OperationResult`] and becomes [`ComteleError::Provider`] only when the caller
/// asks for it via [`OperationResult::into_result`].
pub enum ComteleError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("network error")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The API key was rejected.
    #[error("authentication failed (HTTP {status}): check the API key")]
    Auth { status: u16 },

    /// Non-successful HTTP status code returned by the server without a
    /// Comtele envelope explaining it.
    #[error("unexpected HTTP status: {status}{}", body_suffix(.body))]
    HttpStatus { status: u16, body: Option<String> },

    /// Comtele reported a failure for the operation.
    #[error(transparent)]
    Provider(#[from] ProviderFailure),

    /// Response body could not be parsed as the expected format.
    #[error("unexpected response body")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured endpoint is not a valid base URL.
    #[error("invalid endpoint {endpoint:?}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|body| format!(": {body}"))
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
/// Builder for [`ComteleClient`].
///
/// Use this when you need to customize the endpoint, timeout, or user-agent.
pub struct ComteleClientBuilder {
    api_key: ApiKey,
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ComteleClientBuilder {
    /// Create a builder with the default endpoint and no timeout/user-agent override.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API root (e.g. a staging host or a local mock).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`ComteleClient`].
    pub fn build(self) -> Result<ComteleClient, ComteleError> {
        let endpoint = parse_endpoint(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ComteleError::Transport(Box::new(err)))?;

        Ok(ComteleClient {
            api_key: self.api_key,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ComteleError> {
    // A trailing slash makes `Url::join` append paths instead of replacing the last segment.
    let normalized = format!("{}/", endpoint.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|source| ComteleError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        source,
    })
}

#[derive(Clone)]
/// High-level Comtele client.
///
/// Every operation performs exactly one HTTP request authenticated with the
/// `auth-key` header and decodes the `{Success, Message, Object}` envelope.
pub struct ComteleClient {
    api_key: ApiKey,
    endpoint: Url,
    http: Arc<dyn HttpTransport>,
}

impl ComteleClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`ComteleClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: Url::parse(&format!("{DEFAULT_ENDPOINT}/"))
                .unwrap_or_else(|_| unreachable!("default endpoint is a valid URL")),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> ComteleClientBuilder {
        ComteleClientBuilder::new(api_key)
    }

    #[cfg(test)]
    pub(crate) fn with_transport(api_key: ApiKey, http: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_key,
            endpoint: parse_endpoint("https://example.invalid/api/v2").expect("test endpoint"),
            http,
        }
    }

    /// Send a free-text message immediately.
    pub async fn send(&self, request: SendMessage) -> Result<OperationResult<()>, ComteleError> {
        let body = crate::transport::encode_send_body(&request);
        let response = self.post(SEND_PATH, body).await?;
        decode(crate::transport::decode_status_response(&response))
    }

    /// Schedule a free-text message. Past dates are left for Comtele to reject.
    pub async fn schedule(
        &self,
        request: ScheduleMessage,
    ) -> Result<OperationResult<()>, ComteleError> {
        let body = crate::transport::encode_schedule_body(&request);
        let response = self.post(SCHEDULE_PATH, body).await?;
        decode(crate::transport::decode_status_response(&response))
    }

    /// Send a message whose content is chosen by a context rule.
    pub async fn context_send(
        &self,
        request: ContextMessage,
    ) -> Result<OperationResult<()>, ComteleError> {
        let body = crate::transport::encode_context_body(&request);
        let response = self.post(CONTEXT_MESSAGE_PATH, body).await?;
        decode(crate::transport::decode_status_response(&response))
    }

    /// Schedule a context-rule message.
    pub async fn context_schedule(
        &self,
        request: ContextSchedule,
    ) -> Result<OperationResult<()>, ComteleError> {
        let body = crate::transport::encode_context_schedule_body(&request);
        let response = self.post(CONTEXT_MESSAGE_PATH, body).await?;
        decode(crate::transport::decode_status_response(&response))
    }

    /// Fetch replies received in the given range, in the order Comtele returns them.
    pub async fn reply_report(
        &self,
        query: ReportQuery,
    ) -> Result<OperationResult<Vec<ReplyRecord>>, ComteleError> {
        let params = crate::transport::encode_reply_report_query(&query);
        let response = self.get(REPLY_REPORT_PATH, params).await?;
        decode(crate::transport::decode_reply_report_response(&response))
    }

    /// Fetch the per-message delivery report for the given range and status filter.
    pub async fn detailed_report(
        &self,
        query: DetailedReportQuery,
    ) -> Result<OperationResult<Vec<DeliveryRecord>>, ComteleError> {
        let params = crate::transport::encode_detailed_report_query(&query);
        let response = self.get(DETAILED_REPORT_PATH, params).await?;
        decode(crate::transport::decode_detailed_report_response(&response))
    }

    fn url(&self, path: &str) -> Result<Url, ComteleError> {
        self.endpoint
            .join(path)
            .map_err(|source| ComteleError::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                source,
            })
    }

    async fn post(&self, path: &str, body: Value) -> Result<String, ComteleError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post_json(url, &self.api_key, body)
            .await
            .map_err(ComteleError::Transport)?;
        check_status(response)
    }

    async fn get(&self, path: &str, params: Vec<(String, String)>) -> Result<String, ComteleError> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().extend_pairs(params);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url, &self.api_key)
            .await
            .map_err(ComteleError::Transport)?;
        check_status(response)
    }
}

fn check_status(response: HttpResponse) -> Result<String, ComteleError> {
    tracing::debug!(status = response.status, "response received");

    if matches!(response.status, 401 | 403) {
        return Err(ComteleError::Auth {
            status: response.status,
        });
    }

    if !(200..=299).contains(&response.status) {
        // A failed envelope is a rejection even when sent with an error status.
        if matches!(
            crate::transport::decode_status_response(&response.body),
            Ok(result) if !result.success
        ) {
            return Ok(response.body);
        }
        let trimmed = response.body.trim();
        let body = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        };
        return Err(ComteleError::HttpStatus {
            status: response.status,
            body,
        });
    }

    Ok(response.body)
}

fn decode<T>(
    decoded: Result<OperationResult<T>, crate::transport::TransportError>,
) -> Result<OperationResult<T>, ComteleError> {
    let result = decoded.map_err(|err| ComteleError::Parse(Box::new(err)))?;
    if !result.success {
        tracing::info!(message = %result.message, "operation rejected by Comtele");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::domain::{ContextName, DeliveryStatus, MessageText, Receiver, SenderId, Timestamp};

    use super::fake::{FakeTransport, RecordedMethod};
    use super::*;

    fn make_client(transport: FakeTransport) -> ComteleClient {
        ComteleClient::with_transport(ApiKey::new("test_key").unwrap(), Arc::new(transport))
    }

    fn send_request() -> SendMessage {
        SendMessage::new(
            SenderId::new("acme").unwrap(),
            MessageText::new("hello").unwrap(),
            Receiver::parse_list("5511999990000").unwrap(),
        )
        .unwrap()
    }

    fn ts(input: &str) -> Timestamp {
        Timestamp::parse("date", input).unwrap()
    }

    #[tokio::test]
    async fn send_posts_once_with_auth_header() {
        let transport = FakeTransport::new(
            200,
            r#"{"Success":true,"Message":"Mensagem enviada com sucesso.","Object":null}"#,
        );
        let client = make_client(transport.clone());

        let result = client.send(send_request()).await.unwrap();
        assert!(result.success);
        assert_eq!(result.message, "Mensagem enviada com sucesso.");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, RecordedMethod::Post);
        assert_eq!(request.url, "https://example.invalid/api/v2/send");
        assert_eq!(request.api_key, "test_key");
        let body = request.body.as_ref().unwrap();
        assert_eq!(body["Sender"], "acme");
        assert_eq!(body["Content"], "hello");
        assert_eq!(body["Receivers"], "5511999990000");
    }

    #[tokio::test]
    async fn send_returns_provider_failure_verbatim() {
        let transport = FakeTransport::new(
            200,
            r#"{"Success":false,"Message":"Saldo insuficiente.","Object":null}"#,
        );
        let client = make_client(transport);

        let result = client.send(send_request()).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "Saldo insuficiente.");

        let err = ComteleError::from(result.into_result().unwrap_err());
        assert!(matches!(err, ComteleError::Provider(_)));
        assert_eq!(err.to_string(), "Saldo insuficiente.");
    }

    #[tokio::test]
    async fn rejected_key_maps_to_auth_error() {
        let transport = FakeTransport::new(401, "");
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert!(matches!(err, ComteleError::Auth { status: 401 }));
    }

    #[tokio::test]
    async fn non_success_http_status_keeps_body() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert!(matches!(
            err,
            ComteleError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn http_status_error_shows_trimmed_body() {
        let transport = FakeTransport::new(502, "  Bad Gateway\n");
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "unexpected HTTP status: 502: Bad Gateway");
    }

    #[tokio::test]
    async fn failed_envelope_on_error_status_is_a_rejection() {
        let transport = FakeTransport::new(
            400,
            r#"{"Success":false,"Message":"invalid date range","Object":null}"#,
        );
        let client = make_client(transport.clone());

        let range = ReportQuery::new(ts("2024-01-01"), ts("2024-01-31")).unwrap();
        let result = client
            .detailed_report(DetailedReportQuery::new(range, DeliveryStatus::All))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "invalid date range");
        assert!(result.payload.is_none());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn successful_envelope_on_error_status_is_still_an_error() {
        let transport = FakeTransport::new(500, r#"{"Success":true,"Message":"ok"}"#);
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert!(matches!(err, ComteleError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn empty_http_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert!(matches!(
            err,
            ComteleError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let transport = FakeTransport::failing("connection refused");
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert!(matches!(err, ComteleError::Transport(_)));
        assert_eq!(
            StdError::source(&err).map(ToString::to_string).as_deref(),
            Some("connection refused")
        );
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.send(send_request()).await.unwrap_err();
        assert!(matches!(err, ComteleError::Parse(_)));
    }

    #[tokio::test]
    async fn schedule_uses_schedule_endpoint() {
        let transport = FakeTransport::new(200, r#"{"Success":true,"Message":"agendado"}"#);
        let client = make_client(transport.clone());

        let request = ScheduleMessage::new(
            SenderId::new("acme").unwrap(),
            MessageText::new("hello").unwrap(),
            ts("2030-05-01 08:00"),
            Receiver::parse_list("5511999990000").unwrap(),
        )
        .unwrap();
        client.schedule(request).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://example.invalid/api/v2/schedule");
        assert_eq!(
            requests[0].body.as_ref().unwrap()["ScheduleDate"],
            "2030-05-01 08:00:00"
        );
    }

    #[tokio::test]
    async fn context_operations_share_context_endpoint() {
        let transport = FakeTransport::new(200, r#"{"Success":true,"Message":"ok"}"#);
        let client = make_client(transport.clone());

        let message = ContextMessage::new(
            SenderId::new("acme").unwrap(),
            ContextName::new("welcome").unwrap(),
            Receiver::parse_list("5511999990000").unwrap(),
        )
        .unwrap();
        client.context_send(message).await.unwrap();

        let scheduled = ContextSchedule::new(
            SenderId::new("acme").unwrap(),
            ContextName::new("welcome").unwrap(),
            ts("2030-05-01"),
            Receiver::parse_list("5511999990000").unwrap(),
        )
        .unwrap();
        client.context_schedule(scheduled).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(
            requests
                .iter()
                .all(|it| it.url == "https://example.invalid/api/v2/contextmessage")
        );
        assert!(requests[0].body.as_ref().unwrap().get("ScheduleDate").is_none());
        assert!(requests[1].body.as_ref().unwrap().get("ScheduleDate").is_some());
    }

    #[tokio::test]
    async fn detailed_report_sends_query_and_decodes_records() {
        let json = r#"
        {
          "Success": true,
          "Message": "",
          "Object": [
            {
              "Sender": "5511999990000",
              "Receiver": "5511888880000",
              "Content": "hi",
              "SystemMessage": "",
              "Status": "Delivered",
              "RequestDate": "2024-01-01T10:00:00",
              "ScheduleDate": null
            }
          ]
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let range = ReportQuery::new(ts("2024-01-01"), ts("2024-01-02")).unwrap();
        let result = client
            .detailed_report(DetailedReportQuery::new(range, DeliveryStatus::All))
            .await
            .unwrap();
        assert_eq!(result.payload.unwrap().len(), 1);

        let requests = transport.requests();
        assert_eq!(requests[0].method, RecordedMethod::Get);
        assert_eq!(
            requests[0].url,
            "https://example.invalid/api/v2/detailedreporting?startDate=2024-01-01+00%3A00%3A00&endDate=2024-01-02+00%3A00%3A00&delivered=all"
        );
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn reply_report_failure_has_no_payload() {
        let transport = FakeTransport::new(
            200,
            r#"{"Success":false,"Message":"invalid date range","Object":[]}"#,
        );
        let client = make_client(transport.clone());

        let range = ReportQuery::new(ts("2024-01-01"), ts("2024-01-02")).unwrap();
        let result = client.reply_report(range).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "invalid date range");
        assert!(result.payload.is_none());
        assert_eq!(
            transport.requests()[0].url,
            "https://example.invalid/api/v2/replyreporting?startDate=2024-01-01+00%3A00%3A00&endDate=2024-01-02+00%3A00%3A00"
        );
    }

    #[test]
    fn builder_endpoint_override_is_applied() {
        let client = ComteleClient::builder(ApiKey::new("key").unwrap())
            .endpoint("http://127.0.0.1:8080/api/v2/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(
            client.url("send").unwrap().as_str(),
            "http://127.0.0.1:8080/api/v2/send"
        );
    }

    #[test]
    fn builder_rejects_invalid_endpoint() {
        let err = ComteleClient::builder(ApiKey::new("key").unwrap())
            .endpoint("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ComteleError::InvalidEndpoint { .. }));
    }

    #[test]
    fn default_client_targets_comtele() {
        let client = ComteleClient::new(ApiKey::new("key").unwrap());
        assert_eq!(
            client.url("send").unwrap().as_str(),
            "https://sms.comtele.com.br/api/v2/send"
        );
    }
}
