//! In-process transport that records requests and replays a canned response.

use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use url::Url;

use super::{BoxFuture, HttpResponse, HttpTransport};
use crate::domain::ApiKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordedMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) method: RecordedMethod,
    pub(crate) url: String,
    pub(crate) api_key: String,
    pub(crate) body: Option<Value>,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<RecordedRequest>,
    response: Result<HttpResponse, String>,
}

impl FakeTransport {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self::with_response(Ok(HttpResponse {
            status,
            body: body.into(),
        }))
    }

    pub(crate) fn failing(error: impl Into<String>) -> Self {
        Self::with_response(Err(error.into()))
    }

    fn with_response(response: Result<HttpResponse, String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                response,
            })),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    fn record(
        &self,
        request: RecordedRequest,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request);
        state.response.clone().map_err(Into::into)
    }
}

impl HttpTransport for FakeTransport {
    fn post_json<'a>(
        &'a self,
        url: Url,
        api_key: &'a ApiKey,
        body: Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            self.record(RecordedRequest {
                method: RecordedMethod::Post,
                url: url.to_string(),
                api_key: api_key.as_str().to_owned(),
                body: Some(body),
            })
        })
    }

    fn get<'a>(
        &'a self,
        url: Url,
        api_key: &'a ApiKey,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            self.record(RecordedRequest {
                method: RecordedMethod::Get,
                url: url.to_string(),
                api_key: api_key.as_str().to_owned(),
                body: None,
            })
        })
    }
}
