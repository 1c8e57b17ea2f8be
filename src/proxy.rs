//! Upstream client for the pass-through server. Responses are relayed verbatim.

use crate::config::ResourceSchema;
use crate::error::{AppError, ConfigError};
use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::{Method, Url};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProxyState {
    pub schema: Arc<ResourceSchema>,
    pub upstream: Arc<Upstream>,
}

impl ProxyState {
    pub fn new(schema: ResourceSchema, base: &str) -> Result<Self, ConfigError> {
        let schema = Arc::new(schema);
        let upstream = Upstream::new(base, schema.path_segment)?;
        Ok(ProxyState {
            schema,
            upstream: Arc::new(upstream),
        })
    }
}

/// An upstream reply as received: status, content type and body.
#[derive(Debug)]
pub struct Relayed {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        match self.content_type {
            Some(ct) => {
                response.headers_mut().insert(header::CONTENT_TYPE, ct);
            }
            None => {
                response.headers_mut().remove(header::CONTENT_TYPE);
            }
        }
        response
    }
}

pub struct Upstream {
    client: reqwest::Client,
    collection: Url,
}

impl Upstream {
    pub fn new(base: &str, path_segment: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidVar {
            var: "CATALOG_UPSTREAM",
            value: base.to_string(),
        };
        let mut collection = Url::parse(base).map_err(|_| invalid())?;
        collection
            .path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(path_segment);
        Ok(Upstream {
            client: reqwest::Client::new(),
            collection,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// URL of one record; the key is percent-encoded as a single segment.
    pub fn item_url(&self, key: &str) -> Url {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(key);
        }
        url
    }

    /// Send one request upstream. Transport failures become `AppError::Upstream` with `context`.
    pub async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        context: String,
    ) -> Result<Relayed, AppError> {
        tracing::debug!(%method, %url, "forwarding");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let result = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok());
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, content_type, body))
        }
        .await;

        match result {
            Ok((status, content_type, body)) => Ok(Relayed {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                content_type,
                body,
            }),
            Err(source) => {
                tracing::warn!(error = %source, context = %context, "upstream request failed");
                Err(AppError::Upstream { context, source })
            }
        }
    }
}
