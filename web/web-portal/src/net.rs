use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gloo_net::http::Request as HttpRequest;
use portal_client::{Method, PortalError, Reply, Request, Transport};
use serde_json::Value;

use crate::config::portal::PortalConfig;

const API_PATH: &str = "/api";

/// Browser `fetch` through gloo-net.
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base: String,
}

impl GlooTransport {
    pub fn from_config(config: &PortalConfig) -> Self {
        let base = match config.api_base() {
            Some(base) => base.to_string(),
            None => origin_api_base().unwrap_or_else(|e| {
                log::warn!("fall back to relative api base: {e}");
                API_PATH.to_string()
            }),
        };
        log::info!("api base: {base}");
        Self { base }
    }

    async fn send_imp(&self, request: Request) -> Result<Reply, gloo_net::Error> {
        let url = format!("{}{}", self.base, request.path);
        let builder = match request.method {
            Method::Get => HttpRequest::get(&url),
            Method::Post => HttpRequest::post(&url),
        }
        .query(request.query);

        let response = match request.body {
            Some(body) => builder.json(&body)?.send().await?,
            None => builder.send().await?,
        };

        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok(Reply::new(status, body))
    }
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: Request) -> Result<Reply, PortalError> {
        self.send_imp(request)
            .await
            .map_err(|e| PortalError::Network(e.to_string()))
    }
}

fn origin_api_base() -> Result<String> {
    let origin = web_sys::window()
        .ok_or(anyhow!("window not found"))?
        .location()
        .origin()
        .map_err(|e| anyhow!("read origin error: {e:?}"))?;
    Ok(format!("{origin}{API_PATH}"))
}
