use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::{PortalError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// One JSON call against the API. `path` is relative to the API base.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: vec![],
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: vec![],
            body: None,
        }
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn queries(mut self, params: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Status and decoded body of a finished round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field when it carries something, otherwise the body as JSON.
    pub fn error_text(&self) -> String {
        match self.body.get("error") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            None | Some(Value::Null) | Some(Value::Bool(false)) | Some(Value::String(_)) => {
                self.body.to_string()
            }
            Some(other) => other.to_string(),
        }
    }

    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_ok() {
            return Err(PortalError::Server {
                status: self.status,
                message: self.error_text(),
            });
        }
        Ok(serde_json::from_value(self.body)?)
    }
}

/// A single HTTP round trip. Implementations only report transport level
/// failures as errors; non-OK statuses come back as a [`Reply`].
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: Request) -> Result<Reply>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_text_prefers_error_field() {
        let reply = Reply::new(400, json!({"error": "Capacity exceeded"}));
        assert_eq!(reply.error_text(), "Capacity exceeded");
    }

    #[test]
    fn error_text_dumps_body_without_error_field() {
        let reply = Reply::new(500, json!({"detail": "boom"}));
        assert_eq!(reply.error_text(), r#"{"detail":"boom"}"#);

        let reply = Reply::new(400, json!({"error": ""}));
        assert_eq!(reply.error_text(), r#"{"error":""}"#);
    }

    #[test]
    fn into_result_maps_non_ok_to_server_error() {
        let reply = Reply::new(404, json!({"error": "event not found"}));
        let err = reply.into_result::<Value>().unwrap_err();
        assert_eq!(
            err,
            PortalError::Server {
                status: 404,
                message: "event not found".to_string()
            }
        );
    }

    #[test]
    fn into_result_rejects_unexpected_shape() {
        let reply = Reply::new(200, json!({"unexpected": true}));
        let err = reply
            .into_result::<crate::model::CreateEventResponse>()
            .unwrap_err();
        assert!(err.is_network());
    }
}
