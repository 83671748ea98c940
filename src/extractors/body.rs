//! Request body as loose JSON, accepted from either JSON or urlencoded forms.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde_json::{Map, Value};

/// `None` when there is nothing to read: empty body or a content type that is neither
/// JSON nor a urlencoded form. Validation then reports the required fields.
#[derive(Clone, Debug)]
pub struct RequestBody(pub Option<Value>);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let mime = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(';').next())
        .map(|s| s.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

fn rejection_error(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidBody(format!("Datos inválidos: {}", text))
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|r| rejection_error(r.status(), r.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(RequestBody(None));
                }
                let Json(value) = Json::<Value>::from_bytes(&bytes)
                    .map_err(|r| rejection_error(r.status(), r.body_text()))?;
                Ok(RequestBody(Some(value)))
            }
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                    .await
                    .map_err(|r| rejection_error(r.status(), r.body_text()))?;
                let map: Map<String, Value> = pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
                Ok(RequestBody(Some(Value::Object(map))))
            }
            BodyKind::Other => Ok(RequestBody(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<RequestBody, AppError> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        RequestBody::from_request(builder.body(Body::from(body)).unwrap(), &()).await
    }

    #[tokio::test]
    async fn json_object_is_passed_through() {
        let RequestBody(v) = extract(Some("application/json; charset=utf-8"), r#"{"nombre":"Ana"}"#)
            .await
            .unwrap();
        assert_eq!(v.unwrap()["nombre"], "Ana");
    }

    #[tokio::test]
    async fn form_pairs_become_string_fields() {
        let RequestBody(v) = extract(Some("application/x-www-form-urlencoded"), "nombre=Ana&creditos=3")
            .await
            .unwrap();
        let v = v.unwrap();
        assert_eq!(v["nombre"], "Ana");
        assert_eq!(v["creditos"], "3");
    }

    #[tokio::test]
    async fn empty_json_body_and_unknown_types_read_as_nothing() {
        assert!(extract(Some("application/json"), "").await.unwrap().0.is_none());
        assert!(extract(Some("text/plain"), "nombre=Ana").await.unwrap().0.is_none());
        assert!(extract(None, "").await.unwrap().0.is_none());
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_body() {
        let err = extract(Some("application/json"), r#"{"nombre": "#).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidBody(_)));
    }
}
