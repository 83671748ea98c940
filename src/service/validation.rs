//! Request body validation: required-field presence, then typed decoding.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Fail with `message` unless every field in `required` is present and truthy.
    pub fn require(
        body: &Map<String, Value>,
        required: &[&str],
        message: &'static str,
    ) -> Result<(), AppError> {
        if required.iter().all(|f| body.get(*f).map(is_present).unwrap_or(false)) {
            Ok(())
        } else {
            Err(AppError::MissingFields(message))
        }
    }

    /// Check required fields and decode the body into `T`. A missing or non-object body
    /// is treated as `{}` so the caller gets the required-field message.
    pub fn payload<T: DeserializeOwned>(
        body: Option<Value>,
        required: &[&str],
        message: &'static str,
    ) -> Result<T, AppError> {
        let map = match body {
            Some(Value::Object(m)) => m,
            _ => Map::new(),
        };
        Self::require(&map, required, message)?;
        serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::InvalidBody(format!("Datos inválidos: {}", e)))
    }
}

/// Falsy values count as missing: null, false, 0 and blank strings. Whitespace-only
/// strings are missing too, which is stricter than a plain emptiness check.
fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse an id taken from the URL path.
pub fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::InvalidId(id_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CursoInput, EstudianteInput};
    use serde_json::json;

    const MSG: &str = "Nombre y correo son obligatorios";

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn falsy_values_count_as_missing() {
        for bad in [json!(null), json!(""), json!("   "), json!(0), json!(false)] {
            let body = obj(json!({"nombre": "Ana", "correo": bad}));
            assert!(matches!(
                RequestValidator::require(&body, &["nombre", "correo"], MSG),
                Err(AppError::MissingFields(MSG))
            ));
        }
    }

    #[test]
    fn absent_field_counts_as_missing() {
        let body = obj(json!({"nombre": "Ana"}));
        assert!(RequestValidator::require(&body, &["nombre", "correo"], MSG).is_err());
    }

    #[test]
    fn non_object_body_reports_missing_fields() {
        let err = RequestValidator::payload::<EstudianteInput>(Some(json!([1, 2])), &["nombre", "correo"], MSG)
            .unwrap_err();
        assert!(matches!(err, AppError::MissingFields(MSG)));
        let err = RequestValidator::payload::<EstudianteInput>(None, &["nombre", "correo"], MSG).unwrap_err();
        assert!(matches!(err, AppError::MissingFields(MSG)));
    }

    #[test]
    fn wrong_types_are_invalid_body() {
        let err = RequestValidator::payload::<CursoInput>(
            Some(json!({"nombre": "Física", "creditos": "muchos"})),
            &["nombre", "creditos"],
            "Nombre y créditos son obligatorios",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidBody(_)));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let input: EstudianteInput = RequestValidator::payload(
            Some(json!({"nombre": "Ana", "correo": "ana@x.com", "id": 99})),
            &["nombre", "correo"],
            MSG,
        )
        .unwrap();
        assert_eq!(input.nombre, "Ana");
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("doce"), Err(AppError::InvalidId(_))));
    }
}
