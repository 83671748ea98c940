//! Row types returned by the API and the payloads accepted on create/update.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Estudiante {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Curso {
    pub id: i64,
    pub nombre: String,
    pub creditos: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Inscripcion {
    pub id: i64,
    pub estudiante_id: i64,
    pub curso_id: i64,
    pub fecha_inscripcion: NaiveDate,
}

/// Denormalized enrollment row: names instead of foreign ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct InscripcionDetalle {
    pub inscripcion_id: i64,
    pub estudiante: String,
    pub curso: String,
    pub creditos: i32,
    pub fecha_inscripcion: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EstudianteInput {
    pub nombre: String,
    pub correo: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CursoInput {
    pub nombre: String,
    #[serde(deserialize_with = "lenient_int")]
    pub creditos: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InscripcionInput {
    #[serde(deserialize_with = "lenient_int")]
    pub estudiante_id: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub curso_id: i64,
    pub fecha_inscripcion: NaiveDate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

/// Accept integers sent either as JSON numbers or as numeric strings (form-style clients).
fn lenient_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    use serde::de::Error;
    let n = match NumberOrText::deserialize(deserializer)
        .map_err(|_| D::Error::custom("se esperaba un número entero"))?
    {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("'{}' no es un número entero", s)))?,
    };
    T::try_from(n).map_err(|_| D::Error::custom(format!("{} está fuera de rango", n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn curso_input_accepts_numeric_strings() {
        let input: CursoInput = serde_json::from_value(json!({"nombre": "Álgebra", "creditos": "4"})).unwrap();
        assert_eq!(input.creditos, 4);
    }

    #[test]
    fn curso_input_rejects_non_numeric_credits() {
        let err = serde_json::from_value::<CursoInput>(json!({"nombre": "Álgebra", "creditos": "cuatro"}));
        assert!(err.is_err());
    }

    #[test]
    fn inscripcion_input_parses_iso_dates() {
        let input: InscripcionInput = serde_json::from_value(json!({
            "estudiante_id": 1,
            "curso_id": "2",
            "fecha_inscripcion": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(input.curso_id, 2);
        assert_eq!(input.fecha_inscripcion, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn detalle_serializes_date_as_iso_string() {
        let row = InscripcionDetalle {
            inscripcion_id: 7,
            estudiante: "Ana".into(),
            curso: "Física".into(),
            creditos: 3,
            fecha_inscripcion: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        };
        let v = serde_json::to_value(row).unwrap();
        assert_eq!(v["fecha_inscripcion"], "2024-03-15");
    }
}
