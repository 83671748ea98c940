//! Positional query parameters that sqlx can bind.

use chrono::NaiveDate;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value bound to a `$n` placeholder. Each variant encodes with its own Postgres type.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl From<i64> for SqlParam {
    fn from(n: i64) -> Self {
        SqlParam::Int(n)
    }
}

impl From<i32> for SqlParam {
    fn from(n: i32) -> Self {
        SqlParam::Int(n.into())
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(s: String) -> Self {
        SqlParam::Text(s)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(d: NaiveDate) -> Self {
        SqlParam::Date(d)
    }
}

impl<'q> Encode<'q, Postgres> for SqlParam {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            SqlParam::Int(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf)?,
            SqlParam::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf)?,
            SqlParam::Date(d) => <NaiveDate as Encode<Postgres>>::encode_by_ref(d, buf)?,
        })
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlParam::Int(_) => <i64 as Type<Postgres>>::type_info(),
            SqlParam::Text(_) => <String as Type<Postgres>>::type_info(),
            SqlParam::Date(_) => <NaiveDate as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlParam {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_matching_variant() {
        assert_eq!(SqlParam::from(3_i32), SqlParam::Int(3));
        assert_eq!(SqlParam::from("Ana"), SqlParam::Text("Ana".into()));
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(SqlParam::from(d), SqlParam::Date(d));
    }

    #[test]
    fn produced_type_follows_variant() {
        assert_eq!(
            SqlParam::Int(1).produces(),
            Some(<i64 as Type<Postgres>>::type_info())
        );
        assert_eq!(
            SqlParam::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).produces(),
            Some(<NaiveDate as Type<Postgres>>::type_info())
        );
    }
}
