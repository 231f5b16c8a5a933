//! Shared pieces of the typed record models.
//!
//! OpenCRM returns most values as strings (`"12"`, `"1"`, `"2024-02-01"`),
//! sometimes as JSON numbers, and uses empty strings or `0000-00-00` for
//! "no value". The `deserialize_with` helpers here accept all of those
//! shapes. The `with` helpers for flags and dates also encode values back
//! into the strings OpenCRM expects on writes.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::OpenCrmError;
use crate::http_client::Record;
use crate::modules::Module;

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for date-times.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// OpenCRM's placeholder for an unset date.
const ZERO_DATE: &str = "0000-00-00";

/// A typed view of one module's records.
pub trait CrmModel: Serialize + DeserializeOwned {
    /// Endpoint binding of the module these records belong to.
    const MODULE: &'static Module;

    /// Fields every record carries.
    fn meta(&self) -> &RecordMeta;

    /// The record's CRM id, if it has been saved.
    fn id(&self) -> Option<u64> {
        self.meta().crmid
    }

    /// Decodes a record returned by the API.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::Serialization` if a known field holds a value of the wrong shape.
    fn from_record(record: Record) -> Result<Self, OpenCrmError> {
        Ok(serde_json::from_value(Value::Object(record))?)
    }

    /// Encodes the set fields for a create or update call.
    ///
    /// Unset fields are left out so an update only touches what was set.
    fn to_fields(&self) -> Result<Record, OpenCrmError> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .filter(|(_, value)| !value.is_null())
                .collect()),
            other => Err(OpenCrmError::validation(format!(
                "{} record did not encode as a field map: {}",
                Self::MODULE.name,
                other
            ))),
        }
    }
}

/// Fields common to records of every module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// CRM id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub crmid: Option<u64>,

    /// Id of the owning user.
    #[serde(rename = "smownerid", default, deserialize_with = "id::deserialize")]
    pub assigned_user_id: Option<u64>,

    /// Permission level.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub permission: Option<i64>,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Id reported by some endpoints instead of `crmid`. Never written back.
    #[serde(default, deserialize_with = "id::deserialize", skip_serializing)]
    pub record_id: Option<u64>,

    /// Module name reported alongside `record_id`. Never written back.
    #[serde(default, skip_serializing)]
    pub record_module: Option<String>,
}

/// Reads a field, treating null and blank strings as absent.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }))
}

/// Non-negative ids from numbers or digit strings.
pub(crate) mod id {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = present(deserializer)? else {
            return Ok(None);
        };
        let parsed = match &value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a record id, got {}", value)))
    }
}

/// Signed integers from numbers or numeric strings.
pub(crate) mod int {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = present(deserializer)? else {
            return Ok(None);
        };
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", value)))
    }
}

/// Monetary and other decimal amounts from numbers or numeric strings.
pub(crate) mod amount {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = present(deserializer)? else {
            return Ok(None);
        };
        let parsed = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an amount, got {}", value)))
    }
}

/// Checkbox fields: decoded from bools, `0`/`1` or words, encoded as `"1"`/`"0"`.
pub(crate) mod flag {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = present(deserializer)? else {
            return Ok(None);
        };
        let parsed = match &value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a flag, got {}", value)))
    }

    pub fn serialize<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(true) => serializer.serialize_str("1"),
            Some(false) => serializer.serialize_str("0"),
            None => serializer.serialize_none(),
        }
    }
}

/// Calendar dates in `YYYY-MM-DD`; any time part on input is ignored.
pub(crate) mod date {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = present(deserializer)? else {
            return Ok(None);
        };
        let Value::String(s) = &value else {
            return Err(D::Error::custom(format!("expected a date, got {}", value)));
        };
        let s = s.trim();
        if s.starts_with(ZERO_DATE) {
            return Ok(None);
        }
        let day = s.split(&[' ', 'T'][..]).next().unwrap_or(s);
        NaiveDate::parse_from_str(day, DATE_FORMAT)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid date {:?}: {}", s, e)))
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Date-times in `YYYY-MM-DD HH:MM:SS`; a bare date reads as midnight.
pub(crate) mod datetime {
    use super::*;
    use serde::de::Error as _;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(value) = present(deserializer)? else {
            return Ok(None);
        };
        let Value::String(s) = &value else {
            return Err(D::Error::custom(format!("expected a date-time, got {}", value)));
        };
        let s = s.trim();
        if s.starts_with(ZERO_DATE) {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| {
                NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN))
            })
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid date-time {:?}: {}", s, e)))
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "id::deserialize")]
        id: Option<u64>,
        #[serde(default, deserialize_with = "int::deserialize")]
        int: Option<i64>,
        #[serde(default, deserialize_with = "amount::deserialize")]
        amount: Option<f64>,
        #[serde(default, with = "flag")]
        flag: Option<bool>,
        #[serde(default, with = "date")]
        date: Option<NaiveDate>,
        #[serde(default, with = "datetime")]
        datetime: Option<NaiveDateTime>,
    }

    fn probe(value: Value) -> Result<Probe, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_string_encoded_values() {
        let p = probe(json!({
            "id": "12",
            "int": "-3",
            "amount": "19.99",
            "flag": "1",
            "date": "2024-02-01",
            "datetime": "2024-02-01 09:30:00",
        }))
        .unwrap();

        assert_eq!(p.id, Some(12));
        assert_eq!(p.int, Some(-3));
        assert_eq!(p.amount, Some(19.99));
        assert_eq!(p.flag, Some(true));
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(
            p.datetime,
            NaiveDate::from_ymd_opt(2024, 2, 1).and_then(|d| d.and_hms_opt(9, 30, 0))
        );
    }

    #[test]
    fn test_native_json_values() {
        let p = probe(json!({"id": 12, "int": 4, "amount": 2.5, "flag": false})).unwrap();
        assert_eq!(p.id, Some(12));
        assert_eq!(p.int, Some(4));
        assert_eq!(p.amount, Some(2.5));
        assert_eq!(p.flag, Some(false));
    }

    #[test]
    fn test_blank_and_zero_values_are_absent() {
        let p = probe(json!({
            "id": "",
            "int": null,
            "amount": " ",
            "flag": "",
            "date": "0000-00-00",
            "datetime": "0000-00-00 00:00:00",
        }))
        .unwrap();

        assert_eq!(p.id, None);
        assert_eq!(p.int, None);
        assert_eq!(p.amount, None);
        assert_eq!(p.flag, None);
        assert_eq!(p.date, None);
        assert_eq!(p.datetime, None);
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let p = probe(json!({})).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.date, None);
    }

    #[test]
    fn test_date_ignores_time_part() {
        let p = probe(json!({"date": "2024-02-01 10:00:00"})).unwrap();
        assert_eq!(p.date, NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_datetime_accepts_bare_date() {
        let p = probe(json!({"datetime": "2024-02-01"})).unwrap();
        assert_eq!(
            p.datetime,
            NaiveDate::from_ymd_opt(2024, 2, 1).map(|d| d.and_time(NaiveTime::MIN))
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(probe(json!({"id": "abc"})).is_err());
        assert!(probe(json!({"id": -1})).is_err());
        assert!(probe(json!({"flag": "maybe"})).is_err());
        assert!(probe(json!({"date": "01/02/2024"})).is_err());
        assert!(probe(json!({"date": 20240201})).is_err());
    }

    #[test]
    fn test_encoding_for_writes() {
        let p = Probe {
            flag: Some(true),
            date: NaiveDate::from_ymd_opt(2024, 2, 1),
            datetime: NaiveDate::from_ymd_opt(2024, 2, 1).and_then(|d| d.and_hms_opt(9, 5, 7)),
            ..Probe::default()
        };
        let value = serde_json::to_value(&p).unwrap();

        assert_eq!(value["flag"], json!("1"));
        assert_eq!(value["date"], json!("2024-02-01"));
        assert_eq!(value["datetime"], json!("2024-02-01 09:05:07"));
        assert_eq!(value["id"], Value::Null);
    }
}
