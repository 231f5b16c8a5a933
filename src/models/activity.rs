//! Activity (task and event) records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::common::{amount, date, datetime, flag, id, int, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// Task status.
    #[serde(rename = "taskstatus", default)]
    pub status: Option<String>,
    /// Task priority.
    #[serde(rename = "taskpriority", default)]
    pub priority: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Task list.
    #[serde(default)]
    pub tasklist: Option<String>,

    /// Start date and time.
    #[serde(default, with = "datetime")]
    pub date_start: Option<NaiveDateTime>,
    /// Due date.
    #[serde(default, with = "date")]
    pub due_date: Option<NaiveDate>,
    /// Duration in hours.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub duration_hours: Option<i64>,

    /// Id of the related record.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub parent_id: Option<u64>,
    /// Contact id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub contact_id: Option<u64>,
    /// Company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub accountid: Option<u64>,
    /// Asset id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub single_asset_id: Option<u64>,

    /// Charge time.
    #[serde(default)]
    pub chargetime: Option<String>,
    /// Costs excluding VAT.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub cost_net: Option<f64>,
    /// Costs including VAT.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub cost_gross: Option<f64>,
    /// VAT rate percentage.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub vat_rate: Option<i64>,
    /// Live chat conversation URL.
    #[serde(default)]
    pub livechat_convo_url: Option<String>,
    /// FAQ rating.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub cf_faqrating: Option<i64>,

    /// Notify the owner.
    #[serde(default, with = "flag")]
    pub sendnotification: Option<bool>,
    /// Notify the contact.
    #[serde(default, with = "flag")]
    pub sendnotificationcont: Option<bool>,
    /// Send a reminder to the owner.
    #[serde(default, with = "flag")]
    pub reminder_time: Option<bool>,
    /// Send a reminder to the contact.
    #[serde(default, with = "flag")]
    pub reminder_time_cont: Option<bool>,
    /// Shown on the customer portal.
    #[serde(default, with = "flag")]
    pub showonportal: Option<bool>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl CrmModel for Activity {
    const MODULE: &'static Module = &Module::ACTIVITIES;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
