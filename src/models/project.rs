//! Project records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount, date, flag, id, int, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Project name.
    #[serde(default)]
    pub name: Option<String>,
    /// Project number.
    #[serde(default)]
    pub projectnum: Option<String>,
    /// Project type.
    #[serde(default)]
    pub projecttype: Option<String>,
    /// Status.
    #[serde(default)]
    pub projectstatus: Option<String>,
    /// Priority.
    #[serde(default)]
    pub projpriority: Option<String>,

    /// Company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub accountid: Option<u64>,
    /// Contact id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub contactid: Option<u64>,
    /// Sales order id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub salesorder_id: Option<u64>,
    /// Id of the related record.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub parent_id: Option<u64>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Start date.
    #[serde(default, with = "date")]
    pub startdate: Option<NaiveDate>,
    /// End date.
    #[serde(default, with = "date")]
    pub enddate: Option<NaiveDate>,
    /// Target end date.
    #[serde(default, with = "date")]
    pub targetend: Option<NaiveDate>,

    /// Budget.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub budget: Option<f64>,
    /// Costs excluding VAT.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub cost_net: Option<f64>,
    /// Costs including VAT.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub cost_gross: Option<f64>,
    /// VAT rate percentage.
    #[serde(default)]
    pub vat_rate: Option<String>,

    /// Project time in minutes, as entered.
    #[serde(default)]
    pub time_m: Option<String>,
    /// Chargeable time in minutes.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub time_taken_m: Option<i64>,
    /// Non-chargeable time in minutes.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub nc_time_m: Option<i64>,
    /// Scheduled time in minutes.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub sched_time_m: Option<i64>,

    /// Whether the project is active.
    #[serde(default, with = "flag")]
    pub active: Option<bool>,
    /// Whether the project is private.
    #[serde(default, with = "flag")]
    pub private: Option<bool>,
    /// Shown on the customer portal.
    #[serde(default, with = "flag")]
    pub showonportal: Option<bool>,
    /// Documents shown on the customer portal.
    #[serde(default, with = "flag")]
    pub showdocsonportal: Option<bool>,

    /// Comma-separated tags.
    #[serde(default)]
    pub projects_tags: Option<String>,
    /// Action plan id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub actionplan_id: Option<u64>,
    /// Email plan id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub emailplan: Option<u64>,
    /// Date the project was last reassigned.
    #[serde(default, with = "date")]
    pub reassigned_date: Option<NaiveDate>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl CrmModel for Project {
    const MODULE: &'static Module = &Module::PROJECTS;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
