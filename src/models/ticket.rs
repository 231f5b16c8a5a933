//! Helpdesk ticket records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount, date, flag, id, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM helpdesk ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Ticket title.
    #[serde(default)]
    pub title: Option<String>,
    /// Status, e.g. `Open` or `Closed`.
    #[serde(default)]
    pub status: Option<String>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<String>,
    /// Severity.
    #[serde(default)]
    pub severity: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Support queue.
    #[serde(default)]
    pub support_queue: Option<String>,

    /// Contact id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub contactid: Option<u64>,
    /// Id of the related contact or company.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub parent_id: Option<u64>,
    /// Third party id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub extra_parent_id: Option<u64>,
    /// Contract id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub contractid: Option<u64>,
    /// Project id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub projectid: Option<u64>,
    /// Product id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub product_id: Option<u64>,
    /// Asset id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub single_asset_id: Option<u64>,

    /// Solution given to the customer.
    #[serde(default)]
    pub solution: Option<String>,
    /// Internal technical solution.
    #[serde(default)]
    pub tech_solution: Option<String>,

    /// Date the ticket was closed.
    #[serde(default, with = "date")]
    pub closedon: Option<NaiveDate>,
    /// User who closed the ticket.
    #[serde(default)]
    pub closedby: Option<String>,
    /// User who opened the ticket.
    #[serde(default)]
    pub openedby: Option<String>,

    /// Costs excluding VAT.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub cost_net: Option<f64>,
    /// Costs including VAT.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub cost_gross: Option<f64>,

    /// Shown on the customer portal.
    #[serde(default, with = "flag")]
    pub showonportal: Option<bool>,
    /// Comma-separated additional recipients.
    #[serde(default)]
    pub email_to: Option<String>,
    /// Support address the ticket was sent to.
    #[serde(default)]
    pub sent_to_support_email: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub troubletickets_tags: Option<String>,
    /// Action plan id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub actionplan_id: Option<u64>,
    /// Email plan id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub emailplan: Option<u64>,
    /// Date the ticket was last reassigned.
    #[serde(default, with = "date")]
    pub reassigned_date: Option<NaiveDate>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl Ticket {
    /// Whether the ticket has been closed.
    pub fn is_closed(&self) -> bool {
        self.closedon.is_some()
            || self
                .status
                .as_deref()
                .is_some_and(|status| status.eq_ignore_ascii_case("closed"))
    }
}

impl CrmModel for Ticket {
    const MODULE: &'static Module = &Module::HELPDESK;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
