//! Opportunity records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount, date, flag, id, int, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM sales opportunity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Opportunity name.
    #[serde(default)]
    pub potentialname: Option<String>,
    /// Opportunity type.
    #[serde(default)]
    pub potentialtype: Option<String>,
    /// Sales stage.
    #[serde(default)]
    pub sales_stage: Option<String>,
    /// Lead source.
    #[serde(default)]
    pub leadsource: Option<String>,
    /// Next step.
    #[serde(default)]
    pub nextstep: Option<String>,

    /// Company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub accountid: Option<u64>,
    /// Contact id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub contactid: Option<u64>,
    /// Campaign id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub campaignid: Option<u64>,
    /// Project id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub projectid: Option<u64>,
    /// Event id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub single_event_id: Option<u64>,
    /// Id of the related record.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub parent_id: Option<u64>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Value of the opportunity.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub amount: Option<f64>,
    /// Value before the last change.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub previous_amount: Option<f64>,
    /// Change in value since the last update.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub gain_loss: Option<f64>,
    /// Value weighted by probability.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub weightedamount: Option<f64>,
    /// Probability of winning, in percent.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub probability: Option<i64>,
    /// Sales commission.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub salescommission: Option<f64>,

    /// Start date.
    #[serde(default, with = "date")]
    pub start_date: Option<NaiveDate>,
    /// Expected close date.
    #[serde(default, with = "date")]
    pub closingdate: Option<NaiveDate>,
    /// Active period in days.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub activedays: Option<i64>,

    /// Commission approved.
    #[serde(default, with = "flag")]
    pub commission_approved: Option<bool>,
    /// Date the commission was approved.
    #[serde(default, with = "date")]
    pub commission_approved_date: Option<NaiveDate>,
    /// Currency.
    #[serde(default)]
    pub def_currency: Option<String>,
    /// Cost centre.
    #[serde(default)]
    pub cost_centre: Option<String>,
    /// VAT rate percentage.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub vat_rate: Option<i64>,
    /// Comma-separated tags.
    #[serde(default)]
    pub potential_tags: Option<String>,
    /// Action plan id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub actionplan_id: Option<u64>,
    /// Email plan id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub emailplan: Option<u64>,
    /// Date the opportunity was last reassigned.
    #[serde(default, with = "date")]
    pub reassigned_date: Option<NaiveDate>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl CrmModel for Opportunity {
    const MODULE: &'static Module = &Module::OPPORTUNITIES;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_from_record() {
        let Value::Object(record) = json!({
            "crmid": 3001,
            "potentialname": "Annual licence",
            "sales_stage": "Negotiation",
            "amount": "24000.00",
            "probability": "60",
            "closingdate": "2024-06-30",
            "commission_approved": "1",
            "commission_approved_date": "2024-07-05",
            "gain_loss": "-500.50",
            "activedays": "45",
            "cf_region": "North",
        }) else {
            unreachable!()
        };

        let opp = Opportunity::from_record(record).unwrap();

        assert_eq!(opp.id(), Some(3001));
        assert_eq!(opp.amount, Some(24000.0));
        assert_eq!(opp.probability, Some(60));
        assert_eq!(opp.closingdate, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(opp.commission_approved, Some(true));
        assert_eq!(
            opp.commission_approved_date,
            NaiveDate::from_ymd_opt(2024, 7, 5)
        );
        assert_eq!(opp.gain_loss, Some(-500.5));
        assert_eq!(opp.activedays, Some(45));
        assert_eq!(opp.extra.get("cf_region"), Some(&json!("North")));
    }

    #[test]
    fn test_to_fields_keeps_extra_fields() {
        let mut opp = Opportunity {
            potentialname: Some("Renewal".to_string()),
            commission_approved: Some(true),
            ..Opportunity::default()
        };
        opp.extra.insert("cf_region".to_string(), json!("South"));

        let fields = opp.to_fields().unwrap();

        assert_eq!(fields.get("potentialname"), Some(&json!("Renewal")));
        assert_eq!(fields.get("commission_approved"), Some(&json!("1")));
        assert_eq!(fields.get("cf_region"), Some(&json!("South")));
        assert!(!fields.contains_key("amount"));
        assert!(!fields.contains_key("crmid"));
    }
}
