//! Company records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount, date, flag, id, int, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM company (account).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Company name.
    #[serde(default)]
    pub accountname: Option<String>,
    /// Company type.
    #[serde(default)]
    pub account_type: Option<String>,
    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Legal format.
    #[serde(default)]
    pub ownership: Option<String>,
    /// Rating.
    #[serde(default)]
    pub rating: Option<String>,
    /// Number of employees.
    #[serde(default)]
    pub employees: Option<String>,
    /// Annual revenue.
    #[serde(default)]
    pub annualrevenue: Option<String>,
    /// Registered company number.
    #[serde(default)]
    pub companynumber: Option<String>,
    /// Proprietor or senior partner.
    #[serde(default)]
    pub proprietor: Option<String>,
    /// Parent company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub parentid: Option<u64>,

    /// Email address.
    #[serde(default)]
    pub email1: Option<String>,
    /// Other email address.
    #[serde(default)]
    pub email2: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Other phone.
    #[serde(default)]
    pub otherphone: Option<String>,
    /// Fax number.
    #[serde(default)]
    pub fax: Option<String>,
    /// Website.
    #[serde(default)]
    pub website: Option<String>,

    /// Billing street.
    #[serde(default)]
    pub street: Option<String>,
    /// Billing street, second line.
    #[serde(default)]
    pub bill_street_2: Option<String>,
    /// Billing city.
    #[serde(default)]
    pub city: Option<String>,
    /// Billing county.
    #[serde(default)]
    pub state: Option<String>,
    /// Billing postcode.
    #[serde(default)]
    pub code: Option<String>,
    /// Billing country.
    #[serde(default)]
    pub country: Option<String>,
    /// Billing email.
    #[serde(default)]
    pub billemail: Option<String>,

    /// Shipping street.
    #[serde(default)]
    pub ship_street: Option<String>,
    /// Shipping street, second line.
    #[serde(default)]
    pub ship_street_2: Option<String>,
    /// Shipping city.
    #[serde(default)]
    pub ship_city: Option<String>,
    /// Shipping county.
    #[serde(default)]
    pub ship_state: Option<String>,
    /// Shipping postcode.
    #[serde(default)]
    pub ship_code: Option<String>,
    /// Shipping country.
    #[serde(default)]
    pub ship_country: Option<String>,
    /// Shipping email.
    #[serde(default)]
    pub shipemail: Option<String>,
    /// Registered street.
    #[serde(default)]
    pub reg_street: Option<String>,
    /// Registered street, second line.
    #[serde(default)]
    pub reg_street_2: Option<String>,
    /// Registered city.
    #[serde(default)]
    pub reg_city: Option<String>,
    /// Registered county.
    #[serde(default)]
    pub reg_state: Option<String>,
    /// Registered postcode.
    #[serde(default)]
    pub reg_code: Option<String>,
    /// Registered country.
    #[serde(default)]
    pub reg_country: Option<String>,
    /// Addresses copied to contacts.
    #[serde(default, with = "flag")]
    pub address_inherit: Option<bool>,

    /// Opted out of email.
    #[serde(default, with = "flag")]
    pub do_not_email: Option<bool>,
    /// Opted out of phone calls (TPS).
    #[serde(rename = "tps", default, with = "flag")]
    pub do_not_phone: Option<bool>,
    /// Opted out of fax (FPS).
    #[serde(rename = "fps", default, with = "flag")]
    pub do_not_fax: Option<bool>,
    /// Consented to data processing.
    #[serde(default, with = "flag")]
    pub consent_to_processing: Option<bool>,
    /// Data processing consent recorded.
    #[serde(default, with = "flag")]
    pub data_processing_consent_given: Option<bool>,
    /// Date consent was given.
    #[serde(default, with = "date")]
    pub date_consent_given: Option<NaiveDate>,
    /// Who consent was given to.
    #[serde(default)]
    pub consent_given_to: Option<String>,
    /// Asked to be forgotten.
    #[serde(default, with = "flag")]
    pub righttobeforgotten: Option<bool>,
    /// Date the request to be forgotten was made.
    #[serde(default, with = "date")]
    pub righttobeforgotten_date: Option<NaiveDate>,

    /// Sage accounts reference.
    #[serde(default)]
    pub sage_ref: Option<String>,
    /// VAT number.
    #[serde(default)]
    pub vatnumber: Option<String>,
    /// Exempt from VAT.
    #[serde(default, with = "flag")]
    pub vatexempt: Option<bool>,
    /// Default currency.
    #[serde(default)]
    pub def_currency: Option<String>,
    /// Pricebook id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub pricebook: Option<u64>,
    /// Preferred language.
    #[serde(default)]
    pub language: Option<String>,
    /// Account type for credit control.
    #[serde(default)]
    pub paymenttype: Option<String>,

    /// Credit limit.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub credit_limit: Option<f64>,
    /// Balance days.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub credit_limit_days: Option<i64>,
    /// Credit status.
    #[serde(default)]
    pub credit_status: Option<String>,
    /// Credit fund.
    #[serde(default, with = "flag")]
    pub stockfund: Option<bool>,
    /// Date of the last credit check.
    #[serde(default, with = "date")]
    pub creditcheckon: Option<NaiveDate>,
    /// Who ran the last credit check.
    #[serde(default)]
    pub creditcheckby: Option<String>,
    /// Total outstanding balance.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub outstanding_balance: Option<f64>,
    /// Balance currently due.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub due_balance: Option<f64>,
    /// Overdue balance.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub overdue_balance: Option<f64>,
    /// Current spend.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub currentspend: Option<f64>,
    /// Opportunity value year to date.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub year_to_date: Option<f64>,

    /// Major account.
    #[serde(default, with = "flag")]
    pub majoraccount: Option<bool>,
    /// Included in calendar and contact sync.
    #[serde(default, with = "flag")]
    pub includeinsync: Option<bool>,
    /// Comma-separated subscriptions.
    #[serde(default)]
    pub subscription: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub account_tags: Option<String>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl CrmModel for Company {
    const MODULE: &'static Module = &Module::COMPANIES;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
