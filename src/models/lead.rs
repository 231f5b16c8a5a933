//! Lead records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{date, flag, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM lead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// First name.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Last name.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// Job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,
    /// Fax number.
    #[serde(default)]
    pub fax: Option<String>,
    /// Home phone number.
    #[serde(default)]
    pub homephone: Option<String>,
    /// Website.
    #[serde(default)]
    pub website: Option<String>,

    /// Lead source.
    #[serde(default)]
    pub leadsource: Option<String>,
    /// Lead status.
    #[serde(default)]
    pub leadstatus: Option<String>,
    /// Lead type.
    #[serde(default)]
    pub leadtype: Option<String>,
    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Rating.
    #[serde(default)]
    pub rating: Option<String>,
    /// Annual revenue.
    #[serde(default)]
    pub annualrevenue: Option<String>,
    /// Number of employees.
    #[serde(default)]
    pub noofemployees: Option<String>,

    /// Street.
    #[serde(default)]
    pub lane: Option<String>,
    /// Street, second line.
    #[serde(default)]
    pub lane2: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// County.
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub code: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,

    /// Salutation used in correspondence.
    #[serde(default)]
    pub greeting: Option<String>,
    /// Date of birth.
    #[serde(default, with = "date")]
    pub dob: Option<NaiveDate>,

    /// Opted out of email.
    #[serde(default, with = "flag")]
    pub do_not_email: Option<bool>,
    /// Opted out of phone calls (TPS).
    #[serde(rename = "tps", default, with = "flag")]
    pub do_not_phone: Option<bool>,
    /// Opted out of fax (FPS).
    #[serde(rename = "fps", default, with = "flag")]
    pub do_not_fax: Option<bool>,
    /// Opted out of live chat.
    #[serde(rename = "donotlivechat", default, with = "flag")]
    pub do_not_livechat: Option<bool>,
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

    /// Portal user.
    #[serde(default)]
    pub portal: Option<String>,
    /// Portal username.
    #[serde(default)]
    pub login: Option<String>,
    /// Portal password.
    #[serde(default)]
    pub password: Option<String>,
    /// Portal account locked.
    #[serde(default, with = "flag")]
    pub portal_islocked: Option<bool>,

    /// Comma-separated subscriptions.
    #[serde(default)]
    pub subscription: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub leaddetails_tags: Option<String>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl CrmModel for Lead {
    const MODULE: &'static Module = &Module::LEADS;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
