//! Contact records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{date, flag, id, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// First name.
    #[serde(default)]
    pub firstname: Option<String>,
    /// Last name.
    #[serde(default)]
    pub lastname: Option<String>,
    /// Salutation.
    #[serde(default)]
    pub greeting: Option<String>,
    /// Company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub accountid: Option<u64>,
    /// Job title.
    #[serde(default)]
    pub title: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Contact type.
    #[serde(default)]
    pub contacttype: Option<String>,
    /// Lead source.
    #[serde(default)]
    pub leadsource: Option<String>,
    /// Id of the contact this one reports to.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub reportsto: Option<u64>,
    /// Birth date.
    #[serde(default, with = "date")]
    pub birthday: Option<NaiveDate>,

    /// Business email.
    #[serde(default)]
    pub email: Option<String>,
    /// Private email.
    #[serde(default)]
    pub email2: Option<String>,
    /// Office phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Mobile number.
    #[serde(default)]
    pub mobile: Option<String>,
    /// Home phone.
    #[serde(default)]
    pub homephone: Option<String>,
    /// Fax number.
    #[serde(default)]
    pub fax: Option<String>,
    /// Other phone.
    #[serde(default)]
    pub otherphone: Option<String>,
    /// Assistant name.
    #[serde(default)]
    pub assistant: Option<String>,
    /// Assistant phone.
    #[serde(default)]
    pub assistantphone: Option<String>,
    /// Assistant email.
    #[serde(default)]
    pub assistant_email: Option<String>,

    /// Mailing street.
    #[serde(default)]
    pub mailingstreet: Option<String>,
    /// Mailing street, second line.
    #[serde(default)]
    pub mailingstreet2: Option<String>,
    /// Mailing city.
    #[serde(default)]
    pub mailingcity: Option<String>,
    /// Mailing county.
    #[serde(default)]
    pub mailingstate: Option<String>,
    /// Mailing postcode.
    #[serde(default)]
    pub mailingzip: Option<String>,
    /// Mailing country.
    #[serde(default)]
    pub mailingcountry: Option<String>,
    /// Other street.
    #[serde(default)]
    pub otherstreet: Option<String>,
    /// Other street, second line.
    #[serde(default)]
    pub otherstreet2: Option<String>,
    /// Other city.
    #[serde(default)]
    pub othercity: Option<String>,
    /// Other county.
    #[serde(default)]
    pub otherstate: Option<String>,
    /// Other postcode.
    #[serde(default)]
    pub otherzip: Option<String>,
    /// Other country.
    #[serde(default)]
    pub othercountry: Option<String>,
    /// Address inherited from the company.
    #[serde(default, with = "flag")]
    pub addressinherit: Option<bool>,
    /// Document folder.
    #[serde(default)]
    pub folder: Option<String>,

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
    #[serde(default, with = "flag")]
    pub donotlivechat: Option<bool>,
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

    /// Customer portal access.
    #[serde(default)]
    pub portal: Option<String>,
    /// Portal username.
    #[serde(default)]
    pub login: Option<String>,
    /// Portal password.
    #[serde(default)]
    pub password: Option<String>,
    /// Whether the portal login is locked.
    #[serde(default, with = "flag")]
    pub portal_islocked: Option<bool>,
    /// Allowed to sign documents electronically.
    #[serde(default, with = "flag")]
    pub canesign: Option<bool>,
    /// Support start date.
    #[serde(default, with = "date")]
    pub support_start_date: Option<NaiveDate>,
    /// Support end date.
    #[serde(default, with = "date")]
    pub support_end_date: Option<NaiveDate>,
    /// Sage accounts reference.
    #[serde(default)]
    pub sage_ref: Option<String>,
    /// Included in calendar and contact sync.
    #[serde(default)]
    pub includeinsync: Option<String>,

    /// Comma-separated subscriptions.
    #[serde(default)]
    pub subscription: Option<String>,
    /// Comma-separated tags.
    #[serde(default)]
    pub contactdetails_tags: Option<String>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl Contact {
    /// First and last name joined, if either is set.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

impl CrmModel for Contact {
    const MODULE: &'static Module = &Module::CONTACTS;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
