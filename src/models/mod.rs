//! Typed record models for the OpenCRM modules.
//!
//! Resources return raw [`Record`](crate::http_client::Record) maps. These
//! structs are an optional typed layer over them: decode with
//! [`CrmModel::from_record`], encode writes with [`CrmModel::to_fields`].
//! Each model keeps fields it does not know about (custom `cf_*` fields and
//! the like) in its `extra` map, so a decode and re-encode loses nothing.

mod activity;
mod common;
mod company;
mod contact;
mod lead;
mod opportunity;
mod product;
mod project;
mod ticket;

pub use activity::Activity;
pub use common::{CrmModel, RecordMeta, DATETIME_FORMAT, DATE_FORMAT};
pub use company::Company;
pub use contact::Contact;
pub use lead::Lead;
pub use opportunity::Opportunity;
pub use product::Product;
pub use project::Project;
pub use ticket::Ticket;
