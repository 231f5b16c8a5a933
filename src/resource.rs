//! Generic CRUD access to one OpenCRM module.
//!
//! A [`Resource`] pairs the shared [`HttpClient`] with a static [`Module`]
//! binding and exposes count, list, get, create, update and a paginating
//! iterator. Every call is one POST to one of the module's four endpoints.
//!
//! OpenCRM answers with loosely shaped payloads, so each operation coerces
//! the response into a fixed Rust type:
//!
//! | Operation | Accepted shapes                                   | Fallback |
//! |-----------|---------------------------------------------------|----------|
//! | `count`   | integer, digit string                             | `0`      |
//! | `list`    | array of objects, single object                   | empty    |
//! | `get`     | object                                            | empty    |
//! | `create`  | integer, digit string, object with `record_id`    | `0`      |
//! | `update`  | integer, digit string                             | input id |

use serde_json::Value;

use crate::error::OpenCrmError;
use crate::http_client::{value_as_id, ApiResponse, HttpClient, Record};
use crate::modules::Module;
use crate::query::QueryBuilder;

/// Records fetched per call by [`Resource::iterate`] unless told otherwise.
pub const DEFAULT_BATCH_SIZE: u64 = 100;

/// Form field carrying the record id.
const ID_FIELD: &str = "crmid";

/// Filter and pagination parameters for list and count calls.
///
/// Use the builder methods to construct them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    query_string: Option<String>,
    keywords: Option<String>,
    limit_start: Option<u64>,
    limit_end: Option<u64>,
}

impl ListParams {
    /// Creates empty parameters (all records, server-side default page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters with the condition built by `query`.
    pub fn with_query(mut self, query: &QueryBuilder) -> Self {
        self.query_string = query.build();
        self
    }

    /// Filters with a raw `FIELD|OPERATOR|VALUE` string.
    pub fn with_raw_query(mut self, query: impl Into<String>) -> Self {
        self.query_string = Some(query.into());
        self
    }

    /// Adds full-text search keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Sets the starting offset (0-based).
    pub fn with_limit_start(mut self, start: u64) -> Self {
        self.limit_start = Some(start);
        self
    }

    /// Sets the end offset.
    pub fn with_limit_end(mut self, end: u64) -> Self {
        self.limit_end = Some(end);
        self
    }

    /// Sets the `[start, end)` window.
    pub fn with_range(self, start: u64, end: u64) -> Self {
        self.with_limit_start(start).with_limit_end(end)
    }

    /// The query string that will be sent, if any.
    pub fn query_string(&self) -> Option<&str> {
        self.query_string.as_deref()
    }

    /// Form fields for a count call: filters only.
    fn to_filter_data(&self) -> Record {
        let mut data = Record::new();
        if let Some(query) = self.query_string.as_deref().filter(|q| !q.is_empty()) {
            data.insert("query_string".to_string(), Value::from(query));
        }
        if let Some(keywords) = self.keywords.as_deref().filter(|k| !k.is_empty()) {
            data.insert("keywords".to_string(), Value::from(keywords));
        }
        data
    }

    /// Form fields for a list call: filters plus pagination.
    fn to_list_data(&self) -> Record {
        let mut data = self.to_filter_data();
        if let Some(start) = self.limit_start {
            data.insert("limit_start".to_string(), Value::from(start));
        }
        if let Some(end) = self.limit_end {
            data.insert("limit_end".to_string(), Value::from(end));
        }
        data
    }
}

/// CRUD operations for one OpenCRM module.
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    http: &'a HttpClient,
    module: &'static Module,
}

impl<'a> Resource<'a> {
    /// Binds `module` to the transport.
    pub fn new(http: &'a HttpClient, module: &'static Module) -> Self {
        Self { http, module }
    }

    /// The module this resource talks to.
    pub fn module(&self) -> &'static Module {
        self.module
    }

    /// Counts records matching the query and keywords in `params`.
    ///
    /// Pagination fields in `params` are ignored. A count that is not a
    /// non-negative integer, or does not fit in a `u64`, reads as 0.
    pub fn count(&self, params: &ListParams) -> Result<u64, OpenCrmError> {
        let response = self
            .http
            .post(self.module.count_endpoint, &params.to_filter_data())?;
        Ok(count_from(&response))
    }

    /// Lists records with optional filtering and pagination.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let params = ListParams::new()
    ///     .with_query(&query().equals("leadstatus", "New"))
    ///     .with_range(0, 50);
    /// let leads = client.leads().list(&params)?;
    /// ```
    pub fn list(&self, params: &ListParams) -> Result<Vec<Record>, OpenCrmError> {
        self.list_batch(params).map(|batch| batch.records)
    }

    /// Lists one window of records, keeping the number of elements the server sent.
    fn list_batch(&self, params: &ListParams) -> Result<Batch, OpenCrmError> {
        let response = self
            .http
            .post(self.module.list_endpoint, &params.to_list_data())?;
        Ok(records_from(response))
    }

    /// Gets a single record by its CRM id.
    ///
    /// # Errors
    ///
    /// Returns `OpenCrmError::NotFound` if OpenCRM answers 404.
    pub fn get(&self, id: u64) -> Result<Record, OpenCrmError> {
        let mut data = Record::new();
        data.insert(ID_FIELD.to_string(), Value::from(id));

        let response = self.http.post(self.module.get_endpoint, &data)?;
        Ok(record_from(response))
    }

    /// Creates a record and returns its new CRM id, or 0 if none was reported.
    /// An id too large for a `u64` is also reported as 0.
    ///
    /// Include `assigned_user_id` in `fields` to set the record owner.
    /// OpenCRM does not validate field values.
    pub fn create(&self, fields: Record) -> Result<u64, OpenCrmError> {
        let mut data = Record::new();
        data.insert(ID_FIELD.to_string(), Value::from(0));
        data.extend(fields);

        let response = self.http.post(self.module.edit_endpoint, &data)?;
        Ok(created_id(&response))
    }

    /// Updates the given fields of a record and returns its CRM id.
    ///
    /// Any response that does not carry an id is taken as success and `id`
    /// is returned unchanged; OpenCRM does not report partial failures here.
    pub fn update(&self, id: u64, fields: Record) -> Result<u64, OpenCrmError> {
        let mut data = Record::new();
        data.insert(ID_FIELD.to_string(), Value::from(id));
        data.extend(fields);

        let response = self.http.post(self.module.edit_endpoint, &data)?;
        Ok(response.as_id().unwrap_or(id))
    }

    /// Iterates over every matching record, fetching `batch_size` at a time.
    ///
    /// Pagination fields in `params` are replaced by the iterator's own window.
    /// Nothing is fetched until the first call to `next`.
    pub fn iterate(&self, params: ListParams, batch_size: u64) -> Records<'a> {
        Records {
            resource: *self,
            params,
            batch_size: batch_size.max(1),
            offset: 0,
            buffer: Vec::new().into_iter(),
            exhausted: false,
        }
    }
}

/// One list response: the records kept and the element count before filtering.
#[derive(Debug, Default)]
struct Batch {
    sent: usize,
    records: Vec<Record>,
}

/// Lazy, paginating iterator over a module's records.
///
/// Created by [`Resource::iterate`]. Each `list` call asks for the window
/// `[offset, offset + batch_size)`; iteration ends after an empty or short
/// batch, or after yielding the first error. A batch is short when the server
/// sent fewer elements than asked for, counting elements that are skipped
/// because they are not records.
#[derive(Debug)]
pub struct Records<'a> {
    resource: Resource<'a>,
    params: ListParams,
    batch_size: u64,
    offset: u64,
    buffer: std::vec::IntoIter<Record>,
    exhausted: bool,
}

impl Iterator for Records<'_> {
    type Item = Result<Record, OpenCrmError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.next() {
                return Some(Ok(record));
            }
            if self.exhausted {
                return None;
            }

            let params = self
                .params
                .clone()
                .with_range(self.offset, self.offset + self.batch_size);

            tracing::debug!(
                module = self.resource.module.name,
                offset = self.offset,
                batch_size = self.batch_size,
                "Fetching record batch"
            );

            match self.resource.list_batch(&params) {
                Ok(batch) => {
                    if (batch.sent as u64) < self.batch_size {
                        self.exhausted = true;
                    }
                    self.offset += self.batch_size;
                    self.buffer = batch.records.into_iter();
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Coerces a count response.
fn count_from(response: &ApiResponse) -> u64 {
    response.as_id().unwrap_or(0)
}

/// Coerces a list response into records.
///
/// Array elements that are not objects are skipped.
fn records_from(response: ApiResponse) -> Batch {
    match response {
        ApiResponse::Json(Value::Array(items)) => Batch {
            sent: items.len(),
            records: items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    _ => None,
                })
                .collect(),
        },
        ApiResponse::Json(Value::Object(record)) => Batch {
            sent: 1,
            records: vec![record],
        },
        _ => Batch::default(),
    }
}

/// Coerces a get response into a record.
fn record_from(response: ApiResponse) -> Record {
    match response {
        ApiResponse::Json(Value::Object(record)) => record,
        _ => Record::new(),
    }
}

/// Extracts the new id from a create response.
fn created_id(response: &ApiResponse) -> u64 {
    if let Some(id) = response.as_id() {
        return id;
    }
    match response {
        ApiResponse::Json(Value::Object(record)) => {
            record.get("record_id").and_then(value_as_id).unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_integer_passes_through() {
        assert_eq!(count_from(&ApiResponse::Json(json!(17))), 17);
    }

    #[test]
    fn test_count_digit_string_is_coerced() {
        assert_eq!(count_from(&ApiResponse::Json(json!("42"))), 42);
    }

    #[test]
    fn test_count_other_shapes_are_zero() {
        assert_eq!(count_from(&ApiResponse::Json(json!("many"))), 0);
        assert_eq!(count_from(&ApiResponse::Json(json!({"count": 3}))), 0);
        assert_eq!(count_from(&ApiResponse::Text("error".to_string())), 0);
        assert_eq!(count_from(&ApiResponse::Empty), 0);
    }

    #[test]
    fn test_count_beyond_u64_is_zero() {
        assert_eq!(
            count_from(&ApiResponse::Text("123456789012345678901234567890".to_string())),
            0
        );
        assert_eq!(
            created_id(&ApiResponse::Json(json!({"record_id": "99999999999999999999"}))),
            0
        );
    }

    #[test]
    fn test_list_single_object_becomes_one_element() {
        let records = records_from(ApiResponse::Json(json!({"crmid": "1"}))).records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["crmid"], json!("1"));
    }

    #[test]
    fn test_list_array_passes_through() {
        let records = records_from(ApiResponse::Json(json!([
            {"crmid": "1"},
            {"crmid": "2"},
        ])))
        .records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["crmid"], json!("2"));
    }

    #[test]
    fn test_list_other_shapes_are_empty() {
        for response in [
            ApiResponse::Json(json!("No records")),
            ApiResponse::Json(json!(5)),
            ApiResponse::Json(Value::Null),
            ApiResponse::Text("oops".to_string()),
            ApiResponse::Empty,
        ] {
            let batch = records_from(response);
            assert_eq!(batch.sent, 0);
            assert!(batch.records.is_empty());
        }
    }

    #[test]
    fn test_list_counts_skipped_elements_as_sent() {
        let batch = records_from(ApiResponse::Json(json!([
            {"crmid": "1"},
            "junk",
            {"crmid": "2"},
        ])));
        assert_eq!(batch.sent, 3);
        assert_eq!(batch.records.len(), 2);
    }

    #[test]
    fn test_get_non_object_is_empty_record() {
        assert!(record_from(ApiResponse::Json(json!([1, 2]))).is_empty());
        assert!(record_from(ApiResponse::Empty).is_empty());
        assert_eq!(
            record_from(ApiResponse::Json(json!({"firstname": "Ada"})))["firstname"],
            json!("Ada")
        );
    }

    #[test]
    fn test_created_id() {
        assert_eq!(created_id(&ApiResponse::Json(json!(123))), 123);
        assert_eq!(created_id(&ApiResponse::Json(json!("123"))), 123);
        assert_eq!(created_id(&ApiResponse::Json(json!({"record_id": "7"}))), 7);
        assert_eq!(created_id(&ApiResponse::Json(json!({"record_id": 8}))), 8);
        assert_eq!(created_id(&ApiResponse::Json(json!({"status": "ok"}))), 0);
        assert_eq!(created_id(&ApiResponse::Text("saved".to_string())), 0);
        assert_eq!(created_id(&ApiResponse::Empty), 0);
    }

    #[test]
    fn test_list_params_filter_data_skips_empty_values() {
        let data = ListParams::new()
            .with_raw_query("")
            .with_keywords("")
            .with_range(0, 10)
            .to_filter_data();
        assert!(data.is_empty());
    }

    #[test]
    fn test_list_params_list_data() {
        let data = ListParams::new()
            .with_query(&crate::query::query().equals("leadstatus", "New"))
            .with_keywords("acme")
            .with_range(100, 200)
            .to_list_data();

        assert_eq!(data["query_string"], json!("leadstatus|=|New"));
        assert_eq!(data["keywords"], json!("acme"));
        assert_eq!(data["limit_start"], json!(100));
        assert_eq!(data["limit_end"], json!(200));
    }

    #[test]
    fn test_list_params_empty_builder_sends_no_query() {
        let params = ListParams::new().with_query(&crate::query::query());
        assert_eq!(params.query_string(), None);
        assert!(params.to_list_data().is_empty());
    }
}
