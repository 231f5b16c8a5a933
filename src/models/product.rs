//! Product records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{amount, date, flag, id, int, CrmModel, RecordMeta};
use crate::http_client::Record;
use crate::modules::Module;

/// An OpenCRM product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Fields shared by every record.
    #[serde(flatten)]
    pub meta: RecordMeta,

    /// Product name.
    #[serde(default)]
    pub productname: Option<String>,
    /// Product code.
    #[serde(default)]
    pub productcode: Option<String>,
    /// Product category.
    #[serde(default)]
    pub productcategory: Option<String>,
    /// Product status.
    #[serde(default)]
    pub product_status: Option<String>,
    /// Sub product type.
    #[serde(default)]
    pub subproducttype: Option<String>,
    /// Discontinued (`1`) or active (`0`).
    #[serde(default, with = "flag")]
    pub discontinued: Option<bool>,
    /// Long description.
    #[serde(default)]
    pub product_description: Option<String>,
    /// Short description.
    #[serde(default)]
    pub mini_description: Option<String>,

    /// Sell price.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub unit_price: Option<f64>,
    /// Buy price.
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub buy_price: Option<f64>,
    /// Commission rate, in percent.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub commissionrate: Option<i64>,
    /// Commission band.
    #[serde(default)]
    pub commission_band: Option<String>,

    /// Manufacturer.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Supplier company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub vendor_id: Option<u64>,
    /// Supplier part number.
    #[serde(default)]
    pub vendor_part_no: Option<String>,

    /// Quantity in stock.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub qtyinstock: Option<i64>,
    /// Quantity in demand.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub qtyindemand: Option<i64>,
    /// Reorder level.
    #[serde(default)]
    pub reorderlevel: Option<String>,
    /// Quantity per unit.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub qty_per_unit: Option<i64>,
    /// Warehouse.
    #[serde(default)]
    pub location_warehouse: Option<String>,
    /// Shelf.
    #[serde(default)]
    pub location_shelf: Option<String>,
    /// Bin.
    #[serde(default)]
    pub location_bin: Option<String>,

    /// Serial number.
    #[serde(default)]
    pub serialno: Option<String>,
    /// Batch number.
    #[serde(default)]
    pub batch_number: Option<String>,
    /// Model revision.
    #[serde(default)]
    pub model_revision: Option<String>,
    /// Sales start date.
    #[serde(default, with = "date")]
    pub sales_start_date: Option<NaiveDate>,
    /// Sales end date.
    #[serde(default, with = "date")]
    pub sales_end_date: Option<NaiveDate>,
    /// Support start date.
    #[serde(default, with = "date")]
    pub start_date: Option<NaiveDate>,
    /// Support expiry date.
    #[serde(default, with = "date")]
    pub expiry_date: Option<NaiveDate>,
    /// Date the item came into stock.
    #[serde(default, with = "date")]
    pub datein: Option<NaiveDate>,
    /// Despatch date.
    #[serde(default, with = "date")]
    pub despatchdate: Option<NaiveDate>,
    /// Date the price was last checked.
    #[serde(default, with = "date")]
    pub price_check_date: Option<NaiveDate>,
    /// Contract term in months.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub contract_term: Option<i64>,
    /// Sales nominal code.
    #[serde(default)]
    pub nominal_code: Option<String>,
    /// Purchase nominal code.
    #[serde(default)]
    pub purch_nom_code: Option<String>,
    /// Purchase nominal description.
    #[serde(default)]
    pub purch_nom_desc: Option<String>,
    /// Nominal account.
    #[serde(default)]
    pub glacct: Option<String>,

    /// Tax class.
    #[serde(default)]
    pub taxclass: Option<String>,
    /// Default currency.
    #[serde(default)]
    pub def_currency: Option<String>,
    /// Usage unit.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub usageunit: Option<i64>,
    /// Size.
    #[serde(default)]
    pub size: Option<String>,
    /// Weight in kilograms.
    #[serde(default, deserialize_with = "int::deserialize")]
    pub weight_stock: Option<i64>,
    /// Supply type.
    #[serde(default)]
    pub prod_supplytype: Option<String>,
    /// Bundle product.
    #[serde(default)]
    pub bundle_product: Option<String>,
    /// Website.
    #[serde(default)]
    pub website: Option<String>,
    /// Product sheet.
    #[serde(default)]
    pub productsheet: Option<String>,
    /// Parent product id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub parentprodid: Option<u64>,
    /// End user contact id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub customerid: Option<u64>,
    /// Installer company id.
    #[serde(default, deserialize_with = "id::deserialize")]
    pub installerid: Option<u64>,
    /// Comma-separated tags.
    #[serde(default)]
    pub products_tags: Option<String>,
    /// Date the product was last reassigned.
    #[serde(default, with = "date")]
    pub reassigned_date: Option<NaiveDate>,

    /// Fields without a typed counterpart.
    #[serde(flatten)]
    pub extra: Record,
}

impl Product {
    /// Sell price minus buy price, when both are known.
    pub fn margin(&self) -> Option<f64> {
        Some(self.unit_price? - self.buy_price?)
    }
}

impl CrmModel for Product {
    const MODULE: &'static Module = &Module::PRODUCTS;

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
            "crmid": "12",
            "productname": "Widget",
            "unit_price": "10.50",
            "buy_price": "4.25",
            "qtyinstock": "-2",
            "discontinued": "1",
            "expiry_date": "2026-01-01 00:00:00",
            "despatchdate": "2024-08-09",
            "start_date": "0000-00-00",
            "contract_term": "24",
            "installerid": "88",
            "location_bin": "B-12",
        }) else {
            unreachable!()
        };

        let product = Product::from_record(record).unwrap();

        assert_eq!(product.id(), Some(12));
        assert_eq!(product.qtyinstock, Some(-2));
        assert_eq!(product.discontinued, Some(true));
        assert_eq!(product.expiry_date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(product.despatchdate, NaiveDate::from_ymd_opt(2024, 8, 9));
        assert_eq!(product.start_date, None);
        assert_eq!(product.contract_term, Some(24));
        assert_eq!(product.installerid, Some(88));
        assert_eq!(product.location_bin.as_deref(), Some("B-12"));
        assert!(product.extra.is_empty());
        assert_eq!(product.margin(), Some(6.25));
    }

    #[test]
    fn test_margin_needs_both_prices() {
        let product = Product {
            unit_price: Some(10.0),
            ..Product::default()
        };
        assert_eq!(product.margin(), None);
    }
}
