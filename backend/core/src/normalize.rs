//! Projection of the model's loosely-typed reply into [`BillItem`]s.
//!
//! The model is asked for numbers but routinely answers with strings such as
//! `"1,234.50"`, so every scalar field accepts either form. Anything that
//! still cannot be read as a finite number fails the extraction.

use serde::Deserialize;
use tracing::warn;

use crate::error::ExtractError;
use crate::types::{BillItem, PageType};

pub const UNKNOWN_ITEM_NAME: &str = "Unknown";
const DEFAULT_QUANTITY: f64 = 1.0;
const DEFAULT_PRICE: f64 = 0.0;

/// A JSON scalar that may arrive as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseScalar {
    Number(serde_json::Number),
    Text(String),
}

impl LooseScalar {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Top-level object the prompt asks the model to produce.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBillReply {
    pub page_type: Option<String>,
    pub items: Option<Vec<RawBillItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawBillItem {
    pub item_name: Option<LooseScalar>,
    pub item_rate: Option<LooseScalar>,
    pub item_quantity: Option<LooseScalar>,
    pub item_amount: Option<LooseScalar>,
}

/// A reply that has passed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBill {
    pub page_type: PageType,
    pub items: Vec<BillItem>,
}

/// Normalize a decoded reply, preserving item order.
pub fn normalize_reply(reply: RawBillReply) -> Result<NormalizedBill, ExtractError> {
    let page_type = resolve_page_type(reply.page_type.as_deref());
    let items = reply
        .items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, item)| normalize_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NormalizedBill { page_type, items })
}

fn resolve_page_type(label: Option<&str>) -> PageType {
    match label {
        None => PageType::default(),
        Some(label) => PageType::from_label(label).unwrap_or_else(|| {
            warn!(label, "Model returned unknown page type, using default");
            PageType::default()
        }),
    }
}

fn normalize_item(index: usize, item: RawBillItem) -> Result<BillItem, ExtractError> {
    let item_name = item
        .item_name
        .as_ref()
        .map(LooseScalar::to_text)
        .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string());

    Ok(BillItem {
        item_amount: parse_number(index, "item_amount", item.item_amount.as_ref(), DEFAULT_PRICE)?,
        item_rate: parse_number(index, "item_rate", item.item_rate.as_ref(), DEFAULT_PRICE)?,
        item_quantity: parse_number(
            index,
            "item_quantity",
            item.item_quantity.as_ref(),
            DEFAULT_QUANTITY,
        )?,
        item_name,
    })
}

fn parse_number(
    index: usize,
    field: &str,
    value: Option<&LooseScalar>,
    default: f64,
) -> Result<f64, ExtractError> {
    let parsed = match value {
        None => return Ok(default),
        Some(LooseScalar::Number(n)) => n.as_f64(),
        Some(LooseScalar::Text(s)) => strip_thousands_separators(s).parse::<f64>().ok(),
    };
    parsed.filter(|n| n.is_finite()).ok_or_else(|| {
        ExtractError::Model(format!(
            "items[{index}].{field} is not a number: {:?}",
            value.map(LooseScalar::to_text).unwrap_or_default()
        ))
    })
}

/// Remove `,` grouping characters, e.g. `"1,234.50"` -> `"1234.50"`.
pub fn strip_thousands_separators(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != ',').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reply(json: &str) -> RawBillReply {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let bill = normalize_reply(reply(
            r#"{"items":[{"item_name":"Bread","item_rate":2.0,"item_amount":2.0}]}"#,
        ))
        .unwrap();
        assert_eq!(bill.items[0].item_quantity, 1.0);
    }

    #[test]
    fn strips_thousands_separators() {
        let bill = normalize_reply(reply(
            r#"{"items":[{"item_name":"TV","item_rate":"1,234.50","item_quantity":"1","item_amount":"1,234.50"}]}"#,
        ))
        .unwrap();
        assert_eq!(bill.items[0].item_amount, 1234.50);
        assert_eq!(bill.items[0].item_rate, 1234.50);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let bill = normalize_reply(reply(r#"{"items":[{}]}"#)).unwrap();
        assert_eq!(
            bill.items,
            vec![BillItem {
                item_name: "Unknown".into(),
                item_amount: 0.0,
                item_rate: 0.0,
                item_quantity: 1.0,
            }]
        );
        assert_eq!(bill.page_type, PageType::BillDetail);
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let bill = normalize_reply(reply(
            r#"{"page_type":null,"items":[{"item_name":null,"item_quantity":null,"item_amount":"5"}]}"#,
        ))
        .unwrap();
        assert_eq!(bill.items[0].item_name, "Unknown");
        assert_eq!(bill.items[0].item_quantity, 1.0);
        assert_eq!(bill.items[0].item_amount, 5.0);
    }

    #[test]
    fn numeric_name_is_stringified() {
        let bill = normalize_reply(reply(r#"{"items":[{"item_name":42}]}"#)).unwrap();
        assert_eq!(bill.items[0].item_name, "42");
    }

    #[test]
    fn unknown_page_type_falls_back() {
        let bill = normalize_reply(reply(r#"{"page_type":"Receipt","items":[]}"#)).unwrap();
        assert_eq!(bill.page_type, PageType::BillDetail);

        let bill = normalize_reply(reply(r#"{"page_type":"Pharmacy"}"#)).unwrap();
        assert_eq!(bill.page_type, PageType::Pharmacy);
        assert!(bill.items.is_empty());
    }

    #[test]
    fn unparsable_amount_fails_closed() {
        let err = normalize_reply(reply(
            r#"{"items":[{"item_name":"A","item_amount":"1.00"},{"item_name":"B","item_amount":"abc"}]}"#,
        ))
        .unwrap_err();
        assert_eq!(err.kind(), "model");
        assert!(err.to_string().contains("items[1].item_amount"));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let err = normalize_reply(reply(r#"{"items":[{"item_rate":"NaN"}]}"#)).unwrap_err();
        assert_eq!(err.kind(), "model");
    }

    #[test]
    fn preserves_item_order() {
        let bill = normalize_reply(reply(
            r#"{"items":[{"item_name":"first"},{"item_name":"second"},{"item_name":"third"}]}"#,
        ))
        .unwrap();
        let names: Vec<_> = bill.items.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }
}
