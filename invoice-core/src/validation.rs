//! Schema check for the JSON invoice body.
//!
//! Walks a `serde_json::Value` field by field and fails on the first
//! problem with the path of the offending field, e.g. `items[2].hsn_code`.

use serde_json::{Map, Value};

use crate::error::{InvoiceError, Result};
use crate::model::{InvoiceNumber, InvoiceRequest, LineItem, PartyDetails, Scalar};

const TOP_LEVEL_FIELDS: [&str; 4] = ["issuer_details", "buyer_details", "items", "invoice_number"];

impl InvoiceRequest {
    /// Validate a JSON body into a request. Every required field is
    /// checked for presence before any field is checked for shape.
    pub fn from_json(body: &Value) -> Result<Self> {
        let fields = body
            .as_object()
            .ok_or_else(|| InvoiceError::invalid("body", "a JSON object"))?;
        for field in TOP_LEVEL_FIELDS {
            required(fields, field, field)?;
        }

        let issuer = party(fields, "issuer_details")?;
        let buyer = party(fields, "buyer_details")?;

        let items = required(fields, "items", "items")?
            .as_array()
            .ok_or_else(|| InvoiceError::invalid("items", "a list of line items"))?
            .iter()
            .enumerate()
            .map(|(i, item)| line_item(item, &format!("items[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        let invoice_number = required(fields, "invoice_number", "invoice_number")?
            .as_str()
            .ok_or_else(|| InvoiceError::invalid("invoice_number", "a string"))?;
        let invoice_number = InvoiceNumber::parse(invoice_number)?;

        Ok(InvoiceRequest {
            issuer,
            buyer,
            items,
            invoice_number,
        })
    }
}

fn required<'a>(fields: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a Value> {
    fields.get(key).ok_or_else(|| InvoiceError::missing(path))
}

fn party(fields: &Map<String, Value>, key: &str) -> Result<PartyDetails> {
    let lines = required(fields, key, key)?
        .as_array()
        .ok_or_else(|| InvoiceError::invalid(key, "a list of strings"))?
        .iter()
        .enumerate()
        .map(|(i, line)| {
            line.as_str()
                .map(str::to_string)
                .ok_or_else(|| InvoiceError::invalid(format!("{}[{}]", key, i), "a string"))
        })
        .collect::<Result<Vec<_>>>()?;
    PartyDetails::new(lines).ok_or_else(|| InvoiceError::invalid(key, "a non-empty list of strings"))
}

fn line_item(value: &Value, path: &str) -> Result<LineItem> {
    let fields = value
        .as_object()
        .ok_or_else(|| InvoiceError::invalid(path, "an object"))?;

    // Presence of every field is checked first, in column order.
    let sno = item_field(fields, path, "sno")?;
    let name = item_field(fields, path, "name")?;
    let hsn_code = item_field(fields, path, "hsn_code")?;
    let tax_slab = item_field(fields, path, "tax_slab")?;
    let quantity = item_field(fields, path, "quantity")?;
    let price = item_field(fields, path, "price")?;
    let total = item_field(fields, path, "total")?;

    let name = name
        .as_str()
        .ok_or_else(|| InvoiceError::invalid(format!("{}.name", path), "a string"))?
        .to_string();

    Ok(LineItem {
        sno: scalar(sno, path, "sno")?,
        name,
        hsn_code: scalar(hsn_code, path, "hsn_code")?,
        tax_slab: scalar(tax_slab, path, "tax_slab")?,
        quantity: scalar(quantity, path, "quantity")?,
        price: scalar(price, path, "price")?,
        total: scalar(total, path, "total")?,
    })
}

fn item_field<'a>(fields: &'a Map<String, Value>, path: &str, key: &str) -> Result<&'a Value> {
    required(fields, key, &format!("{}.{}", path, key))
}

fn scalar(value: &Value, path: &str, key: &str) -> Result<Scalar> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Scalar::Integer(i)),
            None => n
                .as_f64()
                .map(Scalar::Decimal)
                .ok_or_else(|| InvoiceError::invalid(format!("{}.{}", path, key), "a finite number")),
        },
        Value::String(s) => Ok(Scalar::Text(s.clone())),
        _ => Err(InvoiceError::invalid(
            format!("{}.{}", path, key),
            "a number or string",
        )),
    }
}
