//! Raw payload → canonical order mapping.
//!
//! The order service's `orderData` blob has no fixed schema: deployments in
//! the field use alternate and legacy Portuguese field names, and items may
//! sit at the top level or nested under an `order`/`pedido` container. This
//! module resolves all of that into the canonical [`Order`] model.
//!
//! [`normalize`] never fails. Whatever is missing or malformed resolves to a
//! documented default; a payload of garbage yields a displayable order with
//! placeholder fields rather than an error.

use crate::api::RawOrder;
use crate::model::{Order, OrderItem, OrderStatus};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// Shown when no customer name could be resolved.
pub const FALLBACK_CUSTOMER_NAME: &str = "Cliente";
/// Shown when no table/delivery label could be resolved.
pub const FALLBACK_TABLE_LABEL: &str = "Takeaway";

/// Country prefix applied to 9-digit phone numbers.
const PHONE_PREFIX_9: &str = "351";
/// Country prefix applied to 11-digit phone numbers.
const PHONE_PREFIX_11: &str = "55";

const IN_PROGRESS_SYNONYMS: &[&str] = &[
    "in-progress",
    "preparacao",
    "preparing",
    "em-preparo",
    "em_preparo",
];
const COMPLETED_SYNONYMS: &[&str] = &["completed", "concluido", "concluído", "done", "finished"];

/// Maps a raw server order to the canonical model. Never fails.
pub fn normalize(raw: &RawOrder) -> Order {
    let data = &raw.order_data;
    let order_no = raw
        .order_number
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(&raw.id)
        .to_string();

    Order {
        id: raw.id.clone(),
        order_no,
        customer_name: parse_customer_name(data),
        customer_phone: parse_phone(data),
        table_label: parse_table(data),
        status: normalize_status(&raw.status),
        raw_status: raw.status.clone(),
        created_at: parse_created_at(raw.created_at.as_deref()),
        items: parse_items(data),
    }
}

/// Collapses a raw status string to the three-state workflow.
///
/// Case-insensitive membership against two synonym sets; anything else is
/// `New`. Unrecognized non-empty values are logged at debug level so schema
/// drift upstream stays visible without spamming the poll cycle.
pub fn normalize_status(raw: &str) -> OrderStatus {
    let s = raw.to_lowercase();
    if IN_PROGRESS_SYNONYMS.contains(&s.as_str()) {
        return OrderStatus::InProgress;
    }
    if COMPLETED_SYNONYMS.contains(&s.as_str()) {
        return OrderStatus::Completed;
    }
    if !s.is_empty() && s != "new" {
        debug!(raw = %raw, "unrecognized order status, treating as new");
    }
    OrderStatus::New
}

/// Extracts the item list, searching the fixed container priority:
/// `items`, then `order.items`, then `pedido.itens`. First array wins.
pub fn parse_items(data: &Value) -> Vec<OrderItem> {
    let Some(obj) = data.as_object() else {
        return Vec::new();
    };

    let list = obj
        .get("items")
        .filter(|v| v.is_array())
        .or_else(|| {
            obj.get("order")
                .and_then(|o| o.get("items"))
                .filter(|v| v.is_array())
        })
        .or_else(|| {
            obj.get("pedido")
                .and_then(|p| p.get("itens"))
                .filter(|v| v.is_array())
        })
        .and_then(Value::as_array);

    let Some(list) = list else {
        return Vec::new();
    };

    list.iter()
        .enumerate()
        .map(|(idx, raw)| parse_item(raw, idx))
        .collect()
}

fn parse_item(raw: &Value, idx: usize) -> OrderItem {
    let name = field(raw, &["name", "title", "nome"])
        .and_then(display_string)
        .unwrap_or_else(|| format!("Item {}", idx + 1));

    let quantity = field(raw, &["quantity", "qtd"])
        .and_then(coerce_number)
        .filter(|n| *n >= 1.0)
        .map(|n| n as u32)
        .unwrap_or(1);

    let price = field(raw, &["price", "valor"])
        .and_then(coerce_number)
        .filter(|n| n.is_finite() && *n > 0.0)
        .unwrap_or(0.0);

    let notes = field(raw, &["notes"])
        .filter(|v| truthy(v))
        .and_then(display_string);

    let id = field(raw, &["id"])
        .and_then(display_string)
        .unwrap_or_else(|| idx.to_string());

    OrderItem {
        id,
        name,
        quantity,
        price,
        notes,
    }
}

pub fn parse_customer_name(data: &Value) -> String {
    field(data, &["customerName", "customername", "nome", "name", "cliente"])
        .and_then(display_string)
        .unwrap_or_else(|| FALLBACK_CUSTOMER_NAME.to_string())
}

pub fn parse_table(data: &Value) -> String {
    field(data, &["table", "mesa", "deliveryType"])
        .and_then(display_string)
        .unwrap_or_else(|| FALLBACK_TABLE_LABEL.to_string())
}

/// Normalizes a phone number out of the payload.
///
/// Strips every non-digit character, then applies a two-locale heuristic:
/// exactly 9 digits get the `351` prefix, exactly 11 digits get `55`, and
/// any other digit count passes through unmodified.
pub fn parse_phone(data: &Value) -> Option<String> {
    let raw = field(
        data,
        &[
            "customerPhone",
            "customerphone",
            "phone",
            "telefoneCliente",
            "telefone",
        ],
    )
    .filter(|v| truthy(v))
    .and_then(display_string)?;

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    match digits.len() {
        9 => Some(format!("{PHONE_PREFIX_9}{digits}")),
        11 => Some(format!("{PHONE_PREFIX_11}{digits}")),
        _ => Some(digits),
    }
}

fn parse_created_at(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw else {
        return Utc::now();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    // Some deployments send naive timestamps without an offset.
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return naive.and_utc();
    }
    Utc::now()
}

/// First value present under any of `keys`, in priority order. Null counts
/// as absent; empty strings and zero do not.
fn field<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let obj = data.as_object()?;
    keys.iter()
        .find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

/// Renders a primitive JSON value as display text. Objects and arrays are
/// never usable as names, labels, or phone numbers.
fn display_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Truthiness for optional display fields: empty strings, zero, and `false`
/// count as absent.
fn truthy(v: &Value) -> bool {
    match v {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Bool(b) => *b,
        Value::Null => false,
        _ => true,
    }
}

/// Coerces a JSON value to a number the way the service's older clients do:
/// numbers pass through, numeric strings parse, everything else is absent.
fn coerce_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
