//! Structured-output contract sent with every completion request.

use serde_json::{Map, Value, json};

pub const SCHEMA_NAME: &str = "real_estate_bot_response";

/// Extraction fields in declaration order, with the value vocabulary hinted
/// to the model where there is one.
pub const EXTRACTION_FIELDS: &[(&str, Option<&str>)] = &[
    ("intent", Some("buy | rent | invest | unknown")),
    ("city", None),
    ("area", None),
    (
        "property_type",
        Some("apartment | villa | townhouse | studio | office | plot | unknown"),
    ),
    ("bedrooms", Some("e.g. 'studio', '1', '2', '3+', 'unknown'")),
    ("bathrooms", None),
    ("budget", Some("e.g. 'up to 1.5M AED' or 'unknown'")),
    ("payment", Some("cash | mortgage | installments | unknown")),
    ("ready_or_offplan", Some("ready | offplan | unknown")),
    ("handover_date", None),
    ("view", Some("sea | golf | city | park | unknown")),
    ("amenities", Some("comma-separated list or 'unknown'")),
    ("timeline", Some("when they want to move/buy")),
    ("nationality", None),
    ("name", None),
    ("phone_or_whatsapp", None),
    ("notes", None),
];

pub const EXTRACTION_REQUIRED: &[&str] = &[
    "intent",
    "city",
    "area",
    "property_type",
    "bedrooms",
    "budget",
    "ready_or_offplan",
    "notes",
];

pub fn extraction_schema() -> Value {
    let mut properties = Map::new();
    for (field, description) in EXTRACTION_FIELDS {
        let property = match description {
            Some(d) => json!({ "type": "string", "description": d }),
            None => json!({ "type": "string" }),
        };
        properties.insert((*field).to_string(), property);
    }
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": properties,
        "required": EXTRACTION_REQUIRED,
    })
}

pub fn bot_response_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "assistant_message": { "type": "string" },
            "lead_summary": { "type": "string" },
            "extracted": extraction_schema(),
        },
        "required": ["assistant_message", "lead_summary", "extracted"],
    })
}

/// The `response_format` member of the completion request.
pub fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": SCHEMA_NAME,
            "schema": bot_response_schema(),
        }
    })
}
