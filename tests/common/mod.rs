#![allow(dead_code)]

pub mod mock_provider;

use actix_web::web;
use lead_relay::{RelayConfig, RelayState};
use serde_json::{Value, json};

pub const TEST_KEY: &str = "sk-test-key";

pub fn relay_config(provider_url: &str, api_key: Option<&str>) -> RelayConfig {
    RelayConfig {
        provider_url: provider_url.to_string(),
        api_key: api_key.map(str::to_string),
        ..RelayConfig::default()
    }
}

pub fn relay_state(provider_url: &str, api_key: Option<&str>) -> web::Data<RelayState> {
    relay_state_with(relay_config(provider_url, api_key))
}

pub fn relay_state_with(config: RelayConfig) -> web::Data<RelayState> {
    web::Data::new(RelayState::new(config).expect("build relay state"))
}

/// A complete, schema-conforming bot response.
pub fn sample_bot_response() -> Value {
    json!({
        "assistant_message": "أهلاً! شو الميزانية التقريبية؟",
        "lead_summary": "- buy\n- Dubai Marina\n- 2BR\n- budget: unknown",
        "extracted": {
            "intent": "buy",
            "city": "Dubai",
            "area": "Dubai Marina",
            "property_type": "apartment",
            "bedrooms": "2",
            "bathrooms": "unknown",
            "budget": "unknown",
            "payment": "unknown",
            "ready_or_offplan": "ready",
            "handover_date": "unknown",
            "view": "sea",
            "amenities": "unknown",
            "timeline": "unknown",
            "nationality": "unknown",
            "name": "unknown",
            "phone_or_whatsapp": "unknown",
            "notes": "unknown"
        }
    })
}
