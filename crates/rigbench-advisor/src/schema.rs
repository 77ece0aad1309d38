//! Response schemas in the Gemini `responseSchema` dialect.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

pub(crate) fn device_specs() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "cpu": { "type": "STRING", "description": "Full CPU or SoC model name." },
            "gpu": { "type": "STRING", "description": "Full GPU model name." },
            "ram": { "type": "STRING", "description": "Base RAM amount, e.g. \"8GB\"." },
            "ramMhz": { "type": "STRING", "description": "RAM speed in MHz, or \"N/A\"." }
        },
        "required": ["cpu", "gpu", "ram", "ramMhz"]
    })
}

pub(crate) fn fps_analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "keyFactor": { "type": "STRING" },
            "bottleneckComponent": {
                "type": "STRING",
                "description": "\"CPU\", \"GPU\", \"RAM\" or \"Balanced\"."
            },
            "bottleneckExplanation": { "type": "STRING" },
            "upgradeSuggestion": { "type": "STRING" },
            "estimatedPowerDraw": { "type": "STRING", "description": "Watt range, e.g. \"350-450W\"." },
            "performanceScore": { "type": "INTEGER", "description": "1 to 100, higher is better." },
            "componentBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "component": { "type": "STRING", "enum": ["CPU", "GPU", "RAM", "Virtual RAM"] },
                        "model": { "type": "STRING" },
                        "analysis": { "type": "STRING" }
                    },
                    "required": ["component", "model", "analysis"]
                }
            },
            "scenarios": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "resolution": { "type": "STRING" },
                        "settings": { "type": "STRING" },
                        "avgFps": { "type": "STRING", "description": "Average FPS range, e.g. \"70-110 FPS\"." },
                        "analysis": { "type": "STRING" }
                    },
                    "required": ["name", "resolution", "settings", "avgFps", "analysis"]
                }
            }
        },
        "required": [
            "summary", "keyFactor", "bottleneckComponent", "bottleneckExplanation",
            "upgradeSuggestion", "estimatedPowerDraw", "performanceScore",
            "componentBreakdown", "scenarios"
        ]
    })
}

/// One required string property per key of the base table.
pub(crate) fn translation(base: &BTreeMap<String, String>) -> Value {
    let mut properties = Map::new();
    for key in base.keys() {
        properties.insert(
            key.clone(),
            json!({ "type": "STRING", "description": format!("Translation for '{key}'") }),
        );
    }
    json!({
        "type": "OBJECT",
        "properties": Value::Object(properties),
        "required": base.keys().cloned().collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_schema_requires_every_key() {
        let mut base = BTreeMap::new();
        base.insert("game".to_string(), "Game".to_string());
        base.insert("device".to_string(), "Device".to_string());
        let schema = translation(&base);
        assert_eq!(schema["required"], json!(["device", "game"]));
        assert_eq!(schema["properties"]["game"]["type"], "STRING");
    }

    #[test]
    fn analysis_schema_lists_virtual_ram() {
        let schema = fps_analysis();
        let kinds = &schema["properties"]["componentBreakdown"]["items"]["properties"]["component"]["enum"];
        assert!(kinds.as_array().expect("enum").contains(&json!("Virtual RAM")));
    }
}
