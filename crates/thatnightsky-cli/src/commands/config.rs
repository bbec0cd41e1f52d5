//! Config command implementation

use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use thatnightsky_core::config::{LayeredConfig, Secrets};

pub fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    let secrets = Secrets::from_env();
    let keys = [
        ("VWORLD_API_KEY", secrets.vworld_api_key.is_some()),
        ("ANTHROPIC_API_KEY", secrets.anthropic_api_key.is_some()),
    ];

    if output.is_json() {
        let keys: serde_json::Map<String, serde_json::Value> =
            keys.iter().map(|(name, set)| (name.to_string(), (*set).into())).collect();
        return output.result(serde_json::json!({ "values": rows, "keys": keys }));
    }

    output.section("Configuration");
    output.table(rows);

    output.section("API Keys");
    for (name, set) in keys {
        output.kv(name, if set { "set" } else { "not set" });
    }

    Ok(())
}
