//! `bvbrc resources` command implementation
//!
//! Lists the known collections, optionally with their catalog fields.

use crate::error::Result;
use bvbrc_client::Resource;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

pub async fn run(fields: bool) -> Result<()> {
    print!("{}", render(fields));
    Ok(())
}

pub fn render(fields: bool) -> String {
    if !fields {
        let mut out = String::new();
        for name in Resource::names() {
            out.push_str(name);
            out.push('\n');
        }
        return out;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Resource", "Primary key", "Equality fields", "Range fields"]);

    for resource in Resource::ALL {
        table.add_row(vec![
            resource.name().to_string(),
            resource.primary_key().to_string(),
            resource.eq_fields().join(", "),
            resource.range_fields().join(", "),
        ]);
    }

    format!(
        "{}\n{}\n",
        table,
        format!("{} collections", Resource::ALL.len()).dimmed()
    )
}
