use serde::Serialize;
use serde_json::Value;
use tally_core::responses::ErrorResponse;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
///
/// Tables take an array of flat objects (one row each) or a single object
/// (rendered as key/value rows).
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print `value` as JSON, or `rows` when a table was asked for.
pub fn output_with_rows<T: Serialize, R: Serialize>(
    value: &T,
    rows: impl FnOnce(&T) -> Vec<R>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => output(&rows(value), format),
        _ => output(value, format),
    }
}

/// Print the `{"success": false, "error": ...}` envelope for JSON callers.
pub fn output_error(error: &anyhow::Error, format: OutputFormat) {
    if format == OutputFormat::Table {
        return;
    }
    let envelope = ErrorResponse::new(format!("{error:#}"));
    if let Ok(rendered) = render(&envelope, format) {
        println!("{rendered}");
    }
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_rows(&items)),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect();
            Ok(table::render_table(&["key", "value"], &rows, options()))
        }
        scalar => Ok(cell(&scalar)),
    }
}

fn render_rows(items: &[Value]) -> String {
    let Some(Value::Object(first)) = items.first() else {
        return String::from("(no rows)");
    };

    // serde_json maps iterate in key order
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect()
        })
        .collect();
    table::render_table(&headers, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
