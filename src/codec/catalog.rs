use super::fragments::{clean, unwrap_delimited};
use crate::store::FiberCatalog;

/// One quoted name per line inside square brackets.
pub fn encode_catalog(catalog: &FiberCatalog) -> String {
    let names: Vec<String> = catalog.names().map(|name| format!("  \"{name}\"")).collect();
    if names.is_empty() {
        return "[\n]".to_string();
    }
    format!("[\n{}\n]", names.join(",\n"))
}

/// Entries are flat strings, so a plain comma split is enough. Text that is
/// not wrapped in brackets yields an empty catalog.
pub fn decode_catalog(text: &str) -> FiberCatalog {
    let Some(body) = unwrap_delimited(text, '[', ']') else {
        return FiberCatalog::new();
    };
    body.split(',')
        .map(clean)
        .filter(|name| !name.is_empty())
        .collect()
}
