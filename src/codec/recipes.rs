use std::fmt::Write as _;

use tracing::debug;

use super::fragments::{
    clean, extract_name, extract_percentage, split_key_value, split_top_level, strip_braces,
};
use crate::models::FiberShare;
use crate::store::RecipeStore;

/// Render every recipe as a brace-nested block, fibers labelled `f0`, `f1`,
/// ... in order. Percentages always carry two decimals with a `.` separator.
/// Names are written verbatim; quotes inside a name are not escaped.
pub fn encode_recipes(store: &RecipeStore) -> String {
    let mut out = String::from("{\n");
    let count = store.len();

    for (index, recipe) in store.iter().enumerate() {
        let _ = writeln!(out, "  \"{}\": {{", recipe.name);
        let fibers = recipe.shares.len();
        for (position, share) in recipe.shares.iter().enumerate() {
            let _ = write!(
                out,
                "    \"f{position}\": {{ \"name\": \"{}\", \"percentage\": {:.2} }}",
                share.name, share.percentage
            );
            if position + 1 < fibers {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("  }");
        if index + 1 < count {
            out.push(',');
        }
        out.push('\n');
    }

    out.push('}');
    out
}

/// Read recipes back. Anything that does not look like a recipe or a fiber
/// is skipped, and recipes left without fibers are dropped. Never fails.
pub fn decode_recipes(text: &str) -> RecipeStore {
    let mut store = RecipeStore::new();
    for block in split_top_level(strip_braces(text)) {
        let Some((key, value)) = split_key_value(&block) else {
            debug!(block = %block, "skipping recipe block without a key");
            continue;
        };

        let name = clean(key);
        if name.is_empty() {
            debug!("skipping recipe block with an empty name");
            continue;
        }

        let shares = decode_fibers(value);
        if shares.is_empty() {
            debug!(recipe = %name, "skipping recipe without readable fibers");
            continue;
        }
        store.upsert(&name, shares);
    }

    store
}

fn decode_fibers(value: &str) -> Vec<FiberShare> {
    split_top_level(strip_braces(value))
        .iter()
        .filter_map(|fragment| decode_fiber(fragment))
        .collect()
}

fn decode_fiber(fragment: &str) -> Option<FiberShare> {
    let (_, props) = split_key_value(fragment)?;
    let name = extract_name(props);
    let percentage = extract_percentage(props);

    match (name, percentage) {
        (Some(name), Some(raw)) => match raw.parse::<f64>() {
            Ok(percentage) if percentage.is_finite() => Some(FiberShare::new(name, percentage)),
            _ => {
                debug!(fiber = %name, value = %raw, "skipping fiber with unreadable percentage");
                None
            }
        },
        _ => {
            debug!(fragment = %fragment, "skipping incomplete fiber");
            None
        }
    }
}
