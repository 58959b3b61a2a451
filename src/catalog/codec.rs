//! Text encoding of a catalog, one line per element.
//!
//! ```text
//! e-, 1 ,"e-","electron",
//! H , 1 ,"H+","hydrogen ion",
//! C , 1 ,"CN-","cyanide",
//! N , 2 ,"CN-","cyanide","SCN-","thiocyanate",
//! XX, 1 ,"H2O","water",
//! ```

use thiserror::Error;
use tracing::warn;

use crate::core::element::{group_symbol, is_catalog_symbol, KNOWN_ELEMENTS, UNCLASSIFIED};
use crate::core::entry::{Catalog, CatalogEntry};
use crate::utils::fields::{quote, split_fields};
use crate::utils::validation::is_single_line;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct DecodeError {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Serialize a catalog.
///
/// Elements are visited in canonical order; entries whose element is not a
/// known symbol are collected on a final `XX` line.
#[must_use]
pub fn encode(catalog: &Catalog) -> String {
    let mut out = String::new();

    for &symbol in KNOWN_ELEMENTS {
        let group: Vec<&CatalogEntry> = catalog.entries_for_element(symbol).collect();
        write_line(&mut out, symbol, &group);
    }

    let unclassified: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|e| group_symbol(&e.element) == UNCLASSIFIED)
        .collect();
    write_line(&mut out, UNCLASSIFIED, &unclassified);

    out
}

fn write_line(out: &mut String, symbol: &str, group: &[&CatalogEntry]) {
    if group.is_empty() {
        return;
    }
    out.push_str(&format!("{symbol:<2},{:>2} ,", group.len()));
    for entry in group {
        let description = entry.description.as_deref().unwrap_or("");
        out.push_str(&format!("{},{},", quote(&entry.component), quote(description)));
    }
    out.push('\n');
}

/// First entry whose component or description would break the one-line-per-element layout
#[must_use]
pub fn find_unencodable(catalog: &Catalog) -> Option<&CatalogEntry> {
    catalog.iter().find(|e| {
        !is_single_line(&e.component) || !e.description.as_deref().map_or(true, is_single_line)
    })
}

/// Parse catalog text. Every quoted pair becomes one entry attributed to its line's element.
///
/// # Errors
///
/// Returns `DecodeError` for the first malformed line; nothing is returned for
/// the lines that parsed before it.
pub fn decode(text: &str) -> Result<Catalog, DecodeError> {
    let mut catalog = Catalog::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let line_num = i + 1;
        let fail = |reason: String| DecodeError {
            line: line_num,
            content: line.to_string(),
            reason,
        };

        let fields = split_fields(line).map_err(&fail)?;
        if fields.len() < 2 {
            return Err(fail("expected element symbol and entry count".to_string()));
        }

        let symbol = fields[0].text.as_str();
        if symbol.is_empty() {
            return Err(fail("missing element symbol".to_string()));
        }
        let element = if is_catalog_symbol(symbol) {
            symbol
        } else {
            warn!(
                "Catalog line {} uses unknown element '{}', filing under {}",
                line_num, symbol, UNCLASSIFIED
            );
            UNCLASSIFIED
        };

        let count: usize = fields[1]
            .text
            .parse()
            .map_err(|_| fail(format!("invalid entry count '{}'", fields[1].text)))?;

        let expected = count
            .checked_mul(2)
            .ok_or_else(|| fail(format!("entry count {count} is too large")))?;
        let pairs = &fields[2..];
        if pairs.len() != expected {
            return Err(fail(format!(
                "entry count {count} does not match {} quoted field(s)",
                pairs.len()
            )));
        }
        if let Some(bad) = pairs.iter().find(|f| !f.quoted) {
            return Err(fail(format!("field '{}' is not quoted", bad.text)));
        }

        for pair in pairs.chunks(2) {
            if pair[0].text.trim().is_empty() {
                return Err(fail("empty component formula".to_string()));
            }
            catalog.push(
                CatalogEntry::new(element, pair[0].text.trim()).with_description(&pair[1].text),
            );
        }
    }

    Ok(catalog)
}
