//! Text extraction from the quotation widget's HTML.
//!
//! The widget renders a single `<table>`: one `<tr>` per state inside
//! `<tbody>` (label, price, variation) and a `<tfoot>` carrying the closing
//! date. Scanning is tag-local and case-insensitive; nothing outside those
//! blocks is interpreted.

use crate::error::{Result, ScraperError};

/// Text cells of the quotation table, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
    pub footer: Option<String>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>, footer: Option<String>) -> Self {
        Self { rows, footer }
    }
}

/// Extract body rows and footer text from the widget HTML.
///
/// Fails with [`ScraperError::Markup`] when there is no `<tbody>` or it
/// holds no rows with cells.
pub fn extract_table(html: &str) -> Result<RawTable> {
    let tbody = blocks(html, "tbody")
        .first()
        .copied()
        .ok_or_else(|| ScraperError::Markup("no <tbody> in widget response".to_string()))?;

    let rows: Vec<Vec<String>> = blocks(tbody, "tr")
        .into_iter()
        .map(|tr| blocks(tr, "td").into_iter().map(cell_text).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(ScraperError::Markup(
            "quotation table has no data rows".to_string(),
        ));
    }

    let footer = blocks(html, "tfoot")
        .first()
        .map(|f| cell_text(f))
        .filter(|text| !text.is_empty());

    Ok(RawTable { rows, footer })
}

/// Inner HTML of every `<tag ...>...</tag>` block, case-insensitive.
///
/// Blocks of the same tag are assumed not to nest, which holds for the
/// widget's tables. An unterminated trailing block runs to end of input.
fn blocks<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    // ASCII lowercasing keeps byte offsets valid for `html`.
    let lower = html.to_ascii_lowercase();
    let open = format!("<{}", tag.to_ascii_lowercase());
    let close = format!("</{}", tag.to_ascii_lowercase());
    let mut pos = 0;
    let mut found = Vec::new();

    while let Some(rel) = lower[pos..].find(&open) {
        let start = pos + rel;
        let after_name = start + open.len();
        // Reject prefixes of longer tag names, e.g. `<tr` matching `<track`.
        match lower[after_name..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => {}
            _ => {
                pos = after_name;
                continue;
            }
        }
        let Some(gt) = lower[after_name..].find('>') else {
            break;
        };
        let inner_start = after_name + gt + 1;
        let inner_end = lower[inner_start..]
            .find(&close)
            .map(|i| inner_start + i)
            .unwrap_or(lower.len());
        found.push(&html[inner_start..inner_end]);
        pos = inner_end;
    }

    found
}

/// Visible text of an HTML fragment: tags removed, entities decoded,
/// whitespace collapsed.
pub fn cell_text(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "aacute" => 'á',
        "Aacute" => 'Á',
        "atilde" => 'ã',
        "acirc" => 'â',
        "eacute" => 'é',
        "ecirc" => 'ê',
        "iacute" => 'í',
        "oacute" => 'ó',
        "otilde" => 'õ',
        "ocirc" => 'ô',
        "uacute" => 'ú',
        "ccedil" => 'ç',
        _ => return None,
    };
    Some(c)
}
