//! Minimal CSV parsing and escaping
//!
//! Handles:
//! - Quoted fields with embedded commas, quotes, and doubled quotes
//! - Field escaping on write
//! - Whole-document parsing into a header row plus data rows
//!
//! The word cache and the tracking log are both flat four-column files, so a
//! full CSV dialect (multi-line fields, BOM handling) is not needed here.

/// Parse a single CSV line into fields, honoring double-quote escaping
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted field
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current);
                current = String::new();
            }
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Escape a field for CSV output (quote only when necessary)
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join fields into one CSV line
pub fn write_line<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a CSV document into (header, rows)
///
/// Blank lines are skipped. Returns an error for a document with no header
/// row at all.
pub fn parse_document(text: &str) -> Result<(Vec<String>, Vec<Vec<String>>), Box<dyn std::error::Error>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header_line = lines.next().ok_or("CSV document is empty")?;
    let header = parse_line(header_line);
    let rows: Vec<Vec<String>> = lines.map(parse_line).collect();

    Ok((header, rows))
}
