//! Splitting of comma-separated lines with double-quoted fields.
//!
//! Shared by the catalog codec and the default reaction parser. A quoted field
//! may contain commas; a literal quote inside a quoted field is written `""`.

/// One comma-separated field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field text: trimmed when unquoted, verbatim between the quotes otherwise
    pub text: String,
    pub quoted: bool,
}

/// Split a line into fields.
///
/// A trailing comma does not produce an empty final field.
///
/// # Errors
///
/// Returns a message if a quote is left unterminated or a closing quote is
/// followed by anything other than a comma.
pub fn split_fields(line: &str) -> Result<Vec<Field>, String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let field = if chars.peek() == Some(&'"') {
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        text.push('"');
                    }
                    Some('"') => break,
                    Some(c) => text.push(c),
                    None => return Err("unterminated quoted field".to_string()),
                }
            }
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            match chars.peek() {
                None | Some(',') => {}
                Some(c) => return Err(format!("unexpected '{c}' after quoted field")),
            }
            Field { text, quoted: true }
        } else {
            let mut text = String::new();
            while let Some(&c) = chars.peek() {
                if c == ',' {
                    break;
                }
                text.push(c);
                chars.next();
            }
            Field {
                text: text.trim().to_string(),
                quoted: false,
            }
        };

        match chars.next() {
            Some(',') => fields.push(field),
            _ => {
                // Last field; drop it if it is the empty remainder after a trailing comma
                if field.quoted || !field.text.is_empty() || fields.is_empty() {
                    fields.push(field);
                }
                break;
            }
        }
    }

    Ok(fields)
}

/// Quote a field for writing, doubling any embedded quotes
#[must_use]
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}
