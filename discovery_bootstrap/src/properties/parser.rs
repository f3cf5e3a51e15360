//! Line-level parsing for `.properties` content.

use std::iter::Peekable;
use std::str::Chars;

use super::{PropertiesSyntaxError, PropertyMap};

/// A key/value entry assembled from one or more physical lines.
struct LogicalLine {
    number: usize,
    text: String,
}

/// Parse `.properties` content into an ordered map.
///
/// # Examples
///
/// ```
/// use discovery_bootstrap::properties;
///
/// let map = properties::parse("# region\neureka.region = us-east-1\n")?;
/// assert_eq!(map.get("eureka.region").map(String::as_str), Some("us-east-1"));
/// # Ok::<(), discovery_bootstrap::properties::PropertiesSyntaxError>(())
/// ```
///
/// # Errors
///
/// Returns a [`PropertiesSyntaxError`] when an entry contains a malformed
/// `\uXXXX` escape or an unpaired UTF-16 surrogate.
pub fn parse(input: &str) -> Result<PropertyMap, PropertiesSyntaxError> {
    let mut map = PropertyMap::new();
    for line in logical_lines(input) {
        let (key, value) = split_entry(&line)?;
        map.insert(key, value);
    }
    Ok(map)
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn logical_lines(input: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;
    for (idx, raw) in physical_lines(input).enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);
        let (body, continues) = strip_continuation(trimmed);
        match pending.take() {
            Some(mut open) => {
                open.text.push_str(body);
                if continues {
                    pending = Some(open);
                } else {
                    lines.push(open);
                }
            }
            None => {
                // Comments never continue onto the next line.
                if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                    continue;
                }
                let line = LogicalLine {
                    number: idx + 1,
                    text: body.to_owned(),
                };
                if continues {
                    pending = Some(line);
                } else {
                    lines.push(line);
                }
            }
        }
    }
    lines.extend(pending);
    lines
}

/// Split on `\n`, `\r\n` and a lone `\r`.
fn physical_lines(input: &str) -> impl Iterator<Item = &str> {
    let mut after_cr = false;
    input.split_inclusive(['\r', '\n']).filter_map(move |piece| {
        let crlf_tail = after_cr && piece == "\n";
        after_cr = piece.ends_with('\r');
        (!crlf_tail).then(|| piece.trim_end_matches(['\r', '\n']))
    })
}

/// Drop a trailing continuation backslash. Only an odd run counts, since
/// `\\` is an escaped backslash.
fn strip_continuation(line: &str) -> (&str, bool) {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    if trailing.is_multiple_of(2) {
        (line, false)
    } else {
        (line.strip_suffix('\\').unwrap_or(line), true)
    }
}

fn split_entry(line: &LogicalLine) -> Result<(String, String), PropertiesSyntaxError> {
    let mut chars = line.text.chars().peekable();
    let mut raw_key = String::new();
    let mut escaped = false;
    while let Some(&c) = chars.peek() {
        if !escaped && (c == '=' || c == ':' || is_blank(c)) {
            break;
        }
        escaped = !escaped && c == '\\';
        raw_key.push(c);
        chars.next();
    }
    skip_blanks(&mut chars);
    if chars.next_if(|c| *c == '=' || *c == ':').is_some() {
        skip_blanks(&mut chars);
    }
    let raw_value: String = chars.collect();
    Ok((
        unescape(&raw_key, line.number)?,
        unescape(&raw_value, line.number)?,
    ))
}

fn skip_blanks(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| is_blank(*c)).is_some() {}
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesSyntaxError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(decode_unicode(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_code_unit(chars: &mut Chars<'_>, line: usize) -> Result<u32, PropertiesSyntaxError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.chars().count() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PropertiesSyntaxError::new(
            line,
            format!("malformed \\uxxxx encoding: \\u{digits}"),
        ));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|e| PropertiesSyntaxError::new(line, format!("malformed \\uxxxx encoding: {e}")))
}

fn decode_unicode(chars: &mut Chars<'_>, line: usize) -> Result<char, PropertiesSyntaxError> {
    let high = read_code_unit(chars, line)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high).ok_or_else(|| {
            PropertiesSyntaxError::new(line, format!("unpaired surrogate \\u{high:04X}"))
        });
    }
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return Err(PropertiesSyntaxError::new(
            line,
            format!("unpaired surrogate \\u{high:04X}"),
        ));
    }
    let low = read_code_unit(&mut lookahead, line)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(PropertiesSyntaxError::new(
            line,
            format!("unpaired surrogate \\u{high:04X}"),
        ));
    }
    *chars = lookahead;
    let combined = 0x1_0000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(combined)
        .ok_or_else(|| PropertiesSyntaxError::new(line, "invalid surrogate pair"))
}
