//! Reader and writer for the `.properties` text format.
//!
//! Follows the rules of `java.util.Properties`: `#`/`!` comment lines, logical lines
//! continued with a trailing backslash, `=`/`:`/whitespace separators and backslash
//! escapes including `\uXXXX`. Text is read and written as UTF-8.

use std::io::{self, Write};
use std::str::Chars;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct PropertiesError {
    /// 1-based line on which the offending logical line starts
    pub line: usize,
    pub message: String,
}

impl PropertiesError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parses properties text into key/value pairs in file order.
///
/// Later duplicates are kept in the output; callers that build a map get
/// last-one-wins semantics.
pub fn parse_properties(input: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut pairs = Vec::new();
    let mut lines = physical_lines(input).into_iter().enumerate();

    while let Some((index, raw)) = lines.next() {
        let first = raw.trim_start_matches(WHITESPACE);
        if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
            continue;
        }

        let line_number = index + 1;
        let mut logical = String::new();
        let mut current = first;
        loop {
            if !has_continuation(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(WHITESPACE),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        pairs.push((unescape(key, line_number)?, unescape(value, line_number)?));
    }

    Ok(pairs)
}

/// Writes `pairs` as properties text, preceded by one `#` line per comment
pub fn write_properties<'a, W, I>(out: &mut W, comments: &[String], pairs: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for comment in comments {
        for line in comment.split('\n') {
            writeln!(out, "#{}", line.trim_end_matches('\r'))?;
        }
    }
    for (key, value) in pairs {
        writeln!(out, "{}={}", escape(key, true), escape(value, false))?;
    }
    Ok(())
}

// Lines end at `\n`, `\r\n` or a lone `\r`.
fn physical_lines(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&input[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&input[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < input.len() {
        lines.push(&input[start..]);
    }
    lines
}

// An odd run of trailing backslashes continues the logical line.
fn has_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut explicit_separator = false;
    let mut escaped = false;

    // Separators are ASCII, so byte offsets land on char boundaries.
    for (i, b) in line.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'=' | b':' => {
                key_end = i;
                explicit_separator = true;
                break;
            }
            b' ' | b'\t' | 0x0c => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = &line[key_end..];
    if explicit_separator {
        rest = rest[1..].trim_start_matches(WHITESPACE);
    } else {
        rest = rest.trim_start_matches(WHITESPACE);
        if rest.starts_with(['=', ':']) {
            rest = rest[1..].trim_start_matches(WHITESPACE);
        }
    }
    (key, rest)
}

fn unescape(text: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(read_unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

// Called after `\u`; joins a surrogate pair written as two consecutive escapes.
fn read_unicode_escape(chars: &mut Chars<'_>, line: usize) -> Result<char, PropertiesError> {
    let unit = read_hex4(chars, line)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(u32::from(unit))
            .ok_or_else(|| PropertiesError::new(line, format!("unpaired surrogate \\u{:04X}", unit)));
    }

    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(PropertiesError::new(line, format!("unpaired surrogate \\u{:04X}", unit)));
    }
    let low = read_hex4(chars, line)?;
    char::decode_utf16([unit, low])
        .next()
        .and_then(|decoded| decoded.ok())
        .ok_or_else(|| {
            PropertiesError::new(line, format!("invalid surrogate pair \\u{:04X}\\u{:04X}", unit, low))
        })
}

fn read_hex4(chars: &mut Chars<'_>, line: usize) -> Result<u16, PropertiesError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 {
        return Err(PropertiesError::new(line, "malformed \\uxxxx encoding"));
    }
    u16::from_str_radix(&digits, 16)
        .map_err(|_| PropertiesError::new(line, format!("malformed \\uxxxx encoding: \\u{}", digits)))
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if i == 0 || is_key => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}
