//! Docstring extraction and cleanup.
//!
//! A docstring is the string literal forming the first statement of a module,
//! class or function body. Its text is decoded from the literal and then
//! cleaned with the same rules as Python's `inspect.cleandoc`.

use tree_sitter::Node;

use super::parser::{node_text, statements};

const TAB_SIZE: usize = 8;

/// Docstring of the body `block` (or `module`) node, cleaned.
pub fn docstring_of(body: &Node, source: &str) -> Option<String> {
    let first = statements(body).into_iter().next()?;
    if first.kind() != "expression_statement" {
        return None;
    }

    let expressions = statements(&first);
    let [expression] = expressions.as_slice() else {
        return None;
    };

    string_value(expression, source).map(|raw| cleandoc(&raw))
}

/// Value of a `string` or `concatenated_string` expression node.
///
/// `None` for any other node and for byte or formatted literals.
pub fn string_value(node: &Node, source: &str) -> Option<String> {
    let decode = |node: &Node| decode_literal(&node_text(node, source).replace("\r\n", "\n"));
    match node.kind() {
        "string" => decode(node),
        "concatenated_string" => statements(node)
            .iter()
            .map(decode)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.concat()),
        _ => None,
    }
}

/// Value of a `str` literal including its prefix and quotes.
///
/// Byte strings and f-strings never form a docstring and yield `None`.
pub fn decode_literal(literal: &str) -> Option<String> {
    let quote_start = literal.find(['\'', '"'])?;
    let prefix = literal[..quote_start].to_ascii_lowercase();
    if prefix.contains(['b', 'f', 't']) {
        return None;
    }

    let quoted = &literal[quote_start..];
    let delimiter = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|delim| quoted.starts_with(delim))?;
    let body = quoted
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)?;

    if prefix.contains('r') {
        Some(body.to_string())
    } else {
        Some(unescape(body))
    }
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let Some(escaped) = after.chars().next() else {
            out.push('\\');
            rest = "";
            break;
        };

        let consumed = match escaped {
            // line continuation
            '\n' => 1,
            '\\' | '\'' | '"' => push(&mut out, escaped),
            'n' => push(&mut out, '\n'),
            't' => push(&mut out, '\t'),
            'r' => push(&mut out, '\r'),
            'a' => push(&mut out, '\x07'),
            'b' => push(&mut out, '\x08'),
            'f' => push(&mut out, '\x0c'),
            'v' => push(&mut out, '\x0b'),
            '0'..='7' => {
                let digits = after
                    .chars()
                    .take(3)
                    .take_while(|c| c.is_digit(8))
                    .count();
                match u32::from_str_radix(&after[..digits], 8)
                    .ok()
                    .and_then(char::from_u32)
                {
                    Some(c) => {
                        out.push(c);
                        digits
                    }
                    None => keep_escape(&mut out, escaped),
                }
            }
            'x' => hex_escape(&mut out, after, 2),
            'u' => hex_escape(&mut out, after, 4),
            'U' => hex_escape(&mut out, after, 8),
            other => keep_escape(&mut out, other),
        };
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

fn push(out: &mut String, c: char) -> usize {
    out.push(c);
    1
}

/// Unknown escapes keep their backslash
fn keep_escape(out: &mut String, escaped: char) -> usize {
    out.push('\\');
    out.push(escaped);
    escaped.len_utf8()
}

fn hex_escape(out: &mut String, after: &str, width: usize) -> usize {
    let decoded = after
        .get(1..=width)
        .filter(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()))
        .and_then(|digits| u32::from_str_radix(digits, 16).ok())
        .and_then(char::from_u32);

    match decoded {
        Some(c) => {
            out.push(c);
            width + 1
        }
        None => keep_escape(out, after.chars().next().unwrap_or('x')),
    }
}

/// Clean indentation from a docstring.
///
/// Tabs are expanded, leading whitespace of the first line is removed, the
/// smallest indentation of the remaining non-blank lines is removed from all
/// of them, and leading and trailing blank lines are dropped.
pub fn cleandoc(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start();
            (!content.is_empty()).then(|| line.chars().count() - content.chars().count())
        })
        .min();

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        cleaned.push(first.trim_start().to_string());
    }
    for line in lines.iter().skip(1) {
        let kept = match margin {
            Some(margin) => line.chars().skip(margin).collect(),
            None => line.to_string(),
        };
        cleaned.push(kept);
    }

    while cleaned.last().is_some_and(|line| line.trim().is_empty()) {
        cleaned.pop();
    }
    let leading = cleaned
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();

    cleaned[leading..].join("\n")
}

fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}
