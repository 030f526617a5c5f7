//! Mapping between element paths and byte ranges of raw scene text.
//!
//! Both directions walk the text with the structural [`Lexer`] instead of a JSON parser,
//! so they keep working on text that only parses locally (the document is mid-edit). The
//! text must be the exact revision the paths were computed from.

use crate::{
    foundation::core::{ByteRange, ElementPath},
    source::lexer::{Lexer, Token},
};

/// Byte range of the element addressed by a dotted path such as `"2.0"`.
///
/// Returns `None` when the path string is invalid, an `elements` array is missing, an
/// index is out of range, or the addressed object never closes.
pub fn find_range_for_path(text: &str, path: &str) -> Option<ByteRange> {
    let path: ElementPath = path.parse().ok()?;
    range_for_path(text, &path)
}

/// Typed variant of [`find_range_for_path`].
pub fn range_for_path(text: &str, path: &ElementPath) -> Option<ByteRange> {
    if path.is_root() {
        return None;
    }
    descend(text, root_object(text)?, path.segments())
}

/// Path of the innermost leaf element whose object contains byte `offset`.
///
/// Compositions are entered first, so a caret inside a nested element resolves to that
/// element. A caret on the composition's own attributes resolves to the composition.
/// Returns `None` when the offset is outside every element.
pub fn find_path_for_offset(text: &str, offset: usize) -> Option<ElementPath> {
    let array_open = elements_array(text, root_object(text)?)?;
    locate_in(text, array_open, offset, &ElementPath::root())
}

fn descend(text: &str, object_open: usize, segments: &[usize]) -> Option<ByteRange> {
    let (&index, rest) = segments.split_first()?;
    let array_open = elements_array(text, object_open)?;
    let range = child_objects(text, array_open).nth(index)?;
    if rest.is_empty() {
        Some(range)
    } else {
        descend(text, range.start, rest)
    }
}

fn locate_in(
    text: &str,
    array_open: usize,
    offset: usize,
    parent: &ElementPath,
) -> Option<ElementPath> {
    for (index, range) in child_objects(text, array_open).enumerate() {
        if range.start > offset {
            return None;
        }
        if !range.contains(offset) {
            continue;
        }

        let path = parent.child(index);
        if is_composition(text, range.start)
            && let Some(nested) = elements_array(text, range.start)
            && let Some(inner) = locate_in(text, nested, offset, &path)
        {
            return Some(inner);
        }
        return Some(path);
    }
    None
}

/// Offset of the opening brace of the document root.
fn root_object(text: &str) -> Option<usize> {
    let body = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    body.starts_with('{').then_some(text.len() - body.len())
}

/// First token of the value stored under `key`, a member directly inside the object that
/// opens at `object_open`. Keys of nested objects and string values never match.
fn member_value(text: &str, object_open: usize, key: &str) -> Option<(usize, Token)> {
    let mut tokens = Lexer::new(text, object_open + 1).peekable();
    let mut depth = 0usize;

    while let Some((_, token)) = tokens.next() {
        match token {
            Token::OpenBrace | Token::OpenBracket => depth += 1,
            Token::CloseBrace | Token::CloseBracket => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            Token::Str { .. } if depth == 0 => {
                if matches!(tokens.peek(), Some((_, Token::Colon))) {
                    tokens.next();
                    if token.str_content(text) == Some(key) {
                        return tokens.next();
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Offset of the `[` of the object's own `elements` array.
fn elements_array(text: &str, object_open: usize) -> Option<usize> {
    match member_value(text, object_open, "elements")? {
        (at, Token::OpenBracket) => Some(at),
        _ => None,
    }
}

fn is_composition(text: &str, object_open: usize) -> bool {
    matches!(
        member_value(text, object_open, "type"),
        Some((_, token)) if token.str_content(text) == Some("composition")
    )
}

fn child_objects(text: &str, array_open: usize) -> ChildObjects<'_> {
    ChildObjects {
        tokens: Lexer::new(text, array_open + 1),
        done: false,
    }
}

/// Ranges of the objects directly inside an array, in order.
///
/// Stops at the array's closing bracket, and also at the end of text when an object is
/// left open (no partial range is produced).
struct ChildObjects<'a> {
    tokens: Lexer<'a>,
    done: bool,
}

impl Iterator for ChildObjects<'_> {
    type Item = ByteRange;

    fn next(&mut self) -> Option<ByteRange> {
        if self.done {
            return None;
        }

        let mut depth = 0usize;
        let mut start = None;
        for (at, token) in self.tokens.by_ref() {
            match token {
                Token::OpenBrace | Token::OpenBracket => {
                    if depth == 0 && token == Token::OpenBrace {
                        start = Some(at);
                    }
                    depth += 1;
                }
                Token::CloseBrace | Token::CloseBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    if depth == 0
                        && let Some(start) = start.take()
                    {
                        return Some(ByteRange { start, end: at + 1 });
                    }
                }
                _ => {}
            }
        }

        self.done = true;
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/locate.rs"]
mod tests;
