//! Template segment splitter
//!
//! Breaks template text into `/`-separated segments. Bracket pairs `()`, `{}`
//! and `[]` (which nest) and quoted regions `"..."` / `'...'` are atomic: a
//! separator inside them does not split. Each segment is further broken into
//! sub-parts so the parser can tell literal text from variable declarations.
//!
//! Outside quotes a backslash before a bracket or quote character stops it from
//! opening or closing a region. Inside quotes a backslash escapes whatever
//! follows it.
//!
//! All positions are 0-based character offsets into the template text.

use thiserror::Error;

use crate::error::ParseError;

const SEPARATOR: char = '/';
const ESCAPE: char = '\\';

/// Bracket or quote balance problem found while splitting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("unclosed '{ch}' at position {position}")]
    Unclosed { ch: char, position: usize },

    #[error("unopened '{ch}' at position {position}")]
    Unopened { ch: char, position: usize },
}

impl SplitError {
    pub fn position(&self) -> usize {
        match self {
            SplitError::Unclosed { position, .. } | SplitError::Unopened { position, .. } => {
                *position
            }
        }
    }
}

/// What a region of segment text is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPartKind {
    /// Plain literal text
    Fixed,
    /// A bracketed region, carrying its opening character
    Brackets(char),
    /// A quoted region, carrying its quote character
    Quotes(char),
}

/// A contiguous region of one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPart {
    pub kind: SubPartKind,
    /// Raw text, delimiters included
    pub text: String,
    pub position: usize,
}

impl SubPart {
    fn new(kind: SubPartKind, text: String, position: usize) -> Self {
        Self {
            kind,
            text,
            position,
        }
    }

    /// Text between the delimiters of a bracketed or quoted region
    pub fn inner(&self) -> &str {
        match self.kind {
            SubPartKind::Fixed => &self.text,
            SubPartKind::Brackets(open) | SubPartKind::Quotes(open) => {
                let inner = self.text.strip_prefix(open).unwrap_or(&self.text);
                let close = closer_for(open).unwrap_or(open);
                inner.strip_suffix(close).unwrap_or(inner)
            }
        }
    }

    /// Interior of a quoted region with its backslash escapes resolved
    ///
    /// Other kinds are returned as is.
    pub fn unescaped(&self) -> String {
        match self.kind {
            SubPartKind::Quotes(_) => {
                let mut out = String::with_capacity(self.text.len());
                let mut chars = self.inner().chars();
                while let Some(c) = chars.next() {
                    if c == ESCAPE {
                        if let Some(next) = chars.next() {
                            out.push(next);
                            continue;
                        }
                    }
                    out.push(c);
                }
                out
            }
            _ => self.text.clone(),
        }
    }
}

/// One `/`-separated segment of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub position: usize,
    pub sub_parts: Vec<SubPart>,
}

impl Segment {
    fn new(position: usize) -> Self {
        Self {
            text: String::new(),
            position,
            sub_parts: Vec::new(),
        }
    }

    /// Whether the segment is a single run of literal text
    pub fn is_plain(&self) -> bool {
        matches!(self.sub_parts.as_slice(), [sp] if sp.kind == SubPartKind::Fixed)
    }
}

fn closer_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | '}' | ']')
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

fn is_special(c: char) -> bool {
    closer_for(c).is_some() || is_closer(c) || is_quote(c)
}

/// Region currently being scanned
enum Region {
    Brackets {
        stack: Vec<(char, usize)>,
        text: String,
        start: usize,
    },
    Quote {
        quote: char,
        text: String,
        start: usize,
    },
}

/// Accumulator for the character scan
struct SplitState {
    segments: Vec<Segment>,
    current: Segment,
    fixed: String,
    fixed_start: usize,
    region: Option<Region>,
}

impl SplitState {
    fn new() -> Self {
        Self {
            segments: Vec::new(),
            current: Segment::new(0),
            fixed: String::new(),
            fixed_start: 0,
            region: None,
        }
    }

    fn push_fixed(&mut self, c: char, position: usize) {
        if self.fixed.is_empty() {
            self.fixed_start = position;
        }
        self.fixed.push(c);
        self.current.text.push(c);
    }

    fn flush_fixed(&mut self) {
        if !self.fixed.is_empty() {
            let text = std::mem::take(&mut self.fixed);
            self.current
                .sub_parts
                .push(SubPart::new(SubPartKind::Fixed, text, self.fixed_start));
        }
    }

    fn end_segment(&mut self, next_start: usize) {
        self.flush_fixed();
        let done = std::mem::replace(&mut self.current, Segment::new(next_start));
        self.segments.push(done);
    }

    fn open_region(&mut self, region: Region, c: char) {
        self.flush_fixed();
        self.current.text.push(c);
        self.region = Some(region);
    }

    fn close_region(&mut self, kind: SubPartKind, text: String, start: usize) {
        self.current.sub_parts.push(SubPart::new(kind, text, start));
        self.region = None;
    }

    /// Drops the outer empty segments; any other empty segment is an error
    fn finish(mut self) -> Result<Vec<Segment>, ParseError> {
        self.end_segment(0);
        let mut segments = self.segments;
        if segments.last().is_some_and(|s| s.text.is_empty()) {
            segments.pop();
        }
        if segments.first().is_some_and(|s| s.text.is_empty()) {
            segments.remove(0);
        }
        match segments.iter().find(|s| s.text.is_empty()) {
            Some(empty) => Err(ParseError::empty_segment(empty.position)),
            None => Ok(segments),
        }
    }
}

/// Splits template text into segments and their sub-parts
///
/// # Examples
///
/// ```
/// use rhtmx_urit::splitter::{split_template, SubPartKind};
///
/// let segments = split_template("/foo/--{bar:[a-z/]*}--").unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].text, "--{bar:[a-z/]*}--");
/// assert_eq!(segments[1].sub_parts[1].kind, SubPartKind::Brackets('{'));
/// assert_eq!(segments[1].sub_parts[1].position, 7);
///
/// let err = split_template("/foo//bar").unwrap_err();
/// assert_eq!(err.position(), 5);
/// ```
pub fn split_template(template: &str) -> Result<Vec<Segment>, ParseError> {
    let chars: Vec<char> = template.chars().collect();
    let mut state = SplitState::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match state.region.as_mut() {
            None => {
                if c == SEPARATOR {
                    state.end_segment(i + 1);
                } else if c == ESCAPE && next.is_some_and(is_special) {
                    state.push_fixed(c, i);
                    if let Some(escaped) = next {
                        state.push_fixed(escaped, i + 1);
                    }
                    i += 2;
                    continue;
                } else if closer_for(c).is_some() {
                    let region = Region::Brackets {
                        stack: vec![(c, i)],
                        text: c.to_string(),
                        start: i,
                    };
                    state.open_region(region, c);
                } else if is_closer(c) {
                    return Err(SplitError::Unopened { ch: c, position: i }.into());
                } else if is_quote(c) {
                    let region = Region::Quote {
                        quote: c,
                        text: c.to_string(),
                        start: i,
                    };
                    state.open_region(region, c);
                } else {
                    state.push_fixed(c, i);
                }
            }
            Some(Region::Brackets { stack, text, start }) => {
                text.push(c);
                state.current.text.push(c);
                if c == ESCAPE {
                    if let Some(escaped) = next {
                        text.push(escaped);
                        state.current.text.push(escaped);
                        i += 2;
                        continue;
                    }
                } else if closer_for(c).is_some() {
                    stack.push((c, i));
                } else if is_closer(c) {
                    match stack.last().copied() {
                        Some((open, _)) if closer_for(open) == Some(c) => {
                            stack.pop();
                        }
                        Some((open, position)) => {
                            return Err(SplitError::Unclosed { ch: open, position }.into());
                        }
                        None => {
                            return Err(SplitError::Unopened { ch: c, position: i }.into());
                        }
                    }
                    if stack.is_empty() {
                        let (text, start) = (std::mem::take(text), *start);
                        let open = text.chars().next().unwrap_or(c);
                        state.close_region(SubPartKind::Brackets(open), text, start);
                    }
                }
            }
            Some(Region::Quote { quote, text, start }) => {
                text.push(c);
                state.current.text.push(c);
                if c == ESCAPE {
                    if let Some(escaped) = next {
                        text.push(escaped);
                        state.current.text.push(escaped);
                        i += 2;
                        continue;
                    }
                } else if c == *quote {
                    let (kind, text, start) = (SubPartKind::Quotes(*quote), std::mem::take(text), *start);
                    state.close_region(kind, text, start);
                }
            }
        }
        i += 1;
    }

    match state.region {
        Some(Region::Brackets { ref stack, .. }) => {
            let (ch, position) = stack.last().copied().unwrap_or(('{', 0));
            Err(SplitError::Unclosed { ch, position }.into())
        }
        Some(Region::Quote { quote, start, .. }) => Err(SplitError::Unclosed {
            ch: quote,
            position: start,
        }
        .into()),
        None => state.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use pretty_assertions::assert_eq;

    fn texts(template: &str) -> Vec<String> {
        split_template(template)
            .unwrap()
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_split_plain() {
        assert_eq!(texts("/foo/bar"), vec!["foo", "bar"]);
        assert_eq!(texts("/foo/bar/"), vec!["foo", "bar"]);
        assert_eq!(texts("foo"), vec!["foo"]);
        assert!(texts("/").is_empty());
    }

    #[test]
    fn test_split_keeps_regions_atomic() {
        assert_eq!(texts("/foo/{bar:[a-z/]*}/baz"), vec!["foo", "{bar:[a-z/]*}", "baz"]);
        assert_eq!(texts(r#"/foo/"a/b"/baz"#), vec!["foo", r#""a/b""#, "baz"]);
        assert_eq!(texts("/foo/(a/(b/c))"), vec!["foo", "(a/(b/c))"]);
        assert_eq!(texts(r"/foo/{a\}/b}"), vec!["foo", r"{a\}/b}"]);
    }

    #[test]
    fn test_split_sub_parts() {
        let segments = split_template("/--{bar}-{baz}--").unwrap();
        let segment = &segments[0];
        assert_eq!(segment.position, 1);
        let kinds: Vec<_> = segment.sub_parts.iter().map(|sp| sp.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SubPartKind::Fixed,
                SubPartKind::Brackets('{'),
                SubPartKind::Fixed,
                SubPartKind::Brackets('{'),
                SubPartKind::Fixed,
            ]
        );
        let positions: Vec<_> = segment.sub_parts.iter().map(|sp| sp.position).collect();
        assert_eq!(positions, vec![1, 3, 8, 9, 14]);
        assert_eq!(segment.sub_parts[1].inner(), "bar");
        assert!(!segment.is_plain());
    }

    #[test]
    fn test_quotes_unescaped() {
        let segments = split_template(r#"/"a\"b"/'c\'d'"#).unwrap();
        assert_eq!(segments[0].sub_parts[0].kind, SubPartKind::Quotes('"'));
        assert_eq!(segments[0].sub_parts[0].unescaped(), r#"a"b"#);
        assert_eq!(segments[1].sub_parts[0].unescaped(), "c'd");
    }

    #[test]
    fn test_escaped_bracket_outside_region_is_literal() {
        let segments = split_template(r"/foo\{bar").unwrap();
        assert!(segments[0].is_plain());
        assert_eq!(segments[0].text, r"foo\{bar");
    }

    #[test]
    fn test_empty_inner_segment() {
        let err = split_template("/foo//bar").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::EmptySegment);
        assert_eq!(err.position(), 5);

        let err = split_template("///").unwrap_err();
        assert_eq!(err.position(), 1);
    }

    #[test]
    fn test_unbalanced() {
        let cases = [
            ("/foo/{bar", "unclosed '{' at position 5"),
            ("/foo/{bar{", "unclosed '{' at position 9"),
            ("/foo/}bar", "unopened '}' at position 5"),
            ("/foo/{{bar", "unclosed '{' at position 6"),
            ("/foo/{bar}}", "unopened '}' at position 10"),
            ("/foo/{bar)", "unclosed '{' at position 5"),
            ("/foo/\"bar", "unclosed '\"' at position 5"),
        ];
        for (template, expected) in cases {
            let err = split_template(template).unwrap_err();
            assert_eq!(err.kind(), ParseErrorKind::Unbalanced, "{}", template);
            assert_eq!(err.to_string(), expected, "{}", template);
        }
    }
}
