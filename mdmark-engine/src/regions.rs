//! Where raw HTML and code sit in a markdown source
//!
//! The content string is parsed with comrak, the same parser that renders it,
//! so markup counts as HTML exactly when the renderer would pass it through.
//! Block positions are taken from comrak's source positions directly. Inline
//! positions are only a hint: each inline tag and code span is confirmed
//! against the source and otherwise searched for forward from the previous
//! inline, in document order.

use comrak::nodes::{LineColumn, NodeValue, Sourcepos};
use comrak::{parse_document, Arena, ComrakOptions};
use std::ops::Range;

/// Byte ranges of raw HTML and of code in a markdown source, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRegions {
    /// Inline HTML tags and HTML blocks
    pub html: Vec<Range<usize>>,
    /// Code blocks, fenced or indented, and code spans with their backticks
    pub code: Vec<Range<usize>>,
}

fn scan_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.render.sourcepos = true;
    options
}

impl SourceRegions {
    pub fn scan(content: &str) -> Self {
        let arena = Arena::new();
        let root = parse_document(&arena, content, &scan_options());
        let lines = LineIndex::new(content);
        let mut regions = Self::default();
        // Inlines never start before this offset
        let mut cursor = 0;

        for node in root.descendants() {
            let ast = node.data.borrow();
            let pos = ast.sourcepos;
            match &ast.value {
                NodeValue::HtmlBlock(_) => {
                    let range = lines.whole_lines(pos);
                    cursor = cursor.max(range.end);
                    regions.html.push(range);
                }
                NodeValue::CodeBlock(_) => {
                    let range = lines.whole_lines(pos);
                    cursor = cursor.max(range.end);
                    regions.code.push(range);
                }
                NodeValue::Paragraph | NodeValue::Heading(_) | NodeValue::TableRow(_) => {
                    cursor = cursor.max(lines.line_start(pos.start.line));
                }
                NodeValue::HtmlInline(literal) => {
                    if let Some(range) = locate_literal(content, &lines, pos.start, literal, cursor)
                    {
                        cursor = range.end;
                        regions.html.push(range);
                    }
                }
                NodeValue::Code(code) => {
                    if let Some(range) =
                        locate_code_span(content, &lines, pos.start, code.num_backticks, cursor)
                    {
                        cursor = range.end;
                        regions.code.push(range);
                    }
                }
                _ => {}
            }
        }
        regions
    }

    /// Whether `range` overlaps no HTML and no code
    pub fn is_prose(&self, range: &Range<usize>) -> bool {
        self.html
            .iter()
            .chain(&self.code)
            .all(|r| range.end <= r.start || range.start >= r.end)
    }
}

/// Byte offset of every line start
struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            starts,
            len: content.len(),
        }
    }

    /// Start of a 1-based line; past the last line this is the end of input
    fn line_start(&self, line: usize) -> usize {
        line.checked_sub(1)
            .and_then(|i| self.starts.get(i))
            .copied()
            .unwrap_or(self.len)
    }

    /// 1-based line and byte column to an offset
    fn offset(&self, at: LineColumn) -> usize {
        (self.line_start(at.line) + at.column.saturating_sub(1)).min(self.len)
    }

    /// Every line a block touches, trailing newline included
    fn whole_lines(&self, pos: Sourcepos) -> Range<usize> {
        let start = self.line_start(pos.start.line);
        start..self.line_start(pos.end.line + 1).max(start)
    }
}

/// Where an inline HTML tag with this exact source text sits
fn locate_literal(
    content: &str,
    lines: &LineIndex,
    hint: LineColumn,
    literal: &str,
    cursor: usize,
) -> Option<Range<usize>> {
    let hinted = lines.offset(hint);
    if hinted >= cursor && content.get(hinted..hinted + literal.len()) == Some(literal) {
        return Some(hinted..hinted + literal.len());
    }
    let found = content.get(cursor..)?.find(literal)?;
    Some(cursor + found..cursor + found + literal.len())
}

/// Where a code span opened by `ticks` backticks sits, delimiters included.
/// The hint points just past the opening run.
fn locate_code_span(
    content: &str,
    lines: &LineIndex,
    hint: LineColumn,
    ticks: usize,
    cursor: usize,
) -> Option<Range<usize>> {
    let bytes = content.as_bytes();
    let hinted = lines
        .offset(hint)
        .checked_sub(ticks)
        .filter(|&open| open >= cursor)
        .and_then(|open| backtick_run(bytes, open, ticks).filter(|run| run.start == open))
        .filter(|run| run.start == 0 || bytes[run.start - 1] != b'`');
    let open = match hinted {
        Some(run) => run,
        None => backtick_run(bytes, cursor, ticks)?,
    };
    let close = backtick_run(bytes, open.end, ticks)?;
    Some(open.start..close.end)
}

/// Next run of exactly `n` backticks at or after `from`
fn backtick_run(bytes: &[u8], from: usize, n: usize) -> Option<Range<usize>> {
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i] == b'`' {
            i += 1;
        }
        if i - start == n {
            return Some(start..i);
        }
    }
    None
}
