//! Section boundary resolution over plain markdown lines.
//!
//! A section is a heading line plus everything below it, up to (not including)
//! the next heading at the same or a shallower level. Everything here is a
//! pure function over an ordered sequence of lines: the live editor surface
//! and the read-only reader surface both feed the same [`LineSource`]
//! abstraction, so they cannot drift apart.

use std::borrow::Cow;

/// Ordered sequence of document lines, as supplied by either surface.
///
/// Results must be stable for the duration of one resolver call; callers
/// provide a fresh snapshot if the underlying document mutates between calls.
pub trait LineSource {
    /// Number of lines in the document.
    fn line_count(&self) -> usize;
    /// The line at `index` (0-based), without its trailing newline.
    fn line(&self, index: usize) -> Cow<'_, str>;
}

impl<S: AsRef<str>> LineSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Cow<'_, str> {
        Cow::Borrowed(self[index].as_ref())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// Parsed view of one heading line.
pub struct Header {
    /// Nesting depth: the count of leading `#` characters (1 for top-level).
    pub level: usize,
    /// Heading text without the hash run or surrounding whitespace.
    pub title: String,
    /// Character column where the title text begins.
    pub title_start: usize,
    /// Character column just past the end of the title text.
    pub title_end: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Inclusive, 0-based line range of a resolved section.
pub struct SectionRange {
    /// First line of the selection.
    pub start_line: usize,
    /// Final line of the selection (inclusive).
    pub end_line: usize,
}

impl SectionRange {
    #[must_use]
    /// Number of lines covered by the range.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    #[must_use]
    /// Whether `line_index` falls inside the range.
    pub fn contains(&self, line_index: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line_index)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Character-column span of a heading's title text on its own line.
pub struct TitleSpan {
    /// Column of the first title character.
    pub start_col: usize,
    /// Column just past the last title character.
    pub end_col: usize,
}

#[must_use]
/// Parse a heading line: one or more `#`, at least one whitespace character,
/// then non-empty title text.
///
/// Returns `None` for anything else (leading whitespace, a bare hash run, no
/// separator after the hashes). Trailing whitespace after the title is
/// excluded from the span. Columns count characters, not bytes.
pub fn parse_header(line: &str) -> Option<Header> {
    let mut chars = line.chars().peekable();

    let mut level = 0;
    while chars.peek() == Some(&'#') {
        level += 1;
        chars.next();
    }
    if level == 0 {
        return None;
    }

    let mut gap = 0;
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        gap += 1;
        chars.next();
    }
    if gap == 0 {
        return None;
    }

    let rest: String = chars.collect();
    let title = rest.trim_end();
    if title.is_empty() {
        return None;
    }

    let title_start = level + gap;
    Some(Header {
        level,
        title: title.to_string(),
        title_start,
        title_end: title_start + title.chars().count(),
    })
}

#[must_use]
/// Resolve the inclusive line range of the section under the heading at
/// `header_line_index`.
///
/// The section ends on the line before the next heading whose level is less
/// than or equal to this heading's level; deeper headings (more hashes) stay
/// inside the section. With no such heading the section runs to the last line
/// of the document.
///
/// When `include_heading` is false the range starts below the heading, and a
/// body-less section yields `None` (nothing to select). When it is true a
/// body-less section collapses to the heading line alone.
///
/// Returns `None` when the index is out of bounds or the line is not a
/// heading: callers probe lines routinely, so a non-heading is a normal
/// outcome, not an error.
pub fn resolve_section_range<L>(
    lines: &L,
    header_line_index: usize,
    include_heading: bool,
) -> Option<SectionRange>
where
    L: LineSource + ?Sized,
{
    let line_count = lines.line_count();
    if header_line_index >= line_count {
        return None;
    }
    let header = parse_header(&lines.line(header_line_index))?;

    let mut end_line = line_count - 1;
    for index in (header_line_index + 1)..line_count {
        if let Some(next) = parse_header(&lines.line(index)) {
            if next.level <= header.level {
                end_line = index - 1;
                break;
            }
        }
    }

    let start_line = if include_heading {
        header_line_index
    } else {
        header_line_index + 1
    };

    if start_line > end_line {
        // Heading with no body and the heading itself excluded.
        return None;
    }

    Some(SectionRange {
        start_line,
        end_line,
    })
}

#[must_use]
/// Resolve the column span of the title text on the heading at
/// `header_line_index`, or `None` when the line is not a heading.
pub fn resolve_title_span<L>(lines: &L, header_line_index: usize) -> Option<TitleSpan>
where
    L: LineSource + ?Sized,
{
    if header_line_index >= lines.line_count() {
        return None;
    }
    let header = parse_header(&lines.line(header_line_index))?;
    Some(TitleSpan {
        start_col: header.title_start,
        end_col: header.title_end,
    })
}

#[must_use]
/// Every heading in the document, in order, as `(line index, header)` pairs.
pub fn scan_headers<L>(lines: &L) -> Vec<(usize, Header)>
where
    L: LineSource + ?Sized,
{
    (0..lines.line_count())
        .filter_map(|index| parse_header(&lines.line(index)).map(|header| (index, header)))
        .collect()
}

#[must_use]
/// The text covered by a resolved range, lines joined with `\n`.
pub fn section_text<L>(lines: &L, range: SectionRange) -> String
where
    L: LineSource + ?Sized,
{
    (range.start_line..=range.end_line)
        .map(|index| lines.line(index).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
