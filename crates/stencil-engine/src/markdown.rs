//! Line-level markdown helpers shared by the scorers and validators.

use regex::Regex;

/// Compiles a pattern that is fixed at build time.
///
/// # Panics
/// Panics if the pattern is invalid, which is a programming error.
pub(crate) fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("Built-in pattern {pattern:?} is invalid: {err}"),
    }
}

/// Shortest run of backticks or tildes that delimits a code block.
const MIN_FENCE_LENGTH: usize = 3;

/// Opening delimiter of a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    /// `` ` `` or `~`
    pub marker: char,
    /// Length of the delimiter run
    pub length: usize,
}

impl Fence {
    /// Parses a fence opening line into the fence and its info string.
    ///
    /// A backtick fence whose info string contains a backtick is not a fence.
    pub fn open(line: &str) -> Option<(Self, &str)> {
        let trimmed = line.trim_start();
        let marker = trimmed
            .chars()
            .next()
            .filter(|character| matches!(character, '`' | '~'))?;
        let length = trimmed.chars().take_while(|character| *character == marker).count();
        if length < MIN_FENCE_LENGTH {
            return None;
        }

        let info = trimmed[length..].trim();
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some((Self { marker, length }, info))
    }

    /// Whether `line` closes this fence: same marker, at least as long, nothing after it.
    pub fn is_closed_by(self, line: &str) -> bool {
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|character| *character == self.marker).count();
        run >= self.length && run == trimmed.len()
    }
}

/// Where a line sits relative to fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'text> {
    /// Outside any code block
    Prose,
    /// Opens a code block; carries the info string
    FenceOpen(&'text str),
    /// Inside a code block
    Code,
    /// Closes the open code block
    FenceClose,
}

/// Follows fenced code blocks line by line.
#[derive(Debug, Default)]
pub struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    /// Classifies the next line and advances the fence state.
    pub fn classify<'text>(&mut self, line: &'text str) -> LineKind<'text> {
        match self.open {
            Some(fence) if fence.is_closed_by(line) => {
                self.open = None;
                LineKind::FenceClose
            }
            Some(_) => LineKind::Code,
            None => match Fence::open(line) {
                Some((fence, info)) => {
                    self.open = Some(fence);
                    LineKind::FenceOpen(info)
                }
                None => LineKind::Prose,
            },
        }
    }
}

/// A line that is not inside a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProseLine<'text> {
    /// One-based line number in the original text
    pub number: usize,
    /// Line content without the trailing newline
    pub text: &'text str,
}

/// Lines outside fenced code blocks. Fence delimiter lines are excluded.
pub fn prose_lines(text: &str) -> Vec<ProseLine<'_>> {
    let mut fences = FenceTracker::default();

    text.lines()
        .enumerate()
        .filter(|(_, line)| fences.classify(line) == LineKind::Prose)
        .map(|(index, line)| ProseLine {
            number: index + 1,
            text: line,
        })
        .collect()
}

/// Text with fenced code blocks removed, line breaks preserved between prose lines.
pub fn strip_fenced_code(text: &str) -> String {
    prose_lines(text)
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Level of an ATX heading line (`#` through `######`), if it is one.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|character| *character == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    (rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')).then_some(hashes)
}

/// Number of second-level headings outside fenced code.
pub fn count_h2(text: &str) -> usize {
    prose_lines(text)
        .iter()
        .filter(|line| heading_level(line.text) == Some(2))
        .count()
}
