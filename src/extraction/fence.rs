//! Markdown fence scanner.
//!
//! A block opens with three backticks followed by an optional info string
//! and a newline. It closes at the next three backticks. An unterminated
//! block runs to the end of the input, which covers replies truncated by a
//! token limit. A block whose closing fence sits on the opening line is an
//! inline block; its first word is treated as the tag when more text
//! follows it.

const FENCE: &str = "```";

/// One fenced block found in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    tag: &'a str,
    body: &'a str,
}

impl<'a> FencedBlock<'a> {
    const fn new(tag: &'a str, body: &'a str) -> Self {
        Self { tag, body }
    }

    /// Returns the info-string tag, or an empty string for untagged blocks.
    #[must_use]
    pub const fn tag(&self) -> &'a str {
        self.tag
    }

    /// Returns the block body without the fences.
    #[must_use]
    pub const fn body(&self) -> &'a str {
        self.body
    }

    /// Returns whether the tag matches any of `tags`, ignoring ASCII case.
    #[must_use]
    pub fn has_tag_in(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }
}

/// Returns every fenced block in `input`, in order of appearance.
#[must_use]
pub fn fenced_blocks(input: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = input;

    while let Some((_, after_open)) = rest.split_once(FENCE) {
        let line_end = after_open.find('\n').unwrap_or(after_open.len());
        if let Some(close_at) = after_open.find(FENCE).filter(|at| *at < line_end) {
            let (inline, tail) = after_open.split_at(close_at);
            blocks.push(inline_block(inline));
            rest = tail.get(FENCE.len()..).unwrap_or_default();
            continue;
        }

        let (info, after_info) = after_open.split_once('\n').unwrap_or((after_open, ""));
        let tag = info.split_whitespace().next().unwrap_or_default();
        if let Some((body, tail)) = after_info.split_once(FENCE) {
            blocks.push(FencedBlock::new(tag, body));
            rest = tail;
        } else {
            blocks.push(FencedBlock::new(tag, after_info));
            break;
        }
    }

    blocks
}

/// Selects the payload of a reply.
///
/// Preference order: the first block tagged with one of `preferred_tags`,
/// then the first block of any tag, then the whole reply. The result is
/// trimmed.
#[must_use]
pub fn select_payload<'a>(input: &'a str, preferred_tags: &[&str]) -> &'a str {
    let blocks = fenced_blocks(input);
    let chosen = blocks
        .iter()
        .find(|block| block.has_tag_in(preferred_tags))
        .or_else(|| blocks.first())
        .map_or(input, FencedBlock::body);
    chosen.trim()
}

fn inline_block(inline: &str) -> FencedBlock<'_> {
    let trimmed = inline.trim_start();
    match trimmed.split_once(char::is_whitespace) {
        Some((word, remainder))
            if !remainder.trim().is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            FencedBlock::new(word, remainder)
        }
        _ => FencedBlock::new("", inline),
    }
}
