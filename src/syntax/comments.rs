//! Comment groups, doc text extraction and comment-to-declaration association.

use lazy_static::lazy_static;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use super::Position;

lazy_static! {
    /// `//word:word` tool directives such as `//go:generate` or `//nolint:errcheck`.
    static ref TOOL_DIRECTIVE: Regex = Regex::new(r"^[a-z0-9]+:[a-z0-9]").unwrap();
}

/// A run of adjacent comments with no tokens and no blank line between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub start: Position,
    pub end: Position,
    pub start_byte: usize,
    pub end_byte: usize,
    /// False when the first comment trails a token on the same line.
    pub own_line: bool,
    /// Raw comment texts, markers included.
    pub comments: Vec<String>,
}

impl CommentGroup {
    /// Documentation text with comment markers and directives removed.
    ///
    /// Lines are right-trimmed, runs of blank lines collapse to one, and
    /// leading/trailing blank lines are dropped.
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();

        for raw in &self.comments {
            if let Some(body) = raw.strip_prefix("//") {
                let body = match body.strip_prefix(' ') {
                    Some(rest) => rest,
                    None if is_directive(body) => continue,
                    None => body,
                };
                lines.push(body);
            } else if let Some(body) = raw.strip_prefix("/*") {
                let body = body.strip_suffix("*/").unwrap_or(body);
                lines.extend(body.split('\n'));
            }
        }

        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.trim_end();
            if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        out.join("\n")
    }

    /// Whether [`text`](Self::text) has any content.
    pub fn has_text(&self) -> bool {
        !self.text().is_empty()
    }
}

/// Whether a `//` comment body (markers removed) is a compiler or tool directive.
pub fn is_directive(body: &str) -> bool {
    body.starts_with("line ")
        || body.starts_with("extern ")
        || body.starts_with("export ")
        || TOOL_DIRECTIVE.is_match(body)
}

/// Collect the comments `query` captures under `root` into groups, in source order.
pub fn collect_groups(query: &Query, root: Node, source: &[u8]) -> Vec<CommentGroup> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source);

    let mut nodes = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            nodes.push(capture.node);
        }
    }
    nodes.sort_by_key(|n| n.start_byte());

    let mut groups: Vec<CommentGroup> = Vec::new();
    for node in nodes {
        let text = node.utf8_text(source).unwrap_or("").to_string();
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        if let Some(last) = groups.last_mut() {
            let gap = &source[last.end_byte..start_byte];
            let newlines = gap.iter().filter(|&&b| b == b'\n').count();
            let blank_gap = gap.iter().all(u8::is_ascii_whitespace);
            // A trailing group only extends along its own line.
            if blank_gap && newlines <= 1 && (last.own_line || newlines == 0) {
                last.end = Position::from_point(node.end_position());
                last.end_byte = end_byte;
                last.comments.push(text);
                continue;
            }
        }

        let line_start = start_byte - node.start_position().column;
        let own_line = source[line_start..start_byte]
            .iter()
            .all(u8::is_ascii_whitespace);

        groups.push(CommentGroup {
            start: Position::from_point(node.start_position()),
            end: Position::from_point(node.end_position()),
            start_byte,
            end_byte,
            own_line,
            comments: vec![text],
        });
    }

    groups
}

/// The doc comment of a node starting at `start_byte` on `line`.
///
/// That is the last group before the node when only whitespace separates
/// them, it ends on the line right above, and it does not trail another token.
pub fn doc_comment<'a>(
    groups: &'a [CommentGroup],
    source: &[u8],
    start_byte: usize,
    line: usize,
) -> Option<&'a CommentGroup> {
    let idx = groups.partition_point(|g| g.end_byte <= start_byte);
    let group = groups.get(idx.checked_sub(1)?)?;

    let between = &source[group.end_byte..start_byte];
    if !between.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    if !group.own_line || group.end.line + 1 != line {
        return None;
    }
    Some(group)
}

/// Byte and line extent of a top-level node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: usize,
    pub end_line: usize,
}

impl Extent {
    pub fn of(node: Node) -> Self {
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: node.start_position().row + 1,
            end_line: node.end_position().row + 1,
        }
    }
}

/// Map each comment group to the top-level node it belongs to.
///
/// `nodes` must be sorted and non-overlapping. Returns, per node, the
/// indices of its groups. Groups inside a node's extent belong to it. A
/// group between nodes `p` and `q` goes to `p` when it starts on the line
/// `p` ends, or on the next line with a blank line before `q`; otherwise it
/// goes to `q`. After the last node the file takes groups starting on the
/// line that node ends or the line after, and those are dropped. Any later
/// group goes to the last node.
pub fn associate(groups: &[CommentGroup], nodes: &[Extent]) -> Vec<Vec<usize>> {
    let mut owned = vec![Vec::new(); nodes.len()];

    for (gi, group) in groups.iter().enumerate() {
        let next = nodes.partition_point(|n| n.end_byte <= group.start_byte);

        if let Some(node) = nodes.get(next) {
            if node.start_byte <= group.start_byte {
                owned[next].push(gi);
                continue;
            }
        }

        let prev = next.checked_sub(1).map(|i| (i, nodes[i]));
        let following = nodes.get(next);

        let owner = match (prev, following) {
            (Some((pi, p)), Some(q))
                if p.end_line == group.start.line
                    || (p.end_line + 1 == group.start.line
                        && group.end.line + 1 < q.start_line) =>
            {
                Some(pi)
            }
            (_, Some(_)) => Some(next),
            (Some((pi, p)), None) if group.start.line > p.end_line + 1 => Some(pi),
            _ => None,
        };

        if let Some(oi) = owner {
            owned[oi].push(gi);
        }
    }

    owned
}
