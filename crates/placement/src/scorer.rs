use crate::types::MatchSignals;
use snippet_syntax::SourceTree;
use std::collections::HashSet;

/// Number of trailing snippet lines probed by the end-line signal
pub const END_LINE_PROBE: usize = 3;

/// Computes the similarity signals between a snippet and a target file.
///
/// Pure and deterministic: the same `(target, snippet)` pair always yields
/// the same signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer;

impl MatchScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, target: &str, snippet: &str) -> MatchSignals {
        let target_lines: Vec<&str> = target.lines().collect();
        let snippet_lines: Vec<&str> = snippet.lines().collect();

        let first = snippet_lines.first().copied().unwrap_or_default();
        let tail = trailing(&snippet_lines, END_LINE_PROBE);

        let target_tree = SourceTree::parse(target).ok();
        let snippet_tree = SourceTree::parse(snippet).ok();
        let trees = target_tree.as_ref().zip(snippet_tree.as_ref());

        MatchSignals {
            first_line: first_line_signal(&target_lines, first),
            string_similarity: string_similarity(target, snippet),
            ast_similarity: trees.map_or(0.0, |(t, s)| ast_similarity(t, s)),
            keyword_overlap: trees.map_or(0.0, |(t, s)| keyword_overlap(t, s)),
            end_line: end_line_signal(&target_lines, tail),
        }
    }
}

/// Decided by the first target line that contains the trimmed first line:
/// 1.0 when that line equals it once trimmed, 0.8 otherwise. 0.0 without a hit.
pub fn first_line_signal(target_lines: &[&str], first_line: &str) -> f64 {
    let probe = first_line.trim();
    target_lines
        .iter()
        .map(|line| line.trim())
        .find(|line| line.contains(probe))
        .map_or(0.0, |line| if line == probe { 1.0 } else { 0.8 })
}

/// 1.0 on a verbatim occurrence, otherwise the share of the snippet's
/// whitespace-separated tokens that also occur in the target
pub fn string_similarity(target: &str, snippet: &str) -> f64 {
    if target.contains(snippet) {
        return 1.0;
    }

    let snippet_tokens: HashSet<&str> = snippet.split_whitespace().collect();
    if snippet_tokens.is_empty() {
        return 0.0;
    }
    let target_tokens: HashSet<&str> = target.split_whitespace().collect();
    let shared = snippet_tokens.intersection(&target_tokens).count();
    shared as f64 / snippet_tokens.len() as f64
}

/// Ratio of syntax node counts, snippet over target, capped at 1.0
pub fn ast_similarity(target: &SourceTree, snippet: &SourceTree) -> f64 {
    let target_nodes = target.node_count();
    if target_nodes == 0 {
        return 0.0;
    }
    (snippet.node_count() as f64 / target_nodes as f64).min(1.0)
}

/// Share of the snippet's names that the target also uses
pub fn keyword_overlap(target: &SourceTree, snippet: &SourceTree) -> f64 {
    let snippet_names = snippet.name_references();
    if snippet_names.is_empty() {
        return 0.0;
    }
    let target_names = target.name_references();
    let shared = snippet_names.intersection(&target_names).count();
    shared as f64 / snippet_names.len() as f64
}

/// Slides a window of `tail.len()` lines over the target.
///
/// The first window where some trimmed tail line is contained in its
/// corresponding line decides: 1.0 if every tail line is, 0.8 otherwise.
/// 0.0 when no window has a hit.
pub fn end_line_signal(target_lines: &[&str], tail: &[&str]) -> f64 {
    if tail.is_empty() || target_lines.len() < tail.len() {
        return 0.0;
    }

    for window in target_lines.windows(tail.len()) {
        let hits = window
            .iter()
            .zip(tail)
            .filter(|(line, wanted)| line.trim().contains(wanted.trim()))
            .count();
        if hits == tail.len() {
            return 1.0;
        }
        if hits > 0 {
            return 0.8;
        }
    }
    0.0
}

/// The last `count` lines (all of them when shorter)
pub fn trailing<'a, 'b>(lines: &'b [&'a str], count: usize) -> &'b [&'a str] {
    &lines[lines.len().saturating_sub(count)..]
}
