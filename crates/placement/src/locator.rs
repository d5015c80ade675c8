use crate::scorer::{end_line_signal, trailing, END_LINE_PROBE};
use crate::types::LineSpan;

/// Trailing snippet lines used by the second, end-extending pass
pub const TAIL_PROBE: usize = 5;

/// Finds the line range of a target that a snippet should replace.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementLocator;

impl PlacementLocator {
    pub fn new() -> Self {
        Self
    }

    /// Best span for `snippet` in `target`, or `None` when the snippet's first
    /// line occurs nowhere in the target.
    ///
    /// A second pass probes with the snippet's last lines only; when it ends
    /// further down, its end bound replaces the first pass's.
    pub fn locate(&self, target: &str, snippet: &str) -> Option<LineSpan> {
        let target_lines: Vec<&str> = target.lines().collect();
        let snippet_lines: Vec<&str> = snippet.lines().collect();

        let mut span = best_match(&target_lines, &snippet_lines)?;
        let tail = trailing(&snippet_lines, TAIL_PROBE);
        if let Some(tail_span) = best_match(&target_lines, tail) {
            if tail_span.end_line > span.end_line {
                log::debug!(
                    "Tail probe extends placement end {} -> {}",
                    span.end_line,
                    tail_span.end_line
                );
                span.end_line = tail_span.end_line;
            }
        }
        Some(span)
    }
}

/// Scores every occurrence of the probe's first line and keeps the earliest
/// best one. The span is clamped to the end of the target.
fn best_match(target_lines: &[&str], probe: &[&str]) -> Option<LineSpan> {
    let first = probe.first()?.trim();
    let end_bonus = end_line_signal(target_lines, trailing(probe, END_LINE_PROBE));

    let mut best: Option<(f64, usize)> = None;
    for (offset, line) in target_lines.iter().enumerate() {
        if !line.trim().contains(first) {
            continue;
        }

        let reach = probe.len().min(target_lines.len() - offset);
        let followers = (1..reach)
            .filter(|&j| target_lines[offset + j].trim().contains(probe[j].trim()))
            .count();
        let score = 1.0 + followers as f64 + end_bonus;

        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, offset));
        }
    }

    best.map(|(_, offset)| {
        let end = (offset + probe.len()).min(target_lines.len());
        LineSpan::new(offset + 1, end)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TARGET: &str = "\
def helper():
    pass

def foo():
    x = 1
    y = 2
    return x + y
";

    #[test]
    fn finds_block_bounds() {
        let span = PlacementLocator::new()
            .locate(TARGET, "def foo():\n    x = 1\n    y = 2\n    return x + y")
            .unwrap();
        assert_eq!(span, LineSpan::new(4, 7));
    }

    #[test]
    fn absent_first_line_is_no_match() {
        assert_eq!(PlacementLocator::new().locate(TARGET, "def bar():\n    pass"), None);
    }

    #[test]
    fn prefers_occurrence_with_more_matching_followers() {
        let target = "if ready:\n    skip()\nif ready:\n    go()\n";
        let span = PlacementLocator::new().locate(target, "if ready:\n    go()").unwrap();
        assert_eq!(span, LineSpan::new(3, 4));
    }

    #[test]
    fn ties_keep_earliest_occurrence() {
        let target = "total = 0\ntotal = 0\n";
        let span = PlacementLocator::new().locate(target, "total = 0").unwrap();
        assert_eq!(span, LineSpan::new(1, 1));
    }

    #[test]
    fn end_is_clamped_to_target_length() {
        let span = PlacementLocator::new()
            .locate("a = 1\nb = 2\n", "b = 2\nc = 3\nd = 4")
            .unwrap();
        assert_eq!(span, LineSpan::new(2, 2));
    }

    #[test]
    fn tail_probe_extends_end() {
        // the real block has an extra line the snippet does not know about
        let target = "\
def run():
    load()
    prepare()
    work()
    work()
    work()
    report()
";
        let snippet = "\
def run():
    prepare()
    work()
    work()
    work()
    report()";
        let span = PlacementLocator::new().locate(target, snippet).unwrap();
        assert_eq!(span, LineSpan::new(1, 7));
    }
}
