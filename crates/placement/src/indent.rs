use crate::types::LineSpan;

/// Re-roots a snippet's indentation at the depth of the block it replaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentationAdapter;

impl IndentationAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Replace `span` of `existing` with `snippet`, re-indented to the depth of
    /// the span's first line. A trailing newline in `existing` is kept.
    pub fn splice(&self, existing: &str, snippet: &str, span: LineSpan) -> String {
        let lines: Vec<&str> = existing.lines().collect();
        let start = (span.start_line - 1).min(lines.len());
        let end = span.end_line.min(lines.len()).max(start);

        let target_indent = lines.get(start).map_or("", |line| leading_whitespace(line));
        let snippet_indent = snippet.lines().next().map_or("", leading_whitespace);
        let adjusted = self.reindent(snippet, target_indent, snippet_indent);

        let mut out: Vec<&str> = Vec::with_capacity(lines.len() + adjusted.len());
        out.extend_from_slice(&lines[..start]);
        out.extend(adjusted.iter().map(String::as_str));
        out.extend_from_slice(&lines[end..]);

        let mut updated = out.join("\n");
        if existing.ends_with('\n') {
            updated.push('\n');
        }
        updated
    }

    /// Re-indent every non-blank line: drop up to `snippet_indent`'s length
    /// of leading characters and prefix `target_indent`. Blank lines pass
    /// through untouched.
    pub fn reindent(&self, snippet: &str, target_indent: &str, snippet_indent: &str) -> Vec<String> {
        let strip = snippet_indent.chars().count();
        snippet
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    return line.to_string();
                }
                let rest = if line.chars().count() > strip {
                    line.char_indices()
                        .nth(strip)
                        .map_or("", |(idx, _)| &line[idx..])
                } else {
                    line.trim_start()
                };
                format!("{target_indent}{rest}")
            })
            .collect()
    }
}

/// Leading whitespace of a line
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reindent_preserves_relative_depth() {
        let snippet = "def foo():\n    if x:\n        return 1\n\n    return 2";
        let out = IndentationAdapter::new().reindent(snippet, "    ", "");
        assert_eq!(
            out,
            vec![
                "    def foo():",
                "        if x:",
                "            return 1",
                "",
                "        return 2",
            ]
        );
    }

    #[test]
    fn reindent_dedents_to_shallower_target() {
        let snippet = "        x = 1\n            y = 2";
        let out = IndentationAdapter::new().reindent(snippet, "", "        ");
        assert_eq!(out, vec!["x = 1", "    y = 2"]);
    }

    #[test]
    fn reindent_fully_strips_lines_shorter_than_indent() {
        let snippet = "        x = 1\n  y";
        let out = IndentationAdapter::new().reindent(snippet, "\t", "        ");
        assert_eq!(out, vec!["\tx = 1", "\ty"]);
    }

    #[test]
    fn blank_lines_pass_through() {
        let out = IndentationAdapter::new().reindent("a\n   \nb", "  ", "");
        assert_eq!(out, vec!["  a", "   ", "  b"]);
    }

    #[test]
    fn splice_replaces_span_at_target_depth() {
        let existing = "class A:\n    def foo(self):\n        return 0\n\nx = A()\n";
        let snippet = "def foo(self):\n    return 42";
        let updated = IndentationAdapter::new().splice(existing, snippet, LineSpan::new(2, 3));
        assert_eq!(
            updated,
            "class A:\n    def foo(self):\n        return 42\n\nx = A()\n"
        );
    }

    #[test]
    fn splice_without_trailing_newline() {
        let updated = IndentationAdapter::new().splice("a = 1\nb = 2", "b = 3", LineSpan::new(2, 2));
        assert_eq!(updated, "a = 1\nb = 3");
    }

    #[test]
    fn leading_whitespace_handles_tabs() {
        assert_eq!(leading_whitespace("\t  x"), "\t  ");
        assert_eq!(leading_whitespace("x"), "");
        assert_eq!(leading_whitespace("   "), "   ");
    }
}
