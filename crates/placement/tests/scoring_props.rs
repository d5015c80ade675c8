use proptest::prelude::*;
use snippet_placement::{IndentationAdapter, MatchScorer, PlacementLocator};

fn code_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6} = [0-9]{1,3}",
        "print\\([a-z]{1,6}\\)",
        "return [a-z]{1,6}",
        Just(String::new()),
    ]
}

fn code_block() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(code_line(), 1..12)
}

proptest! {
    #[test]
    fn confidence_is_bounded_and_deterministic(target in code_block(), snippet in code_block()) {
        let target = target.join("\n");
        let snippet = snippet.join("\n");
        let scorer = MatchScorer::new();

        let first = scorer.score(&target, &snippet);
        let second = scorer.score(&target, &snippet);
        prop_assert_eq!(first, second);

        let confidence = first.confidence();
        prop_assert!((0.0..=1.0 + 1e-9).contains(&confidence), "confidence {}", confidence);
    }

    #[test]
    fn verbatim_snippet_has_full_string_similarity(
        before in code_block(),
        snippet in code_block(),
        after in code_block(),
    ) {
        let snippet = snippet.join("\n");
        let target = format!("{}\n{}\n{}", before.join("\n"), snippet, after.join("\n"));

        let signals = MatchScorer::new().score(&target, &snippet);
        prop_assert_eq!(signals.string_similarity, 1.0);
        prop_assert!(signals.confidence() > 0.3);
    }

    #[test]
    fn located_spans_are_ordered_and_in_bounds(target in code_block(), snippet in code_block()) {
        let target = target.join("\n");
        let snippet = snippet.join("\n");
        prop_assume!(snippet.lines().next().is_some());

        match PlacementLocator::new().locate(&target, &snippet) {
            Some(span) => {
                prop_assert!(span.start_line >= 1);
                prop_assert!(span.start_line <= span.end_line);
                prop_assert!(span.end_line <= target.lines().count());
            }
            None => {
                let first = snippet.lines().next().unwrap_or_default().trim().to_string();
                prop_assert!(target.lines().all(|line| !line.trim().contains(first.as_str())));
            }
        }
    }

    #[test]
    fn equal_indentation_leaves_lines_untouched(
        indent in "[ ]{0,8}",
        body in prop::collection::vec("[a-z]{1,6}( = [0-9]{1,3})?", 1..8),
    ) {
        let snippet = body
            .iter()
            .map(|line| format!("{indent}{line}"))
            .collect::<Vec<_>>()
            .join("\n");

        let out = IndentationAdapter::new().reindent(&snippet, &indent, &indent);
        let expected: Vec<String> = snippet.lines().map(str::to_string).collect();
        prop_assert_eq!(out, expected);
    }
}
