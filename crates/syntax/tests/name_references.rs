use snippet_syntax::{Language, SourceTree};

#[test]
fn comprehension_and_loop_targets_are_names() {
    let code = r"
def squares(limit):
    out = [n * n for n in range(limit)]
    for item in out:
        print(item)
    return out
";
    let tree = SourceTree::parse(code).expect("parse");
    let names = tree.name_references();

    for expected in ["out", "n", "range", "limit", "item", "print"] {
        assert!(names.contains(expected), "missing {expected}: {names:?}");
    }
    assert!(!names.contains("squares"));
}

#[test]
fn exception_alias_is_not_a_name() {
    let code = r"
try:
    value = int(raw)
except ValueError as err:
    value = 0
";
    let tree = SourceTree::parse(code).expect("parse");
    let names = tree.name_references();

    assert!(names.contains("ValueError"));
    assert!(names.contains("raw"));
    assert!(!names.contains("err"), "alias leaked into names: {names:?}");
}

#[test]
fn unknown_language_is_rejected() {
    let result = SourceTree::parse_with_language("fn main() {}", Language::Unknown);
    assert!(result.is_err());
}

#[test]
fn larger_units_have_more_nodes() {
    let small = SourceTree::parse("x = 1\n").expect("parse");
    let large = SourceTree::parse("x = 1\ny = x + 2\nprint(y)\n").expect("parse");
    assert!(large.node_count() > small.node_count());
}
