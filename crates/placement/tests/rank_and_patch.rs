use pretty_assertions::assert_eq;
use snippet_placement::{
    PatchTransaction, PatchWriter, PlacementError, RankerConfig, SnippetIntegrator, SnippetRanker,
};
use std::fs;
use tempfile::TempDir;

const SNIPPET: &str = "def foo():\n    return 1";

fn ranker() -> SnippetRanker {
    SnippetRanker::new(RankerConfig::default()).expect("ranker")
}

#[test]
fn exact_file_ranks_with_full_structural_match() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("only.py"), "def foo():\n    return 1\n").expect("write");

    let placements = ranker().rank(SNIPPET, temp.path()).expect("rank");
    assert_eq!(placements.len(), 1);

    let best = &placements[0];
    assert!(best.file_path.ends_with("only.py"));
    assert_eq!((best.start_line, best.end_line), (1, 2));
    assert_eq!(best.matched_text, SNIPPET);
    assert_eq!(best.signals.first_line, 1.0);
    assert_eq!(best.signals.string_similarity, 1.0);
    assert_eq!(best.signals.ast_similarity, 1.0);
    assert_eq!(best.signals.end_line, 1.0);
    // a bare function has no names, so keyword overlap contributes nothing
    assert_eq!(best.signals.keyword_overlap, 0.0);
    assert!((best.confidence - 0.9).abs() < 1e-9);
}

#[test]
fn verbatim_occurrence_inside_larger_file() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("module.py"),
        "\
import math

def area(r):
    return math.pi * r * r

def foo():
    return 1

def bar():
    return 2
",
    )
    .expect("write");

    let placements = ranker().rank(SNIPPET, temp.path()).expect("rank");
    assert_eq!(placements.len(), 1);

    let best = &placements[0];
    assert_eq!(best.signals.string_similarity, 1.0);
    assert!(best.confidence > 0.3);
    assert_eq!((best.start_line, best.end_line), (6, 7));
    assert_eq!(best.matched_text, "def foo():\n    return 1");
}

#[test]
fn returns_top_two_with_ties_in_path_order() {
    let temp = TempDir::new().expect("tempdir");
    let exact = "def foo():\n    return 1\n";
    fs::write(temp.path().join("c_exact.py"), exact).expect("write");
    fs::write(temp.path().join("a_exact.py"), exact).expect("write");
    fs::write(
        temp.path().join("b_partial.py"),
        "def foo():\n    value = compute()\n    return value\n",
    )
    .expect("write");

    let placements = ranker().rank(SNIPPET, temp.path()).expect("rank");
    assert_eq!(placements.len(), 2);
    assert!(placements[0].file_path.ends_with("a_exact.py"));
    assert!(placements[1].file_path.ends_with("c_exact.py"));
    assert!(placements[0].confidence >= placements[1].confidence);
}

#[test]
fn ranking_is_sorted_by_confidence() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("a_partial.py"),
        "def foo():\n    value = compute()\n    return value\n",
    )
    .expect("write");
    fs::write(temp.path().join("b_exact.py"), "def foo():\n    return 1\n").expect("write");

    let placements = ranker().rank(SNIPPET, temp.path()).expect("rank");
    assert_eq!(placements.len(), 2);
    assert!(placements[0].file_path.ends_with("b_exact.py"));
    assert!(placements[0].confidence > placements[1].confidence);
}

#[test]
fn scores_are_deterministic() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("m.py"),
        "def foo():\n    x = 1\n    return x\n",
    )
    .expect("write");

    let first = ranker().rank(SNIPPET, temp.path()).expect("rank");
    let second = ranker().rank(SNIPPET, temp.path()).expect("rank");
    assert_eq!(first, second);
}

#[test]
fn integrate_patches_method_at_class_depth() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("greeter.py");
    let original = "\
class Greeter:
    def greet(self):
        return \"hi\"

    def name(self):
        return \"g\"
";
    fs::write(&path, original).expect("write");

    let integrator = SnippetIntegrator::new(RankerConfig::default()).expect("integrator");
    let snippet = "def greet(self):\n    return \"hello\"";
    let (placement, tx) = integrator
        .integrate(snippet, temp.path(), 0)
        .expect("integrate")
        .expect("placement");

    assert_eq!((placement.start_line, placement.end_line), (2, 3));
    assert_eq!(tx.backup_path, temp.path().join("greeter.old"));
    assert_eq!(fs::read_to_string(&tx.backup_path).expect("backup"), original);
    assert_eq!(
        fs::read_to_string(&path).expect("patched"),
        "\
class Greeter:
    def greet(self):
        return \"hello\"

    def name(self):
        return \"g\"
"
    );
}

#[test]
fn preview_computes_patch_without_writing() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("only.py");
    let original = "def foo():\n    return 1\n";
    fs::write(&path, original).expect("write");

    let integrator = SnippetIntegrator::new(RankerConfig::default()).expect("integrator");
    let placement = integrator
        .select("def foo():\n    return 2", temp.path(), 0)
        .expect("select")
        .expect("placement");
    let tx = integrator
        .preview("def foo():\n    return 2", &placement)
        .expect("preview");

    assert_eq!(tx.new_content, "def foo():\n    return 2\n");
    assert_eq!(fs::read_to_string(&path).expect("read"), original);
    assert!(!tx.backup_path.exists());
}

#[test]
fn integrate_without_match_changes_nothing() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("queue.py");
    fs::write(&path, "class Queue:\n    pass\n").expect("write");

    let integrator = SnippetIntegrator::new(RankerConfig::default()).expect("integrator");
    let outcome = integrator
        .integrate("total = price * count", temp.path(), 0)
        .expect("integrate");

    assert!(outcome.is_none());
    assert!(!temp.path().join("queue.old").exists());
}

#[test]
fn pick_beyond_results_is_invalid_input() {
    let temp = TempDir::new().expect("tempdir");
    fs::write(temp.path().join("only.py"), "def foo():\n    return 1\n").expect("write");

    let integrator = SnippetIntegrator::new(RankerConfig::default()).expect("integrator");
    let err = integrator.integrate(SNIPPET, temp.path(), 3).unwrap_err();
    assert!(matches!(err, PlacementError::InvalidInput(_)));
}

#[test]
fn apply_to_vanished_file_is_file_not_found() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("only.py");
    fs::write(&path, "def foo():\n    return 1\n").expect("write");

    let integrator = SnippetIntegrator::new(RankerConfig::default()).expect("integrator");
    let placements = integrator.locate(SNIPPET, temp.path()).expect("locate");
    fs::remove_file(&path).expect("remove");

    let err = integrator.apply(SNIPPET, &placements[0]).unwrap_err();
    assert!(matches!(err, PlacementError::FileNotFound(_)));
}

#[test]
fn backup_survives_failed_overwrite_and_restores_bytes() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("data.py");
    let original = b"value = 1\r\n# trailing comment without newline";
    fs::write(&path, original).expect("write");

    let writer = PatchWriter::new();
    let tx = PatchTransaction::new(&path, "value = 2\n");
    writer.backup(&tx).expect("backup");
    assert_eq!(fs::read(&tx.backup_path).expect("backup bytes"), original);

    fs::write(&path, b"val").expect("partial write");
    writer.restore(&tx).expect("restore");
    assert_eq!(fs::read(&path).expect("restored bytes"), original);
}
