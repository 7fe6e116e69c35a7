use super::*;

use crate::foundation::error::SvgVariantsError;

fn outcome(index: usize, rel: &str, result: SvgVariantsResult<Vec<u8>>) -> VariantOutcome {
    VariantOutcome {
        index,
        variant: VariantSpec::default(),
        output_path: PathBuf::from(rel),
        result,
    }
}

#[test]
fn dir_sink_writes_successes_and_records_failures() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = DirSink::new(tmp.path());

    sink.begin(2).unwrap();
    sink.push(outcome(0, "nested/a.png", Ok(vec![1, 2, 3])))
        .unwrap();
    sink.push(outcome(
        1,
        "b.png",
        Err(SvgVariantsError::render("boom")),
    ))
    .unwrap();
    let stats = RunStats {
        total: 2,
        succeeded: 1,
        failed: 1,
        peak_active: 2,
    };
    sink.end(&stats).unwrap();

    let a = tmp.path().join("nested/a.png");
    assert_eq!(std::fs::read(&a).unwrap(), vec![1, 2, 3]);
    assert!(!tmp.path().join("b.png").exists());
    assert_eq!(sink.written(), &[a]);
    assert_eq!(sink.failures().len(), 1);
    assert_eq!(sink.failures()[0].0, tmp.path().join("b.png"));
    assert!(sink.failures()[0].1.contains("boom"));
    assert_eq!(sink.stats(), Some(stats));
}

#[test]
fn dir_sink_write_failure_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    // A regular file where the output directory should be.
    let blocker = tmp.path().join("out");
    std::fs::write(&blocker, b"x").unwrap();

    let mut sink = DirSink::new(&blocker);
    let err = sink
        .push(outcome(0, "a.png", Ok(vec![0])))
        .unwrap_err();
    assert!(matches!(err, SvgVariantsError::Other(_)));
    assert!(sink.written().is_empty());
}

#[test]
fn in_memory_sink_tracks_calls() {
    let mut sink = InMemorySink::new();
    assert_eq!(sink.total(), None);
    sink.begin(1).unwrap();
    sink.push(outcome(0, "a.png", Ok(Vec::new()))).unwrap();
    sink.end(&RunStats::default()).unwrap();

    assert_eq!(sink.total(), Some(1));
    assert_eq!(sink.outcomes().len(), 1);
    assert_eq!(sink.end_calls(), 1);
    assert_eq!(sink.stats(), Some(RunStats::default()));
}

#[test]
fn ensure_parent_dir_creates_missing_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("x/y/z.png");
    ensure_parent_dir(&path).unwrap();
    assert!(tmp.path().join("x/y").is_dir());
}

#[test]
fn dir_sink_rejects_paths_outside_out_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out");
    let mut sink = DirSink::new(&out);

    let err = sink
        .push(outcome(0, "../escaped.png", Ok(vec![1])))
        .unwrap_err();
    assert!(matches!(err, SvgVariantsError::Validation(_)));
    assert!(!tmp.path().join("escaped.png").exists());
    assert!(sink.written().is_empty());
}
