use abspath_guard::core::config::{ScanConfig, load_config};
use abspath_guard::core::error::GuardError;
use abspath_guard::core::harness;
use abspath_guard::core::rule::{self, Evaluation, GuardMatch, Probe};
use abspath_guard::core::walker::{FileOutcome, Scanner, scan};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const SCENARIO_A: &str = "<?php\nif (!defined('ABSPATH')) { return; }\nuse Foo\\Bar;\n";
const SCENARIO_B: &str = "<?php\nuse Foo\\Bar;\nif (!defined('ABSPATH')) { return; }\n";

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write fixture");
}

fn plugin_tree(root: &Path) {
    write(&root.join("admin/AdminHandler.php"), SCENARIO_A.as_bytes());
    write(&root.join("admin/index.php"), SCENARIO_A.as_bytes());
    write(&root.join("core/Settings.php"), SCENARIO_B.as_bytes());
    write(&root.join("core/helpers.php"), b"<?php\nfunction helper() {}\n");
    write(&root.join("data/Dal.php"), SCENARIO_A.as_bytes());
    write(&root.join("data/cache.bin.php"), &[0x00, 0xff, 0xfe, 0xc0]);
    write(&root.join("assets/notes.md"), SCENARIO_A.as_bytes());
}

#[test]
fn rule_is_inapplicable_without_both_patterns() {
    let only_guard = "<?php\nif (!defined('ABSPATH')) exit;\necho 'x';\n";
    let only_use = "<?php\nnamespace App;\nuse App\\Thing;\n";
    let neither = "<?php\necho 'hello';\n";
    for text in [only_guard, only_use, neither, ""] {
        assert_eq!(rule::evaluate(text), Evaluation::Inapplicable, "{text:?}");
    }
}

#[test]
fn rule_depends_only_on_first_occurrences() {
    let base = "<?php\nif (!defined('ABSPATH')) exit;\nuse A\\B;\n";
    let with_tail = format!("{base}use C\\D;\ndefined(\"ABSPATH\");\nuse E;\n");
    assert_eq!(rule::evaluate(base), rule::evaluate(&with_tail));
    assert!(rule::evaluate(&with_tail).is_violation());
}

#[test]
fn rule_boundary_is_strict() {
    let probe = Probe {
        use_offsets: vec![12],
        guard: Some(GuardMatch {
            offset: 12,
            text: "defined('ABSPATH')".to_string(),
        }),
    };
    assert!(!probe.evaluate().is_violation());

    let probe = Probe {
        use_offsets: vec![13],
        ..probe
    };
    assert!(probe.evaluate().is_violation());
}

#[test]
fn scenario_a_and_b_through_walker() {
    let tmp = tempdir().expect("tempdir");
    write(&tmp.path().join("A.php"), SCENARIO_A.as_bytes());
    write(&tmp.path().join("B.php"), SCENARIO_B.as_bytes());

    let flagged: Vec<PathBuf> = scan(tmp.path()).expect("scan").collect();
    assert_eq!(flagged, vec![tmp.path().join("A.php")]);
}

#[test]
fn index_php_is_excluded_regardless_of_content() {
    let tmp = tempdir().expect("tempdir");
    write(&tmp.path().join("index.php"), SCENARIO_A.as_bytes());
    write(&tmp.path().join("nested/index.php"), SCENARIO_A.as_bytes());

    assert_eq!(scan(tmp.path()).expect("scan").count(), 0);

    let summary = Scanner::new(ScanConfig {
        root: tmp.path().to_path_buf(),
        ..ScanConfig::default()
    })
    .summarize()
    .expect("summarize");
    assert_eq!(summary.candidates, 0);
}

#[test]
fn unreadable_files_do_not_abort_the_walk() {
    let tmp = tempdir().expect("tempdir");
    plugin_tree(tmp.path());

    let scanner = Scanner::new(ScanConfig {
        root: tmp.path().to_path_buf(),
        ..ScanConfig::default()
    });
    let outcomes: Vec<FileOutcome> = scanner.outcomes().collect();
    assert!(outcomes.contains(&FileOutcome::Skipped(tmp.path().join("data/cache.bin.php"))));

    let summary = scanner.summarize().expect("summarize");
    assert_eq!(summary.candidates, 5);
    assert_eq!(summary.skipped, 1);
    let flagged: Vec<&Path> = summary.flagged.iter().map(|f| f.path.as_path()).collect();
    assert_eq!(
        flagged,
        vec![
            tmp.path().join("admin/AdminHandler.php").as_path(),
            tmp.path().join("data/Dal.php").as_path(),
        ]
    );
}

#[test]
fn repeated_walks_produce_the_same_set() {
    let tmp = tempdir().expect("tempdir");
    plugin_tree(tmp.path());

    let first: BTreeSet<PathBuf> = scan(tmp.path()).expect("scan").collect();
    let second: BTreeSet<PathBuf> = scan(tmp.path()).expect("scan").collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn walker_paths_keep_the_root_prefix() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("src");
    write(&root.join("deep/er/Thing.php"), SCENARIO_A.as_bytes());

    let flagged: Vec<PathBuf> = scan(&root).expect("scan").collect();
    assert_eq!(flagged, vec![root.join("deep").join("er").join("Thing.php")]);
    assert!(flagged[0].starts_with(&root));
}

#[test]
fn missing_root_is_a_typed_error() {
    let tmp = tempdir().expect("tempdir");
    let scanner = Scanner::new(ScanConfig {
        root: tmp.path().join("nope"),
        ..ScanConfig::default()
    });
    match scanner.summarize() {
        Err(GuardError::RootNotFound(path)) => assert_eq!(path, tmp.path().join("nope")),
        other => panic!("expected RootNotFound, got {other:?}"),
    }
}

#[test]
fn custom_exclusions_and_suffix_apply() {
    let tmp = tempdir().expect("tempdir");
    write(&tmp.path().join("bootstrap.php"), SCENARIO_A.as_bytes());
    write(&tmp.path().join("index.php"), SCENARIO_A.as_bytes());
    write(&tmp.path().join("Widget.inc"), SCENARIO_A.as_bytes());
    fs::write(
        tmp.path().join("abspath-guard.toml"),
        format!(
            "root = {:?}\nexclude = [\"bootstrap.php\"]\n",
            tmp.path().display().to_string()
        ),
    )
    .expect("write config");

    let config = load_config(tmp.path(), None).expect("config");
    let summary = Scanner::new(config).summarize().expect("summarize");
    let flagged: Vec<PathBuf> = summary.flagged.into_iter().map(|f| f.path).collect();
    assert_eq!(flagged, vec![tmp.path().join("index.php")]);

    let config = ScanConfig {
        root: tmp.path().to_path_buf(),
        exclude: vec![],
        suffix: ".inc".to_string(),
    };
    let summary = Scanner::new(config).summarize().expect("summarize");
    assert_eq!(summary.flagged.len(), 1);
    assert_eq!(summary.flagged[0].path, tmp.path().join("Widget.inc"));
}

#[test]
fn harness_and_walker_agree_on_the_sample() {
    let tmp = tempdir().expect("tempdir");
    write(
        &tmp.path().join("StarmusAdmin.php"),
        harness::DEFAULT_SAMPLE.as_bytes(),
    );

    let lines = harness::report(harness::DEFAULT_SAMPLE);
    assert_eq!(lines.last().map(String::as_str), Some(harness::DETECTED_LINE));
    assert_eq!(scan(tmp.path()).expect("scan").count(), 1);
}
