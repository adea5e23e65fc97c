//! Cross-process determinism: the `search_fixture` binary prints the same
//! single-worker result sequence regardless of cwd and environment.

use std::process::Command;

/// Resolve the path to the compiled binary.
///
/// `cargo test` puts test binaries in `target/debug/deps/`; the
/// `search_fixture` binary lives one directory up.
fn binary_path() -> std::path::PathBuf {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path
}

fn run_fixture(traversal: &str, cwd: &std::path::Path, env: &[(&str, &str)]) -> String {
    let mut command = Command::new(binary_path());
    command.arg(traversal).current_dir(cwd);
    for (key, value) in env {
        command.env(key, value);
    }
    let output = command.output().expect("search_fixture runs");
    assert!(output.status.success(), "search_fixture failed: {output:?}");
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn fixture_output_is_stable_across_processes() {
    let tmp = tempfile::tempdir().unwrap();
    let root = std::env::temp_dir();
    for traversal in ["bfs", "dfs"] {
        let baseline = run_fixture(traversal, &root, &[]);
        assert!(baseline.contains("results="));
        let variants = [
            run_fixture(traversal, tmp.path(), &[("LC_ALL", "C")]),
            run_fixture(traversal, &root, &[("TZ", "Pacific/Chatham"), ("RUST_LOG", "debug")]),
            run_fixture(traversal, tmp.path(), &[("CRUCIBLE_GRAPH", "/nonexistent")]),
        ];
        for variant in variants {
            assert_eq!(variant, baseline, "traversal {traversal}");
        }
    }
}
