//! CLI integration tests for sift commands.
//!
//! These tests focus on exit codes and the values a caller would bind,
//! not on table layout or colors which may change.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a sift command.
fn sift() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("sift").unwrap()
}

/// Helper to run `sift` in `cwd` with HOME isolated to `home`.
fn sift_in(home: &Path, cwd: &Path) -> Command {
    let mut cmd = sift();
    cmd.env("HOME", home).env_remove("RUST_LOG").current_dir(cwd);
    cmd
}

/// Runs a command that must succeed and parses its stdout as JSON.
fn json_output(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

mod normalize {
    use super::*;

    #[test]
    fn prints_canonical_form() {
        sift()
            .args(["normalize", "gene AND \"full name\" -excluded"])
            .assert()
            .success()
            .stdout("gene+\"full name\"+-excluded\n");
    }

    #[test]
    fn maps_wildcards_and_keywords() {
        sift()
            .args(["normalize", "BCL* OR x?"])
            .assert()
            .success()
            .stdout("BCL%,x_\n");
    }

    #[test]
    fn folds_keywords_next_to_punctuation() {
        sift()
            .args(["normalize", "a OR-b x-AND-y"])
            .assert()
            .success()
            .stdout("a,-b+x-+-y\n");
    }

    #[test]
    fn ignores_broken_config() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(work.path().join(".sift.toml"), "[query\n").unwrap();

        sift_in(home.path(), work.path())
            .args(["normalize", "a b"])
            .assert()
            .success()
            .stdout("a+b\n");
    }
}

mod sanitize {
    use super::*;

    #[test]
    fn strips_disallowed_characters() {
        sift()
            .args(["sanitize", "  drop;  table <b>x</b> "])
            .assert()
            .success()
            .stdout("drop table bxb\n");
    }
}

mod parse {
    use super::*;

    #[test]
    fn prints_tree() {
        let home = temp_dir();
        let assert = sift_in(home.path(), home.path())
            .args(["parse", "a -b"])
            .assert()
            .success();

        let stdout = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
        assert!(stdout.contains("a+-b"), "missing canonical form: {stdout}");
        assert!(stdout.contains("And"), "missing tree: {stdout}");
        assert!(stdout.contains("Not"), "missing tree: {stdout}");
        assert!(stdout.contains("Term(\"%b%\", contains)"), "missing term: {stdout}");
    }

    #[test]
    fn json_output_has_typed_nodes() {
        let home = temp_dir();
        let json = json_output(
            sift_in(home.path(), home.path()).args(["parse", "=BCL6,^TP", "--json"]),
        );

        assert_eq!(json["canonical"], "=BCL6,^TP");
        assert_eq!(json["tree"]["type"], "or");
        assert_eq!(json["tree"]["left"]["text"], "BCL6");
        assert_eq!(json["tree"]["left"]["kind"], "exact");
        assert_eq!(json["tree"]["right"]["text"], "TP%");
        assert_eq!(json["tree"]["right"]["kind"], "starts_with");
    }

    #[test]
    fn reports_syntax_errors_with_context() {
        let home = temp_dir();
        sift_in(home.path(), home.path())
            .args(["parse", "(a b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("missing closing parenthesis"))
            .stderr(predicate::str::contains("(a+b"))
            .stderr(predicate::str::contains("hint:"));
    }

    #[test]
    fn rejects_wildcards_in_exact_match() {
        let home = temp_dir();
        sift_in(home.path(), home.path())
            .args(["parse", "=BCL*"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("wildcards in exact match"));
    }

    #[test]
    fn enforces_configured_depth() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(
            work.path().join(".sift.toml"),
            "root = true\n[query]\nmax_depth = 2\n",
        )
        .unwrap();

        sift_in(home.path(), work.path())
            .args(["parse", "((a))"])
            .assert()
            .success();

        sift_in(home.path(), work.path())
            .args(["parse", "(((a)))"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("nesting too deep"));
    }
}

mod compile {
    use super::*;

    #[test]
    fn default_dialect_json() {
        let home = temp_dir();
        let json = json_output(
            sift_in(home.path(), home.path()).args(["compile", "A+B,=C+(D+E)", "--json"]),
        );

        assert_eq!(json["dialect"], "default");
        assert_eq!(
            json["fragment"],
            "(value LIKE ?1 AND value LIKE ?2) OR (value LIKE ?3 AND (value LIKE ?4 AND value LIKE ?5))"
        );
        assert_eq!(
            json["args"],
            serde_json::json!(["%A%", "%B%", "C", "%D%", "%E%"])
        );
        assert!(json.get("named_args").is_none());
    }

    #[test]
    fn prints_fragment_and_arguments() {
        let home = temp_dir();
        let assert = sift_in(home.path(), home.path())
            .args(["compile", "gene -pseudo"])
            .assert()
            .success();

        let stdout = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
        assert!(stdout.contains("value LIKE ?1 AND NOT (value LIKE ?2)"), "{stdout}");
        assert!(stdout.contains("%gene%"), "{stdout}");
        assert!(stdout.contains("%pseudo%"), "{stdout}");
    }

    #[test]
    fn uses_configured_dialect() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(
            work.path().join(".sift.toml"),
            r#"
root = true

[dialect.genes]
columns = ["gene_symbol", "ensembl_id"]
param = "named"
"#,
        )
        .unwrap();

        let json = json_output(
            sift_in(home.path(), work.path()).args(["compile", "BCL6,TP53", "-d", "genes", "--json"]),
        );

        assert_eq!(
            json["fragment"],
            "(gene_symbol LIKE :p1 OR ensembl_id LIKE :p1) OR (gene_symbol LIKE :p2 OR ensembl_id LIKE :p2)"
        );
        assert_eq!(json["named_args"]["p1"], "%BCL6%");
        assert_eq!(json["named_args"]["p2"], "%TP53%");
    }

    #[test]
    fn unknown_dialect_fails() {
        let home = temp_dir();
        sift_in(home.path(), home.path())
            .args(["compile", "a", "-d", "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown dialect 'nope'"));
    }

    #[test]
    fn rejects_anonymous_params_over_several_columns() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(
            work.path().join(".sift.toml"),
            "root = true\n\n[dialect.pos]\ncolumns = [\"a\", \"b\"]\nparam = \"anonymous\"\n",
        )
        .unwrap();

        sift_in(home.path(), work.path())
            .args(["compile", "x y", "-d", "pos"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "dialect 'pos' uses anonymous parameters with 2 columns",
            ));
    }

    #[test]
    fn sanitizes_unless_disabled() {
        let home = temp_dir();
        let json = json_output(
            sift_in(home.path(), home.path()).args(["compile", "café", "--json"]),
        );
        assert_eq!(json["args"], serde_json::json!(["%caf%"]));

        let json = json_output(
            sift_in(home.path(), home.path()).args(["compile", "café", "--json", "--no-sanitize"]),
        );
        assert_eq!(json["args"], serde_json::json!(["%café%"]));
    }

    #[test]
    fn flat_format() {
        let home = temp_dir();
        let json = json_output(
            sift_in(home.path(), home.path())
                .args(["compile", "foo+bar,=\"x y\"", "--flat", "--json"]),
        );

        assert_eq!(
            json["fragment"],
            "(value LIKE ?1 AND value LIKE ?2) OR (value LIKE ?3)"
        );
        assert_eq!(json["args"], serde_json::json!(["%foo%", "%bar%", "x y"]));
    }

    #[test]
    fn verbose_logs_to_stderr() {
        let home = temp_dir();
        sift_in(home.path(), home.path())
            .args(["-v", "compile", "a b", "--json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("normalized query"));
    }
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let home = temp_dir();
        let work = temp_dir();

        sift_in(home.path(), work.path())
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration written:"));

        let contents = fs::read_to_string(work.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [dialect.genes]"));
        assert!(!home.path().join(".sift.toml").exists());
    }

    #[test]
    fn fails_if_config_exists() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(work.path().join(".sift.toml"), "existing").unwrap();

        sift_in(home.path(), work.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn force_overwrites_existing() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(work.path().join(".sift.toml"), "old content").unwrap();

        sift_in(home.path(), work.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let contents = fs::read_to_string(work.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [query]"));
    }

    #[test]
    fn global_writes_to_home() {
        let home = temp_dir();
        let work = temp_dir();

        sift_in(home.path(), work.path())
            .args(["init", "--global"])
            .assert()
            .success();

        let contents = fs::read_to_string(home.path().join(".sift.toml")).unwrap();
        assert!(contents.contains("# [dialect.postgres]"));
        assert!(!work.path().join(".sift.toml").exists());
    }
}

mod config {
    use super::*;

    #[test]
    fn prints_effective_settings() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(
            work.path().join(".sift.toml"),
            "[query]\nmax_depth = 5\n\n[dialect.pg]\ncolumns = \"name\"\nparam = \"dollar\"\n",
        )
        .unwrap();

        sift_in(home.path(), work.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("max_depth = 5"))
            .stdout(predicate::str::contains("[dialect.default]"))
            .stdout(predicate::str::contains("[dialect.pg]"))
            .stdout(predicate::str::contains("param = \"dollar\""));
    }

    #[test]
    fn fails_on_invalid_config() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(work.path().join(".sift.toml"), "[query\n").unwrap();

        sift_in(home.path(), work.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

mod check {
    use super::*;

    #[test]
    fn passes_without_config() {
        let home = temp_dir();
        let work = temp_dir();

        sift_in(home.path(), work.path())
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("No issues found."));
    }

    #[test]
    fn fails_on_warnings() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(
            work.path().join(".sift.toml"),
            "[query]\ndialect = \"missing\"\n",
        )
        .unwrap();

        let assert = sift_in(home.path(), work.path())
            .arg("check")
            .assert()
            .failure();

        let stdout = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
        assert!(stdout.contains("Warnings (1):"), "{stdout}");
        assert!(stdout.contains("default dialect 'missing' is not defined"), "{stdout}");
    }

    #[test]
    fn warns_on_anonymous_multi_column_dialect() {
        let home = temp_dir();
        let work = temp_dir();
        fs::write(
            work.path().join(".sift.toml"),
            "root = true\n\n[dialect.pos]\ncolumns = [\"a\", \"b\"]\nparam = \"anonymous\"\n",
        )
        .unwrap();

        let assert = sift_in(home.path(), work.path())
            .arg("check")
            .assert()
            .failure();

        let stdout = strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout));
        assert!(
            stdout.contains("dialect 'pos' uses anonymous parameters with multiple columns"),
            "{stdout}"
        );
    }
}
