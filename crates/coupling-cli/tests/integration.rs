#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
couplings:
  api-docs:
    sources: ["src/api/*.py"]
    docs: ["docs/api.md"]
    description: "HTTP API reference"
  overview:
    sources: ["src/**/*.py"]
    docs: ["docs/overview.md"]
    strength: soft
"#;

fn doc_coupling(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("doc-coupling").unwrap();
    cmd.current_dir(dir.path())
        .env("DOC_COUPLING_ROOT", dir.path())
        .env_remove("DOC_COUPLING_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "scripts/doc_coupling.yaml", config);
    write(dir.path(), "docs/api.md", "# API\n");
    write(dir.path(), "docs/overview.md", "# Overview\n");
    dir
}

// ---------------------------------------------------------------------------
// doc-coupling check
// ---------------------------------------------------------------------------

#[test]
fn check_hard_violation_exits_1() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args(["check", "--files", "src/api/users.py", "docs/overview.md"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[api-docs] HTTP API reference (hard)"))
        .stdout(predicate::str::contains("docs/api.md"))
        .stdout(predicate::str::contains("FAILED: 1 blocking violation(s)"));
}

#[test]
fn check_satisfied_exits_0() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args([
            "check",
            "--files",
            "src/api/users.py",
            "docs/api.md",
            "docs/overview.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doc coupling OK: 3 changed file(s)"));
}

#[test]
fn check_unrelated_files_exits_0() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args(["check", "--files", "README.md", "Cargo.toml"])
        .assert()
        .success();
}

#[test]
fn soft_violation_is_a_warning_by_default() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args(["check", "--files", "src/core/engine.py"])
        .assert()
        .success()
        .stderr(predicate::str::contains("soft coupling 'overview' not satisfied"));
}

#[test]
fn soft_violation_blocks_with_strict_flag() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args(["check", "--strict", "--files", "src/core/engine.py"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[overview]"))
        .stdout(predicate::str::contains("(strict mode)"));
}

#[test]
fn soft_violation_blocks_with_strict_setting() {
    let dir = project(CONFIG);
    write(
        dir.path(),
        "meta-process.yaml",
        "enforcement:\n  strict_doc_coupling: true\n",
    );
    doc_coupling(&dir)
        .args(["check", "--files", "src/core/engine.py"])
        .assert()
        .code(1);
}

#[test]
fn check_json_report() {
    let dir = project(CONFIG);
    let output = doc_coupling(&dir)
        .args(["--json", "check", "--files", "src/api/users.py"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["strict"], false);
    assert_eq!(report["checked_files"], 1);
    assert_eq!(report["violations"][0]["rule"], "api-docs");
    assert_eq!(report["violations"][0]["missing_docs"][0], "docs/api.md");
    assert_eq!(report["advisories"][0]["rule"], "overview");
    assert_eq!(report["advisories"][0]["severity"], "advisory");
}

#[test]
fn malformed_rule_exits_2_naming_rule() {
    let dir = project("couplings:\n  api:\n    sources: []\n    docs: [\"docs/api.md\"]\n");
    doc_coupling(&dir)
        .args(["check", "--files", "src/api/users.py"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rule 'api'"));
}

#[test]
fn invalid_glob_exits_2() {
    let dir = project("couplings:\n  api:\n    sources: [\"src/[api\"]\n    docs: [\"docs/api.md\"]\n");
    doc_coupling(&dir)
        .args(["check", "--files", "src/api/users.py"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid glob"));
}

#[test]
fn missing_config_exits_2() {
    let dir = TempDir::new().unwrap();
    doc_coupling(&dir)
        .args(["check", "--files", "src/api/users.py"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("coupling config not found"));
}

#[test]
fn config_flag_overrides_settings_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "meta/couplings.yaml", CONFIG);
    doc_coupling(&dir)
        .args([
            "--config",
            "meta/couplings.yaml",
            "check",
            "--files",
            "src/api/users.py",
        ])
        .assert()
        .code(1);
}

#[test]
fn config_flag_is_relative_to_working_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "meta/couplings.yaml", CONFIG);
    doc_coupling(&dir)
        .current_dir(dir.path().join("meta"))
        .args(["--config", "couplings.yaml", "check", "--files", "src/api/users.py"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[api-docs]"));
}

#[test]
fn settings_config_path_is_used() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "meta/couplings.yaml", CONFIG);
    write(
        dir.path(),
        "meta-process.yaml",
        "doc_coupling:\n  config: meta/couplings.yaml\n",
    );
    doc_coupling(&dir)
        .args(["check", "--files", "src/api/users.py"])
        .assert()
        .code(1);
}

#[test]
fn staged_changes_from_git() {
    if which::which("git").is_err() {
        return;
    }
    let dir = project(CONFIG);
    let git = |args: &[&str]| {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(dir.path())
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {args:?} failed");
    };
    git(&["init", "-q"]);
    git(&["config", "user.email", "test@example.com"]);
    git(&["config", "user.name", "Test"]);
    write(dir.path(), "src/api/users.py", "x = 1\n");
    git(&["add", "src/api/users.py"]);

    doc_coupling(&dir)
        .args(["check", "--staged"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("src/api/users.py"));

    git(&["add", "docs/api.md", "docs/overview.md"]);

    doc_coupling(&dir)
        .args(["check", "--staged"])
        .assert()
        .success();
}

#[test]
fn staged_rename_out_of_glob_still_requires_docs() {
    if which::which("git").is_err() {
        return;
    }
    let dir = project(CONFIG);
    let git = |args: &[&str]| {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(dir.path())
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {args:?} failed");
    };
    git(&["init", "-q"]);
    git(&["config", "user.email", "test@example.com"]);
    git(&["config", "user.name", "Test"]);
    git(&["config", "commit.gpgsign", "false"]);
    write(dir.path(), "src/api/users.py", "def users():\n    return []\n");
    git(&["add", "."]);
    git(&["commit", "-q", "--no-verify", "-m", "Initial"]);

    std::fs::create_dir_all(dir.path().join("lib")).unwrap();
    git(&["mv", "src/api/users.py", "lib/users.py"]);

    doc_coupling(&dir)
        .args(["check", "--staged"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[api-docs]"))
        .stdout(predicate::str::contains("src/api/users.py"));
}

// ---------------------------------------------------------------------------
// doc-coupling suggest
// ---------------------------------------------------------------------------

#[test]
fn suggest_lists_coupled_docs() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args(["suggest", "src/api/users.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> docs/api.md  (api-docs, hard)"))
        .stdout(predicate::str::contains("-> docs/overview.md  (overview, soft)"));
}

#[test]
fn suggest_uncoupled_file() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .args(["suggest", "README.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No couplings apply"));
}

// ---------------------------------------------------------------------------
// doc-coupling config
// ---------------------------------------------------------------------------

#[test]
fn config_show_lists_rules_in_order() {
    let dir = project(CONFIG);
    let output = doc_coupling(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let api = text.find("api-docs").unwrap();
    let overview = text.find("overview").unwrap();
    assert!(api < overview);
    assert!(text.contains("strict_doc_coupling: false"));
}

#[test]
fn config_validate_warns_on_missing_doc() {
    let dir = project(CONFIG);
    std::fs::remove_file(dir.path().join("docs/api.md")).unwrap();
    doc_coupling(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[warning] api-docs: doc 'docs/api.md' does not exist",
        ));
}

#[test]
fn config_validate_json() {
    let dir = project(CONFIG);
    let output = doc_coupling(&dir)
        .args(["config", "validate", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["rules"], 2);
    assert_eq!(value["config"], "scripts/doc_coupling.yaml");
    assert!(value["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn config_validate_json_warning_shape() {
    let dir = project(CONFIG);
    std::fs::remove_file(dir.path().join("docs/overview.md")).unwrap();
    let output = doc_coupling(&dir)
        .args(["config", "validate", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let warning = &value["warnings"][0];
    assert_eq!(warning["level"], "warning");
    assert_eq!(warning["rule"], "overview");
    assert_eq!(warning["message"], "doc 'docs/overview.md' does not exist");
}

#[test]
fn doc_entry_naming_no_file_exits_2() {
    let dir = project("couplings:\n  api:\n    sources: [\"src/api/*.py\"]\n    docs: [\"./\"]\n");
    doc_coupling(&dir)
        .args(["check", "--files", "src/api/users.py"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rule 'api'"));
}

#[test]
fn config_validate_rejects_malformed_config() {
    let dir = project("couplings:\n  api:\n    sources: [\"src/*.py\"]\n    docs: []\n");
    doc_coupling(&dir)
        .args(["config", "validate"])
        .assert()
        .code(2);
}

// ---------------------------------------------------------------------------
// doc-coupling links
// ---------------------------------------------------------------------------

#[test]
fn links_reports_broken_links() {
    let dir = project(CONFIG);
    write(dir.path(), "README.md", "See [api](docs/api.md) and [gone](docs/gone.md).\n");
    doc_coupling(&dir)
        .arg("links")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("README.md:1: broken link [gone](docs/gone.md)"));
}

#[test]
fn links_clean_tree_passes() {
    let dir = project(CONFIG);
    write(dir.path(), "docs/index.md", "[api](api.md) [home](https://example.com)\n");
    doc_coupling(&dir)
        .args(["links", "docs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All markdown links resolve."));
}

// ---------------------------------------------------------------------------
// doc-coupling init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_starter_files() {
    let dir = TempDir::new().unwrap();
    doc_coupling(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: meta-process.yaml"))
        .stdout(predicate::str::contains("created: scripts/doc_coupling.yaml"));

    assert!(dir.path().join("meta-process.yaml").exists());
    assert!(dir.path().join("scripts/doc_coupling.yaml").exists());

    doc_coupling(&dir).args(["config", "validate"]).assert().success();
}

#[test]
fn init_never_overwrites() {
    let dir = project(CONFIG);
    doc_coupling(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  scripts/doc_coupling.yaml"));
    let content = std::fs::read_to_string(dir.path().join("scripts/doc_coupling.yaml")).unwrap();
    assert_eq!(content, CONFIG);
}
