use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const CONFIG: &str = r#"
source: src
destination: build
metadata:
  site: Example
templates:
  engine: tera
  pattern: "*.md"
  default: post.html
"#;

fn strata_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("strata"))
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, contents).expect("write file");
}

fn init_site(config: &str) -> TempDir {
    let site = TempDir::new().expect("site");
    let root = site.path();
    write(root, "strata.yaml", config);
    write(
        root,
        "templates/post.html",
        "---\ntemplate: base.html\n---\n<h1>{{ title }}</h1>{{ contents }}",
    );
    write(root, "templates/base.html", "<html>{{ site }}|{{ contents }}</html>");
    write(root, "src/hello.md", "---\ntitle: Hello\n---\nHi");
    write(root, "src/notes.txt", "{{ not a template }}");
    site
}

#[test]
fn render_writes_layout_chain_output() {
    let site = init_site(CONFIG);
    let config = site.path().join("strata.yaml");

    strata_cmd()
        .arg("render")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("rendered 1 of 2 documents (2 layers)"));

    let build = site.path().join("build");
    assert_eq!(
        fs::read_to_string(build.join("hello.md")).unwrap(),
        "<html>Example|<h1>Hello</h1>Hi</html>"
    );
    assert_eq!(
        fs::read_to_string(build.join("notes.txt")).unwrap(),
        "{{ not a template }}"
    );
}

#[test]
fn second_render_reports_unchanged_files() {
    let site = init_site(CONFIG);
    let config = site.path().join("strata.yaml");

    strata_cmd()
        .args(["render", "--config"])
        .arg(&config)
        .assert()
        .success();
    strata_cmd()
        .args(["render", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("·"));
}

#[test]
fn dry_run_reports_files_and_writes_nothing() {
    let site = init_site(CONFIG);
    let config = site.path().join("strata.yaml");

    strata_cmd()
        .args(["render", "--dry-run", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("[dry-run]"))
        .stdout(contains("hello.md"));

    assert!(
        !site.path().join("build").exists(),
        "dry-run must not create the destination"
    );
}

#[test]
fn select_json_lists_selection_and_layout() {
    let site = init_site(CONFIG);
    let config = site.path().join("strata.yaml");

    let output = strata_cmd()
        .args(["select", "--json", "--config"])
        .arg(&config)
        .output()
        .expect("run strata select");
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["path"], "hello.md");
    assert_eq!(rows[0]["selected"], true);
    assert_eq!(rows[0]["layout"], "post.html");
    assert_eq!(rows[1]["path"], "notes.txt");
    assert_eq!(rows[1]["selected"], false);
    assert!(rows[1]["layout"].is_null());
}

#[test]
fn select_table_names_documents() {
    let site = init_site(CONFIG);
    let config = site.path().join("strata.yaml");

    strata_cmd()
        .args(["select", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("hello.md"))
        .stdout(contains("post.html"))
        .stdout(contains("1 of 2 documents selected"));
}

#[test]
fn path_overrides_resolve_against_the_working_directory() {
    let site = init_site(CONFIG);
    let config = site.path().join("strata.yaml");
    let work = TempDir::new().expect("work");
    write(work.path(), "input/page.md", "---\ntitle: Cwd\n---\nBody");

    strata_cmd()
        .current_dir(work.path())
        .args(["render", "--source", "input", "--destination", "out", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(contains("rendered 1 of 1 documents"));

    assert_eq!(
        fs::read_to_string(work.path().join("out/page.md")).unwrap(),
        "<html>Example|<h1>Cwd</h1>Body</html>"
    );
    assert!(!site.path().join("build").exists());
    assert!(!site.path().join("out").exists());
}

#[test]
fn missing_engine_fails_before_reading_documents() {
    let site = init_site("templates:\n  pattern: \"*.md\"\n");
    let config = site.path().join("strata.yaml");

    strata_cmd()
        .args(["render", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("\"engine\" option required"));

    assert!(!site.path().join("build").exists());
}

#[test]
fn missing_config_is_reported() {
    let site = TempDir::new().unwrap();
    strata_cmd()
        .args(["render", "--config"])
        .arg(site.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(contains("absent.yaml"));
}
