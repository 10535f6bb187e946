//! End-to-end tests for the `kite` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn package() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{ "name": "shop", "version": "2.0.0", "dependencies": { "lodash": "^4.17.0" } }"#,
    )
    .unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(
        temp.path().join("src/repo.ts"),
        "export interface Repo { find(id: string): unknown }\n\
         export class MemoryRepo implements Repo { find(id: string) { return id; } }",
    )
    .unwrap();
    fs::write(
        temp.path().join("src/service.ts"),
        "import { MemoryRepo } from './repo';\n\
         import _ from 'lodash';\n\
         export class Service {\n\
           repo = new MemoryRepo();\n\
           load(id: string) { return this.repo; }\n\
         }",
    )
    .unwrap();
    temp
}

fn kite() -> Command {
    let mut cmd = Command::cargo_bin("kite").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("KITE_CONCURRENCY")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_analyze_prints_summary() {
    let temp = package();

    kite()
        .arg("analyze")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("shop@2.0.0"))
        .stdout(predicate::str::contains("classes 2"))
        .stdout(predicate::str::contains("class implements 1 resolved"));
}

#[test]
fn test_analyze_writes_json_file() {
    let temp = package();
    let out = temp.path().join("graph.json");

    kite()
        .args(["analyze", "--quiet", "--out"])
        .arg(&out)
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["package"]["name"], "shop");
    assert_eq!(written["package_imports"][0]["name"], "lodash");
    assert_eq!(written["modules"].as_array().unwrap().len(), 2);
}

#[test]
fn test_config_file_concurrency_is_validated() {
    let temp = package();
    fs::write(
        temp.path().join("kite.config.json"),
        r#"{ "concurrency": 0 }"#,
    )
    .unwrap();

    kite()
        .arg("analyze")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("concurrency"));
}

#[test]
fn test_missing_root_fails() {
    let temp = TempDir::new().unwrap();

    kite()
        .arg("analyze")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_broken_file_still_succeeds() {
    let temp = package();
    fs::write(temp.path().join("src/broken.ts"), "export class {").unwrap();

    kite()
        .arg("analyze")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 failed"));
}

#[test]
fn test_help_lists_analyze() {
    kite()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"));
}
