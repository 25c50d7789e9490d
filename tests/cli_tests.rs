//! CLI smoke tests
//!
//! Argument parsing and startup failures only; network-touching paths
//! are covered by the client tests against scripted transports.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("grt")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("research"))
        .stdout(predicate::str::contains("quick-search"))
        .stdout(predicate::str::contains("analyze-urls"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_research_requires_a_query() {
    Command::cargo_bin("grt")
        .unwrap()
        .arg("research")
        .assert()
        .failure()
        .stderr(predicate::str::contains("QUERY"));
}

#[test]
fn test_analyze_urls_requires_a_url() {
    Command::cargo_bin("grt")
        .unwrap()
        .args(["analyze-urls", "compare these"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}

#[test]
fn test_missing_api_key_fails_cleanly() {
    Command::cargo_bin("grt")
        .unwrap()
        .env_remove("GEMINI_API_KEY")
        .args(["status", "interactions/abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_quick_search_alias_resolves() {
    // `qs` parses as quick-search; without a key it must fail cleanly
    Command::cargo_bin("grt")
        .unwrap()
        .env_remove("GEMINI_API_KEY")
        .args(["qs", "query"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
