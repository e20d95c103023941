use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_all_modules() {
    Command::cargo_bin("shipaops")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("framework")
                .and(predicate::str::contains("application"))
                .and(predicate::str::contains("cluster"))
                .and(predicate::str::contains("job"))
                .and(predicate::str::contains("deploy"))
                .and(predicate::str::contains("cname"))
                .and(predicate::str::contains("env"))
                .and(predicate::str::contains("network-policy")),
        );
}

#[test]
fn missing_host_fails_before_any_request() {
    Command::cargo_bin("shipaops")
        .unwrap()
        .env_remove("SHIPA_HOST")
        .env_remove("SHIPA_TOKEN")
        .args(["framework", "--params", "does-not-matter.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SHIPA_HOST"));
}

#[test]
fn missing_params_file_is_reported() {
    Command::cargo_bin("shipaops")
        .unwrap()
        .env("SHIPA_HOST", "https://shipa.example.com")
        .env("SHIPA_TOKEN", "t0ken")
        .args(["framework", "--params", "/no/such/params.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("params"));
}
