use assert_cmd::Command;
use httpmock::{Method::GET, MockServer};
use predicates::prelude::*;

const RESOURCES: [&str; 6] = ["districts", "schools", "sections", "courses", "terms", "users"];

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("clever-api").unwrap();
    cmd.env_remove("CLEVER_API_TOKEN")
        .env_remove("CLEVER_API_URL")
        .env_remove("CLEVER_OUTPUT_DIR")
        .arg("--log-level")
        .arg("warn");
    cmd
}

#[test]
fn version_flag_prints_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clever-api "));
}

#[test]
fn missing_token_exits_with_error() {
    cmd().arg("--role").arg("n").assert().code(1);
}

#[test]
fn saves_every_resource_with_role_filter() -> anyhow::Result<()> {
    let server = MockServer::start();
    let mut mocks = Vec::new();
    for name in RESOURCES.iter().filter(|n| **n != "users") {
        let path = format!("/{}", name);
        mocks.push(server.mock(|when, then| {
            when.method(GET)
                .path(path.as_str())
                .query_param("limit", "1")
                .header("authorization", "Bearer t");
            then.status(200)
                .json_body(serde_json::json!({"data":[{"data":{"id":format!("{}_1", name)}}]}));
        }));
    }
    let users = server.mock(|when, then| {
        when.method(GET)
            .path("/users")
            .query_param("limit", "1")
            .query_param("role", "teacher");
        then.status(200)
            .json_body(serde_json::json!({"data":[{"data":{"id":"u_1"}}]}));
    });

    let dir = tempfile::tempdir()?;
    let out = dir.path().join("output_data");
    cmd()
        .env("CLEVER_API_TOKEN", "t")
        .env("CLEVER_API_URL", server.base_url())
        .arg("--role")
        .arg("Teacher")
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    for m in &mocks {
        m.assert();
    }
    users.assert();
    for name in RESOURCES {
        let text = std::fs::read_to_string(out.join(format!("{}.json", name)))?;
        let v: serde_json::Value = serde_json::from_str(&text)?;
        assert!(v["data"].as_array().is_some_and(|a| !a.is_empty()));
    }
    Ok(())
}

#[test]
fn empty_and_failed_resources_are_skipped() -> anyhow::Result<()> {
    let server = MockServer::start();
    let _districts = server.mock(|when, then| {
        when.method(GET).path("/districts");
        then.status(200)
            .json_body(serde_json::json!({"data":[{"data":{"id":"d1"}}]}));
    });
    let _schools = server.mock(|when, then| {
        when.method(GET).path("/schools");
        then.status(200).json_body(serde_json::json!({"data":[]}));
    });
    let mut failing = Vec::new();
    for name in ["sections", "courses", "terms", "users"] {
        let path = format!("/{}", name);
        failing.push(server.mock(|when, then| {
            when.method(GET).path(path.as_str());
            then.status(500);
        }));
    }

    let dir = tempfile::tempdir()?;
    cmd()
        .env("CLEVER_API_TOKEN", "t")
        .env("CLEVER_API_URL", server.base_url())
        .env("CLEVER_OUTPUT_DIR", dir.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter user role"));

    assert!(dir.path().join("districts.json").exists());
    assert!(!dir.path().join("schools.json").exists());
    assert!(!dir.path().join("users.json").exists());
    for m in &failing {
        m.assert_hits(1);
    }
    Ok(())
}
