//! End-to-end tests for the `validate-pod` binary.

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const VALID: &str = r#"apiVersion: v1
kind: Pod
metadata:
  name: "web"
spec:
  os:
    name: linux
  containers:
    - name: web_app
      image: "registry.bigbrother.io/web:1.2"
      ports:
        - containerPort: 8080
          protocol: TCP
      livenessProbe:
        httpGet:
          path: /healthz
          port: 8080
      resources:
        limits:
          cpu: 2
          memory: 512Mi
"#;

fn manifest(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_validate-pod"))
        .args(args)
        // Keep log output out of the assertions on stderr.
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute validate-pod")
}

fn run_on(file: &NamedTempFile, extra: &[&str]) -> Output {
    let path = file.path().to_str().expect("utf-8 temp path");
    let mut args = extra.to_vec();
    args.push(path);
    run(&args)
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("stderr is utf-8")
}

#[test]
fn valid_manifest_prints_nothing() {
    let file = manifest(VALID);
    let output = run_on(&file, &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert_eq!(stderr(&output), "");
}

#[test]
fn wrong_kind_is_reported_at_its_line() {
    let file = manifest(&VALID.replace("kind: Pod", "kind: Deployment"));
    let output = run_on(&file, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        format!(
            "{}:2 kind has unsupported value 'Deployment'\n",
            file.path().display()
        )
    );
}

#[test]
fn missing_spec_is_reported_at_root() {
    let file = manifest("apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\n");
    let output = run_on(&file, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        format!("{}:1 spec is required\n", file.path().display())
    );
}

#[test]
fn missing_argument_exits_with_one() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stderr(&output).is_empty());
}

#[test]
fn unreadable_file_is_reported_without_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let output = run(&[path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(
        text.starts_with(&format!("{} cannot read file: ", path.display())),
        "{text}"
    );
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn json_errors_flag() {
    let file = manifest(&VALID.replace("memory: 512Mi", "memory: 512MB"));
    let output = run_on(&file, &["--json-errors"]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_str(stderr(&output).trim_end()).expect("stderr is one JSON object");
    assert_eq!(json["line"], 21);
    assert_eq!(json["code"], "P-2-14");
    assert_eq!(
        json["message"],
        "resources.limits.memory has invalid format '512MB'"
    );
}

#[test]
fn os_name_policy_flag() {
    let file = manifest(&VALID.replace("name: linux", "name: darwin"));

    assert_eq!(run_on(&file, &[]).status.code(), Some(0));

    let output = run_on(&file, &["--os-name-policy", "restricted"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        format!(
            "{}:7 spec.os.name has unsupported value 'darwin'\n",
            file.path().display()
        )
    );
}

#[test]
fn container_name_policy_flag() {
    let file = manifest(&VALID.replace("name: web_app", "name: Web-App"));

    let output = run_on(&file, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).ends_with(":9 containers.name has invalid format 'Web-App'\n"));

    let output = run_on(&file, &["--container-name-policy", "non-empty"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn probe_port_policy_flag() {
    let file = manifest(&VALID.replace("port: 8080", "port: 70000"));

    let output = run_on(&file, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).ends_with(":17 port value out of range\n"),
        "{}",
        stderr(&output)
    );

    let output = run_on(&file, &["--probe-port-policy", "unchecked"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn unknown_policy_value_is_a_usage_error() {
    let file = manifest(VALID);
    let output = run_on(&file, &["--os-name-policy", "bsd"]);
    assert_eq!(output.status.code(), Some(1));
}
