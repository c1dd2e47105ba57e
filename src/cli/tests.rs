#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

const CONTRACT: &str = r#"
title: Blog
routes:
  posts:
    kind: group
    path_prefix: /posts
    shared_headers:
      type: object
      properties:
        x-tenant-id: { type: string }
    routes:
      getOne:
        kind: endpoint
        method: GET
        path: /{id}
        path_params:
          type: object
          properties:
            id: { type: string }
        responses:
          200: { type: object }
      search:
        kind: endpoint
        method: GET
        path: /search/{term}
"#;

fn contract_file() -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".yaml").expect("create temp file");
    file.write_all(CONTRACT.as_bytes()).expect("write contract");
    file.flush().expect("flush");
    file
}

fn run(args: &[&str]) -> (i32, String) {
    let cli = Cli::try_parse_from(args).expect("parse args");
    let mut out = Vec::new();
    let code = execute(&cli, &mut out).expect("execute");
    (code, String::from_utf8(out).expect("utf8 output"))
}

#[test]
fn test_lint_command_parses_flags() {
    let cli = Cli::try_parse_from([
        "brrtcontract",
        "lint",
        "--contract",
        "blog.yaml",
        "--config",
        "compose.toml",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            contract,
            errors_only,
        } => {
            assert_eq!(contract.contract.to_string_lossy(), "blog.yaml");
            assert_eq!(contract.config.unwrap().to_string_lossy(), "compose.toml");
            assert!(errors_only);
        }
        other => panic!("Expected Lint command, got {other:?}"),
    }
}

#[test]
fn test_show_requires_route() {
    assert!(Cli::try_parse_from(["brrtcontract", "show", "--contract", "blog.yaml"]).is_err());
}

#[test]
fn test_paths_lists_composed_routes() {
    let file = contract_file();
    let path = file.path().to_str().unwrap();
    let (code, out) = run(&["brrtcontract", "paths", "--contract", path]);
    assert_eq!(code, 0);
    assert!(out.contains("posts.getOne"));
    assert!(out.contains("/posts/{id}"));
    assert!(out.contains("/posts/search/{term}"));
}

#[test]
fn test_show_prints_resolved_route() {
    let file = contract_file();
    let path = file.path().to_str().unwrap();
    let (code, out) = run(&["brrtcontract", "show", "--contract", path, "--route", "posts.getOne"]);
    assert_eq!(code, 0);
    let route: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(route["path"], "/posts/{id}");
    assert_eq!(route["declared_path"], "/{id}");
    assert_eq!(route["path_chain"], "posts.getOne");
    assert!(route["headers"]["input"]["properties"]["x-tenant-id"].is_object());
}

#[test]
fn test_show_unknown_route_fails() {
    let file = contract_file();
    let path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["brrtcontract", "show", "--contract", path, "--route", "posts.nope"]).unwrap();
    let err = execute(&cli, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("posts.nope"));
}

#[test]
fn test_lint_exit_code_reflects_errors() {
    let file = contract_file();
    let path = file.path().to_str().unwrap();
    let (code, out) = run(&["brrtcontract", "lint", "--contract", path, "--errors-only"]);
    assert_eq!(code, 1);
    assert!(out.contains("undeclared_path_param"));
    assert!(!out.contains("missing_responses"));
}
