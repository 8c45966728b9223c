//! End-to-end tests for the `pf` binary.
//!
//! Each test writes a posts file and a config path into a temp dir and runs
//! the real binary against them, so nothing in the user's environment leaks in.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const POSTS_JSON: &str = r#"[
    {
        "title": "Go Basics",
        "description": "A first look at Go",
        "body": "Packages, functions and goroutines.",
        "tags": ["go", "backend"]
    },
    {
        "title": "Rust Guide",
        "description": "Ownership without tears",
        "body": "Borrowing rules and lifetimes.",
        "tags": ["rust", "systems"]
    },
    {
        "title": "Deploying Services",
        "body": "Containers for Go and Rust backends.",
        "tags": ["devops", "backend"]
    }
]"#;

struct Fixture {
    _dir: TempDir,
    posts: PathBuf,
    config: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let posts = dir.path().join("posts.json");
        fs::write(&posts, POSTS_JSON).expect("failed to write posts");
        let config = dir.path().join("config").join("config.toml");
        Self {
            _dir: dir,
            posts,
            config,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pf"));
        cmd.env("PF_CONFIG", &self.config)
            .env_remove("PF_POSTS")
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--file")
            .arg(&self.posts);
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("failed to run pf")
    }

    fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn pf");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("failed to write stdin");
        child.wait_with_output().expect("failed to wait for pf")
    }
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn titles(value: &Value) -> Vec<String> {
    value["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .map(|p| p["title"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn write_config(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("config has a parent")).unwrap();
    fs::write(path, content).unwrap();
}

// ==================== search ====================

#[test]
fn test_search_by_term() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "search", "RUST"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(titles(&json), vec!["Rust Guide", "Deploying Services"]);
    assert_eq!(json["matched"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["search_term"], "RUST");
}

#[test]
fn test_search_by_tags_is_any_match() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "search", "-t", "go", "-t", "devops"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(titles(&json), vec!["Go Basics", "Deploying Services"]);
    assert_eq!(json["selected_tags"], serde_json::json!(["devops", "go"]));
}

#[test]
fn test_search_term_and_tag_combined() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "search", "containers", "--tag", "backend"]);

    assert!(output.status.success());
    assert_eq!(titles(&stdout_json(&output)), vec!["Deploying Services"]);
}

#[test]
fn test_search_without_inputs_returns_everything() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "search"]);

    assert!(output.status.success());
    assert_eq!(titles(&stdout_json(&output)).len(), 3);
}

#[test]
fn test_search_limit_keeps_match_count() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "search", "--tag", "backend", "--limit", "1"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(titles(&json), vec!["Go Basics"]);
    assert_eq!(json["matched"], 2);
}

#[test]
fn test_search_table_output() {
    let fx = Fixture::new();
    let output = fx.run(&["search", "guide"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1 of 3 posts match"));
    assert!(stdout.contains("Rust Guide  #rust #systems"));
    assert!(stdout.contains("    Ownership without tears"));
}

#[test]
fn test_search_unknown_tag_fails_with_suggestion() {
    let fx = Fixture::new();
    let output = fx.run(&["search", "--tag", "rsut"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tag 'rsut' not found in any post."));
    assert!(stderr.contains("Did you mean 'rust'?"));
}

#[test]
fn test_search_unknown_tag_json_error() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "search", "--tag", "zig"]);

    assert_eq!(output.status.code(), Some(1));
    let err: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(err["error"]["code"], "UNKNOWN_TAG");
}

#[test]
fn test_missing_posts_file_is_store_error() {
    let fx = Fixture::new();
    let output = Command::new(env!("CARGO_BIN_EXE_pf"))
        .env("PF_CONFIG", &fx.config)
        .env_remove("PF_POSTS")
        .arg("--file")
        .arg(fx.posts.with_file_name("missing.json"))
        .args(["--json", "search"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "STORE_ERROR");
}

// ==================== tags ====================

#[test]
fn test_tags_in_first_appearance_order() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "tags"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    let names: Vec<&str> = json["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["go", "backend", "rust", "systems", "devops"]);
}

#[test]
fn test_tags_by_count() {
    let fx = Fixture::new();
    let output = fx.run(&["--json", "tags", "--by-count"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["tags"][0]["name"], "backend");
    assert_eq!(json["tags"][0]["count"], 2);
}

// ==================== browse ====================

#[test]
fn test_browse_publishes_each_change() {
    let fx = Fixture::new();
    let output = fx.run_with_stdin(
        &["--json", "browse"],
        "rust\n:tag backend\n:tag backend\n:quit\nignored\n",
    );

    assert!(output.status.success());
    let results: Vec<Value> = serde_json::Deserializer::from_slice(&output.stdout)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("stream of JSON results");

    assert_eq!(results.len(), 4);
    assert_eq!(titles(&results[0]).len(), 3);
    assert_eq!(titles(&results[1]), vec!["Rust Guide", "Deploying Services"]);
    assert_eq!(titles(&results[2]), vec!["Deploying Services"]);
    assert_eq!(titles(&results[3]), vec!["Rust Guide", "Deploying Services"]);

    let revisions: Vec<u64> = results
        .iter()
        .map(|r| r["revision"].as_u64().unwrap())
        .collect();
    assert!(revisions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_browse_reports_bad_input_and_continues() {
    let fx = Fixture::new();
    let output = fx.run_with_stdin(&["--json", "browse"], ":tag zig\n:bogus\ngo\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tag 'zig' not found in any post."));
    assert!(stderr.contains("unknown command ':bogus'"));

    let results: Vec<Value> = serde_json::Deserializer::from_slice(&output.stdout)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(titles(&results[1]), vec!["Go Basics", "Deploying Services"]);
}

// ==================== config ====================

#[test]
fn test_config_set_and_show() {
    let fx = Fixture::new();

    let output = fx.run(&["config", "set", "output.max_width", "30"]);
    assert!(output.status.success());
    assert!(fx.config.exists());

    let output = fx.run(&["--json", "config", "show"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["config"]["output"]["max_width"], 30);
}

#[test]
fn test_config_posts_path_used_without_flag() {
    let fx = Fixture::new();
    write_config(
        &fx.config,
        &format!("posts_path = {:?}\n", fx.posts.display().to_string()),
    );

    let output = Command::new(env!("CARGO_BIN_EXE_pf"))
        .env("PF_CONFIG", &fx.config)
        .env_remove("PF_POSTS")
        .args(["--json", "tags"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["tags"].as_array().unwrap().len(), 5);
}

#[test]
fn test_invalid_config_exits_with_config_error() {
    let fx = Fixture::new();
    write_config(&fx.config, "version = \"not a number\"\n");

    let output = fx.run(&["tags"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_completions_bash() {
    let fx = Fixture::new();
    let output = fx.run(&["completions", "bash"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("pf"));
}
