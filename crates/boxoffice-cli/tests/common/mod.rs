use std::path::Path;
use std::process::{Command, Output};

use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};

/// Mint a token the way the backend would, signed with a throwaway key.
pub fn mint(username: &str, roles: Value) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({ "username": username, "roles": roles }),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .expect("Failed to mint token")
}

/// Run the CLI with an isolated data dir and API URL.
pub fn run_cli(args: &[&str], data_dir: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_boxoffice"));
    cmd.args(args);
    cmd.env("BOXOFFICE_DATA_DIR", data_dir);
    cmd.env("BOXOFFICE_API_URL", api_url);
    cmd.env_remove("BOXOFFICE_TOKEN");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so a mock server on it keeps serving.
pub async fn run_cli_async(args: &[&str], data_dir: &Path, api_url: &str) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let data_dir = data_dir.to_path_buf();
    let api_url = api_url.to_string();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &data_dir, &api_url)
    })
    .await
    .expect("CLI task panicked")
}

/// Panic with stderr unless the command succeeded; return stdout.
pub fn expect_success(args: &[&str], output: &Output) -> String {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Panic unless the command failed; return stderr.
pub fn expect_failure(args: &[&str], output: &Output) -> String {
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
