use std::fs;
use std::process::{Command, Output};

fn run_in(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geo-adset"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("FACEBOOK_ACCESS_TOKEN")
        .env_remove("FACEBOOK_CAMPAIGN_ID")
        .output()
        .unwrap()
}

#[test]
fn test_rust_log_from_dotenv_sets_level() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

    let output = run_in(dir.path(), &["insights"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("loaded .env"), "{}", stderr);
    assert!(stderr.contains("FACEBOOK_CAMPAIGN_ID is not set"), "{}", stderr);
}

#[test]
fn test_default_level_hides_debug() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "FACEBOOK_GRAPH_VERSION=v19.0\n").unwrap();

    let output = run_in(dir.path(), &["insights"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stderr.contains("loaded .env"), "{}", stderr);
    assert!(stderr.contains("FACEBOOK_CAMPAIGN_ID is not set"), "{}", stderr);
}
