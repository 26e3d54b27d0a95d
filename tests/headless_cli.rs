use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_echoing-library"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn temp_dir(stem: &str) -> PathBuf {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("{stem}_{timestamp:x}"))
}

#[test]
fn scripted_run_completes_and_logs_every_event() {
    let out = temp_dir("echoing_library_cli");
    let events = out.join("events.jsonl");
    let output = bin()
        .args(["run", "--no-audio", "--fast", "--exit-when-complete"])
        .args(["--max-ticks", "1000", "--script", "scripts/full_hunt.json"])
        .arg("--event-log")
        .arg(&events)
        .output()
        .expect("run binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "stdout carries only the summary: {stdout}");
    assert!(!output.stderr.is_empty(), "logs go to stderr");

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("summary json on stdout");
    assert_eq!(summary["completed"], true);
    assert_eq!(summary["books_found"], 3);
    assert_eq!(summary["ticks"], 201);

    let log = std::fs::read_to_string(&events).expect("event log");
    let kinds: Vec<String> = log
        .lines()
        .map(|line| {
            let record: serde_json::Value = serde_json::from_str(line).expect("json line");
            assert_eq!(record["kind"], "scene");
            record["payload"]["event"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    // 3 whispers, 3 opened, 2 advanced, 1 completed
    assert_eq!(kinds.iter().filter(|k| *k == "whisper_requested").count(), 3);
    assert_eq!(kinds.iter().filter(|k| *k == "puzzle").count(), 6);
}

#[test]
fn sounds_lists_the_whole_manifest() {
    let output = bin().arg("sounds").output().expect("run binary");
    assert!(output.status.success());
    let manifest: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(manifest.as_array().map(Vec::len), Some(7));
}

#[test]
fn layout_lists_interactive_books() {
    let output = bin().args(["layout", "--seed", "5"]).output().expect("run binary");
    assert!(output.status.success());
    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let interactive: Vec<&str> = layout
        .as_array()
        .expect("array")
        .iter()
        .filter(|entry| entry["interactive"] == true)
        .filter_map(|entry| entry["label"].as_str())
        .collect();
    assert_eq!(
        interactive,
        vec!["central_book", "key_book_0", "key_book_1", "key_book_2"]
    );
}

#[test]
fn init_config_writes_defaults_once() {
    let path = temp_dir("echoing_library_init").join("library.toml");
    let output = bin()
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .output()
        .expect("run binary");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = std::fs::read_to_string(&path).expect("config written");
    assert!(written.contains("page_turn_min_secs = 15.0"));

    let again = bin()
        .arg("init-config")
        .arg("--path")
        .arg(&path)
        .output()
        .expect("run binary");
    assert!(!again.status.success(), "existing config is not overwritten");

    let forced = bin()
        .args(["init-config", "--force", "--path"])
        .arg(&path)
        .output()
        .expect("run binary");
    assert!(forced.status.success());
}
