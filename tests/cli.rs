use std::net::TcpListener;
use std::process::Command;

use trend_hive::config::MISSING_KEY_WARNING;

/// A local address nothing is listening on
fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/chat", port)
}

#[test]
fn test_unreachable_backend_exits_non_zero_without_result() {
    let output = Command::new(env!("CARGO_BIN_EXE_trend-hive"))
        .current_dir(std::env::temp_dir())
        .env_remove("YOUTUBE_API_KEY")
        .env_remove("REQUIRE_YOUTUBE_API_KEY")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env("OLLAMA_URL", closed_endpoint())
        .env("RUST_LOG", "off")
        .output()
        .expect("binary should start");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, format!("{}\n", MISSING_KEY_WARNING));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}
