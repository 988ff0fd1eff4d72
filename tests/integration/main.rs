//! Uses the single integration test approach.
//!
//! Every test drives the `randomkey` binary as a child process.
#![expect(
    clippy::tests_outside_test_module,
    reason = "This is the integration test binary, so it's expected that tests are outside of a test module"
)]
#![expect(clippy::indexing_slicing, reason = "This is not problematic in tests")]
#![expect(clippy::unwrap_used, reason = "Using unwrap in tests is fine")]

mod common;

use reqwest::Client;

use common::{
    KillOnDrop, get_free_port, run_host, spawn_demo_service, stdout_lines, wait_for_listening,
    write_config,
};

const REFERENCE_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn value_of<'line>(line: &'line str, name: &str) -> &'line str {
    line.strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .unwrap_or_else(|| panic!("unexpected output line {line:?} for {name}"))
}

#[test]
fn lookup_prints_random_keys_of_the_requested_length() {
    let output = run_host(None, &["lookup", "randomKey.key", "randomKey.key[8]", "randomKey.key[0]"]);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3, "{lines:?}");

    let default_key = value_of(&lines[0], "randomKey.key");
    assert_eq!(default_key.len(), 64);
    assert!(default_key.chars().all(|c| REFERENCE_ALPHABET.contains(c)));
    assert_eq!(value_of(&lines[1], "randomKey.key[8]").len(), 8);
    assert_eq!(value_of(&lines[2], "randomKey.key[0]"), "");
}

#[test]
fn seeded_config_is_reproducible_across_processes() {
    let config = write_config(
        "seeded",
        r#"
        [random_key]
        seed = 0
        generator = "lcg48"
        "#,
    );
    for _ in 0..2 {
        let lines = stdout_lines(&run_host(
            Some(&config),
            &["lookup", "randomKey.key[12]", "randomKey.key[12]"],
        ));
        assert_eq!(
            lines,
            vec!["randomKey.key[12]=qShZDvJvRW5L", "randomKey.key[12]=9aFsanlYl241"]
        );
    }
}

#[test]
fn resolve_substitutes_placeholders() {
    let config = write_config(
        "resolve",
        r#"
        [properties]
        app.name = "demo"
        app.token = "${randomKey.key[6]}"
        "#,
    );
    let lines = stdout_lines(&run_host(
        Some(&config),
        &["resolve", "${app.name}:${app.token}:${missing:fallback}"],
    ));
    assert_eq!(lines.len(), 1);
    let parts: Vec<&str> = lines[0].split(':').collect();
    assert_eq!(parts.len(), 3, "{lines:?}");
    assert_eq!(parts[0], "demo");
    assert_eq!(parts[1].len(), 6);
    assert_eq!(parts[2], "fallback");
}

#[test]
fn sources_lists_the_chain_in_order() {
    let config = write_config(
        "sources",
        r#"
        [environment]
        random_key_position = "last"

        [properties]
        a = "b"
        "#,
    );
    let lines = stdout_lines(&run_host(Some(&config), &["sources"]));
    assert_eq!(
        lines,
        vec!["systemEnvironment", "applicationConfig", "randomKey"]
    );
}

#[test]
fn malformed_length_fails_the_lookup() {
    let output = run_host(None, &["lookup", "randomKey.key[abc]"]);
    assert!(!output.status.success(), "lookup of a bad name should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("randomKey.key[abc]"), "{stderr}");
    assert!(stderr.contains("Invalid key length"), "{stderr}");
}

#[test]
fn unknown_property_fails_the_lookup() {
    let output = run_host(None, &["lookup", "randomkey.surely.unset.property"]);
    assert!(!output.status.success(), "lookup of an unknown name should fail");
}

#[test]
fn invalid_config_is_reported() {
    let config = write_config(
        "invalid",
        r#"
        [random_key]
        alphabet = ""
        "#,
    );
    let output = run_host(Some(&config), &["sources"]);
    assert!(!output.status.success(), "empty alphabet should be rejected");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid [random_key] configuration"), "{stderr}");
}

#[tokio::test]
async fn demo_service_serves_stable_values() {
    let port = get_free_port();
    let config = write_config(
        "demo",
        &format!(
            r#"
        [demo]
        port = {port}
        bind = "127.0.0.1"
        "#
        ),
    );
    let _guard = KillOnDrop(spawn_demo_service(&config, port));
    wait_for_listening(port, 5).await;

    let client = Client::new();
    let url = format!("http://127.0.0.1:{port}/test");
    let mut responses = Vec::new();
    for _ in 0..2 {
        let json: serde_json::Value = client
            .get(&url)
            .send()
            .await
            .expect("request failed")
            .json()
            .await
            .expect("response is not JSON");
        responses.push(json);
    }

    assert_eq!(responses[0], responses[1], "values must not change between requests");
    let value1 = responses[0]["value1"].as_str().expect("value1 missing");
    let value2 = responses[0]["value2"].as_str().expect("value2 missing");
    assert_eq!(value1.len(), 64);
    assert_eq!(value2.len(), 16);
    assert_ne!(&value1[..16], value2);
}
