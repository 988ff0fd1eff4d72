//! Common utilities for integration tests.
//!
//! Spawns the host binary, manages ports and waits for the demo service to come up.

use std::{
    env, fs,
    net::{TcpListener, TcpStream},
    path::PathBuf,
    process::{Child, Command, Output, Stdio},
    time::{Duration, Instant},
};

pub fn get_free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("failed to bind to address")
        .local_addr()
        .unwrap()
        .port()
}

/// Guard that kills and waits on a child process when dropped.
pub struct KillOnDrop(pub Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        drop(self.0.kill());
        drop(self.0.wait());
    }
}

fn host_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_randomkey"));
    cmd.env("RANDOMKEY_INTEGRATION_TEST", "1")
        .env_remove("RANDOMKEY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `config_toml` to a temp file unique to `label` and returns its path.
pub fn write_config(label: &str, config_toml: &str) -> PathBuf {
    let tmp = env::temp_dir().join(format!(
        "randomkey_integration_{label}_{}.toml",
        std::process::id()
    ));
    fs::write(&tmp, config_toml).expect("failed to write config");
    tmp
}

/// Runs the host binary to completion.
pub fn run_host(config: Option<&PathBuf>, args: &[&str]) -> Output {
    let mut cmd = host_command();
    if let Some(path) = config {
        cmd.arg("--config").arg(path);
    }
    cmd.args(args).output().expect("failed to run randomkey")
}

/// Stdout of a successful run, split into lines.
pub fn stdout_lines(output: &Output) -> Vec<String> {
    assert!(
        output.status.success(),
        "randomkey failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone())
        .expect("stdout is not UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Spawns the demo service on `port` using the config at `config`.
pub fn spawn_demo_service(config: &PathBuf, port: u16) -> Child {
    host_command()
        .arg("--config")
        .arg(config)
        .args(["demo-service", "--port", &port.to_string()])
        .stdout(Stdio::null())
        .spawn()
        .expect("failed to start demo service")
}

/// Block until a TCP listener is accepting on `127.0.0.1:port` or timeout.
pub async fn wait_for_listening(port: u16, timeout_secs: u64) {
    let start = Instant::now();
    while TcpStream::connect(("127.0.0.1", port)).is_err() {
        assert!(
            start.elapsed() <= Duration::from_secs(timeout_secs),
            "server did not start within timeout"
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
