#![allow(dead_code)]

pub mod env;
pub mod fake_gateway;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables that would override a test's config file
const ZENDESK_ENV: &[&str] = &[
    "ZENDESK_SUBDOMAIN",
    "ZENDESK_USER",
    "ZENDESK_TOKEN",
    "ZENDESK_PASSWORD",
    "ZENDESK_AUTH_TYPE",
];

/// Helper struct to run the zdbot binary against a config in a temp directory
pub struct ZdbotTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl ZdbotTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        ZdbotTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_zdbot").to_string(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config file");
    }

    /// A command for the binary with the test config and a clean environment
    pub fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .current_dir(self.temp_dir.path());
        for key in ZENDESK_ENV {
            command.env_remove(key);
        }
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute zdbot command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
