//! Operator-facing log output of the basic demo
//!
//! Kept in its own test binary: the capturing logger is process-wide, so
//! no other run may log while this one is being checked.

use log::{LevelFilter, Log, Metadata, Record};
use pipepaird::{run_basic_demo, HostConfig};
use std::sync::Mutex;
use worker_roles::RoleConfig;

struct CapturingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    lines: Mutex::new(Vec::new()),
};

fn with_prefix<'a>(lines: &'a [String], prefix: &str) -> Vec<&'a str> {
    lines
        .iter()
        .map(String::as_str)
        .filter(|line| line.starts_with(prefix))
        .collect()
}

#[test]
fn test_basic_demo_log_lines() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let config = HostConfig {
        roles: RoleConfig::immediate(),
        json: false,
    };
    run_basic_demo(&config).unwrap();
    let lines = LOGGER.lines.lock().unwrap().clone();

    assert_eq!(with_prefix(&lines, "Created producer child (").len(), 1);
    assert_eq!(with_prefix(&lines, "Created consumer child (").len(), 1);
    assert_eq!(
        with_prefix(&lines, "Producer: Sent number"),
        vec![
            "Producer: Sent number 1",
            "Producer: Sent number 2",
            "Producer: Sent number 3",
            "Producer: Sent number 4",
            "Producer: Sent number 5",
        ]
    );
    assert_eq!(
        with_prefix(&lines, "Consumer: Received"),
        vec![
            "Consumer: Received 1, running sum: 1",
            "Consumer: Received 2, running sum: 3",
            "Consumer: Received 3, running sum: 6",
            "Consumer: Received 4, running sum: 10",
            "Consumer: Received 5, running sum: 15",
        ]
    );
    let finals = with_prefix(&lines, "Consumer: Final sum:");
    assert_eq!(finals.len(), 1);
    assert!(finals[0].starts_with("Consumer: Final sum: 15 "));

    let exits = with_prefix(&lines, "Producer child (");
    assert_eq!(exits.len(), 1);
    assert!(exits[0].ends_with("exited with status 0"));
    let exits = with_prefix(&lines, "Consumer child (");
    assert_eq!(exits.len(), 1);
    assert!(exits[0].ends_with("exited with status 0"));
}
