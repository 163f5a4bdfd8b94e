//! Capability over the external alignment tool.
//!
//! The search runner never touches `std::process` directly; it talks to a
//! `ProcessRunner`, so tests can script tool behavior without spawning
//! anything.

use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How one tool invocation ended.
#[derive(Debug, Clone)]
pub enum ToolOutcome {
    /// The child ran to completion with this exit code.
    Exited(i32),
    /// The child outlived the wall-clock limit and was killed.
    TimedOut,
    /// The executable could not be started at all.
    Unavailable(String),
}

pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits or the timeout
    /// expires. The timeout is enforced here, not by the child.
    fn run(&self, program: &str, args: &[OsString], timeout: Duration) -> ToolOutcome;
}

/// Spawns the tool as a real child process and polls it to completion.
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[OsString], timeout: Duration) -> ToolOutcome {
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return ToolOutcome::Unavailable(format!("{program}: {e}")),
        };

        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return ToolOutcome::Exited(status.code().unwrap_or(-1)),
                Ok(None) => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return ToolOutcome::Unavailable(format!("{program}: {e}"));
                }
            }

            let remaining = timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                debug!("killing {program} after {timeout:?}");
                let _ = child.kill();
                let _ = child.wait();
                return ToolOutcome::TimedOut;
            }
            thread::sleep(POLL_INTERVAL.min(remaining));
        }
    }
}
