//! Bounded subprocess execution
//!
//! Package managers are external, unreliable collaborators. Every
//! invocation gets a hard deadline; a hung process is killed and reported
//! as that invocation's failure, never the whole scan's.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::constants::process::WAIT_POLL_INTERVAL;
use crate::error::DepscopeError;

#[derive(Debug)]
pub(crate) struct CapturedOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Run `program` with `args`, requiring exit status 0 within `timeout`.
///
/// stdout and stderr are drained on dedicated threads so a chatty child can
/// never deadlock on a full pipe.
pub(crate) fn run_with_timeout(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<CapturedOutput, DepscopeError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|_| DepscopeError::CommandUnavailable {
            program: program.to_string(),
        })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(DepscopeError::CommandTimeout {
                        program: program.to_string(),
                        timeout_secs: timeout.as_secs(),
                    });
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => return Err(DepscopeError::Io(e)),
        }
    };

    let stdout = join_reader(stdout_reader);
    let stderr = join_reader(stderr_reader);

    if !status.success() {
        return Err(DepscopeError::CommandFailed {
            program: program.to_string(),
            code: status.code(),
        });
    }

    Ok(CapturedOutput { stdout, stderr })
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_end(&mut buffer);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn join_reader(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}
