//! Interactive pager execution on a pseudo-terminal.
//!
//! Runs one child process (normally `man` with its pager) on a
//! dedicated PTY while the browser UI is suspended. Child output is
//! pumped straight to the real terminal; the user's keys are encoded
//! and forwarded to the child. Control returns to the caller only when
//! the child has exited.

use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use thiserror::Error;
use tracing::{debug, error};

use crate::ui::keys::KeyEncoder;

/// Exit code reported when the child could not be started at all.
/// Callers treat it like any other non-zero pager exit.
pub const SPAWN_FAILURE_CODE: i32 = 127;

#[derive(Error, Debug)]
pub enum PtyError {
    #[error("failed to open pseudo-terminal: {0}")]
    Open(String),

    #[error("failed to spawn process: {0}")]
    Spawn(String),

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs an interactive program on the user's terminal.
///
/// `initial_input` reaches the child as if typed at its controlling
/// terminal, before any of the user's own keystrokes. Implementations
/// return only after the child has terminated; a child that could not
/// be started is reported as a non-zero exit code, not an error.
pub trait PtyProcess {
    fn run(&mut self, argv: &[String], initial_input: &str) -> i32;
}

/// The real PTY runner.
pub struct NativePty;

impl PtyProcess for NativePty {
    fn run(&mut self, argv: &[String], initial_input: &str) -> i32 {
        match run_interactive(argv, initial_input) {
            Ok(code) => code,
            Err(e) => {
                error!("pager run failed: {}", e);
                SPAWN_FAILURE_CODE
            }
        }
    }
}

fn run_interactive(argv: &[String], initial_input: &str) -> Result<i32, PtyError> {
    let (cols, rows) = terminal::size()?;

    let pty_system = native_pty_system();
    let pair = pty_system
        .openpty(PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| PtyError::Open(e.to_string()))?;
    let (master, slave) = (pair.master, pair.slave);

    let mut cmd = CommandBuilder::new(&argv[0]);
    cmd.args(&argv[1..]);
    let mut child = slave
        .spawn_command(cmd)
        .map_err(|e| PtyError::Spawn(e.to_string()))?;
    // The slave side belongs to the child now
    drop(slave);

    let mut writer = master
        .take_writer()
        .map_err(|e| PtyError::Open(e.to_string()))?;
    let mut reader = master
        .try_clone_reader()
        .map_err(|e| PtyError::Open(e.to_string()))?;

    // Pre-supplied keystrokes go in before the user can type anything
    writer.write_all(initial_input.as_bytes())?;
    writer.flush()?;

    // Pump child output to the real terminal. The thread ends when the
    // child closes its side of the PTY.
    let pump = thread::spawn(move || {
        let mut stdout = io::stdout();
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if stdout.write_all(&buf[..n]).is_err() {
                        break;
                    }
                    let _ = stdout.flush();
                }
            }
        }
    });

    // Forward the user's keys until the child exits
    let poll_timeout = Duration::from_millis(10);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    let bytes = KeyEncoder::encode(&key_event);
                    if !bytes.is_empty() {
                        writer.write_all(&bytes)?;
                        writer.flush()?;
                    }
                }
                Event::Resize(cols, rows) => {
                    let _ = master.resize(PtySize {
                        rows,
                        cols,
                        pixel_width: 0,
                        pixel_height: 0,
                    });
                }
                _ => {}
            }
        }
    };

    drop(writer);
    let _ = pump.join();

    let code = status.exit_code() as i32;
    debug!(code, "pager exited");
    Ok(code)
}
