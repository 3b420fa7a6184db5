//! Signal handling for graceful shutdown.
//!
//! A dedicated thread turns SIGINT/SIGTERM/SIGHUP into a message on an mpsc
//! channel. The poll loop sleeps in `recv_timeout`, so a shutdown interrupts
//! a pending interval immediately instead of waiting it out; an in-flight
//! fetch is simply abandoned since there is no persisted state to corrupt.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
};
use std::{
    sync::{
        Arc, mpsc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

/// Messages delivered from the signal thread to the poll loop.
#[derive(Debug, Clone)]
pub enum SignalMessage {
    /// Termination signal (SIGINT, SIGTERM, SIGHUP)
    Shutdown,
}

/// Signal handling state shared between threads.
pub struct SignalState {
    /// Atomic flag indicating if the application should keep running
    pub running: Arc<AtomicBool>,
    /// Channel receiver the poll loop sleeps on
    pub signal_receiver: mpsc::Receiver<SignalMessage>,
}

/// Install the signal handling thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (sender, receiver) = mpsc::channel();

    let mut signals =
        Signals::new([SIGINT, SIGTERM, SIGHUP]).context("failed to register signal handler")?;

    let thread_running = Arc::clone(&running);
    thread::spawn(move || {
        for signal in signals.forever() {
            if debug_enabled {
                log_pipe!();
                log_debug!("Received signal {signal}, shutting down");
            }

            thread_running.store(false, Ordering::SeqCst);
            if sender.send(SignalMessage::Shutdown).is_err() {
                // Receiver is gone; the loop already exited
                break;
            }
        }
    });

    Ok(SignalState {
        running,
        signal_receiver: receiver,
    })
}
