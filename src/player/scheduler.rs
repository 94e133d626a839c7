//! Background scheduler that keeps the playlist self-driving.
//!
//! A deliberate polling loop: bounded worst-case advance latency of one
//! tick, no dependency on end-of-stream callbacks from the backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::controller::SharedPlayer;

/// Polling interval; also bounds shutdown latency.
pub(crate) const TICK: Duration = Duration::from_millis(100);

/// Spawn the scheduler thread.
///
/// Each tick takes the player lock and advances if the active track has
/// finished; the check-and-act is atomic with respect to concurrent
/// control requests because both sides share that lock. `stop` is the
/// cooperative shutdown flag; the caller sets it and joins the handle.
pub(crate) fn spawn(
    player: SharedPlayer,
    stop: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("vivace-scheduler".to_string())
        .spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                {
                    // A poisoned lock means a writer panicked; nothing sane
                    // is left to schedule.
                    let Ok(mut player) = player.lock() else {
                        break;
                    };
                    player.poll_advance();
                }
                thread::sleep(TICK);
            }
        })
}
