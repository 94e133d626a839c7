//! Pluggable-unit boundary towards the hosting daemon.
//!
//! The host loads units, opens them with their persisted configuration,
//! mounts their routes on its transport, and closes them on shutdown.
//! [`FilesModule`] is this crate's unit: it owns the shared player, the
//! scheduler thread and its stop flag, which live exactly as long as the
//! module is open.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tracing::{info, warn};

use crate::api::{self, Route};
use crate::audio::{AudioOutput, RodioOutput};
use crate::config::Settings;
use crate::error::Error;
use crate::player::{Player, SharedPlayer, scheduler};

/// Lifecycle and registration contract every pluggable unit implements.
pub trait Module: Send {
    /// Stable identifier, also the key of the unit's persisted config.
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Bindings for the hosting transport to mount under the unit's prefix.
    fn routes(&self) -> Vec<Route>;

    /// Current configuration document, for persistence by the host.
    fn get_config(&self) -> serde_json::Value;

    /// Replace the configuration wholesale with the given document.
    fn set_config(&mut self, config: &serde_json::Value);

    /// Shut the unit down: scheduler first, playback state after.
    /// Idempotent.
    fn close(&mut self);
}

/// The playback unit: playlist, player and scheduler behind one lock.
pub struct FilesModule {
    player: SharedPlayer,
    stop: Arc<AtomicBool>,
    scheduler: Option<JoinHandle<()>>,
}

impl FilesModule {
    /// Open the unit over the given audio backend. Failing to start the
    /// scheduler thread is fatal: the unit never comes up half-alive.
    pub fn open(settings: Settings, output: Box<dyn AudioOutput>) -> Result<Self, Error> {
        let player: SharedPlayer =
            Arc::new(Mutex::new(Player::new(output, settings.path.clone())));
        let stop = Arc::new(AtomicBool::new(false));
        let scheduler =
            scheduler::spawn(player.clone(), stop.clone()).map_err(Error::ThreadSpawn)?;

        info!(root = %settings.path.display(), "files module opened");
        Ok(Self {
            player,
            stop,
            scheduler: Some(scheduler),
        })
    }

    /// Open against the default audio device.
    pub fn open_default(settings: Settings) -> Result<Self, Error> {
        let output = RodioOutput::new()?;
        Self::open(settings, Box::new(output))
    }

    /// The shared player handle, for hosts that drive playback directly.
    pub fn player(&self) -> SharedPlayer {
        self.player.clone()
    }
}

impl Module for FilesModule {
    fn id(&self) -> &'static str {
        "files"
    }

    fn name(&self) -> &'static str {
        "File playback"
    }

    fn description(&self) -> &'static str {
        "Plays local audio files from an ordered playlist and browses the \
         configured root directory."
    }

    fn routes(&self) -> Vec<Route> {
        api::routes(&self.player)
    }

    fn get_config(&self) -> serde_json::Value {
        match self.player.lock() {
            Ok(player) => Settings {
                path: player.root().to_path_buf(),
            }
            .to_json(),
            Err(_) => Settings::default().to_json(),
        }
    }

    fn set_config(&mut self, config: &serde_json::Value) {
        let settings = Settings::from_json(config);
        if let Ok(mut player) = self.player.lock() {
            player.set_root(settings.path);
        }
    }

    fn close(&mut self) {
        let Some(handle) = self.scheduler.take() else {
            return;
        };

        self.stop.store(true, Ordering::Relaxed);
        if handle.join().is_err() {
            warn!("scheduler thread panicked");
        }

        // Sessions are released only after the scheduler has observably
        // stopped.
        if let Ok(mut player) = self.player.lock() {
            player.flush();
        }
        info!("files module closed");
    }
}

impl Drop for FilesModule {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::{TempDir, tempdir};

    use crate::api::{Method, Router};
    use crate::audio::fake::fake_output;

    use super::*;

    fn open_module() -> (FilesModule, TempDir) {
        let dir = tempdir().unwrap();
        let (output, _control) = fake_output();
        let settings = Settings {
            path: dir.path().to_path_buf(),
        };
        (FilesModule::open(settings, output).unwrap(), dir)
    }

    #[test]
    fn identity_matches_the_registration_metadata() {
        let (module, _dir) = open_module();
        assert_eq!(module.id(), "files");
        assert!(!module.name().is_empty());
        assert!(!module.description().is_empty());
    }

    #[test]
    fn close_joins_the_scheduler_and_is_idempotent() {
        let (mut module, _dir) = open_module();
        module.close();
        module.close();
    }

    #[test]
    fn close_releases_playback_state() {
        let (mut module, dir) = open_module();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        {
            let player = module.player();
            let mut player = player.lock().unwrap();
            player.add("a.mp3").unwrap();
            player.play(Some(0)).unwrap();
        }

        module.close();

        let player = module.player();
        let player = player.lock().unwrap();
        assert_eq!(player.track_count(), 0);
        assert_eq!(player.current_index(), None);
    }

    #[test]
    fn dropping_an_open_module_shuts_it_down() {
        let (module, _dir) = open_module();
        drop(module);
    }

    #[test]
    fn config_replaces_wholesale_and_reads_back() {
        let (mut module, _dir) = open_module();
        module.set_config(&serde_json::json!({ "path": "/srv/elsewhere" }));
        assert_eq!(module.get_config()["path"], "/srv/elsewhere");

        // An empty document resets to the default, it does not merge.
        module.set_config(&serde_json::json!({}));
        assert_eq!(
            module.get_config()["path"],
            crate::config::DEFAULT_ROOT
        );
    }

    #[test]
    fn routes_cover_the_whole_control_surface() {
        let (module, _dir) = open_module();
        let router = Router::new(module.routes());

        assert_eq!(router.dispatch(Method::Put, "/stop").status, 200);
        assert_eq!(router.dispatch(Method::Get, "/status").status, 200);
        assert_eq!(router.dispatch(Method::Get, "/playlist").status, 200);
        assert_eq!(router.dispatch(Method::Get, "/list").status, 200);
        assert_eq!(router.dispatch(Method::Put, "/elsewhere").status, 404);
    }
}
