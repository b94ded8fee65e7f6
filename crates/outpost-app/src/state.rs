//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Result};
use tracing::{debug, info};

use outpost_core::commands::PlayerCommand;
use outpost_core::state::GameStateSnapshot;
use outpost_sim::engine::SimConfig;

use crate::game_loop;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// Every field sits behind a `Mutex` so the state is `Send + Sync` and can be
/// handed to any host thread (`mpsc::Sender` is Send but not Sync).
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_thread: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_thread: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> Result<bool> {
        Ok(lock(&self.loop_thread)?.is_some())
    }

    /// Spawn the game loop thread. Fails if one is already running or the
    /// config does not validate.
    pub fn start_simulation(&self, config: SimConfig) -> Result<()> {
        let mut thread = lock(&self.loop_thread)?;
        if thread.is_some() {
            bail!("simulation already running");
        }

        let seed = config.seed;
        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;

        *lock(&self.command_tx)? = Some(cmd_tx);
        *thread = Some(handle);
        info!(seed, "simulation started");
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        let tx = lock(&self.command_tx)?;
        match tx.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .map_err(|e| anyhow!("failed to send command: {e}")),
            None => bail!("simulation not started"),
        }
    }

    /// The most recent snapshot, if the loop has produced one.
    pub fn get_snapshot(&self) -> Result<Option<GameStateSnapshot>> {
        Ok(lock(&self.latest_snapshot)?.clone())
    }

    /// Stop the game loop and wait for its thread. No-op if not running.
    pub fn shutdown(&self) -> Result<()> {
        if let Some(tx) = lock(&self.command_tx)?.take() {
            // The loop also stops on disconnect, so a failed send is fine.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        if let Some(handle) = lock(&self.loop_thread)?.take() {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
            debug!("game loop joined");
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|e| anyhow!("state lock poisoned: {e}"))
}
