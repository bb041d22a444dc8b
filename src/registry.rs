//! One-engine-per-surface ownership
//!
//! The registry exclusively owns every live engine, keyed by target id.
//! Launching a second engine for an occupied id destroys the first; callers
//! only ever hold the id, never the engine itself.

use std::collections::HashMap;

use crate::config::WarpConfig;
use crate::engine::{Clock, TickOutcome, WarpSpeed};
use crate::error::WarpError;
use crate::render::Surface;

#[derive(Default)]
pub struct WarpRegistry {
    instances: HashMap<String, WarpSpeed>,
}

impl WarpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine for `target_id`, run its first tick synchronously and
    /// register it. Any prior engine for the same id is destroyed first,
    /// even when the relaunch then fails.
    ///
    /// Fails with [`WarpError::InvalidTarget`] when the surface is already
    /// detached; nothing is registered in that case.
    pub fn launch(
        &mut self,
        target_id: &str,
        config: WarpConfig,
        surface: Box<dyn Surface>,
        clock: Box<dyn Clock>,
        seed: u64,
    ) -> Result<(), WarpError> {
        if self.instances.remove(target_id).is_some() {
            log::info!("replacing running starfield on `{target_id}`");
        }
        if !surface.attached() {
            return Err(WarpError::InvalidTarget(target_id.to_string()));
        }
        let mut engine = WarpSpeed::new(target_id, config, surface, clock, seed);
        if engine.tick() == TickOutcome::Detached {
            return Err(WarpError::InvalidTarget(target_id.to_string()));
        }
        log::info!(
            "starfield launched on `{}` with {} stars",
            target_id,
            engine.field().stars().len()
        );
        self.instances.insert(target_id.to_string(), engine);
        Ok(())
    }

    pub fn get(&self, target_id: &str) -> Option<&WarpSpeed> {
        self.instances.get(target_id)
    }

    pub fn get_mut(&mut self, target_id: &str) -> Option<&mut WarpSpeed> {
        self.instances.get_mut(target_id)
    }

    pub fn contains(&self, target_id: &str) -> bool {
        self.instances.contains_key(target_id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop the engine for `target_id`. Destroying an id that is not
    /// registered is a no-op, so destroy is idempotent.
    pub fn destroy(&mut self, target_id: &str) -> bool {
        let removed = self.instances.remove(target_id).is_some();
        if removed {
            log::info!("starfield on `{target_id}` destroyed");
        }
        removed
    }
}
