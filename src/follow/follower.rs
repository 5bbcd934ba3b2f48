use std::sync::{Arc, Weak};

use crate::error::{check_range, ConfigError};
use crate::locate::{LocatorCache, LocatorParams};
use crate::math::{move_towards, Point3, Vector3};
use crate::path::{Path, PathHandle, PathQuery};
use crate::steering::{seek, SteeringParams};

/// Kinematic state of an agent, owned by the external integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentBody {
    pub position: Point3,
    pub velocity: Vector3,
}

impl AgentBody {
    /// Creates a body at rest at `position`.
    #[must_use]
    pub fn at_rest(position: Point3) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
        }
    }
}

/// How a follower turns its lookahead target into motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowMode {
    /// Produce an acceleration-limited steering force.
    Seek(SteeringParams),
    /// Move straight toward the target at a fixed speed, ignoring velocity.
    Direct { speed: f64 },
}

/// Per-follower configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerConfig {
    /// Distance added to the nearest path distance to pick the target.
    /// Negative values look behind.
    pub lookahead_offset: f64,
    /// Windowed search parameters for nearest-point queries. `None` uses
    /// [`Path::default_locator`] for whichever path is current.
    pub locator: Option<LocatorParams>,
    pub mode: FollowMode,
}

impl FollowerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookahead is not finite or if the locator or
    /// motion parameters are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("lookahead_offset", self.lookahead_offset, f64::MIN, f64::MAX)?;
        if let Some(locator) = &self.locator {
            locator.validate()?;
        }
        match &self.mode {
            FollowMode::Seek(steering) => steering.validate(),
            FollowMode::Direct { speed } => check_range("speed", *speed, 0.0, f64::MAX),
        }
    }
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            lookahead_offset: 1.0,
            locator: None,
            mode: FollowMode::Seek(SteeringParams::default()),
        }
    }
}

/// Mutable per-agent progress along a path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FollowerState {
    /// Most recent distance-along-path estimate. When the path behind the
    /// handle is replaced, the cache is re-seeded from this distance.
    pub last_path_distance: f64,
    pub cache: LocatorCache,
}

impl FollowerState {
    /// Rewinds to the start of the path.
    pub fn reset(&mut self) {
        self.last_path_distance = 0.0;
        self.cache.reset();
    }
}

/// Whether a follower currently has something to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerStatus {
    Idle,
    Following,
}

/// Motion requested from the integrator for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Steering force to integrate into velocity.
    Force(Vector3),
    /// Position change to apply as-is.
    Displacement(Vector3),
}

/// Result of one follower tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowOutput {
    /// Distance along the path nearest to the agent.
    pub nearest_distance: f64,
    /// `nearest_distance + lookahead_offset`, before clamping.
    pub target_distance: f64,
    /// Point on the path at `target_distance`.
    pub target: Point3,
    pub command: Command,
}

/// Drives one agent along a shared path.
///
/// The path is injected as a [`PathHandle`]; the follower owns only its
/// configuration and its [`FollowerState`], so any number of followers may
/// share one path.
///
/// Progress is clamped to `[0, total_length]` and the locator window does not
/// wrap from the last index to the first, so on a closed path a follower
/// comes to rest at the seam after one lap.
#[derive(Debug)]
pub struct PathFollower {
    config: FollowerConfig,
    path: Option<Arc<PathHandle>>,
    state: FollowerState,
    seen: Weak<Path>,
}

impl PathFollower {
    /// Creates an idle follower.
    #[must_use]
    pub fn new(config: FollowerConfig) -> Self {
        Self {
            config,
            path: None,
            state: FollowerState::default(),
            seen: Weak::new(),
        }
    }

    /// Creates a follower bound to `path`.
    #[must_use]
    pub fn with_path(config: FollowerConfig, path: Arc<PathHandle>) -> Self {
        let mut follower = Self::new(config);
        follower.set_path(path);
        follower
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Returns the current progress state.
    #[must_use]
    pub fn state(&self) -> &FollowerState {
        &self.state
    }

    /// Returns the locator parameters used against the current path, or
    /// `None` while no path is assigned.
    #[must_use]
    pub fn locator(&self) -> Option<LocatorParams> {
        match (self.config.locator, &self.path) {
            (Some(locator), _) => Some(locator),
            (None, Some(handle)) => Some(handle.snapshot().default_locator()),
            (None, None) => None,
        }
    }

    /// Assigns a path. Progress is kept; call [`Self::reset_follow`] to rewind.
    pub fn set_path(&mut self, path: Arc<PathHandle>) {
        self.path = Some(path);
        tracing::trace!(status = ?self.status(), "follower path assigned");
    }

    /// Detaches the path, returning the follower to idle.
    pub fn clear_path(&mut self) {
        self.path = None;
        tracing::trace!("follower path cleared");
    }

    /// Returns [`FollowerStatus::Following`] if a non-empty path is assigned.
    #[must_use]
    pub fn status(&self) -> FollowerStatus {
        match &self.path {
            Some(handle) if !handle.snapshot().is_empty() => FollowerStatus::Following,
            _ => FollowerStatus::Idle,
        }
    }

    /// Rewinds progress and the locality cache to the path start.
    ///
    /// Use this when the agent is placed or teleported onto the start.
    pub fn reset_follow(&mut self) {
        self.state.reset();
    }

    /// Advances the follower by one tick.
    ///
    /// Finds the path distance nearest to `body`, looks ahead by the
    /// configured offset, and turns the resulting target into a
    /// [`Command`]. Returns `None` while idle.
    pub fn tick(&mut self, body: &AgentBody, dt: f64) -> Option<FollowOutput> {
        let path = self.path.as_ref()?.snapshot();
        if path.is_empty() {
            return None;
        }

        if !std::ptr::eq(self.seen.as_ptr(), Arc::as_ptr(&path)) {
            self.state.cache = path.cache_at_distance(self.state.last_path_distance);
            self.seen = Arc::downgrade(&path);
            tracing::trace!(
                distance = self.state.last_path_distance,
                index = self.state.cache.index(),
                "locality cache re-seeded for new path"
            );
        }

        let locator = self
            .config
            .locator
            .unwrap_or_else(|| path.default_locator());
        let nearest_distance =
            path.distance_near(&body.position, &mut self.state.cache, &locator)?;
        let target_distance = nearest_distance + self.config.lookahead_offset;
        let target = path.position_at_distance(target_distance)?;

        let command = match &self.config.mode {
            FollowMode::Seek(steering) => {
                Command::Force(seek(&body.position, &body.velocity, &target, steering))
            }
            FollowMode::Direct { speed } => {
                let next = move_towards(&body.position, &target, speed * dt);
                Command::Displacement(next - body.position)
            }
        };

        self.state.last_path_distance = nearest_distance;

        Some(FollowOutput {
            nearest_distance,
            target_distance,
            target,
            command,
        })
    }
}
