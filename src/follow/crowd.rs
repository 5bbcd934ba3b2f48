use std::sync::Arc;

use slotmap::SlotMap;

use crate::error::StoreError;
use crate::path::PathHandle;

use super::follower::{AgentBody, Command, FollowOutput, FollowerConfig, PathFollower};

slotmap::new_key_type! {
    /// Unique identifier for a follower in a [`Crowd`].
    pub struct FollowerId;
}

/// Applies follower commands to agent bodies.
///
/// This is the seam to the physics/transform system; [`SemiImplicitEuler`] is
/// the minimal in-crate implementation.
pub trait Integrator {
    /// Advances `body` by `dt` under `command`.
    fn apply(&self, body: &mut AgentBody, command: &Command, dt: f64);
}

/// Semi-implicit Euler step: forces update velocity, then velocity moves the body.
/// Displacements move the body directly and leave velocity untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler {
    /// Optional cap on the resulting speed.
    pub max_speed: Option<f64>,
}

impl Integrator for SemiImplicitEuler {
    fn apply(&self, body: &mut AgentBody, command: &Command, dt: f64) {
        match command {
            Command::Force(force) => {
                body.velocity += force * dt;
                if let Some(max) = self.max_speed {
                    body.velocity = body.velocity.cap_magnitude(max);
                }
                body.position += body.velocity * dt;
            }
            Command::Displacement(delta) => {
                body.position += *delta;
            }
        }
    }
}

#[derive(Debug)]
struct Agent {
    follower: PathFollower,
    body: AgentBody,
}

/// Arena of followers updated together once per tick.
///
/// Each follower keeps its own progress state; paths are shared through
/// their handles.
#[derive(Debug, Default)]
pub struct Crowd {
    agents: SlotMap<FollowerId, Agent>,
}

impl Crowd {
    /// Creates an empty crowd.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a follower with its initial body and returns its ID.
    pub fn insert(&mut self, follower: PathFollower, body: AgentBody) -> FollowerId {
        self.agents.insert(Agent { follower, body })
    }

    /// Validates `config` and inserts a follower bound to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn spawn(
        &mut self,
        config: FollowerConfig,
        path: Arc<PathHandle>,
        body: AgentBody,
    ) -> crate::Result<FollowerId> {
        config.validate()?;
        Ok(self.insert(PathFollower::with_path(config, path), body))
    }

    /// Removes a follower, returning it with its last body state.
    pub fn remove(&mut self, id: FollowerId) -> Option<(PathFollower, AgentBody)> {
        self.agents.remove(id).map(|a| (a.follower, a.body))
    }

    /// Returns the number of followers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns `true` if the crowd has no followers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Returns a reference to the follower, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the follower is not in the crowd.
    pub fn follower(&self, id: FollowerId) -> Result<&PathFollower, StoreError> {
        self.agent(id).map(|a| &a.follower)
    }

    /// Returns a mutable reference to the follower, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the follower is not in the crowd.
    pub fn follower_mut(&mut self, id: FollowerId) -> Result<&mut PathFollower, StoreError> {
        self.agents
            .get_mut(id)
            .map(|a| &mut a.follower)
            .ok_or_else(|| StoreError::EntityNotFound("follower".into()))
    }

    /// Returns the follower's body, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the follower is not in the crowd.
    pub fn body(&self, id: FollowerId) -> Result<&AgentBody, StoreError> {
        self.agent(id).map(|a| &a.body)
    }

    /// Overwrites the follower's body, e.g. after a teleport.
    ///
    /// # Errors
    ///
    /// Returns an error if the follower is not in the crowd.
    pub fn set_body(&mut self, id: FollowerId, body: AgentBody) -> Result<(), StoreError> {
        let agent = self
            .agents
            .get_mut(id)
            .ok_or_else(|| StoreError::EntityNotFound("follower".into()))?;
        agent.body = body;
        Ok(())
    }

    /// Ticks every follower in turn and integrates its command.
    ///
    /// Idle followers are skipped. Returns the outputs of the followers that
    /// produced one.
    pub fn tick<I: Integrator>(
        &mut self,
        dt: f64,
        integrator: &I,
    ) -> Vec<(FollowerId, FollowOutput)> {
        let mut outputs = Vec::with_capacity(self.agents.len());
        for (id, agent) in &mut self.agents {
            let Some(output) = agent.follower.tick(&agent.body, dt) else {
                continue;
            };
            integrator.apply(&mut agent.body, &output.command, dt);
            outputs.push((id, output));
        }
        outputs
    }

    fn agent(&self, id: FollowerId) -> Result<&Agent, StoreError> {
        self.agents
            .get(id)
            .ok_or_else(|| StoreError::EntityNotFound("follower".into()))
    }
}
