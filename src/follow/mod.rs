mod crowd;
mod follower;

pub use crowd::{Crowd, FollowerId, Integrator, SemiImplicitEuler};
pub use follower::{
    AgentBody, Command, FollowMode, FollowOutput, FollowerConfig, FollowerState, FollowerStatus,
    PathFollower,
};
