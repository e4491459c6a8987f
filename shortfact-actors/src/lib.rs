//! Minimal mailbox-actor runtime for the Shortfact UI.
//!
//! Each actor owns its state and mutates it only inside `handle`, one
//! message at a time; long-running work is spawned off and reports back via
//! the actor's own [`actor::Addr`]. A broadcast channel coordinates
//! cooperative shutdown across actors and feeder tasks.
pub mod actor;
pub mod system;

pub use actor::{spawn_actor, Actor, ActorHandle, Addr, Context};
pub use system::{ActorSystem, ShutdownHandle};
