//! Evasive movement for a single agent: keep facing a threat, and when it gets
//! close and can see the agent, retreat to the farthest hidden, walkable point
//! found by Poisson disk sampling around the agent.
pub mod config;
pub mod controller;
pub mod events;
pub mod geometry;
pub mod oracle;
pub mod selection;
pub mod visibility;
