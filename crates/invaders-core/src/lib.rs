//! Core types and definitions for the invaders formation simulation.
//!
//! This crate defines the vocabulary shared by the engine and the runner:
//! identifiers, configuration, commands, events, state snapshots, and
//! constants. It has no dependency on any runtime, renderer, or audio layer.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
