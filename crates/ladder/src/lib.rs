//! Ladder - a career path graph engine.
//!
//! Positions are nodes, transitions are directed edges gated by required
//! skills. Given a catalog snapshot and a viewer's skills, the engine
//! classifies each transition as recommended, partially available or
//! blocked, computes which positions are reachable from a start position,
//! and assigns deterministic render coordinates.
//!
//! The engine itself ([`engine`]) is a set of pure functions over a
//! snapshot. [`app::App`] pairs it with a [`catalog::Catalog`] and the
//! repository configuration, and [`cli`] exposes it as the `ladder` binary.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod catalog;
pub mod classify;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod layout;

// Application context, configuration and CLI (needed by binary)
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
