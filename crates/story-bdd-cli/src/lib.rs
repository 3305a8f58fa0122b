//! Command line front end for `story-bdd`.
//!
//! The binary reads story files, runs them through the
//! [`story_bdd::Pipeline`], and writes feature documents and step-definition
//! stubs below a configurable output directory. Configuration comes from
//! `STORY_BDD_*` environment variables overridden by command line flags.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
