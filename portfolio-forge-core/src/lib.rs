#![doc = "portfolio-forge-core: core pipeline logic for portfolio-forge."]

//! This crate contains the domain types, contract traits and orchestration
//! pipeline for generating and publishing portfolio sites. Network transports
//! (GitHub, Vercel, the generative model) live in the binary crate behind the
//! traits defined in [`contract`].
//!
//! # Usage
//! Add this as a dependency for all shared pipeline, publishing and
//! deployment-polling code.

pub mod content;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod fileset;
pub mod materialize;
pub mod pipeline;
pub mod publish;
