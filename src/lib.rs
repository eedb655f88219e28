//! # Mealie MCP Library
//!
//! Tools for working with Mealie household shopping lists, both directly and
//! through the Model Context Protocol (MCP).
//!
//! ## Client Module
//!
//! The [`client`] module provides typed wrappers over the shopping list, item
//! and recipe-association endpoints, all funnelled through one injectable
//! request executor.
//!
//! ## Server Module
//!
//! The [`server`] module exposes those operations as MCP tools that AI
//! assistants can call.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcp_mealie::{config::MealieConfig, MealieMcpServer};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = MealieConfig::from_env()?;
//! let server = MealieMcpServer::new(&config);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod server;

pub use client::ShoppingApi;
pub use server::MealieMcpServer;
