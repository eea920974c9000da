// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the certgate CLI

pub mod application;
pub mod config;
pub mod db;
pub mod deployment;

pub use self::application::ApplicationCommand;
pub use self::config::ConfigCommand;
pub use self::db::DbCommand;
pub use self::deployment::DeploymentCommand;
