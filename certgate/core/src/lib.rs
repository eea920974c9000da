// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lib
//!
//! Pre-review gating for tiered vendor certification applications.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain model, use cases, and adapters for the certification gate

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
