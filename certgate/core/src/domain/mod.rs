// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Certification application aggregate, its value objects, events, and the
//! ports it is persisted and tested through.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Tier rules, scoring, review state machine

pub mod certification;
pub mod checks;
pub mod compliance;
pub mod config;
pub mod deployment;
pub mod events;
pub mod repository;
pub mod test_details;
pub mod testing_suite;
pub mod tier;
