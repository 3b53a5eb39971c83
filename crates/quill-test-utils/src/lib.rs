// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Quill integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic tests without a running backend.
//!
//! # Components
//!
//! - [`MockSynthesis`] - Scripted synthesis backend that records payloads
//! - [`MockUpload`] - Signature upload with configurable outcome
//! - [`MemoryStore`] - In-memory conversation store
//! - [`TestHarness`] - Controller, signature workflow and persistence on mocks

pub mod harness;
pub mod mock_store;
pub mod mock_synthesis;
pub mod mock_upload;

pub use harness::{png_signature, TestHarness, TestHarnessBuilder};
pub use mock_store::{MemoryStore, MockRenderer};
pub use mock_synthesis::{MockSynthesis, Scripted};
pub use mock_upload::{MockUpload, UploadBehavior};
