// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based issue classification for the Triage support desk.
//!
//! [`KeywordClassifier`] maps free-text issue descriptions onto the
//! configured category set. Rules are data loaded from `[classifier]`, so
//! categories can be added without touching the matching code.

pub mod classifier;

pub use classifier::{CategoryScore, ClassificationResult, KeywordClassifier, KeywordRule};
