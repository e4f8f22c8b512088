// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod cache;
pub mod generator;
pub mod git;
pub mod llm;
pub mod privacy;
pub mod prompt;
pub mod provider;
pub mod style;
