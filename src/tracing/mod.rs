// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span constructors for slot scan operations.
//!
//! Crate-private: callers configure output through `tracing-subscriber`, and
//! span names all start with `slotscan.`.

pub(crate) mod spans;
