// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the command line to the graustufe backend crates.
//
// Each service wraps one backend concern in a form the entry point can call
// directly: where output goes, how a batch is driven and reported, and how the
// result is shown to the user.

pub mod batch;
pub mod output_dir;
pub mod reveal;
