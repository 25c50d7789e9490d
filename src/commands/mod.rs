// Copyright (c) 2024-2026 Nervosys LLC
// SPDX-License-Identifier: Apache-2.0
//! Command implementations

mod research;
mod search;

pub use research::*;
pub use search::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Write command output to a file, reporting the path.
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    println!("Output written to {}", path.display());
    Ok(())
}
