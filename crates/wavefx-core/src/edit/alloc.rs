//! Replacement-buffer allocation
//!
//! Reallocating operations obtain their new buffer through a
//! `SampleAllocator` so that allocation failure is reported instead of
//! aborting the process.

use super::error::{EditError, EditResult};
use crate::types::Sample;

/// Source of empty sample buffers with reserved capacity
pub trait SampleAllocator: Send + Sync {
    /// Return an empty `Vec` able to hold `len` samples without reallocating
    fn allocate(&self, len: usize) -> EditResult<Vec<Sample>>;
}

/// Allocates from the global heap with `try_reserve_exact`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl SampleAllocator for SystemAllocator {
    fn allocate(&self, len: usize) -> EditResult<Vec<Sample>> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(len)
            .map_err(|_| EditError::Allocation { requested: len })?;
        Ok(buffer)
    }
}
