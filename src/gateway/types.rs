//! Gateway types
//!
//! The insert outcome tag and the trait every persistence backend implements.

use crate::error::Result;
use crate::types::SqlParam;
use std::cell::Cell;

/// Classified result of one insert attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row persisted
    Ok,
    /// The store rejected the row on a uniqueness constraint
    DuplicateKey,
    /// Any other persistence error
    Failure(String),
}

/// Sole persistence access point for the mappers
///
/// `insert` never returns an error: every store error is classified into an
/// [`InsertOutcome`]. Each call is its own unit of work.
pub trait InsertGateway {
    /// Execute one parameterized insert
    fn insert(&self, statement: &str, params: &[SqlParam]) -> InsertOutcome;

    /// Release the underlying connection
    fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Gateway that accepts every row without writing anything
#[derive(Debug, Default)]
pub struct DryRunGateway {
    attempted: Cell<usize>,
}

impl DryRunGateway {
    /// Create a new dry-run gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of inserts that would have been issued
    pub fn attempted(&self) -> usize {
        self.attempted.get()
    }
}

impl InsertGateway for DryRunGateway {
    fn insert(&self, statement: &str, params: &[SqlParam]) -> InsertOutcome {
        self.attempted.set(self.attempted.get() + 1);
        tracing::debug!("dry-run: {} {:?}", statement, params);
        InsertOutcome::Ok
    }
}
