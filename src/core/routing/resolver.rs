//! Area code to owner resolution

use super::counter::OwnerLoadCounter;
use super::table::RoutingTable;
use crate::domain::{AreaCode, OwnerName};
use std::sync::Arc;

/// Resolves area codes to owners
///
/// Reserved-range codes go to the least loaded fair pool member, any other
/// code to the first fixed owner listing it. The load counter is passed in so
/// each run owns its own fairness state.
#[derive(Debug, Clone)]
pub struct OwnerResolver {
    table: Arc<RoutingTable>,
}

impl OwnerResolver {
    /// Creates a resolver over a validated routing table
    pub fn new(table: Arc<RoutingTable>) -> Self {
        Self { table }
    }

    /// The routing table in use
    pub fn table(&self) -> &RoutingTable {
        &self.table
    }

    /// Fresh zeroed counter for the configured fair pool
    pub fn new_counter(&self) -> OwnerLoadCounter {
        OwnerLoadCounter::new(self.table.fair_pool())
    }

    /// Resolves the owner of an area code
    ///
    /// Returns `None` when the code is neither reserved nor listed by any
    /// owner. Only reserved-range resolutions touch `counter`.
    pub fn resolve(&self, code: AreaCode, counter: &mut OwnerLoadCounter) -> Option<OwnerName> {
        if self.table.is_reserved(code) {
            return counter.assign_next();
        }
        self.table.fixed_owner(code).cloned()
    }

    /// Published label of an owner
    pub fn label_for<'a>(&'a self, owner: &'a OwnerName) -> &'a str {
        self.table.label_for(owner)
    }
}
