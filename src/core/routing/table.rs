//! Immutable routing table built from configuration

use crate::config::schema::{ReservedRange, RoutingConfig};
use crate::core::normalize::{assigned_area_codes, region_for_area_code};
use crate::domain::{AreaCode, OwnerName, Result, RouterError};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Lowest two-digit area code accepted in the fixed table
const MIN_AREA_CODE: u32 = 10;

/// Highest two-digit area code accepted in the fixed table
const MAX_AREA_CODE: u32 = 99;

/// Fixed owner with its area codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerAssignment {
    /// Owner key
    pub owner: OwnerName,
    /// Area codes routed to the owner
    pub area_codes: BTreeSet<AreaCode>,
}

/// Validated routing tables
///
/// Built once at startup. Construction rejects tables where the outcome of a
/// lookup would depend on anything but the area code: codes claimed twice,
/// fixed codes shadowed by the reserved range, or duplicate pool members.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    reserved_range: ReservedRange,
    fair_pool: Vec<OwnerName>,
    owners: Vec<OwnerAssignment>,
    aliases: HashMap<OwnerName, String>,
}

impl RoutingTable {
    /// Builds and validates the routing table
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::Routing`] describing the first problem found.
    pub fn from_config(config: &RoutingConfig) -> Result<Self> {
        let range = config.reserved_range;
        if range.start > range.end {
            return Err(RouterError::Routing(format!(
                "reserved range start {} is greater than end {}",
                range.start, range.end
            )));
        }

        let fair_pool = parse_fair_pool(&config.fair_pool)?;

        let mut owners = Vec::with_capacity(config.owners.len());
        let mut claimed: HashMap<AreaCode, OwnerName> = HashMap::new();
        for rule in &config.owners {
            let owner = OwnerName::new(rule.name.as_str()).map_err(RouterError::Routing)?;
            if owners.iter().any(|o: &OwnerAssignment| o.owner == owner) {
                return Err(RouterError::Routing(format!(
                    "owner '{owner}' is declared more than once"
                )));
            }

            let mut area_codes = BTreeSet::new();
            for &value in &rule.area_codes {
                let code = AreaCode::new(value);
                if !(MIN_AREA_CODE..=MAX_AREA_CODE).contains(&value) {
                    return Err(RouterError::Routing(format!(
                        "area code {code} of owner '{owner}' is not a two-digit code"
                    )));
                }
                if range.contains(value) {
                    return Err(RouterError::Routing(format!(
                        "area code {code} of owner '{owner}' falls in the reserved range {}-{}",
                        range.start, range.end
                    )));
                }
                if let Some(previous) = claimed.insert(code, owner.clone()) {
                    return Err(RouterError::Routing(format!(
                        "area code {code} is assigned to both '{previous}' and '{owner}'"
                    )));
                }
                area_codes.insert(code);
            }

            owners.push(OwnerAssignment { owner, area_codes });
        }

        let mut aliases = HashMap::new();
        for (key, label) in &config.aliases {
            let owner = OwnerName::new(key.as_str()).map_err(RouterError::Routing)?;
            let known =
                fair_pool.contains(&owner) || owners.iter().any(|o| o.owner == owner);
            if !known {
                return Err(RouterError::Routing(format!(
                    "alias declared for unknown owner '{owner}'"
                )));
            }
            if label.trim().is_empty() {
                return Err(RouterError::Routing(format!(
                    "alias for owner '{owner}' cannot be empty"
                )));
            }
            aliases.insert(owner, label.clone());
        }

        Ok(Self {
            reserved_range: range,
            fair_pool,
            owners,
            aliases,
        })
    }

    /// The inclusive range of codes shared across the fair pool
    pub fn reserved_range(&self) -> ReservedRange {
        self.reserved_range
    }

    /// Fair pool members in tie-break order
    pub fn fair_pool(&self) -> &[OwnerName] {
        &self.fair_pool
    }

    /// Fixed assignments in match order
    pub fn owners(&self) -> &[OwnerAssignment] {
        &self.owners
    }

    /// Whether the code is distributed across the fair pool
    pub fn is_reserved(&self, code: AreaCode) -> bool {
        self.reserved_range.contains(code.value())
    }

    /// First fixed owner whose codes contain `code`
    pub fn fixed_owner(&self, code: AreaCode) -> Option<&OwnerName> {
        self.owners
            .iter()
            .find(|assignment| assignment.area_codes.contains(&code))
            .map(|assignment| &assignment.owner)
    }

    /// Published label of an owner; unaliased owners use their key
    pub fn label_for<'a>(&'a self, owner: &'a OwnerName) -> &'a str {
        self.aliases
            .get(owner)
            .map(String::as_str)
            .unwrap_or_else(|| owner.as_str())
    }

    /// Every owner that may receive rows, fixed owners first
    pub fn all_owners(&self) -> Vec<OwnerName> {
        let mut seen = HashSet::new();
        self.owners
            .iter()
            .map(|assignment| &assignment.owner)
            .chain(self.fair_pool.iter())
            .filter(|owner| seen.insert((*owner).clone()))
            .cloned()
            .collect()
    }

    /// Assigned area codes that no rule routes anywhere
    pub fn unowned_area_codes(&self) -> Vec<AreaCode> {
        assigned_area_codes()
            .filter(|code| !self.is_reserved(*code) && self.fixed_owner(*code).is_none())
            .collect()
    }

    /// Warns about assigned codes without an owner and routed codes without a state
    ///
    /// Construction stays silent; callers about to route with the table log
    /// this once.
    pub fn log_coverage_gaps(&self) {
        let unowned = self.unowned_area_codes();
        if !unowned.is_empty() {
            tracing::warn!(
                area_codes = ?unowned.iter().map(AreaCode::value).collect::<Vec<_>>(),
                "Assigned area codes without an owner will be marked unmapped"
            );
        }

        let regionless: Vec<u32> = self
            .owners
            .iter()
            .flat_map(|assignment| assignment.area_codes.iter())
            .filter(|code| region_for_area_code(**code).is_empty())
            .map(AreaCode::value)
            .collect();
        if !regionless.is_empty() {
            tracing::warn!(
                area_codes = ?regionless,
                "Routed area codes have no known state; exported rows will carry no state code"
            );
        }
    }
}

fn parse_fair_pool(names: &[String]) -> Result<Vec<OwnerName>> {
    if names.is_empty() {
        return Err(RouterError::Routing(
            "fair pool must contain at least one owner".to_string(),
        ));
    }

    let mut pool = Vec::with_capacity(names.len());
    for name in names {
        let owner = OwnerName::new(name.as_str()).map_err(RouterError::Routing)?;
        if pool.contains(&owner) {
            return Err(RouterError::Routing(format!(
                "fair pool lists '{owner}' more than once"
            )));
        }
        pool.push(owner);
    }
    Ok(pool)
}
