//! Owner routing
//!
//! Maps a record's area code to the owner whose destination sheet receives
//! it. Fixed codes follow the configured table; the reserved range is spread
//! evenly over the fair pool using a per-run [`OwnerLoadCounter`].

pub mod counter;
pub mod resolver;
pub mod table;

pub use counter::OwnerLoadCounter;
pub use resolver::OwnerResolver;
pub use table::{OwnerAssignment, RoutingTable};
