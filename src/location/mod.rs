//! Cascading Province → District → Ward address selection

pub mod client;
pub mod errors;
pub mod form;
pub mod offline;
pub mod resolver;
pub mod types;

pub use client::{HttpLocationClient, LocationLookup};
pub use errors::{LocationError, LocationResult};
pub use form::{FormState, LocationField, MemoryForm};
pub use offline::StaticLocations;
pub use resolver::{fetch, FetchTicket, LocationResolver, ResolverPhase, Step};
pub use types::{LocationNames, LocationValue, Region, Selection, Tier};
