pub mod align;
pub mod backfill;
pub mod coerce;
pub mod headers;
pub mod identity;
pub mod pipeline;
pub mod routing;
pub mod structural;

pub use pipeline::{NormalizeOptions, normalize_document};
pub use routing::{RoutingOptions, TimeSlot};
