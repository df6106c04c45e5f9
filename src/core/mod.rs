// Core protocol exports
pub mod filters;
pub mod formatter;
pub mod protocol;

pub use filters::{filter_restaurants, FilterCriteria, FilterValue, EMPTY_MARKERS};
pub use formatter::format_option;
pub use protocol::{InvocationPhase, ProtocolError, RestaurantProtocol};
