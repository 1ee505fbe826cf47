pub mod common;
pub mod health;
pub mod pools;
pub mod protocols;

pub use health::{health, ready};
pub use pools::get_aggregated_pools;
pub use protocols::get_protocols;
