pub mod adversary;
pub mod endpoint;

pub use adversary::{Adversary, DiscreteLogCracker};
pub use endpoint::{Endpoint, GroupParams, PublicView};
