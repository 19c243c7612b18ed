pub mod commands;
pub mod lifecycle;
pub mod model;
pub mod store;

pub use lifecycle::{remaining_time, ListingState, RemainingTime, GRACE_PERIOD_HOURS};
pub use model::{Account, AccountInput, AccountUpdate, Category, COLLECTOR_LEVELS};
pub use store::{AccountStore, PostgresAccountStore};
