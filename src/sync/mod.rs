pub mod poller;
pub mod refresh;

pub use poller::Poller;
pub use refresh::{RefreshTrigger, Refresher};
