// Logs module - Tail and follow for growing log files
pub mod cancel;
pub mod cursor;
pub mod follow;
pub mod tail;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use cursor::{Observation, TailCursor, TailWindow};
pub use follow::{follow, follow_with_interval, FollowState, DEFAULT_POLL_INTERVAL};
pub use tail::tail;
