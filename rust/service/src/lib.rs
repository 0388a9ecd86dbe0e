pub mod logging;
pub mod service;
pub mod session;
pub mod store;

pub use logging::init_logging;
pub use service::{ActionReply, GameService, ServiceError};
pub use session::{GameSession, SessionDirectory, SessionError};
pub use store::{StatsStore, StoreError, UserId, UserStats, STARTING_BALANCE};
