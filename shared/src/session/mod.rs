pub mod gate;
pub mod storage;
pub mod store;

pub use gate::{Route, guard, is_authorized};
pub use storage::{MemoryStorage, SessionStorage};
pub use store::{Session, SessionPhase, SessionStore};
