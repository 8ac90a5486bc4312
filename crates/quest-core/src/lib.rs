//! Game rules on top of the quest store.
//!
//! [`UserDirectory`] owns users and credential checks, [`GameFacade`] owns
//! positions, posts and the play area. Both are plain synchronous types
//! built around an `Arc<Database>`; async callers run them on a blocking
//! thread.

pub mod error;
pub mod game;
pub mod users;

pub use error::GameError;
pub use game::{GameConfig, GameFacade, NewPost};
pub use users::{UserDirectory, Verification};
