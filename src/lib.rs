pub mod audit;
pub mod commitment;
pub mod domain;
pub mod seed;
pub mod session;
pub mod shuffling;

pub use domain::*;
pub use session::{BeginHandParams, RngSessionManager, SessionError};
pub use shuffling::shuffle_deck;
