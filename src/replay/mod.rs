//! Interactive replay of a trace
//!
//! The player folds events one at a time into a [`ReplayState`], keeps
//! running [`Counters`] and narrates each step. [`reconstruct`] rebuilds any
//! prefix from scratch and must agree with the incremental fold.

pub mod counters;
pub mod narrate;
pub mod player;
pub mod state;

pub use counters::Counters;
pub use narrate::{Before, Narration};
pub use player::{CancelToken, Input, Player, PlayerState, StepInput};
pub use state::{reconstruct, ReplayState, Traversal};
