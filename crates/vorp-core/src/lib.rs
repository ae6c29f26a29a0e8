// Library root for the draft scoring and session-state engine.
//
// The engine consumes a cleaned player table plus a validated roster
// configuration and exposes a scoring function and a session-mutation API.
// Everything that touches files, terminals, or CSV parsing lives in the
// `vorp-cli` crate.

pub mod config;
pub mod draft;
pub mod error;
pub mod pool;
pub mod snapshot;
pub mod valuation;

pub use config::{DraftConfig, NeedWeights, RosterConfig};
pub use draft::position::Position;
pub use draft::roster::{NeedState, RosterCounts};
pub use draft::state::{DraftEvent, DraftSession};
pub use error::DraftError;
pub use pool::{Player, PlayerPool};
pub use valuation::scoring::CandidateScore;
