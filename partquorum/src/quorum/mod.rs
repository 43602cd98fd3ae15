//! The partition → latest-quorum-confirmed-part map and its durable
//! encodings.

mod state;


pub use state::apply_confirmation;
pub use state::QuorumState;
