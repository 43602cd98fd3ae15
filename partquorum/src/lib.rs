#![doc = include_str!("lib_readme.md")]
#![deny(unused_qualifications)]

pub mod errors;
pub mod part;
pub mod quorum;
pub mod storage;
pub mod testing;

pub use anyerror;
pub use anyerror::AnyError;

pub use crate::part::FormatVersion;
pub use crate::part::PartId;
pub use crate::quorum::apply_confirmation;
pub use crate::quorum::QuorumState;
pub use crate::storage::CoordStore;
pub use crate::storage::CoordStoreExt;
pub use crate::storage::Versioned;
