//! The coordination store interface boundary.
//!
//! The quorum state itself is pure and synchronous; everything that touches
//! the cluster's coordination store goes through [`CoordStore`], and
//! [`CoordStoreExt`] wraps one read-modify-CAS confirmation cycle around it.

mod coord_store;
mod coord_store_ext;
mod path_config;

pub use coord_store::CoordStore;
pub use coord_store::Versioned;
pub use coord_store_ext::CoordStoreExt;
pub use path_config::PathConfig;
