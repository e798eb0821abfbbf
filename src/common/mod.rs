//! Common code used by the `l2inject` binary

pub mod inject;
pub mod logging;
pub mod permissions;
