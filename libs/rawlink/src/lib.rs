#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod backend;
mod error;
mod socket;

pub use backend::{LinkAddress, LinkBackend, SystemBackend};
pub use error::{Error, Result};
pub use socket::{BoundSocket, RawSocket};
