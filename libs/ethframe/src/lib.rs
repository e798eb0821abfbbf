#![doc = include_str!("../README.md")]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod checksum;
mod error;
mod frame;
pub mod headers;
pub mod mutate;

pub use error::{Error, Result};
pub use frame::{Frame, DEFAULT_TEMPLATE, FRAME_CAPACITY, HEADERS_LEN};
