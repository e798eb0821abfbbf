//! Entrypoint for the `l2inject` binary.
//!
//! This binary takes a captured Ethernet/IPv4/UDP frame, rewrites its source address (plus any
//! other configured fields), repairs the IPv4 header checksum, and injects the result onto a
//! network interface through a raw link-layer socket. One frame is sent per invocation.

use args::l2inject::Args;
use clap::Parser;
use common::{
    inject::{build_frame, transmit},
    logging::enable_logger,
    permissions::warn_if_not_root,
};
use rawlink::SystemBackend;

mod args;
mod common;

pub fn main() {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    if let Err(error) = enable_logger(args.verbose) {
        eprintln!("Failed to initialize logging: {error}");
        std::process::exit(1);
    }

    // Figure out what we are sending
    let config = match args.data() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Failed to load configuration: {}", error);
            std::process::exit(1);
        }
    };

    // Raw sockets need privileges
    warn_if_not_root();

    // Build the frame before touching the network
    let frame = match build_frame(&config) {
        Ok(frame) => frame,
        Err(error) => {
            log::error!("Failed to build frame: {}", error);
            std::process::exit(1);
        }
    };

    // Send it. The socket is already closed by the time `transmit` returns.
    match transmit(SystemBackend, &config.interface, &frame) {
        Ok(length) => log::debug!("Sent {} bytes on {}", length, config.interface),
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    }
}
