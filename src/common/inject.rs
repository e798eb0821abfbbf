//! The mutate-and-send cycle performed by each invocation

use ethframe::{mutate, Frame, DEFAULT_TEMPLATE};
use rawlink::{LinkBackend, RawSocket};

use crate::args::l2inject::Config;

#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error(transparent)]
    Frame(#[from] ethframe::Error),
    #[error(transparent)]
    Link(#[from] rawlink::Error),
}

/// Builds the frame to send: the default template with every configured edit applied
pub fn build_frame(config: &Config) -> Result<Frame, InjectError> {
    let mut frame = Frame::from_template(&DEFAULT_TEMPLATE)?;

    // The payload goes first since it rewrites both length fields
    if let Some(payload) = &config.payload {
        mutate::set_payload(&mut frame, payload.as_bytes())?;
    }

    if config.source_port.is_some() || config.destination_port.is_some() {
        let source_port = config
            .source_port
            .unwrap_or_else(|| frame.udp().source_port());
        let destination_port = config
            .destination_port
            .unwrap_or_else(|| frame.udp().destination_port());
        mutate::set_ports(&mut frame, source_port, destination_port);
    }

    if let Some(destination) = config.destination_address {
        mutate::set_destination_address(&mut frame, destination);
    }
    mutate::set_source_address(&mut frame, config.source_address);

    if config.fix_udp_checksum {
        mutate::recalculate_udp_checksum(&mut frame)?;
    }

    // Never hand the socket something the receiver's IP stack would drop
    frame.validate()?;
    log::debug!("Built frame: {:?}", frame);
    Ok(frame)
}

/// Opens a raw socket, binds it to `interface`, and sends `frame` once.
///
/// The socket is closed before this returns, whether or not the send succeeded.
pub fn transmit<B: LinkBackend>(
    backend: B,
    interface: &str,
    frame: &Frame,
) -> Result<usize, InjectError> {
    let bytes = frame.as_bytes()?;

    let socket = RawSocket::open_with(backend)?;
    log::info!("Socket created successfully");

    let socket = socket.bind(interface)?;
    socket.send(bytes)?;
    log::info!("Packet sent successfully");

    Ok(bytes.len())
}
