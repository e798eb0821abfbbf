use std::{
    ffi::CString,
    os::fd::{AsRawFd, RawFd},
};

use crate::{
    backend::{LinkAddress, LinkBackend, SystemBackend},
    error::{Error, Result},
};

/// `ETH_P_ALL`: every EtherType
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
const ETH_P_ALL: u16 = libc::ETH_P_ALL as u16;

/// An open, unbound `AF_PACKET` raw socket.
///
/// The file descriptor is closed exactly once, when this value (or the [`BoundSocket`]
/// it turns into) is dropped.
#[derive(Debug)]
pub struct RawSocket<B: LinkBackend = SystemBackend> {
    /// Internal file descriptor for the socket
    fd: RawFd,
    /// System call implementation
    backend: B,
}

impl RawSocket {
    /// Opens a new raw link-layer socket through the kernel
    pub fn open() -> Result<Self> {
        Self::open_with(SystemBackend)
    }
}

impl<B: LinkBackend> RawSocket<B> {
    /// Opens a new raw link-layer socket through `backend`
    pub fn open_with(backend: B) -> Result<Self> {
        log::debug!("Opening raw link-layer socket");
        let fd = backend.open().map_err(|err| {
            log::error!("Failed to open raw socket");
            Error::Open(err)
        })?;
        log::debug!("Opened raw socket: fd {}", fd);
        Ok(Self { fd, backend })
    }

    /// Binds the socket to the interface named `interface`.
    ///
    /// On failure the socket is dropped and its file descriptor closed before returning.
    pub fn bind(self, interface: &str) -> Result<BoundSocket<B>> {
        // Anything the kernel could never accept is rejected before touching it
        if interface.is_empty() || interface.len() >= libc::IF_NAMESIZE {
            return Err(Error::InvalidInterfaceName(interface.to_string()));
        }
        let name = CString::new(interface)
            .map_err(|_| Error::InvalidInterfaceName(interface.to_string()))?;

        // Look up the interface index
        let interface_index =
            self.backend
                .interface_index(&name)
                .map_err(|source| Error::UnknownInterface {
                    name: interface.to_string(),
                    source,
                })?;
        log::trace!("Interface {} has index {}", interface, interface_index);

        let address = LinkAddress {
            interface_index,
            protocol: ETH_P_ALL,
        };
        self.backend.bind(self.fd, &address).map_err(Error::Bind)?;
        log::debug!("Bound raw socket to {}", interface);

        Ok(BoundSocket {
            socket: self,
            address,
            interface: interface.to_string(),
        })
    }
}

impl<B: LinkBackend> AsRawFd for RawSocket<B> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl<B: LinkBackend> Drop for RawSocket<B> {
    fn drop(&mut self) {
        log::trace!("Closing raw socket: fd {}", self.fd);
        self.backend.close(self.fd);
    }
}

/// A raw socket bound to a single interface, ready to transmit frames
#[derive(Debug)]
pub struct BoundSocket<B: LinkBackend = SystemBackend> {
    socket: RawSocket<B>,
    address: LinkAddress,
    interface: String,
}

impl<B: LinkBackend> BoundSocket<B> {
    /// Name of the bound interface
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Kernel index of the bound interface
    #[must_use]
    pub fn interface_index(&self) -> u32 {
        self.address.interface_index
    }

    /// Transmits `frame` (Ethernet header included) as a single blocking send.
    ///
    /// Writing fewer bytes than `frame.len()` counts as a failure.
    #[profiling::function]
    pub fn send(&self, frame: &[u8]) -> Result<()> {
        log::debug!("Sending {} byte frame on {}", frame.len(), self.interface);
        let sent = self
            .socket
            .backend
            .send_to(self.socket.fd, frame, &self.address)
            .map_err(Error::Send)?;

        if sent != frame.len() {
            return Err(Error::PartialSend {
                expected: frame.len(),
                actual: sent,
            });
        }
        Ok(())
    }
}

impl<B: LinkBackend> AsRawFd for BoundSocket<B> {
    fn as_raw_fd(&self) -> RawFd {
        self.socket.fd
    }
}
