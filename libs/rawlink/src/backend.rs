use std::{ffi::CStr, io, mem::size_of, os::fd::RawFd};

/// Link-layer destination used for both `bind` and `sendto`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAddress {
    /// Kernel index of the interface
    pub interface_index: u32,
    /// EtherType to match, in host byte order
    pub protocol: u16,
}

/// The system calls a raw socket needs.
///
/// [`SystemBackend`] forwards these straight to the kernel. Sockets are generic over this
/// trait so their lifecycle can be driven without privileges.
pub trait LinkBackend {
    /// Opens a raw link-layer socket that sends frames including their Ethernet header
    fn open(&self) -> io::Result<RawFd>;

    /// Resolves an interface name to its index
    fn interface_index(&self, name: &CStr) -> io::Result<u32>;

    fn bind(&self, fd: RawFd, address: &LinkAddress) -> io::Result<()>;

    /// Sends `frame` as a single datagram, returning the number of bytes written
    fn send_to(&self, fd: RawFd, frame: &[u8], address: &LinkAddress) -> io::Result<usize>;

    fn close(&self, fd: RawFd);
}

/// A [`LinkBackend`] backed by `libc`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackend;

impl SystemBackend {
    /// Builds the `sockaddr_ll` the kernel expects for `address`
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    #[allow(clippy::cast_sign_loss)]
    fn sockaddr(address: &LinkAddress) -> libc::sockaddr_ll {
        // SAFETY: `sockaddr_ll` is plain old data, all zeroes is a valid value
        let mut sockaddr: libc::sockaddr_ll = unsafe { std::mem::zeroed() };
        sockaddr.sll_family = libc::AF_PACKET as libc::c_ushort;
        sockaddr.sll_protocol = address.protocol.to_be();
        sockaddr.sll_ifindex = address.interface_index as libc::c_int;
        sockaddr
    }
}

impl LinkBackend for SystemBackend {
    fn open(&self) -> io::Result<RawFd> {
        log::trace!("Calling socket(AF_PACKET, SOCK_RAW, ETH_P_ALL)");
        #[allow(clippy::cast_possible_truncation)]
        let protocol = libc::c_int::from((libc::ETH_P_ALL as u16).to_be());
        let fd = unsafe { libc::socket(libc::AF_PACKET, libc::SOCK_RAW, protocol) };
        log::trace!("socket returned: {}", fd);

        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(fd)
    }

    fn interface_index(&self, name: &CStr) -> io::Result<u32> {
        let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
        log::trace!("if_nametoindex({:?}) returned: {}", name, index);

        // Zero is never a valid index, the kernel uses it to signal failure
        if index == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(index)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn bind(&self, fd: RawFd, address: &LinkAddress) -> io::Result<()> {
        let sockaddr = Self::sockaddr(address);
        let err = unsafe {
            libc::bind(
                fd,
                std::ptr::addr_of!(sockaddr).cast::<libc::sockaddr>(),
                size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        log::trace!("bind returned: {}", err);

        if err < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    fn send_to(&self, fd: RawFd, frame: &[u8], address: &LinkAddress) -> io::Result<usize> {
        let sockaddr = Self::sockaddr(address);
        let sent = unsafe {
            libc::sendto(
                fd,
                frame.as_ptr().cast::<libc::c_void>(),
                frame.len(),
                0,
                std::ptr::addr_of!(sockaddr).cast::<libc::sockaddr>(),
                size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        log::trace!("sendto returned: {}", sent);

        if sent < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(sent as usize)
    }

    fn close(&self, fd: RawFd) {
        if unsafe { libc::close(fd) } < 0 {
            log::warn!(
                "Failed to close socket {}: {}",
                fd,
                io::Error::last_os_error()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sockaddr_is_network_order() {
        let sockaddr = SystemBackend::sockaddr(&LinkAddress {
            interface_index: 3,
            protocol: 0x0003,
        });
        assert_eq!(i32::from(sockaddr.sll_family), libc::AF_PACKET);
        assert_eq!(sockaddr.sll_protocol.to_ne_bytes(), [0x00, 0x03]);
        assert_eq!(sockaddr.sll_ifindex, 3);
        assert_eq!(sockaddr.sll_halen, 0);
    }

    #[test]
    fn test_unknown_interface() {
        let name = CStr::from_bytes_with_nul(b"l2inject-none0\0").unwrap();
        assert!(SystemBackend.interface_index(name).is_err());
    }
}
