use nix::unistd::Uid;

/// Warns when the binary is not being executed as root.
///
/// A process holding `CAP_NET_RAW` can still open the socket, so this does not exit. If the
/// privilege really is missing, the socket call reports it.
pub fn warn_if_not_root() {
    if !Uid::effective().is_root() {
        log::warn!("Not running as root. Opening a raw socket requires CAP_NET_RAW");
    }
}
