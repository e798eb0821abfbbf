/// All possible errors thrown by `rawlink` functions
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("socket: {0}")]
    Open(#[source] std::io::Error),
    #[error("Invalid interface name: {0:?}")]
    InvalidInterfaceName(String),
    #[error("if_nametoindex: unknown interface {name}: {source}")]
    UnknownInterface {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bind: {0}")]
    Bind(#[source] std::io::Error),
    #[error("sendto: {0}")]
    Send(#[source] std::io::Error),
    #[error("sendto: partial send, wrote {actual} of {expected} bytes")]
    PartialSend { expected: usize, actual: usize },
}

/// Result type for `rawlink`
pub type Result<T> = std::result::Result<T, Error>;
