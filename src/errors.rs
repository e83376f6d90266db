use core::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};

/// `ErrorKind` classifies a `ScrapliError` so callers can decide how to react (reconnect,
/// re-prompt for credentials, inspect a `Response`, ...) without parsing `details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operation was attempted on a transport/channel that has not been opened.
    NotOpened,
    /// The underlying transport could not be established, or was lost mid session.
    ConnectionError,
    /// In channel or transport level authentication was rejected.
    AuthFailed,
    /// A `timeout_ops` or read deadline elapsed before the expected state transition occurred.
    OperationTimeout,
    /// The privilege engine could not reach (or verify) the target privilege level.
    PrivilegeError,
    /// A `failed_when_contains` marker was seen in a `Response`, or `raise_for_status` was called on
    /// a failed `Response`.
    CommandFailure,
    /// Caller passed an invalid value (bad regex, unknown privilege level name, empty command list).
    ValueError,
    /// The requested behavior is not supported for the current transport/platform.
    Unsupported,
}

impl Display for ErrorKind {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> FmtResult {
        let s = match self {
            Self::NotOpened => "not opened",
            Self::ConnectionError => "connection error",
            Self::AuthFailed => "authentication failed",
            Self::OperationTimeout => "operation timeout",
            Self::PrivilegeError => "privilege error",
            Self::CommandFailure => "command failure",
            Self::ValueError => "value error",
            Self::Unsupported => "unsupported",
        };

        write!(f, "{s}")
    }
}

/// `ScrapliError` is a base error for all errors this crate produces. `kind` allows callers to
/// `match` on the error category; `details` carries the human readable context added by whichever
/// layer (transport, channel, driver) wrapped the underlying failure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {details}")]
pub struct ScrapliError {
    /// The category of error -- match on this rather than parsing `details`.
    pub kind: ErrorKind,
    /// A string holding details about the error.
    pub details: String,
}

impl ScrapliError {
    /// Construct a new `ScrapliError` of the given kind.
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            details: details.into(),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}
