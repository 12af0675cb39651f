//! Error Kinds
//!
//! The closed set of managed error kinds and the wire tag table.
//!
//! Every kind has exactly one wire tag. The table is generated from a single
//! list so that [`ErrorKind::tag`], [`ErrorKind::from_tag`] and
//! [`ErrorKind::ALL`] can never drift apart.
//!
//! # Example
//!
//! ```
//! use trellis_core::ErrorKind;
//!
//! assert_eq!(ErrorKind::Validation.tag(), "ValidationException");
//! assert_eq!(ErrorKind::from_tag("TimeoutException"), Some(ErrorKind::Timeout));
//! assert_eq!(ErrorKind::from_tag("NotARealKind"), None);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error returned when a string is not a known wire tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    /// The tag that did not match any kind
    pub tag: String,
}

impl Display for ParseKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown error kind tag '{}'", self.tag)
    }
}

impl std::error::Error for ParseKindError {}

/// Defines `ErrorKind` together with its tag table.
macro_rules! define_kinds {
    ($($(#[$meta:meta])* $variant:ident => $tag:literal,)+) => {
        /// Kind of a managed error.
        ///
        /// Fieldless mirror of [`crate::ManagedError`] used for dispatch,
        /// status mapping and tag lookup.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $($(#[$meta])* $variant,)+
        }

        impl ErrorKind {
            /// Every kind, in table order.
            pub const ALL: &'static [ErrorKind] = &[$(ErrorKind::$variant,)+];

            /// Wire tag for this kind.
            #[must_use]
            pub fn tag(self) -> &'static str {
                match self {
                    $(ErrorKind::$variant => $tag,)+
                }
            }

            /// Looks up a kind by its exact wire tag.
            #[must_use]
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(ErrorKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

define_kinds! {
    /// Identity could not be established.
    Authentication => "AuthenticationException",
    /// Identity established but the action is forbidden.
    Authorization => "AuthorizationException",
    /// General security violation.
    Security => "SecurityException",
    /// Access denied to an external resource.
    ExternalAccess => "ExternalAccessException",
    /// Operation exceeded its allotted time.
    Timeout => "TimeoutException",
    /// Transport or connectivity failure.
    Communication => "CommunicationException",
    /// Missing or invalid configuration.
    Configuration => "ConfigurationException",
    /// Input data failed a business rule.
    Validation => "ValidationException",
    /// Persistence or data-layer failure.
    Data => "DataException",
    /// Uniqueness constraint violated.
    Duplicate => "DuplicateException",
    /// Internal invariant violated.
    Logic => "LogicException",
    /// Anything not otherwise classified.
    Unhandled => "UnhandledException",
}

impl ErrorKind {
    /// Parent kind in the taxonomy, if any.
    ///
    /// Authentication, Authorization and ExternalAccess are specialisations
    /// of Security. All other kinds hang directly off the root.
    #[must_use]
    pub fn parent(self) -> Option<ErrorKind> {
        match self {
            ErrorKind::Authentication | ErrorKind::Authorization | ErrorKind::ExternalAccess => {
                Some(ErrorKind::Security)
            }
            _ => None,
        }
    }

    /// Returns true for Security and its specialisations.
    #[must_use]
    pub fn is_security(self) -> bool {
        self == ErrorKind::Security || self.parent() == Some(ErrorKind::Security)
    }

    /// Returns true if a caller may reasonably retry the operation.
    ///
    /// Advisory only. Nothing in this workspace retries.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::Communication)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ErrorKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorKind::from_tag(s).ok_or_else(|| ParseKindError { tag: s.to_string() })
    }
}
