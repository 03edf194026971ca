//! POSIX-aligned error taxonomy returned by the four tree operations.

use thiserror::Error;

/// Errors returned by [`crate::Tree`] operations.
///
/// Each variant carries the same meaning as the numeric code a C implementation of this
/// namespace would return (see the source's `errno.h` usage); [`TreeError::code`] exposes that
/// raw number for callers bridging into POSIX-style error reporting.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// A path argument failed validation (§3): too long, missing leading/trailing `/`, an empty
    /// component, a component over length, or a character outside `[a-z]`.
    #[error("invalid path")]
    InvalidArgument,
    /// Some component of the path (intermediate or final) does not exist.
    #[error("no such directory")]
    NotFound,
    /// The target name is already occupied.
    #[error("directory already exists")]
    AlreadyExists,
    /// `remove` was asked to remove a directory that still has children.
    #[error("directory not empty")]
    NotEmpty,
    /// An operation tried to remove the root directory.
    #[error("root directory is busy")]
    Busy,
    /// `move`'s target lies inside (or equals, non-trivially) its source.
    #[error("cannot move a directory inside itself")]
    TargetInsideSource,
}

impl TreeError {
    /// The POSIX-aligned numeric code for this error, as specified in §7.
    ///
    /// [`TreeError::TargetInsideSource`] has no POSIX equivalent; the source implementation
    /// reserves `-1` for it, which this mirrors.
    pub const fn code(&self) -> i32 {
        match self {
            TreeError::InvalidArgument => libc_like::EINVAL,
            TreeError::NotFound => libc_like::ENOENT,
            TreeError::AlreadyExists => libc_like::EEXIST,
            TreeError::NotEmpty => libc_like::ENOTEMPTY,
            TreeError::Busy => libc_like::EBUSY,
            TreeError::TargetInsideSource => -1,
        }
    }
}

/// Numeric constants mirroring the platform's `errno.h`, kept local so this crate does not need
/// to depend on `libc` just for five integers.
mod libc_like {
    pub const EINVAL: i32 = 22;
    pub const ENOENT: i32 = 2;
    pub const EEXIST: i32 = 17;
    pub const ENOTEMPTY: i32 = 39;
    pub const EBUSY: i32 = 16;
}

/// Convenience alias for the `Result` type every tree operation returns.
pub type TreeResult<T> = Result<T, TreeError>;
