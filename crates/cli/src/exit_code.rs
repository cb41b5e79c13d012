//! Exit codes reported by the `sparse-cp` and `mkhole` binaries.
//!
//! Values follow rsync's `errcode.h`: `0` on success, `1` for usage errors,
//! `3` when an input or output file cannot be selected, `11` for I/O
//! failures while copying.

use std::fmt;

/// Process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,

    /// Syntax or usage error.
    ///
    /// Returned when the operand count is wrong or an option value cannot be
    /// parsed.
    Syntax = 1,

    /// Errors selecting input/output files.
    ///
    /// Returned when the source cannot be opened or probed, the destination
    /// cannot be created, or the block size is not positive.
    FileSelect = 3,

    /// Error in file I/O.
    ///
    /// Returned when reading, writing, seeking, or resizing fails mid-copy.
    FileIo = 11,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli::exit_code::ExitCode;
    ///
    /// assert_eq!(ExitCode::Ok.as_i32(), 0);
    /// assert_eq!(ExitCode::FileIo.as_i32(), 11);
    /// ```
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a human-readable description of this exit code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::FileSelect => "errors selecting input/output files",
            Self::FileIo => "error in file IO",
        }
    }

    /// Returns `true` if this represents a successful exit.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Creates an exit code from an i32 value.
    ///
    /// Returns `None` if the value doesn't correspond to a known exit code.
    ///
    /// # Examples
    ///
    /// ```
    /// use cli::exit_code::ExitCode;
    ///
    /// assert_eq!(ExitCode::from_i32(3), Some(ExitCode::FileSelect));
    /// assert_eq!(ExitCode::from_i32(999), None);
    /// ```
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Ok),
            1 => Some(Self::Syntax),
            3 => Some(Self::FileSelect),
            11 => Some(Self::FileIo),
            _ => None,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

/// Converts a status returned by [`run`](crate::run) into a process exit code.
///
/// Values outside the `u8` range map to 255 so they never wrap to zero.
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    std::process::ExitCode::from(u8::try_from(status).unwrap_or(u8::MAX))
}
