//! fopen-style open modes.
//!
//! A mode string is a base letter followed by optional flags:
//!
//! | base | access | file handling |
//! |---|---|---|
//! | `r` | read | must exist |
//! | `w` | write | create, truncate |
//! | `a` | write | create, every write goes to the end |
//! | `x` | write | must not exist |
//! | `c` | write | create, keep contents |
//!
//! A `+` adds both read and write access. The `b`, `t` and `e` flags are accepted
//! and ignored.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use crate::stream::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Read,
    Write,
    Append,
    CreateNew,
    Create,
}

/// Parsed open mode of a [`Stream`](crate::stream::Stream).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMode {
    base: Base,
    plus: bool,
    raw: String,
}

impl OpenMode {
    /// Read only, `"r"`.
    pub fn read() -> Self {
        Self { base: Base::Read, plus: false, raw: "r".to_owned() }
    }

    /// Read and write on an existing resource, `"r+"`.
    pub fn read_write() -> Self {
        Self { base: Base::Read, plus: true, raw: "r+".to_owned() }
    }

    pub fn parse(mode: &str) -> Result<Self, StreamError> {
        let mut chars = mode.chars();
        let base = match chars.next() {
            Some('r') => Base::Read,
            Some('w') => Base::Write,
            Some('a') => Base::Append,
            Some('x') => Base::CreateNew,
            Some('c') => Base::Create,
            _ => return Err(StreamError::invalid_mode(mode)),
        };

        let mut plus = false;
        for flag in chars {
            match flag {
                '+' if !plus => plus = true,
                'b' | 't' | 'e' => {}
                _ => return Err(StreamError::invalid_mode(mode)),
            }
        }

        Ok(Self { base, plus, raw: mode.to_owned() })
    }

    pub fn is_readable(&self) -> bool {
        self.plus || self.base == Base::Read
    }

    pub fn is_writable(&self) -> bool {
        self.plus || self.base != Base::Read
    }

    pub fn is_append(&self) -> bool {
        self.base == Base::Append
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Translates the mode into the options used to open a file.
    pub(crate) fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options.read(self.is_readable());
        match self.base {
            Base::Read => {
                options.write(self.plus);
            }
            Base::Write => {
                options.write(true).create(true).truncate(true);
            }
            Base::Append => {
                options.append(true).create(true);
            }
            Base::CreateNew => {
                options.write(true).create_new(true);
            }
            Base::Create => {
                options.write(true).create(true);
            }
        }
        options
    }
}

impl FromStr for OpenMode {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_modes() {
        let read = OpenMode::parse("r").unwrap();
        assert!(read.is_readable());
        assert!(!read.is_writable());

        let write = OpenMode::parse("w").unwrap();
        assert!(!write.is_readable());
        assert!(write.is_writable());

        let append = OpenMode::parse("ab").unwrap();
        assert!(append.is_append());
        assert!(append.is_writable());
        assert!(!append.is_readable());
    }

    #[test]
    fn plus_adds_read_and_write() {
        for mode in ["r+", "w+", "a+", "x+", "c+", "r+b", "rb+"] {
            let mode = OpenMode::parse(mode).unwrap();
            assert!(mode.is_readable(), "{mode} should be readable");
            assert!(mode.is_writable(), "{mode} should be writable");
        }
    }

    #[test]
    fn reject_unknown_modes() {
        for mode in ["", "q", "r++", "rw", "+r"] {
            assert!(matches!(OpenMode::parse(mode), Err(StreamError::InvalidMode { .. })), "{mode:?}");
        }
    }

    #[test]
    fn display_keeps_the_given_text() {
        assert_eq!(OpenMode::parse("rb").unwrap().to_string(), "rb");
        assert_eq!(OpenMode::read_write().as_str(), "r+");
    }
}
