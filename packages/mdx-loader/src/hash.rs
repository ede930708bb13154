//! Content digest used for the wrapper staleness check.

use md5::{Digest, Md5};
use std::fmt;

/// Lower-case hex MD5 of a file's raw content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn of(content: impl AsRef<[u8]>) -> Self {
        let hash = Md5::digest(content.as_ref());
        ContentDigest(format!("{:x}", hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a digest read back from a wrapper file.
    pub fn matches(&self, stored: Option<&str>) -> bool {
        stored == Some(self.0.as_str())
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
