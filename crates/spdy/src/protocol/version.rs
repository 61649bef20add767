//! SPDY protocol versions and the limits shared by the header block codec.

use std::fmt;

use crate::protocol::UnsupportedVersion;

/// Maximum number of headers in a block, and maximum length of one header's
/// value segment.
///
/// Both the encoder and a peer's decoder reject blocks that go past it.
pub const SPDY_MAX_NV_LENGTH: usize = 0x00FF_FFFF;

/// The SPDY versions a header block can be encoded for.
///
/// SPDY/3 and SPDY/3.1 share the same header block layout; they differ only in
/// flow control, which is handled outside of this crate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SpdyVersion {
    Spdy3,
    #[default]
    Spdy3_1,
}

impl SpdyVersion {
    /// The version number carried in control frame headers.
    #[inline]
    pub fn version(self) -> u16 {
        match self {
            SpdyVersion::Spdy3 | SpdyVersion::Spdy3_1 => 3,
        }
    }

    #[inline]
    pub fn minor_version(self) -> u8 {
        match self {
            SpdyVersion::Spdy3 => 0,
            SpdyVersion::Spdy3_1 => 1,
        }
    }
}

impl TryFrom<u16> for SpdyVersion {
    type Error = UnsupportedVersion;

    /// Parses the version number of a control frame.
    ///
    /// The minor version is not on the wire, so `3` maps to [`SpdyVersion::Spdy3`].
    fn try_from(version: u16) -> Result<Self, Self::Error> {
        match version {
            3 => Ok(SpdyVersion::Spdy3),
            v => Err(UnsupportedVersion(v)),
        }
    }
}

impl fmt::Display for SpdyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpdyVersion::Spdy3 => f.write_str("SPDY/3"),
            SpdyVersion::Spdy3_1 => f.write_str("SPDY/3.1"),
        }
    }
}
