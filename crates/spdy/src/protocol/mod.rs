//! Core SPDY protocol types used by the header block codec.
//!
//! - **Versions and limits** ([`version`]): [`SpdyVersion`] and
//!   [`SPDY_MAX_NV_LENGTH`], the protocol maximum shared by encoder and decoder
//! - **Header collections** ([`headers`]): the [`HeaderCollection`] trait read by
//!   the encoder, and [`SpdyHeaders`], an insertion ordered multimap
//! - **Error handling** ([`error`]): [`EncodeError`] and [`UnsupportedVersion`]

mod error;
pub use error::EncodeError;
pub use error::UnsupportedVersion;

mod headers;
pub use headers::HeaderCollection;
pub use headers::SpdyHeaders;

mod version;
pub use version::SPDY_MAX_NV_LENGTH;
pub use version::SpdyVersion;
