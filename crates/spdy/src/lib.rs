//! A SPDY header block encoder
//!
//! This crate serializes SPDY header name/value pairs into the uncompressed
//! header block carried by SYN_STREAM, SYN_REPLY and HEADERS frames. It is the
//! encoding half of a header block codec; socket I/O, frame assembly and
//! compression of the block are left to the caller.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_spdy::codec::RawHeaderBlockEncoder;
//! use micro_spdy::protocol::{SpdyHeaders, SpdyVersion};
//!
//! let mut headers = SpdyHeaders::new();
//! headers.add("accept", "text/html").add("accept", "*/*");
//!
//! let encoder = RawHeaderBlockEncoder::new(SpdyVersion::Spdy3);
//!
//! let mut frame = BytesMut::new();
//! encoder.encode_to(&headers, &mut frame).unwrap();
//!
//! assert_eq!(
//!     &frame[..],
//!     b"\0\0\0\x01\0\0\0\x06accept\0\0\0\x0dtext/html\0*/*"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: the header block encoders
//! - [`protocol`]: versions, limits, header collections and errors
//!
//! # Wire format
//!
//! ```text
//! u32 header_count
//! repeat header_count times:
//!     u32 name_length, name
//!     u32 value_length, values joined by 0x00
//! ```
//!
//! An empty collection encodes to zero bytes. Empty values are dropped, so they
//! can't be told apart from missing ones once encoded.
//!
//! # Limits
//!
//! - Maximum number of headers: [`protocol::SPDY_MAX_NV_LENGTH`]
//! - Maximum value segment length per header: [`protocol::SPDY_MAX_NV_LENGTH`]

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
