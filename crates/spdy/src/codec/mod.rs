//! SPDY codec module for encoding header blocks
//!
//! The surrounding frame layer hands a header collection to one of the
//! encoders and embeds the returned bytes as the payload of a control frame.
//!
//! # Example
//!
//! ```
//! use micro_spdy::codec::HeaderBlockEncoder;
//! use micro_spdy::protocol::{SpdyHeaders, SpdyVersion};
//!
//! let mut headers = SpdyHeaders::new();
//! headers.add(":status", "200").add(":version", "HTTP/1.1");
//!
//! let encoder = HeaderBlockEncoder::new(SpdyVersion::Spdy3_1);
//! let block = encoder.encode(&headers).unwrap();
//! assert_eq!(&block[..4], &[0, 0, 0, 2]);
//! ```
//!
//! Both encoders also implement [`tokio_util::codec::Encoder`], appending the
//! block to the frame buffer they are given.

mod header_block;

pub use header_block::HeaderBlockEncoder;
pub use header_block::RawHeaderBlockEncoder;
