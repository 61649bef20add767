//! SPDY header block encoding
//!
//! A header block carries the name/value pairs of SYN_STREAM, SYN_REPLY and
//! HEADERS frames.
//!
//! # Components
//!
//! - [`RawHeaderBlockEncoder`]: writes the uncompressed block
//!   - Length prefixed names and values, big-endian
//!   - Multiple values of one name joined by `0x00`
//!   - Header count and value length limits
//!
//! - [`HeaderBlockEncoder`]: selects the encoding strategy for a protocol version
//!   and exposes it behind a single `encode` entry point

mod header_block_encoder;
mod raw_encoder;

pub use header_block_encoder::HeaderBlockEncoder;
pub use raw_encoder::RawHeaderBlockEncoder;
