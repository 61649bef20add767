//! Raw (uncompressed) SPDY header block encoder
//!
//! Serializes a [`HeaderCollection`] into the name/value block carried by
//! SYN_STREAM, SYN_REPLY and HEADERS frames. All integers are big-endian:
//!
//! ```text
//! +------------------------------------+
//! | Number of Name/Value pairs (32)    |
//! +------------------------------------+
//! |     Length of name (32)            |
//! +------------------------------------+
//! |           Name (string)            |
//! +------------------------------------+
//! |     Length of value (32)           |
//! +------------------------------------+
//! |          Value   (string)          |
//! +------------------------------------+
//! |           (repeats)                |
//! ```
//!
//! A name with several values has them joined by a single `0x00` byte, without
//! a leading or trailing separator. An empty collection encodes to zero bytes.
//!
//! # Lossy empty values
//!
//! Empty string values are skipped entirely: they add neither bytes nor a
//! separator. A peer can't tell an empty value from an absent one, and a name
//! whose values are all empty encodes the same as a name with no values. Peers
//! rely on this exact layout, so it is kept as is.

use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::Encoder;
use tracing::{error, trace};

use crate::ensure;
use crate::protocol::{EncodeError, HeaderCollection, SPDY_MAX_NV_LENGTH, SpdyVersion};

/// Size of every length field in the block
const LENGTH_FIELD_SIZE: usize = 4;

/// Byte placed between two values of the same name
const VALUE_SEPARATOR: u8 = 0x00;

/// Encoder for uncompressed SPDY header blocks.
///
/// The encoder only holds immutable configuration, so one instance can be
/// reused, cloned or shared between threads freely.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RawHeaderBlockEncoder {
    version: SpdyVersion,
    max_nv_length: usize,
}

impl RawHeaderBlockEncoder {
    /// Creates an encoder enforcing [`SPDY_MAX_NV_LENGTH`].
    pub fn new(version: SpdyVersion) -> Self {
        Self { version, max_nv_length: SPDY_MAX_NV_LENGTH }
    }

    /// Lowers the limit on the header count and on each value segment length.
    ///
    /// Limits above [`SPDY_MAX_NV_LENGTH`] are clamped to it.
    pub fn with_max_nv_length(mut self, max_nv_length: usize) -> Self {
        self.max_nv_length = max_nv_length.min(SPDY_MAX_NV_LENGTH);
        self
    }

    pub fn version(&self) -> SpdyVersion {
        self.version
    }

    pub fn max_nv_length(&self) -> usize {
        self.max_nv_length
    }

    /// Encodes `headers` into a new header block.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the collection has more names than the limit
    /// - the value segment of one name is longer than the limit
    /// - a name is too long for its length field
    pub fn encode<H: HeaderCollection>(&self, headers: &H) -> Result<Bytes, EncodeError> {
        let mut block = BytesMut::new();
        self.encode_to(headers, &mut block)?;
        Ok(block.freeze())
    }

    /// Appends the header block for `headers` to `dst`.
    ///
    /// On error `dst` is truncated back to its length before the call, so no
    /// partial block is ever left behind.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode).
    pub fn encode_to<H: HeaderCollection>(&self, headers: &H, dst: &mut BytesMut) -> Result<(), EncodeError> {
        let start = dst.len();
        let result = self.write_block(headers, dst);
        if result.is_err() {
            dst.truncate(start);
        }
        result
    }

    fn write_block<H: HeaderCollection>(&self, headers: &H, dst: &mut BytesMut) -> Result<(), EncodeError> {
        let header_count = headers.name_count();
        if header_count == 0 {
            return Ok(());
        }
        if header_count > self.max_nv_length {
            error!(header_count, max_nv_length = self.max_nv_length, "header block contains too many headers");
            return Err(EncodeError::too_many_headers(header_count, self.max_nv_length));
        }

        let start = dst.len();
        write_length_field(dst, header_count);

        for name in headers.names() {
            let name_bytes = name.as_bytes();
            ensure!(u32::try_from(name_bytes.len()).is_ok(), EncodeError::header_name_too_large(name_bytes.len()));
            write_length_field(dst, name_bytes.len());
            dst.put_slice(name_bytes);

            // placeholder, patched once all values are written
            let saved_index = dst.len();
            write_length_field(dst, 0);

            let mut value_length = 0_usize;
            for value in headers.values_for(name) {
                if value.is_empty() {
                    continue;
                }
                dst.put_slice(value);
                dst.put_u8(VALUE_SEPARATOR);
                value_length += value.len() + 1;
            }
            // the last separator is not part of the segment
            let value_length = value_length.saturating_sub(1);

            if value_length > self.max_nv_length {
                error!(header_name = name, value_length, max_nv_length = self.max_nv_length, "header exceeds allowable length");
                return Err(EncodeError::header_value_too_large(name, value_length, self.max_nv_length));
            }

            if value_length > 0 {
                set_length_field(dst, saved_index, value_length);
                dst.truncate(dst.len() - 1);
            }
        }

        trace!(header_count, block_size = dst.len() - start, version = %self.version, "encoded header block");
        Ok(())
    }
}

impl Default for RawHeaderBlockEncoder {
    fn default() -> Self {
        Self::new(SpdyVersion::default())
    }
}

impl<H: HeaderCollection> Encoder<&H> for RawHeaderBlockEncoder {
    type Error = EncodeError;

    /// Appends the header block for `item` to `dst`, leaving `dst` untouched on error.
    fn encode(&mut self, item: &H, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_to(item, dst)
    }
}

#[allow(clippy::cast_possible_truncation, reason = "lengths are checked against the limits before being written")]
fn write_length_field(dst: &mut BytesMut, length: usize) {
    dst.put_u32(length as u32);
}

#[allow(clippy::cast_possible_truncation, reason = "lengths are checked against the limits before being written")]
fn set_length_field(dst: &mut BytesMut, index: usize, length: usize) {
    dst[index..index + LENGTH_FIELD_SIZE].copy_from_slice(&(length as u32).to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SpdyHeaders;
    use bytes::Buf;
    use http::{HeaderMap, HeaderValue};

    /// Parses a header block back into a collection, as a peer would.
    fn decode(mut block: &[u8]) -> SpdyHeaders {
        let mut headers = SpdyHeaders::new();
        if block.is_empty() {
            return headers;
        }

        let header_count = block.get_u32() as usize;
        for _ in 0..header_count {
            let name_length = block.get_u32() as usize;
            let name = std::str::from_utf8(&block[..name_length]).unwrap().to_string();
            block.advance(name_length);

            let value_length = block.get_u32() as usize;
            let values: Vec<String> = if value_length == 0 {
                Vec::new()
            } else {
                block[..value_length].split(|b| *b == VALUE_SEPARATOR).map(|v| String::from_utf8(v.to_vec()).unwrap()).collect()
            };
            block.advance(value_length);

            headers.set_all(name, values);
        }

        assert!(block.is_empty(), "trailing bytes after the last header");
        headers
    }

    fn encoder() -> RawHeaderBlockEncoder {
        RawHeaderBlockEncoder::new(SpdyVersion::Spdy3_1)
    }

    #[test]
    fn empty_headers_encode_to_nothing() {
        let block = encoder().encode(&SpdyHeaders::new()).unwrap();
        assert!(block.is_empty());

        let block = encoder().encode(&HeaderMap::new()).unwrap();
        assert!(block.is_empty());
    }

    #[test]
    fn single_name_single_value() {
        let mut headers = SpdyHeaders::new();
        headers.add("a", "1");

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(&block[..], &[0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 1, b'1'][..]);
    }

    #[test]
    fn multiple_values_are_joined_by_separator() {
        let mut headers = SpdyHeaders::new();
        headers.add("a", "1").add("a", "2");

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(&block[..], &[0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 3, b'1', 0, b'2'][..]);
    }

    #[test]
    fn empty_value_is_dropped() {
        let mut headers = SpdyHeaders::new();
        headers.add_all("a", ["", "x"]);

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(&block[..], &[0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 1, b'x'][..]);
    }

    #[test]
    fn empty_value_between_values_is_dropped() {
        let mut headers = SpdyHeaders::new();
        headers.add_all("a", ["1", "", "2", ""]);

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(&block[..], &[0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 3, b'1', 0, b'2'][..]);
    }

    #[test]
    fn all_empty_values_encode_zero_length() {
        let mut headers = SpdyHeaders::new();
        headers.add_all("a", ["", ""]);

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(&block[..], &[0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 0][..]);
    }

    #[test]
    fn name_without_values_encodes_zero_length() {
        let mut headers = SpdyHeaders::new();
        headers.set_all("a", Vec::<String>::new()).add("b", "2");

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(
            &block[..],
            &[0, 0, 0, 2, 0, 0, 0, 1, b'a', 0, 0, 0, 0, 0, 0, 0, 1, b'b', 0, 0, 0, 1, b'2'][..]
        );
    }

    #[test]
    fn lengths_count_utf8_bytes() {
        let mut headers = SpdyHeaders::new();
        headers.add("x-café", "naïve").add("x-café", "é");

        let block = encoder().encode(&headers).unwrap();

        let mut expected = vec![0, 0, 0, 1, 0, 0, 0, 7];
        expected.extend_from_slice("x-café".as_bytes());
        expected.extend_from_slice(&[0, 0, 0, 9]);
        expected.extend_from_slice("naïve".as_bytes());
        expected.push(0);
        expected.extend_from_slice("é".as_bytes());
        assert_eq!(&block[..], &expected[..]);
    }

    #[test]
    fn names_keep_insertion_order() {
        let mut headers = SpdyHeaders::new();
        headers.add(":status", "200").add(":version", "HTTP/1.1").add("content-type", "text/plain");

        let block = encoder().encode(&headers).unwrap();
        let names: Vec<String> = decode(&block).names().map(str::to_string).collect();

        assert_eq!(names, vec![":status", ":version", "content-type"]);
    }

    #[test]
    fn too_many_headers() {
        let headers: SpdyHeaders = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        let encoder = encoder().with_max_nv_length(2);

        let result = encoder.encode(&headers);

        assert!(matches!(result, Err(EncodeError::TooManyHeaders { count: 3, max_num: 2 })));
    }

    #[test]
    fn header_count_at_limit() {
        let headers: SpdyHeaders = [("a", "1"), ("b", "2")].into_iter().collect();
        let encoder = encoder().with_max_nv_length(2);

        let block = encoder.encode(&headers).unwrap();

        assert_eq!(decode(&block), headers);
    }

    #[test]
    fn value_too_large_names_the_header() {
        let mut headers = SpdyHeaders::new();
        headers.add("ok", "1").add_all("big", ["12", "34"]);
        let encoder = encoder().with_max_nv_length(4);

        let error = encoder.encode(&headers).unwrap_err();

        assert_eq!(error.header_name(), Some("big"));
        assert!(matches!(error, EncodeError::HeaderValueTooLarge { length: 5, max_length: 4, .. }));
        assert_eq!(error.to_string(), "header exceeds allowable length: big");
    }

    #[test]
    fn value_length_at_limit_excludes_trailing_separator() {
        let mut headers = SpdyHeaders::new();
        headers.add_all("a", ["12", "34"]);
        let encoder = encoder().with_max_nv_length(5);

        let block = encoder.encode(&headers).unwrap();

        assert_eq!(&block[block.len() - 9..], &[0, 0, 0, 5, b'1', b'2', 0, b'3', b'4'][..]);
    }

    #[test]
    fn failed_encode_leaves_destination_untouched() {
        let mut headers = SpdyHeaders::new();
        headers.add("ok", "1").add("big", "too long");
        let encoder = encoder().with_max_nv_length(4);

        let mut dst = BytesMut::from(&b"prefix"[..]);
        let result = encoder.encode_to(&headers, &mut dst);

        assert!(matches!(result, Err(EncodeError::HeaderValueTooLarge { .. })));
        assert_eq!(&dst[..], b"prefix");
    }

    #[test]
    fn codec_encoder_appends_to_destination() {
        let mut headers = SpdyHeaders::new();
        headers.add("a", "1");
        let mut encoder = encoder();

        let mut dst = BytesMut::from(&b"frame"[..]);
        Encoder::encode(&mut encoder, &headers, &mut dst).unwrap();

        assert_eq!(&dst[..5], b"frame");
        assert_eq!(&dst[5..], &[0, 0, 0, 1, 0, 0, 0, 1, b'a', 0, 0, 0, 1, b'1'][..]);

        let mut dst = BytesMut::from(&b"frame"[..]);
        Encoder::encode(&mut encoder, &SpdyHeaders::new(), &mut dst).unwrap();
        assert_eq!(&dst[..], b"frame");
    }

    #[test]
    fn encoding_is_deterministic_and_stateless() {
        let first: SpdyHeaders = [("a", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        let second: SpdyHeaders = [("c", "4")].into_iter().collect();
        let encoder = encoder();

        let block = encoder.encode(&first).unwrap();
        encoder.encode(&second).unwrap();

        assert_eq!(encoder.encode(&first).unwrap(), block);
    }

    #[test]
    fn round_trip_drops_empty_values() {
        let mut headers = SpdyHeaders::new();
        headers
            .add_all(":method", ["GET"])
            .add_all("accept", ["text/html", "", "*/*"])
            .add_all("x-empty", [""])
            .set_all("x-none", Vec::<String>::new());

        let block = encoder().encode(&headers).unwrap();

        let mut expected = SpdyHeaders::new();
        expected
            .add_all(":method", ["GET"])
            .add_all("accept", ["text/html", "*/*"])
            .set_all("x-empty", Vec::<String>::new())
            .set_all("x-none", Vec::<String>::new());
        assert_eq!(decode(&block), expected);
    }

    #[test]
    fn header_map_values_are_joined() {
        let mut map = HeaderMap::new();
        map.append("accept-encoding", HeaderValue::from_static("gzip"));
        map.append("accept-encoding", HeaderValue::from_static("deflate"));

        let block = encoder().encode(&map).unwrap();

        let mut expected = vec![0, 0, 0, 1, 0, 0, 0, 15];
        expected.extend_from_slice(b"accept-encoding");
        expected.extend_from_slice(&[0, 0, 0, 12]);
        expected.extend_from_slice(b"gzip\0deflate");
        assert_eq!(&block[..], &expected[..]);
    }

    #[test]
    fn header_map_round_trip() {
        let mut map = HeaderMap::new();
        map.append("host", HeaderValue::from_static("example.com"));
        map.append("cookie", HeaderValue::from_static("a=1"));
        map.append("cookie", HeaderValue::from_static("b=2"));

        let decoded = decode(&encoder().encode(&map).unwrap());

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.get_all("host"), &["example.com".to_string()]);
        assert_eq!(decoded.get_all("cookie"), &["a=1".to_string(), "b=2".to_string()]);
    }

    #[test]
    fn value_length_at_protocol_maximum() {
        let mut headers = SpdyHeaders::new();
        headers.add("a", "v".repeat(SPDY_MAX_NV_LENGTH));

        let block = encoder().encode(&headers).unwrap();

        assert_eq!(block.len(), 4 + 4 + 1 + 4 + SPDY_MAX_NV_LENGTH);
        assert_eq!(&block[9..13], &[0x00, 0xFF, 0xFF, 0xFF][..]);
        assert_eq!(block[block.len() - 1], b'v');
    }

    #[test]
    fn value_length_over_protocol_maximum() {
        let mut headers = SpdyHeaders::new();
        headers.add("a", "v".repeat(SPDY_MAX_NV_LENGTH + 1));

        let error = encoder().encode(&headers).unwrap_err();

        assert_eq!(error.header_name(), Some("a"));
        assert!(matches!(error, EncodeError::HeaderValueTooLarge { length: 0x0100_0000, max_length: SPDY_MAX_NV_LENGTH, .. }));
    }

    #[test]
    fn many_names_encode_in_order() {
        let mut headers = SpdyHeaders::with_capacity(20_000);
        for i in 0..20_000 {
            headers.add(format!("X-Header-{i}"), i.to_string());
        }

        let block = encoder().encode(&headers).unwrap();
        let decoded = decode(&block);

        assert_eq!(&block[..4], &[0x00, 0x00, 0x4E, 0x20][..]);
        assert_eq!(decoded, headers);
    }

    #[test]
    fn limit_is_clamped_to_protocol_maximum() {
        let encoder = RawHeaderBlockEncoder::default().with_max_nv_length(usize::MAX);

        assert_eq!(encoder.max_nv_length(), SPDY_MAX_NV_LENGTH);
        assert_eq!(encoder.version(), SpdyVersion::Spdy3_1);
    }
}
