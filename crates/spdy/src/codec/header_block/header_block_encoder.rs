use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::header_block::RawHeaderBlockEncoder;
use crate::protocol::{EncodeError, HeaderCollection, SpdyVersion};

/// encode header blocks for spdy control frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlockEncoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// uncompressed name/value block
    Raw(RawHeaderBlockEncoder),
}

impl HeaderBlockEncoder {
    /// create the `HeaderBlockEncoder` used for `version`
    pub fn new(version: SpdyVersion) -> Self {
        match version {
            SpdyVersion::Spdy3 | SpdyVersion::Spdy3_1 => Self::raw(version),
        }
    }

    /// create a raw `HeaderBlockEncoder`
    pub fn raw(version: SpdyVersion) -> Self {
        Self { kind: Kind::Raw(RawHeaderBlockEncoder::new(version)) }
    }

    pub fn is_raw(&self) -> bool {
        match &self.kind {
            Kind::Raw(_) => true,
        }
    }

    pub fn version(&self) -> SpdyVersion {
        match &self.kind {
            Kind::Raw(encoder) => encoder.version(),
        }
    }

    /// Encodes `headers` into a new header block, see [`RawHeaderBlockEncoder::encode`].
    ///
    /// # Errors
    ///
    /// Returns error if the headers exceed the limits of the selected encoder.
    pub fn encode<H: HeaderCollection>(&self, headers: &H) -> Result<Bytes, EncodeError> {
        match &self.kind {
            Kind::Raw(encoder) => encoder.encode(headers),
        }
    }

    /// Appends the header block for `headers` to `dst`, leaving `dst` untouched on error.
    ///
    /// # Errors
    ///
    /// Returns error if the headers exceed the limits of the selected encoder.
    pub fn encode_to<H: HeaderCollection>(&self, headers: &H, dst: &mut BytesMut) -> Result<(), EncodeError> {
        match &self.kind {
            Kind::Raw(encoder) => encoder.encode_to(headers, dst),
        }
    }
}

impl Default for HeaderBlockEncoder {
    fn default() -> Self {
        Self::new(SpdyVersion::default())
    }
}

impl From<RawHeaderBlockEncoder> for HeaderBlockEncoder {
    fn from(encoder: RawHeaderBlockEncoder) -> Self {
        Self { kind: Kind::Raw(encoder) }
    }
}

impl<H: HeaderCollection> Encoder<&H> for HeaderBlockEncoder {
    type Error = EncodeError;

    fn encode(&mut self, item: &H, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match &self.kind {
            Kind::Raw(encoder) => encoder.encode_to(item, dst),
        }
    }
}
