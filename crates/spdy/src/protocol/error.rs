use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("header block contains too many headers, current: {count} exceed the limit {max_num}")]
    TooManyHeaders { count: usize, max_num: usize },

    #[error("header exceeds allowable length: {name}")]
    HeaderValueTooLarge { name: String, length: usize, max_length: usize },

    #[error("header name length {length} can't fit in the length field")]
    HeaderNameTooLarge { length: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl EncodeError {
    pub fn too_many_headers(count: usize, max_num: usize) -> Self {
        Self::TooManyHeaders { count, max_num }
    }

    pub fn header_value_too_large<S: ToString>(name: S, length: usize, max_length: usize) -> Self {
        Self::HeaderValueTooLarge { name: name.to_string(), length, max_length }
    }

    pub fn header_name_too_large(length: usize) -> Self {
        Self::HeaderNameTooLarge { length }
    }

    /// Returns the name of the offending header, if the error is about a single header.
    pub fn header_name(&self) -> Option<&str> {
        match self {
            Self::HeaderValueTooLarge { name, .. } => Some(name),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("unsupported spdy version: {0}")]
pub struct UnsupportedVersion(pub u16);
