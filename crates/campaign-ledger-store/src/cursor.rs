//! Opaque page tokens.
//!
//! A cursor records where a page ended, which way to read next, and hashes of
//! the filter and order it was issued for. Tokens are URL-safe, unpadded
//! base64 over JSON:
//!
//! ```text
//! {"seq":42,"dir":"fwd","reverse":false,"filter_hash":"…","order_hash":"…"}
//! ```
//!
//! Reusing a token under a different filter or order is detected through the
//! hashes and rejected.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CursorError;

/// Hex characters kept from the SHA-256 of a filter or order expression.
pub const EXPRESSION_HASH_CHARS: usize = 16;

/// Which way to scan from the cursor's sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sequence numbers greater than the cursor, ascending.
    Forward,
    /// Sequence numbers less than the cursor, descending.
    Backward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "fwd",
            Self::Backward => "bwd",
        }
    }

    fn parse(raw: &str) -> Result<Self, CursorError> {
        match raw {
            "fwd" => Ok(Self::Forward),
            "bwd" => Ok(Self::Backward),
            other => Err(CursorError::UnknownDirection(other.to_string())),
        }
    }
}

/// A decoded page token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Exclusive boundary sequence number.
    pub seq: u64,
    pub dir: Direction,
    /// Whether the reader must reverse the fetched slice to restore display order.
    pub reverse: bool,
    pub filter_hash: String,
    pub order_hash: String,
}

#[derive(Serialize, Deserialize)]
struct CursorWire {
    seq: u64,
    dir: String,
    #[serde(default)]
    reverse: bool,
    #[serde(default)]
    filter_hash: String,
    #[serde(default)]
    order_hash: String,
}

impl Cursor {
    /// Cursor that reads forward from `seq`.
    pub fn forward(seq: u64, filter: &str, order: &str) -> Self {
        Self {
            seq,
            dir: Direction::Forward,
            reverse: false,
            filter_hash: hash_filter(filter),
            order_hash: hash_order(order),
        }
    }

    /// Cursor for the page after one ending at `seq`, in display order.
    pub fn next_page(seq: u64, descending: bool, filter: &str, order: &str) -> Self {
        Self {
            dir: if descending {
                Direction::Backward
            } else {
                Direction::Forward
            },
            ..Self::forward(seq, filter, order)
        }
    }

    /// Cursor for the page before one starting at `seq`, in display order.
    ///
    /// Reads against the display direction, so `reverse` is set.
    pub fn prev_page(seq: u64, descending: bool, filter: &str, order: &str) -> Self {
        Self {
            dir: if descending {
                Direction::Forward
            } else {
                Direction::Backward
            },
            reverse: true,
            ..Self::forward(seq, filter, order)
        }
    }
}

/// Encode a cursor as a page token.
pub fn encode_cursor(cursor: &Cursor) -> Result<String, CursorError> {
    let wire = CursorWire {
        seq: cursor.seq,
        dir: cursor.dir.as_str().to_string(),
        reverse: cursor.reverse,
        filter_hash: cursor.filter_hash.clone(),
        order_hash: cursor.order_hash.clone(),
    };
    let json = serde_json::to_vec(&wire).map_err(|e| CursorError::Malformed(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a page token.
pub fn decode_cursor(token: &str) -> Result<Cursor, CursorError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CursorError::Empty);
    }

    let json = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CursorError::InvalidEncoding(e.to_string()))?;
    let wire: CursorWire =
        serde_json::from_slice(&json).map_err(|e| CursorError::Malformed(e.to_string()))?;

    Ok(Cursor {
        seq: wire.seq,
        dir: Direction::parse(&wire.dir)?,
        reverse: wire.reverse,
        filter_hash: wire.filter_hash,
        order_hash: wire.order_hash,
    })
}

/// Short hash of a filter expression. Empty expressions hash to `""`.
pub fn hash_filter(expression: &str) -> String {
    if expression.is_empty() {
        return String::new();
    }
    let digest = Sha256::digest(expression.as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(EXPRESSION_HASH_CHARS);
    hash
}

/// Short hash of an order expression.
pub fn hash_order(expression: &str) -> String {
    hash_filter(expression)
}

pub fn validate_filter_hash(cursor: &Cursor, expression: &str) -> Result<(), CursorError> {
    if cursor.filter_hash != hash_filter(expression) {
        return Err(CursorError::FilterMismatch);
    }
    Ok(())
}

pub fn validate_order_hash(cursor: &Cursor, expression: &str) -> Result<(), CursorError> {
    if cursor.order_hash != hash_order(expression) {
        return Err(CursorError::OrderMismatch);
    }
    Ok(())
}
