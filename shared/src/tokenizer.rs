//! Response tokenizer for AT command shells
//!
//! The modem answers with free-form text:
//! ```text
//! \r\nRSRP:-95 RSRQ:-10\r\nAT&T\r\n\r\nOK\r\n\0\0\0
//! ```
//!
//! A fixed-size read may leave trailing NUL padding behind the payload. Tokens
//! made of nothing but padding are dropped; every other token is kept as is.

use thiserror::Error;

/// Errors that can occur while tokenizing a response buffer
#[derive(Error, Debug)]
pub enum TokenizeError {
    #[error("Response is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Split a raw response buffer into whitespace-delimited tokens
///
/// Tokens that are nothing but NULs are dropped. Kept tokens are returned
/// unchanged, trailing NULs included.
pub fn tokenize(raw: &[u8]) -> Result<Vec<String>, TokenizeError> {
    let text = std::str::from_utf8(raw)?;

    Ok(text
        .split_whitespace()
        .filter(|token| !token.trim_end_matches('\0').is_empty())
        .map(str::to_owned)
        .collect())
}
