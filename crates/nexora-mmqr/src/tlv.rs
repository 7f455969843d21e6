//! Tag-length-value primitives for the merchant-presented QR format.
//!
//! Every field is `TT LL VALUE`: a two-character tag, the zero-padded
//! decimal character count of the value, then the value itself. Container
//! fields (merchant account information, additional data) are composed by
//! encoding their sub-fields first and wrapping the concatenation as the
//! value of the outer field.

use crate::error::MmqrError;

/// Hard cap on a single field value. The two-digit length prefix cannot
/// represent more than 99 characters.
pub const MAX_VALUE_LEN: usize = 99;

/// Render one field as `tag + length + value`.
///
/// Rejects values over [`MAX_VALUE_LEN`] rather than emitting a wrapped
/// length prefix, and rejects non-ASCII values since the checksum trailer
/// is defined over single-byte character codes.
pub fn field(tag: &str, value: &str) -> Result<String, MmqrError> {
    if tag.len() != 2 || !tag.is_ascii() {
        return Err(MmqrError::InvalidTag(tag.to_string()));
    }
    if !value.is_ascii() {
        return Err(MmqrError::NonAscii {
            tag: tag.to_string(),
        });
    }
    if value.len() > MAX_VALUE_LEN {
        return Err(MmqrError::FieldOverflow {
            tag: tag.to_string(),
            len: value.len(),
        });
    }
    Ok(format!("{tag}{:02}{value}", value.len()))
}

/// Encode sub-fields in order and wrap the concatenation as the value of
/// the outer `tag`. Sub-field order is significant and preserved.
pub fn nested(tag: &str, sub_fields: &[(&str, &str)]) -> Result<String, MmqrError> {
    let mut inner = String::new();
    for (sub_tag, value) in sub_fields {
        inner.push_str(&field(sub_tag, value)?);
    }
    field(tag, &inner)
}

/// One parsed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvEntry {
    pub tag: String,
    pub value: String,
}

/// Parse a TLV string into its ordered fields.
///
/// Parses a single level; a container field's value comes back as its raw
/// sub-field concatenation and can be fed through `parse` again.
pub fn parse(data: &str) -> Result<Vec<TlvEntry>, MmqrError> {
    if !data.is_ascii() {
        return Err(MmqrError::Malformed("payload is not ASCII".to_string()));
    }

    let mut entries = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        if pos + 4 > data.len() {
            return Err(MmqrError::Malformed(format!(
                "truncated field header at offset {pos}"
            )));
        }
        let tag = &data[pos..pos + 2];
        let len: usize = data[pos + 2..pos + 4]
            .parse()
            .map_err(|_| MmqrError::Malformed(format!("bad length prefix for tag {tag}")))?;
        let start = pos + 4;
        let end = start + len;
        if end > data.len() {
            return Err(MmqrError::Malformed(format!(
                "field {tag} overruns the payload"
            )));
        }
        entries.push(TlvEntry {
            tag: tag.to_string(),
            value: data[start..end].to_string(),
        });
        pos = end;
    }
    Ok(entries)
}
