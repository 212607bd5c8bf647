use prost::bytes::{Buf, BufMut};
use prost::encoding::{decode_varint, encode_key, DecodeContext, WireType, MIN_TAG};
use prost::{DecodeError, Message};

use crate::constants::GROUP_NESTING_LIMIT;

/// Raw bytes of every field a message did not recognize while decoding.
///
/// A field is unrecognized when its tag is not part of the message, or when a
/// known tag arrives with a wire type the field cannot be read from. Fields are
/// kept in the order they were read so that re-encoding the message writes them
/// back after the known fields.
///
/// When a message is decoded on its own ([`Message::decode`]) each field is kept
/// byte for byte, key included. When it is decoded as part of an enclosing
/// message only the payload is verbatim: the key is written back from the tag in
/// its minimal form.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields(Vec<u8>);

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode_raw(&self, buf: &mut impl BufMut) {
        buf.put_slice(&self.0);
    }

    /// Copies one field (its key has already been read from `buf`) into the
    /// preserved bytes. Nothing is kept if the field turns out to be malformed.
    pub fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
    ) -> Result<(), DecodeError> {
        let mut field = Vec::new();
        encode_key(tag, wire_type, &mut field);
        self.keep(field, tag, wire_type, buf)
    }

    /// Like [`UnknownFields::merge_field`], with the key bytes as they were read.
    fn merge_raw(
        &mut self,
        key: Vec<u8>,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
    ) -> Result<(), DecodeError> {
        self.keep(key, tag, wire_type, buf)
    }

    fn keep(
        &mut self,
        mut field: Vec<u8>,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
    ) -> Result<(), DecodeError> {
        copy_value(tag, wire_type, buf, &mut field, GROUP_NESTING_LIMIT)?;
        tracing::debug!(tag, ?wire_type, len = field.len(), "preserving unknown field");
        self.0.extend_from_slice(&field);
        Ok(())
    }
}

impl std::fmt::Debug for UnknownFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnknownFields({} bytes)", self.0.len())
    }
}

/// A message that keeps the fields it cannot place in [`UnknownFields`].
pub(crate) trait Preserving: Message {
    /// Whether `tag` is a known field that can be read from `wire_type`.
    fn accepts(tag: u32, wire_type: WireType) -> bool;

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;
}

/// Top-level decode loop of a [`Preserving`] message. Known fields go through
/// `merge_field`, everything else is kept with its original key bytes.
pub(crate) fn merge<M: Preserving>(message: &mut M, mut buf: impl Buf) -> Result<(), DecodeError> {
    let ctx = DecodeContext::default();
    while buf.has_remaining() {
        let mut key = Vec::new();
        let (tag, wire_type) = copy_key(&mut buf, &mut key)?;
        if M::accepts(tag, wire_type) {
            message.merge_field(tag, wire_type, &mut buf, ctx.clone())?;
        } else {
            message
                .unknown_fields_mut()
                .merge_raw(key, tag, wire_type, &mut buf)?;
        }
    }
    Ok(())
}

/// Copies a field key as it appears on the wire and returns its tag and wire type.
fn copy_key(buf: &mut impl Buf, out: &mut Vec<u8>) -> Result<(u32, WireType), DecodeError> {
    let key = copy_varint(buf, out)?;
    if key > u64::from(u32::MAX) {
        return Err(DecodeError::new(format!("invalid key value: {}", key)));
    }
    let wire_type = WireType::try_from(key & 0x07)?;
    let tag = key as u32 >> 3;
    if tag < MIN_TAG {
        return Err(DecodeError::new("invalid tag value: 0"));
    }
    Ok((tag, wire_type))
}

fn copy_value(
    tag: u32,
    wire_type: WireType,
    buf: &mut impl Buf,
    out: &mut Vec<u8>,
    depth: u32,
) -> Result<(), DecodeError> {
    match wire_type {
        WireType::Varint => copy_varint(buf, out).map(|_| ()),
        WireType::SixtyFourBit => copy_exact(buf, 8, out),
        WireType::ThirtyTwoBit => copy_exact(buf, 4, out),
        WireType::LengthDelimited => {
            let len = copy_varint(buf, out)?;
            let len = usize::try_from(len).map_err(|_| DecodeError::new("length overflows usize"))?;
            copy_exact(buf, len, out)
        }
        WireType::StartGroup => {
            if depth == 0 {
                return Err(DecodeError::new("recursion limit reached"));
            }
            loop {
                if !buf.has_remaining() {
                    return Err(DecodeError::new("unterminated group"));
                }
                let (inner_tag, inner_wire_type) = copy_key(buf, out)?;
                if inner_wire_type == WireType::EndGroup {
                    if inner_tag != tag {
                        return Err(DecodeError::new("unexpected end group tag"));
                    }
                    return Ok(());
                }
                copy_value(inner_tag, inner_wire_type, buf, out, depth - 1)?;
            }
        }
        WireType::EndGroup => Err(DecodeError::new("unexpected end group tag")),
    }
}

/// Copies the varint bytes as they appear on the wire and returns the decoded value.
fn copy_varint(buf: &mut impl Buf, out: &mut Vec<u8>) -> Result<u64, DecodeError> {
    let start = out.len();
    for _ in 0..10 {
        if !buf.has_remaining() {
            return Err(DecodeError::new("invalid varint"));
        }
        let byte = buf.get_u8();
        out.push(byte);
        if byte & 0x80 == 0 {
            let mut raw = &out[start..];
            return decode_varint(&mut raw);
        }
    }
    Err(DecodeError::new("invalid varint"))
}

fn copy_exact(buf: &mut impl Buf, len: usize, out: &mut Vec<u8>) -> Result<(), DecodeError> {
    if buf.remaining() < len {
        return Err(DecodeError::new("buffer underflow"));
    }
    out.extend_from_slice(&buf.copy_to_bytes(len));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::encoding::decode_key;

    fn capture(bytes: &[u8]) -> Result<UnknownFields, DecodeError> {
        let mut buf = bytes;
        let mut unknown = UnknownFields::new();
        while buf.has_remaining() {
            let mut key = Vec::new();
            let (tag, wire_type) = copy_key(&mut buf, &mut key)?;
            unknown.merge_raw(key, tag, wire_type, &mut buf)?;
        }
        Ok(unknown)
    }

    #[test]
    fn keeps_every_wire_type_verbatim() {
        let bytes = [
            0xf8, 0x06, 0x96, 0x01, // tag 111 varint 150
            0xfa, 0x06, 0x03, b'a', b'b', b'c', // tag 111 length-delimited
            0xfd, 0x06, 1, 2, 3, 4, // tag 111 fixed32
            0xf9, 0x06, 1, 2, 3, 4, 5, 6, 7, 8, // tag 111 fixed64
        ];
        let unknown = capture(&bytes).unwrap();
        assert_eq!(unknown.as_bytes(), &bytes[..]);
    }

    #[test]
    fn non_minimal_varint_is_not_normalised() {
        // 1 encoded on two bytes
        let bytes = [0xf8, 0x06, 0x81, 0x00];
        let unknown = capture(&bytes).unwrap();
        assert_eq!(unknown.as_bytes(), &bytes[..]);
    }

    #[test]
    fn non_minimal_keys_are_not_normalised() {
        let bytes = [
            0xf8, 0x86, 0x00, 0x01, // tag 111 varint, key on three bytes
            0xa3, 0x06, 0x88, 0x00, 0x07, 0xa4, 0x06, // group with a two byte inner key
        ];
        let unknown = capture(&bytes).unwrap();
        assert_eq!(unknown.as_bytes(), &bytes[..]);
    }

    #[test]
    fn merge_field_writes_a_minimal_key() {
        let mut buf: &[u8] = &[0xf8, 0x86, 0x00, 0x01];
        let (tag, wire_type) = decode_key(&mut buf).unwrap();
        let mut unknown = UnknownFields::new();
        unknown.merge_field(tag, wire_type, &mut buf).unwrap();
        assert_eq!(unknown.as_bytes(), &[0xf8, 0x06, 0x01][..]);
    }

    #[test]
    fn zero_tag_is_rejected() {
        assert!(capture(&[0x00, 0x01]).is_err());
    }

    #[test]
    fn groups_are_copied_with_their_end_marker() {
        // tag 100 start group, nested tag 1 varint 7, tag 100 end group
        let bytes = [0xa3, 0x06, 0x08, 0x07, 0xa4, 0x06];
        let unknown = capture(&bytes).unwrap();
        assert_eq!(unknown.as_bytes(), &bytes[..]);
    }

    #[test]
    fn mismatched_end_group_fails() {
        let bytes = [0xa3, 0x06, 0x08, 0x07, 0xac, 0x06];
        assert!(capture(&bytes).is_err());
    }

    #[test]
    fn truncated_length_delimited_fails_without_keeping_bytes() {
        let mut buf: &[u8] = &[0x05, b'a', b'b'];
        let mut unknown = UnknownFields::new();
        assert!(unknown
            .merge_field(111, WireType::LengthDelimited, &mut buf)
            .is_err());
        assert!(unknown.is_empty());
    }

    #[test]
    fn stray_end_group_fails() {
        let mut buf: &[u8] = &[];
        let mut unknown = UnknownFields::new();
        assert!(unknown.merge_field(5, WireType::EndGroup, &mut buf).is_err());
    }
}
