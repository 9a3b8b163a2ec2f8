//! Minimal DER codec for `SEQUENCE { INTEGER r, INTEGER s }`.
//!
//! secp256k1 signatures are at most 72 bytes, so only short-form lengths are
//! produced or accepted. Integers must be positive and minimally encoded.

use crate::errors::EcdsaError;

const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// Largest encoded integer: a 0x00 sign pad followed by 32 value bytes.
const MAX_INTEGER_LEN: usize = 33;

/// Encodes two big-endian 32-byte integers.
pub fn encode(r: &[u8; 32], s: &[u8; 32]) -> Vec<u8> {
    let r = integer_body(r);
    let s = integer_body(s);

    let mut out = Vec::with_capacity(6 + r.len() + s.len());
    out.push(SEQUENCE);
    out.push((4 + r.len() + s.len()) as u8);
    out.push(INTEGER);
    out.push(r.len() as u8);
    out.extend_from_slice(&r);
    out.push(INTEGER);
    out.push(s.len() as u8);
    out.extend_from_slice(&s);
    out
}

/// Decodes a DER signature into two left-padded 32-byte integers.
pub fn decode(der: &[u8]) -> Result<([u8; 32], [u8; 32]), EcdsaError> {
    let (&tag, rest) = der
        .split_first()
        .ok_or(EcdsaError::MalformedSignature("empty input"))?;
    if tag != SEQUENCE {
        return Err(EcdsaError::MalformedSignature("expected SEQUENCE"));
    }
    let (body, trailing) = read_length_prefixed(rest)?;
    if !trailing.is_empty() {
        return Err(EcdsaError::MalformedSignature("trailing bytes after SEQUENCE"));
    }

    let (r, body) = read_integer(body)?;
    let (s, body) = read_integer(body)?;
    if !body.is_empty() {
        return Err(EcdsaError::MalformedSignature("trailing bytes inside SEQUENCE"));
    }
    Ok((r, s))
}

fn integer_body(value: &[u8; 32]) -> Vec<u8> {
    let start = value.iter().position(|b| *b != 0).unwrap_or(31);
    let trimmed = &value[start..];

    let mut body = Vec::with_capacity(MAX_INTEGER_LEN);
    if trimmed[0] & 0x80 != 0 {
        body.push(0);
    }
    body.extend_from_slice(trimmed);
    body
}

fn read_length_prefixed(input: &[u8]) -> Result<(&[u8], &[u8]), EcdsaError> {
    let (&len, rest) = input
        .split_first()
        .ok_or(EcdsaError::MalformedSignature("missing length"))?;
    if len & 0x80 != 0 {
        return Err(EcdsaError::MalformedSignature("long-form length"));
    }
    let len = len as usize;
    if rest.len() < len {
        return Err(EcdsaError::MalformedSignature("length exceeds input"));
    }
    Ok(rest.split_at(len))
}

fn read_integer(input: &[u8]) -> Result<([u8; 32], &[u8]), EcdsaError> {
    let (&tag, rest) = input
        .split_first()
        .ok_or(EcdsaError::MalformedSignature("missing INTEGER"))?;
    if tag != INTEGER {
        return Err(EcdsaError::MalformedSignature("expected INTEGER"));
    }
    let (body, rest) = read_length_prefixed(rest)?;

    match body {
        [] => return Err(EcdsaError::MalformedSignature("empty INTEGER")),
        [first, ..] if first & 0x80 != 0 => {
            return Err(EcdsaError::MalformedSignature("negative INTEGER"));
        }
        [0, second, ..] if second & 0x80 == 0 => {
            return Err(EcdsaError::MalformedSignature("non-minimal INTEGER"));
        }
        _ => {}
    }

    let value = match body {
        [0, value @ ..] if body.len() == MAX_INTEGER_LEN => value,
        _ if body.len() < MAX_INTEGER_LEN => body,
        _ => return Err(EcdsaError::MalformedSignature("INTEGER wider than 256 bits")),
    };

    let mut out = [0u8; 32];
    out[32 - value.len()..].copy_from_slice(value);
    Ok((out, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be(value: u8) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[31] = value;
        out
    }

    #[test]
    fn test_encode_small_integers() {
        assert_eq!(encode(&be(1), &be(2)), vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
        // High bit set needs a sign pad.
        assert_eq!(
            encode(&be(0x80), &be(0x7f)),
            vec![0x30, 0x07, 0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0x7f]
        );
    }

    #[test]
    fn test_full_width_integer() {
        let wide = [0xffu8; 32];
        let der = encode(&wide, &be(1));
        assert_eq!(der.len(), 2 + 2 + 33 + 3);
        assert_eq!(decode(&der), Ok((wide, be(1))));
    }

    #[test]
    fn test_zero_is_structurally_valid() {
        let der = [0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x01];
        assert_eq!(decode(&der), Ok((be(0), be(1))));
    }

    #[test]
    fn test_rejects_malformed() {
        let cases: &[&[u8]] = &[
            &[],
            &[0x31, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02],
            &[0x30, 0x07, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02],
            &[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02, 0x00],
            &[0x30, 0x06, 0x02, 0x01, 0x81, 0x02, 0x01, 0x02],
            &[0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x02],
            &[0x30, 0x05, 0x02, 0x00, 0x02, 0x01, 0x02],
            &[0x30, 0x06, 0x04, 0x01, 0x01, 0x02, 0x01, 0x02],
            &[0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02],
            &[0x30, 0x03, 0x02, 0x01, 0x01],
        ];
        for case in cases {
            assert!(
                matches!(decode(case), Err(EcdsaError::MalformedSignature(_))),
                "accepted {case:02x?}"
            );
        }
    }

    #[test]
    fn test_rejects_oversized_integer() {
        let mut der = vec![0x30, 0x26, 0x02, 0x21, 0x01];
        der.extend_from_slice(&[0u8; 32]);
        der.extend_from_slice(&[0x02, 0x01, 0x01]);
        assert!(matches!(decode(&der), Err(EcdsaError::MalformedSignature(_))));
    }
}
