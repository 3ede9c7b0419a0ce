//! Signature encodings accepted at the submission boundary.

use alloy_primitives::{b256, Bytes, B256, U256};

use crate::error::SignatureError;

/// Length of a packed `r || s || v` ECDSA signature.
pub const PACKED_ECDSA_LEN: usize = 65;

/// secp256k1 group order.
const SECP256K1_N: B256 = b256!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

/// Upper bound for a non-malleable `s` (n / 2).
const SECP256K1_HALF_N: B256 =
    b256!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// Signature as submitted: packed bytes or a split `(v, r, s)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureInput {
    /// `r || s || v` for ECDSA signers, arbitrary bytes for contract signers.
    Packed(Bytes),
    Vrs { v: u8, r: B256, s: B256 },
}

impl SignatureInput {
    /// Byte form handed to contract validators.
    ///
    /// A split triple is packed as `r || s || v`.
    pub fn to_packed(&self) -> Bytes {
        match self {
            SignatureInput::Packed(bytes) => bytes.clone(),
            SignatureInput::Vrs { v, r, s } => {
                let mut packed = Vec::with_capacity(PACKED_ECDSA_LEN);
                packed.extend_from_slice(r.as_slice());
                packed.extend_from_slice(s.as_slice());
                packed.push(*v);
                Bytes::from(packed)
            }
        }
    }

    /// Parses and range-checks an ECDSA signature without any recovery work.
    pub fn parse_ecdsa(&self) -> Result<EcdsaSignature, SignatureError> {
        let (v, r, s) = match self {
            SignatureInput::Packed(bytes) => {
                if bytes.len() != PACKED_ECDSA_LEN {
                    return Err(SignatureError::InvalidSignatureFormat(
                        "signature must be 65 bytes",
                    ));
                }
                (
                    bytes[64],
                    B256::from_slice(&bytes[..32]),
                    B256::from_slice(&bytes[32..64]),
                )
            }
            SignatureInput::Vrs { v, r, s } => (*v, *r, *s),
        };
        EcdsaSignature::new(v, r, s)
    }
}

impl From<Bytes> for SignatureInput {
    fn from(bytes: Bytes) -> Self {
        SignatureInput::Packed(bytes)
    }
}

impl From<Vec<u8>> for SignatureInput {
    fn from(bytes: Vec<u8>) -> Self {
        SignatureInput::Packed(Bytes::from(bytes))
    }
}

/// Range-checked `(r, s, v)` with `v` in {27, 28} and low `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdsaSignature {
    r: B256,
    s: B256,
    y_parity: bool,
}

impl EcdsaSignature {
    pub fn new(v: u8, r: B256, s: B256) -> Result<Self, SignatureError> {
        let y_parity = match v {
            27 => false,
            28 => true,
            _ => return Err(SignatureError::InvalidSignatureFormat("v must be 27 or 28")),
        };

        let r_value = U256::from_be_bytes(r.0);
        let s_value = U256::from_be_bytes(s.0);
        if r_value.is_zero() || r_value >= U256::from_be_bytes(SECP256K1_N.0) {
            return Err(SignatureError::InvalidSignatureFormat("r out of range"));
        }
        if s_value.is_zero() {
            return Err(SignatureError::InvalidSignatureFormat("s out of range"));
        }
        if s_value > U256::from_be_bytes(SECP256K1_HALF_N.0) {
            return Err(SignatureError::InvalidSignatureFormat("s is not low"));
        }

        Ok(Self { r, s, y_parity })
    }

    pub fn r(&self) -> B256 {
        self.r
    }

    pub fn s(&self) -> B256 {
        self.s
    }

    pub fn y_parity(&self) -> bool {
        self.y_parity
    }

    pub fn v(&self) -> u8 {
        if self.y_parity {
            28
        } else {
            27
        }
    }

    /// 64-byte `r || s` form.
    pub fn compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(self.r.as_slice());
        compact[32..].copy_from_slice(self.s.as_slice());
        compact
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_parts() -> (B256, B256) {
        (B256::repeat_byte(0x11), B256::repeat_byte(0x22))
    }

    #[test]
    fn packed_and_vrs_agree() {
        let (r, s) = valid_parts();
        let vrs = SignatureInput::Vrs { v: 28, r, s };
        let packed = SignatureInput::Packed(vrs.to_packed());

        assert_eq!(packed.to_packed().len(), PACKED_ECDSA_LEN);
        assert_eq!(packed.parse_ecdsa().unwrap(), vrs.parse_ecdsa().unwrap());
        assert!(vrs.parse_ecdsa().unwrap().y_parity());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = SignatureInput::from(vec![0u8; 64]).parse_ecdsa().unwrap_err();
        assert!(matches!(err, SignatureError::InvalidSignatureFormat(_)));
    }

    #[test]
    fn rejects_bad_v() {
        let (r, s) = valid_parts();
        for v in [0u8, 1, 26, 29, 255] {
            let err = EcdsaSignature::new(v, r, s).unwrap_err();
            assert_eq!(err, SignatureError::InvalidSignatureFormat("v must be 27 or 28"));
        }
    }

    #[test]
    fn rejects_high_s() {
        let (r, _) = valid_parts();
        let high_s = B256::from(U256::from_be_bytes(SECP256K1_HALF_N.0) + U256::from(1u64));
        let err = EcdsaSignature::new(27, r, high_s).unwrap_err();
        assert_eq!(err, SignatureError::InvalidSignatureFormat("s is not low"));

        assert!(EcdsaSignature::new(27, r, SECP256K1_HALF_N).is_ok());
    }

    #[test]
    fn rejects_zero_and_overflowing_r() {
        let (_, s) = valid_parts();
        assert!(EcdsaSignature::new(27, B256::ZERO, s).is_err());
        assert!(EcdsaSignature::new(27, SECP256K1_N, s).is_err());
        assert!(EcdsaSignature::new(27, B256::repeat_byte(0x11), B256::ZERO).is_err());
    }
}
