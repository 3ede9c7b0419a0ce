//! Storage codec for collection keys and values.
//!
//! Anything borsh can serialize is [`Encodable`], and anything it can
//! deserialize is [`Decodable`]. Tuple keys are the concatenation of their
//! parts.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::{SdkResult, ERR_ENCODING};

pub trait Encodable: Sized + Clone {
    fn encode(&self) -> SdkResult<Vec<u8>>;
}

pub trait Decodable: Sized + Clone {
    fn decode(bytes: &[u8]) -> SdkResult<Self>;
}

impl<S: BorshSerialize + Clone> Encodable for S {
    fn encode(&self) -> SdkResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|_| ERR_ENCODING)
    }
}

impl<S: BorshDeserialize + Clone> Decodable for S {
    fn decode(bytes: &[u8]) -> SdkResult<Self> {
        borsh::from_slice(bytes).map_err(|_| ERR_ENCODING)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};

    #[test]
    fn primitives_have_fixed_width() {
        assert_eq!(Address::repeat_byte(1).encode().unwrap().len(), 20);
        assert_eq!(B256::repeat_byte(1).encode().unwrap().len(), 32);
        assert_eq!(U256::from(0x0102u64).encode().unwrap().len(), 32);
        assert!(().encode().unwrap().is_empty());
    }

    #[test]
    fn values_decode_to_themselves() {
        let value = U256::from(7_000_000u64);
        assert_eq!(U256::decode(&value.encode().unwrap()).unwrap(), value);
        assert!(bool::decode(&true.encode().unwrap()).unwrap());
    }

    #[test]
    fn tuple_key_concatenates_parts() {
        let key = (Address::repeat_byte(0xAA), B256::repeat_byte(0xBB))
            .encode()
            .unwrap();
        assert_eq!(key.len(), 52);
        assert!(key[..20].iter().all(|b| *b == 0xAA));
        assert!(key[20..].iter().all(|b| *b == 0xBB));
    }

    #[test]
    fn malformed_bytes_are_rejected() {
        assert_eq!(Address::decode(&[0u8; 19]), Err(ERR_ENCODING));
        assert_eq!(bool::decode(&[2]), Err(ERR_ENCODING));
        assert_eq!(U256::decode(&[0u8; 33]), Err(ERR_ENCODING));
    }
}
