use crate::ERR_NOT_FOUND;
use gasless_core::encoding::{Decodable, Encodable};
use gasless_core::{ReadonlyKV, SdkResult, WritableKV};
use std::marker::PhantomData;

pub struct Map<K, V> {
    prefix: u8,
    _kv: PhantomData<(K, V)>,
}

impl<K, V> Map<K, V> {
    pub const fn new(prefix: u8) -> Map<K, V> {
        Map {
            prefix,
            _kv: PhantomData,
        }
    }
}

impl<K, V> Map<K, V>
where
    K: Encodable,
    V: Encodable + Decodable,
{
    pub fn set<B>(&self, key: &K, value: &V, backend: &mut B) -> SdkResult<()>
    where
        B: WritableKV + ?Sized,
    {
        backend.set(&self.make_key(key)?, value.encode()?)
    }

    pub fn get<B>(&self, key: &K, backend: &B) -> SdkResult<V>
    where
        B: ReadonlyKV + ?Sized,
    {
        self.may_get(key, backend)?.ok_or(ERR_NOT_FOUND)
    }

    pub fn may_get<B>(&self, key: &K, backend: &B) -> SdkResult<Option<V>>
    where
        B: ReadonlyKV + ?Sized,
    {
        match backend.get(&self.make_key(key)?)? {
            None => Ok(None),
            Some(raw) => Ok(Some(V::decode(&raw)?)),
        }
    }

    pub fn remove<B>(&self, key: &K, backend: &mut B) -> SdkResult<()>
    where
        B: WritableKV + ?Sized,
    {
        backend.remove(&self.make_key(key)?)
    }

    pub fn make_key(&self, key: &K) -> SdkResult<Vec<u8>> {
        let mut key_bytes = vec![self.prefix];
        key_bytes.extend(key.encode()?);
        Ok(key_bytes)
    }
}
