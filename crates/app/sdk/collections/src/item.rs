use crate::map::Map;
use crate::ERR_NOT_FOUND;
use gasless_core::encoding::{Decodable, Encodable};
use gasless_core::{ReadonlyKV, SdkResult, WritableKV};

pub struct Item<V>(Map<(), V>);

impl<V> Item<V> {
    pub const fn new(prefix: u8) -> Item<V> {
        Item(Map::new(prefix))
    }
}

impl<V> Item<V>
where
    V: Encodable + Decodable,
{
    /// Returns [`Ok(V)`] if it exists, or an [`Err`].
    pub fn get<B: ReadonlyKV + ?Sized>(&self, backend: &B) -> SdkResult<V> {
        self.may_get(backend)?.ok_or(ERR_NOT_FOUND)
    }
    /// Returns [`Some(V)`] if the item exists, otherwise [`None`].
    pub fn may_get<B: ReadonlyKV + ?Sized>(&self, backend: &B) -> SdkResult<Option<V>> {
        self.0.may_get(&(), backend)
    }

    pub fn set<B: WritableKV + ?Sized>(&self, value: &V, backend: &mut B) -> SdkResult<()> {
        self.0.set(&(), value, backend)
    }

    pub fn remove<B: WritableKV + ?Sized>(&self, backend: &mut B) -> SdkResult<()> {
        self.0.remove(&(), backend)
    }
}
