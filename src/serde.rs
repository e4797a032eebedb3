//! Serde implementations for `ArrayContainer`.
//!
//! A container serializes as a sequence of `u16` in ascending order.
//! Deserialization rejects sequences that are not strictly increasing. No
//! header or framing is added; that is left to the serializer.

use super::ArrayContainer;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
};

impl Serialize for ArrayContainer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut ser = serializer.serialize_seq(Some(self.len()))?;
        for v in self.iter() {
            ser.serialize_element(&v)?;
        }
        ser.end()
    }
}

impl<'de> Deserialize<'de> for ArrayContainer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArrayContainerVisitor;

        impl<'de> Visitor<'de> for ArrayContainerVisitor {
            type Value = ArrayContainer;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a strictly increasing sequence of u16")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                // size hints come from untrusted input; never reserve past the domain
                let hint = seq.size_hint().unwrap_or(0).min(crate::storage::DOMAIN_SIZE);
                let mut container =
                    ArrayContainer::try_with_capacity(hint).map_err(de::Error::custom)?;
                while let Some(value) = seq.next_element::<u16>()? {
                    if container.last().is_some_and(|last| last >= value) {
                        return Err(de::Error::invalid_value(
                            de::Unexpected::Unsigned(u64::from(value)),
                            &"strictly increasing sequence",
                        ));
                    }
                    container.try_add(value).map_err(de::Error::custom)?;
                }
                Ok(container)
            }
        }

        deserializer.deserialize_seq(ArrayContainerVisitor)
    }
}
