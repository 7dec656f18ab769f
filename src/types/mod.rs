/// Serialize as `as_str()`, deserialize through the strict `FromStr`.
macro_rules! str_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let s = <::std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
                s.parse::<Self>().map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use str_serde;

mod device_type;
mod label;
mod network;
mod snapshot;

pub use device_type::*;
pub use label::*;
pub use network::*;
pub use snapshot::*;
