pub mod action;
pub mod post;
pub mod user;

use crate::snowflake::{Epoch, Snowflake, SnowflakeGenerator};
use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData, num::ParseIntError, str::FromStr};
use time::{UtcDateTime, macros::utc_datetime};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct TorwacheEpoch;
impl Epoch for TorwacheEpoch {
    const EPOCH_TIME: UtcDateTime = utc_datetime!(2025-01-01 00:00);
}

pub type TorwacheSnowflake = Snowflake<TorwacheEpoch>;
pub type TorwacheSnowflakeGenerator = SnowflakeGenerator<TorwacheEpoch>;

/// A snowflake tagged with the kind of object it identifies.
#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<Marker>(TorwacheSnowflake, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(snowflake: TorwacheSnowflake) -> Self {
        Self(snowflake, PhantomData)
    }

    #[must_use]
    pub fn snowflake(self) -> TorwacheSnowflake {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> FromStr for Id<Marker> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TorwacheSnowflake::from_str(s).map(Self::new)
    }
}

impl<Marker> From<TorwacheSnowflake> for Id<Marker> {
    fn from(value: TorwacheSnowflake) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for TorwacheSnowflake {
    fn from(value: Id<Marker>) -> Self {
        value.0
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(TorwacheSnowflake::new(value))
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.snowflake().get()
    }
}
