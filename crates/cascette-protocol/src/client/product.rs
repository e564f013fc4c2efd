//! World of Warcraft client branches served by the version service.

use crate::error::ProtocolError;
use std::str::FromStr;

/// Product code of a WoW client branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// Retail
    Wow,
    /// Retail PTR
    WowPtr,
    /// Retail experimental PTR
    WowXptr,
    /// Retail beta
    WowBeta,
    /// Classic progression
    WowClassic,
    /// Classic progression PTR
    WowClassicPtr,
    /// Classic progression beta
    WowClassicBeta,
    /// Classic Era
    WowClassicEra,
    /// Classic Era PTR
    WowClassicEraPtr,
}

impl Product {
    /// Every supported product
    pub const ALL: [Self; 9] = [
        Self::Wow,
        Self::WowPtr,
        Self::WowXptr,
        Self::WowBeta,
        Self::WowClassic,
        Self::WowClassicPtr,
        Self::WowClassicBeta,
        Self::WowClassicEra,
        Self::WowClassicEraPtr,
    ];

    /// Product code used in version service paths
    pub fn code(&self) -> &'static str {
        match self {
            Self::Wow => "wow",
            Self::WowPtr => "wowt",
            Self::WowXptr => "wowxptr",
            Self::WowBeta => "wow_beta",
            Self::WowClassic => "wow_classic",
            Self::WowClassicPtr => "wow_classic_ptr",
            Self::WowClassicBeta => "wow_classic_beta",
            Self::WowClassicEra => "wow_classic_era",
            Self::WowClassicEraPtr => "wow_classic_era_ptr",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Product {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|product| product.code() == s)
            .ok_or_else(|| ProtocolError::UnknownProduct(s.to_string()))
    }
}
