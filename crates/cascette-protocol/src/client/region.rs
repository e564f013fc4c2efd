//! Region definitions for Blizzard version servers.
//!
//! TACT v2 (HTTPS) hosts are `{region}.version.battle.net`; China uses
//! `.com.cn` domains operated separately from the global infrastructure.

use crate::error::ProtocolError;
use std::str::FromStr;

/// CDN region.
///
/// The lowercase code (`us`, `eu`, ...) is both the version server prefix and
/// the value of the `Region` column in versions responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// United States
    #[default]
    US,
    /// Europe
    EU,
    /// Korea
    KR,
    /// Taiwan
    TW,
    /// China (uses `.com.cn` domains)
    CN,
    /// Singapore
    SG,
}

impl Region {
    /// Every supported region
    pub const ALL: [Self; 6] = [Self::US, Self::EU, Self::KR, Self::TW, Self::CN, Self::SG];

    /// Lowercase region code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::US => "us",
            Self::EU => "eu",
            Self::KR => "kr",
            Self::TW => "tw",
            Self::CN => "cn",
            Self::SG => "sg",
        }
    }

    /// TACT v2 HTTPS base URL for this region.
    pub fn tact_https_url(&self) -> &'static str {
        match self {
            Self::US => "https://us.version.battle.net",
            Self::EU => "https://eu.version.battle.net",
            Self::KR => "https://kr.version.battle.net",
            Self::TW => "https://tw.version.battle.net",
            Self::CN => "https://cn.version.battlenet.com.cn",
            Self::SG => "https://sg.version.battle.net",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|region| region.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProtocolError::UnknownRegion(s.to_string()))
    }
}
