use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Operating system family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OsLabel {
    IOS,
    Android,
    Windows,
    MacOS,
    Linux,
    #[default]
    Other,
}

impl OsLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IOS => "iOS",
            Self::Android => "Android",
            Self::Windows => "Windows",
            Self::MacOS => "MacOS",
            Self::Linux => "Linux",
            Self::Other => "Other",
        }
    }
}

impl FromStr for OsLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::IOS),
            "android" => Ok(Self::Android),
            "windows" => Ok(Self::Windows),
            "macos" | "mac os" | "mac" => Ok(Self::MacOS),
            "linux" => Ok(Self::Linux),
            "other" => Ok(Self::Other),
            _ => Err(Error::UnknownLabel {
                family: "os",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BrowserLabel {
    Chrome,
    Safari,
    Firefox,
    Edge,
    Opera,
    Brave,
    #[default]
    Other,
}

impl BrowserLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "Chrome",
            Self::Safari => "Safari",
            Self::Firefox => "Firefox",
            Self::Edge => "Edge",
            Self::Opera => "Opera",
            Self::Brave => "Brave",
            Self::Other => "Other",
        }
    }
}

impl FromStr for BrowserLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(Self::Chrome),
            "safari" => Ok(Self::Safari),
            "firefox" => Ok(Self::Firefox),
            "edge" => Ok(Self::Edge),
            "opera" => Ok(Self::Opera),
            "brave" => Ok(Self::Brave),
            "other" => Ok(Self::Other),
            _ => Err(Error::UnknownLabel {
                family: "browser",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BrowserLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

crate::types::str_serde!(OsLabel);
crate::types::str_serde!(BrowserLabel);
