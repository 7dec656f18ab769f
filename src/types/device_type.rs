use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Coarse device class. [`DeviceType::Desktop`] is the default when neither
/// the mobile nor the tablet patterns match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl DeviceType {
    /// Collapse the two independent pattern verdicts into one class.
    /// Mobile wins when a crafted string matches both sets.
    pub fn from_flags(is_mobile: bool, is_tablet: bool) -> Self {
        if is_mobile {
            Self::Mobile
        } else if is_tablet {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
        }
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" | "smartphone" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            _ => Err(Error::UnknownLabel {
                family: "device type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

crate::types::str_serde!(DeviceType);
