use super::{BrowserLabel, ConnectionType, DeviceType, EffectiveConnectionType, OsLabel};
use serde::Serialize;

/// Output of the synchronous classifiers for one user agent.
///
/// The device-class flags are private so the
/// `is_desktop == !is_mobile && !is_tablet` invariant cannot be broken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    user_agent: String,
    is_mobile: bool,
    is_tablet: bool,
    is_desktop: bool,
    device_type: DeviceType,
    os: OsLabel,
    os_version: String,
    browser: BrowserLabel,
    browser_version: String,
    is_brave: bool,
    device_vendor: Option<String>,
    device_model: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ClassificationParts {
    pub os: OsLabel,
    pub os_version: String,
    pub browser: BrowserLabel,
    pub browser_version: String,
    pub is_brave: bool,
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub device_vendor: Option<String>,
    pub device_model: Option<String>,
}

impl Classification {
    pub(crate) fn new(user_agent: String, parts: ClassificationParts) -> Self {
        Self {
            user_agent,
            is_mobile: parts.is_mobile,
            is_tablet: parts.is_tablet,
            is_desktop: !parts.is_mobile && !parts.is_tablet,
            device_type: DeviceType::from_flags(parts.is_mobile, parts.is_tablet),
            os: parts.os,
            os_version: parts.os_version,
            browser: parts.browser,
            browser_version: parts.browser_version,
            is_brave: parts.is_brave,
            device_vendor: parts.device_vendor,
            device_model: parts.device_model,
        }
    }

    /// The user agent as sourced, before normalization.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }
    pub fn is_tablet(&self) -> bool {
        self.is_tablet
    }
    pub fn is_desktop(&self) -> bool {
        self.is_desktop
    }
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }
    pub fn os(&self) -> OsLabel {
        self.os
    }
    /// Dotted version, empty when unknown.
    pub fn os_version(&self) -> &str {
        &self.os_version
    }
    pub fn browser(&self) -> BrowserLabel {
        self.browser
    }
    /// Dotted version, empty when unknown.
    pub fn browser_version(&self) -> &str {
        &self.browser_version
    }
    pub fn is_brave(&self) -> bool {
        self.is_brave
    }
    pub fn device_vendor(&self) -> Option<&str> {
        self.device_vendor.as_deref()
    }
    pub fn device_model(&self) -> Option<&str> {
        self.device_model.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Probe sub-records
// ---------------------------------------------------------------------------

/// Derived from comparing width and height, not from an orientation sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub width: u32,
    pub height: u32,
    /// `"{width}x{height}"`.
    pub resolution: String,
    pub color_depth: u32,
    pub pixel_ratio: f64,
    pub orientation: Orientation,
}

impl Default for ScreenInfo {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            resolution: "0x0".to_string(),
            color_depth: 0,
            pixel_ratio: 1.0,
            orientation: Orientation::Portrait,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareInfo {
    /// Logical cores, 0 when unknown.
    pub cores: u32,
    /// Approximate memory tier in GiB.
    pub memory: Option<f64>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub gpu_renderer: Option<String>,
    pub gpu_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    #[serde(rename = "type")]
    pub connection_type: ConnectionType,
    pub effective_type: EffectiveConnectionType,
    /// Mbit/s.
    pub downlink: Option<f64>,
    /// Milliseconds.
    pub rtt: Option<u32>,
    pub save_data: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub webp_support: bool,
    pub avif_support: bool,
}

/// Advisory only: both signals are unreliable on modern hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyInfo {
    pub cookies_enabled: bool,
    pub do_not_track: bool,
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Full snapshot: classification merged with every feature probe.
///
/// Every sub-record is always present; unavailable capabilities show up as
/// their "unknown" values rather than missing fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(flatten)]
    classification: Classification,
    platform: String,
    #[serde(rename = "isPWA")]
    is_pwa: bool,
    is_private_browsing: bool,
    is_touch_screen: bool,
    screen: ScreenInfo,
    hardware: HardwareInfo,
    network: NetworkInfo,
    media: MediaInfo,
    privacy: PrivacyInfo,
    language: String,
    timezone: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct HostFacts {
    pub platform: String,
    pub is_pwa: bool,
    pub is_private_browsing: bool,
    pub is_touch_screen: bool,
    pub language: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ProbeRecords {
    pub screen: ScreenInfo,
    pub hardware: HardwareInfo,
    pub network: NetworkInfo,
    pub media: MediaInfo,
    pub privacy: PrivacyInfo,
}

impl DeviceInfo {
    pub(crate) fn new(classification: Classification, facts: HostFacts, records: ProbeRecords) -> Self {
        Self {
            classification,
            platform: facts.platform,
            is_pwa: facts.is_pwa,
            is_private_browsing: facts.is_private_browsing,
            is_touch_screen: facts.is_touch_screen,
            screen: records.screen,
            hardware: records.hardware,
            network: records.network,
            media: records.media,
            privacy: records.privacy,
            language: facts.language,
            timezone: facts.timezone,
        }
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }
    pub fn user_agent(&self) -> &str {
        self.classification.user_agent()
    }
    pub fn is_mobile(&self) -> bool {
        self.classification.is_mobile()
    }
    pub fn is_tablet(&self) -> bool {
        self.classification.is_tablet()
    }
    pub fn is_desktop(&self) -> bool {
        self.classification.is_desktop()
    }
    pub fn device_type(&self) -> DeviceType {
        self.classification.device_type()
    }
    pub fn os(&self) -> OsLabel {
        self.classification.os()
    }
    pub fn os_version(&self) -> &str {
        self.classification.os_version()
    }
    pub fn browser(&self) -> BrowserLabel {
        self.classification.browser()
    }
    pub fn browser_version(&self) -> &str {
        self.classification.browser_version()
    }
    pub fn is_brave(&self) -> bool {
        self.classification.is_brave()
    }
    pub fn platform(&self) -> &str {
        &self.platform
    }
    /// Running as an installed web app (standalone display mode).
    pub fn is_pwa(&self) -> bool {
        self.is_pwa
    }
    /// Legacy heuristic based on the non-standard file-system API; advisory.
    pub fn is_private_browsing(&self) -> bool {
        self.is_private_browsing
    }
    pub fn is_touch_screen(&self) -> bool {
        self.is_touch_screen
    }
    pub fn screen(&self) -> &ScreenInfo {
        &self.screen
    }
    pub fn hardware(&self) -> &HardwareInfo {
        &self.hardware
    }
    pub fn network(&self) -> &NetworkInfo {
        &self.network
    }
    pub fn media(&self) -> &MediaInfo {
        &self.media
    }
    pub fn privacy(&self) -> &PrivacyInfo {
        &self.privacy
    }
    pub fn language(&self) -> &str {
        &self.language
    }
    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

/// Minimal synchronous snapshot: classification plus the host facts that
/// need no probing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDeviceInfo {
    #[serde(flatten)]
    classification: Classification,
    is_touch_screen: bool,
    language: String,
    platform: String,
}

impl BasicDeviceInfo {
    pub(crate) fn new(classification: Classification, facts: HostFacts) -> Self {
        Self {
            classification,
            is_touch_screen: facts.is_touch_screen,
            language: facts.language,
            platform: facts.platform,
        }
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }
    pub fn is_touch_screen(&self) -> bool {
        self.is_touch_screen
    }
    pub fn language(&self) -> &str {
        &self.language
    }
    pub fn platform(&self) -> &str {
        &self.platform
    }
}
