//! The host capability surface the detector reads instead of reaching into
//! ambient globals.
//!
//! Every capability defaults to "unsupported" (`None` / `false`), so a host
//! implements only what it actually exposes. [`HeadlessEnvironment`] supports
//! nothing; [`StaticEnvironment`] serves fixed readings, e.g. values a
//! client reported back to a server.

use async_trait::async_trait;

use crate::error::ProbeError;
use crate::helpers::first_non_empty;
use crate::probes::ImageSample;

/// Display geometry as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySurface {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    /// Missing or zero means 1.0.
    pub pixel_ratio: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HardwareReadings {
    pub logical_cores: Option<u32>,
    /// Approximate memory tier in GiB.
    pub device_memory: Option<f64>,
}

/// Raw connection hints. Type strings are mapped onto the closed
/// connection enums by the network probe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionReadings {
    pub connection_type: Option<String>,
    pub effective_type: Option<String>,
    pub downlink: Option<f64>,
    pub rtt: Option<u32>,
    pub save_data: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivacyReadings {
    pub cookies_enabled: Option<bool>,
    /// Raw do-not-track signal; only `"1"` means enabled.
    pub do_not_track: Option<String>,
}

/// A throwaway rendering context, created per probe and dropped after it.
pub trait RenderingSurface {
    /// Unmasked renderer string from the debug extension, `Ok(None)` when
    /// the extension is not exposed.
    fn debug_renderer(&self) -> Result<Option<String>, ProbeError>;
    fn renderer(&self) -> Result<String, ProbeError>;
    fn version(&self) -> Result<String, ProbeError>;
}

#[async_trait]
pub trait ImageDecoder: Send + Sync {
    /// Resolves `Ok` when the host decodes `sample` and `Err` when it
    /// rejects it. Hosts are allowed to never resolve; the media probe
    /// bounds the wait.
    async fn decode(&self, sample: &ImageSample) -> Result<(), ProbeError>;
}

pub trait HostEnvironment: Send + Sync {
    /// Primary user agent property.
    fn user_agent(&self) -> Option<String> {
        None
    }
    /// Vendor identification, consulted when no user agent is exposed.
    fn vendor(&self) -> Option<String> {
        None
    }
    /// Legacy Opera identification, the last user agent fallback.
    fn opera(&self) -> Option<String> {
        None
    }
    /// The host advertises itself as Brave (which hides from the UA).
    fn brave_capability(&self) -> bool {
        false
    }
    fn platform(&self) -> Option<String> {
        None
    }
    fn language(&self) -> Option<String> {
        None
    }
    /// IANA time zone name.
    fn timezone(&self) -> Option<String> {
        None
    }
    /// Whether the app runs in standalone display mode.
    fn standalone_display_mode(&self) -> Option<bool> {
        None
    }
    /// Presence of the legacy, non-standard file-system API.
    fn legacy_file_system_api(&self) -> bool {
        false
    }
    fn max_touch_points(&self) -> Option<u32> {
        None
    }
    fn display(&self) -> Option<DisplaySurface> {
        None
    }
    fn hardware(&self) -> Option<HardwareReadings> {
        None
    }
    fn create_rendering_surface(&self) -> Option<Box<dyn RenderingSurface + '_>> {
        None
    }
    fn connection(&self) -> Option<ConnectionReadings> {
        None
    }
    fn privacy(&self) -> Option<PrivacyReadings> {
        None
    }
    fn image_decoder(&self) -> Option<&dyn ImageDecoder> {
        None
    }
}

/// Where the classified user agent came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UaSource {
    Override,
    Host,
    Vendor,
    Opera,
    Missing,
}

/// First non-empty of: override, host UA, host vendor, legacy Opera id.
pub(crate) fn source_user_agent(
    env: &dyn HostEnvironment,
    user_agent: Option<&str>,
) -> (String, UaSource) {
    if let Some(ua) = first_non_empty([user_agent.map(str::to_owned)]) {
        return (ua, UaSource::Override);
    }
    let chain = [
        (env.user_agent(), UaSource::Host),
        (env.vendor(), UaSource::Vendor),
        (env.opera(), UaSource::Opera),
    ];
    for (candidate, source) in chain {
        if let Some(ua) = first_non_empty([candidate]) {
            return (ua, source);
        }
    }
    (String::new(), UaSource::Missing)
}

// ---------------------------------------------------------------------------
// Bundled hosts
// ---------------------------------------------------------------------------

/// A host without any capability: no user agent, no display, no probes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEnvironment;

impl HostEnvironment for HeadlessEnvironment {}

/// Fixed GPU strings served through a [`RenderingSurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticGpu {
    pub unmasked_renderer: Option<String>,
    pub renderer: String,
    pub version: String,
}

impl RenderingSurface for StaticGpu {
    fn debug_renderer(&self) -> Result<Option<String>, ProbeError> {
        Ok(self.unmasked_renderer.clone())
    }

    fn renderer(&self) -> Result<String, ProbeError> {
        Ok(self.renderer.clone())
    }

    fn version(&self) -> Result<String, ProbeError> {
        Ok(self.version.clone())
    }
}

/// Fixed image codec verdicts, answered immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticImageSupport {
    pub webp: bool,
    pub avif: bool,
}

#[async_trait]
impl ImageDecoder for StaticImageSupport {
    async fn decode(&self, sample: &ImageSample) -> Result<(), ProbeError> {
        let supported = match sample.codec() {
            crate::probes::ImageCodec::WebP => self.webp,
            crate::probes::ImageCodec::Avif => self.avif,
        };
        if supported {
            Ok(())
        } else {
            Err(ProbeError::Failed(format!("{} sample rejected", sample.codec())))
        }
    }
}

/// A host answering from fixed readings.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    user_agent: Option<String>,
    vendor: Option<String>,
    opera: Option<String>,
    brave: bool,
    platform: Option<String>,
    language: Option<String>,
    timezone: Option<String>,
    standalone: Option<bool>,
    legacy_file_system: bool,
    touch_points: Option<u32>,
    display: Option<DisplaySurface>,
    hardware: Option<HardwareReadings>,
    gpu: Option<StaticGpu>,
    connection: Option<ConnectionReadings>,
    privacy: Option<PrivacyReadings>,
    images: Option<StaticImageSupport>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    #[must_use]
    pub fn with_opera(mut self, opera: impl Into<String>) -> Self {
        self.opera = Some(opera.into());
        self
    }

    #[must_use]
    pub fn with_brave(mut self, brave: bool) -> Self {
        self.brave = brave;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    #[must_use]
    pub fn with_standalone_display_mode(mut self, standalone: bool) -> Self {
        self.standalone = Some(standalone);
        self
    }

    #[must_use]
    pub fn with_legacy_file_system_api(mut self, present: bool) -> Self {
        self.legacy_file_system = present;
        self
    }

    #[must_use]
    pub fn with_max_touch_points(mut self, points: u32) -> Self {
        self.touch_points = Some(points);
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: DisplaySurface) -> Self {
        self.display = Some(display);
        self
    }

    #[must_use]
    pub fn with_hardware(mut self, hardware: HardwareReadings) -> Self {
        self.hardware = Some(hardware);
        self
    }

    #[must_use]
    pub fn with_gpu(mut self, gpu: StaticGpu) -> Self {
        self.gpu = Some(gpu);
        self
    }

    #[must_use]
    pub fn with_connection(mut self, connection: ConnectionReadings) -> Self {
        self.connection = Some(connection);
        self
    }

    #[must_use]
    pub fn with_privacy(mut self, privacy: PrivacyReadings) -> Self {
        self.privacy = Some(privacy);
        self
    }

    #[must_use]
    pub fn with_image_support(mut self, images: StaticImageSupport) -> Self {
        self.images = Some(images);
        self
    }
}

impl HostEnvironment for StaticEnvironment {
    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }
    fn vendor(&self) -> Option<String> {
        self.vendor.clone()
    }
    fn opera(&self) -> Option<String> {
        self.opera.clone()
    }
    fn brave_capability(&self) -> bool {
        self.brave
    }
    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }
    fn language(&self) -> Option<String> {
        self.language.clone()
    }
    fn timezone(&self) -> Option<String> {
        self.timezone.clone()
    }
    fn standalone_display_mode(&self) -> Option<bool> {
        self.standalone
    }
    fn legacy_file_system_api(&self) -> bool {
        self.legacy_file_system
    }
    fn max_touch_points(&self) -> Option<u32> {
        self.touch_points
    }
    fn display(&self) -> Option<DisplaySurface> {
        self.display
    }
    fn hardware(&self) -> Option<HardwareReadings> {
        self.hardware
    }
    fn create_rendering_surface(&self) -> Option<Box<dyn RenderingSurface + '_>> {
        self.gpu
            .clone()
            .map(|gpu| Box::new(gpu) as Box<dyn RenderingSurface>)
    }
    fn connection(&self) -> Option<ConnectionReadings> {
        self.connection.clone()
    }
    fn privacy(&self) -> Option<PrivacyReadings> {
        self.privacy.clone()
    }
    fn image_decoder(&self) -> Option<&dyn ImageDecoder> {
        self.images.as_ref().map(|images| images as &dyn ImageDecoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let env = StaticEnvironment::new().with_user_agent("host");
        assert_eq!(
            source_user_agent(&env, Some("override")),
            ("override".to_string(), UaSource::Override)
        );
    }

    #[test]
    fn empty_override_falls_through_the_chain() {
        let env = StaticEnvironment::new()
            .with_user_agent("")
            .with_vendor("Apple Computer, Inc.")
            .with_opera("Opera/9.80");
        assert_eq!(
            source_user_agent(&env, Some("")),
            ("Apple Computer, Inc.".to_string(), UaSource::Vendor)
        );
    }

    #[test]
    fn opera_is_the_last_resort() {
        let env = StaticEnvironment::new().with_opera("Opera/9.80");
        assert_eq!(source_user_agent(&env, None).1, UaSource::Opera);
    }

    #[test]
    fn headless_host_yields_empty_user_agent() {
        assert_eq!(
            source_user_agent(&HeadlessEnvironment, None),
            (String::new(), UaSource::Missing)
        );
    }
}
