use std::time::Duration;

use async_trait::async_trait;
use device_info::{
    detect_device, detect_device_basic, BrowserLabel, ConnectionReadings, ConnectionType,
    DetectOptions, DeviceType, DisplaySurface, EffectiveConnectionType, HardwareInfo,
    HardwareReadings, HeadlessEnvironment, HostEnvironment, ImageCodec, ImageDecoder, ImageSample,
    MediaInfo, NetworkInfo, Orientation, OsLabel, PrivacyInfo, PrivacyReadings, ProbeError,
    RenderingSurface, ScreenInfo, StaticEnvironment, StaticGpu, StaticImageSupport,
};

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Mobile/15E148 Safari/604.1";
const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

fn iphone_host() -> StaticEnvironment {
    StaticEnvironment::new()
        .with_user_agent(IPHONE)
        .with_platform("iPhone")
        .with_language("en-US")
        .with_timezone("Europe/Paris")
        .with_max_touch_points(5)
        .with_display(DisplaySurface {
            width: 390,
            height: 844,
            color_depth: 24,
            pixel_ratio: Some(3.0),
        })
        .with_hardware(HardwareReadings {
            logical_cores: Some(6),
            device_memory: None,
        })
        .with_gpu(StaticGpu {
            unmasked_renderer: Some("Apple GPU".into()),
            renderer: "WebKit WebGL".into(),
            version: "WebGL 1.0".into(),
        })
        .with_connection(ConnectionReadings {
            connection_type: Some("wifi".into()),
            effective_type: Some("4g".into()),
            downlink: Some(10.0),
            rtt: Some(50),
            save_data: Some(false),
        })
        .with_privacy(PrivacyReadings {
            cookies_enabled: Some(true),
            do_not_track: Some("1".into()),
        })
        .with_image_support(StaticImageSupport {
            webp: true,
            avif: true,
        })
}

// ---------------------------------------------------------------------------
// Fake hosts
// ---------------------------------------------------------------------------

/// Never settles a decode request.
struct HangingDecoder {
    settles: Option<ImageCodec>,
}

#[async_trait]
impl ImageDecoder for HangingDecoder {
    async fn decode(&self, sample: &ImageSample) -> Result<(), ProbeError> {
        if self.settles == Some(sample.codec()) {
            return Ok(());
        }
        std::future::pending().await
    }
}

struct HangingHost {
    decoder: HangingDecoder,
}

impl HostEnvironment for HangingHost {
    fn user_agent(&self) -> Option<String> {
        Some(CHROME_WINDOWS.into())
    }
    fn image_decoder(&self) -> Option<&dyn ImageDecoder> {
        Some(&self.decoder)
    }
}

struct ThrowingSurface;

impl RenderingSurface for ThrowingSurface {
    fn debug_renderer(&self) -> Result<Option<String>, ProbeError> {
        Err(ProbeError::Unavailable("no rendering context".into()))
    }
    fn renderer(&self) -> Result<String, ProbeError> {
        Err(ProbeError::Unavailable("no rendering context".into()))
    }
    fn version(&self) -> Result<String, ProbeError> {
        Err(ProbeError::Unavailable("no rendering context".into()))
    }
}

struct ThrowingGpuHost;

impl HostEnvironment for ThrowingGpuHost {
    fn user_agent(&self) -> Option<String> {
        Some(CHROME_WINDOWS.into())
    }
    fn hardware(&self) -> Option<HardwareReadings> {
        Some(HardwareReadings {
            logical_cores: Some(8),
            device_memory: Some(8.0),
        })
    }
    fn create_rendering_surface(&self) -> Option<Box<dyn RenderingSurface + '_>> {
        Some(Box::new(ThrowingSurface))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_full_snapshot() {
    let info = detect_device(&iphone_host(), &DetectOptions::default()).await;

    assert_eq!(info.os(), OsLabel::IOS);
    assert_eq!(info.os_version(), "16.4");
    assert_eq!(info.browser(), BrowserLabel::Safari);
    assert_eq!(info.device_type(), DeviceType::Mobile);
    assert!(info.is_touch_screen());
    assert!(!info.is_pwa());
    assert!(!info.is_private_browsing());
    assert_eq!(info.platform(), "iPhone");
    assert_eq!(info.language(), "en-US");
    assert_eq!(info.timezone(), "Europe/Paris");

    assert_eq!(
        *info.screen(),
        ScreenInfo {
            width: 390,
            height: 844,
            resolution: "390x844".into(),
            color_depth: 24,
            pixel_ratio: 3.0,
            orientation: Orientation::Portrait,
        }
    );
    assert_eq!(
        *info.hardware(),
        HardwareInfo {
            cores: 6,
            memory: None,
            model: None,
            vendor: Some("Apple".into()),
            gpu_renderer: Some("Apple GPU".into()),
            gpu_version: Some("WebGL 1.0".into()),
        }
    );
    assert_eq!(
        *info.network(),
        NetworkInfo {
            connection_type: ConnectionType::Wifi,
            effective_type: EffectiveConnectionType::G4,
            downlink: Some(10.0),
            rtt: Some(50),
            save_data: false,
        }
    );
    assert_eq!(
        *info.media(),
        MediaInfo {
            webp_support: true,
            avif_support: true,
        }
    );
    assert_eq!(
        *info.privacy(),
        PrivacyInfo {
            cookies_enabled: true,
            do_not_track: true,
        }
    );
}

#[tokio::test]
async fn test_headless_host_yields_defaults() {
    let info = detect_device(&HeadlessEnvironment, &DetectOptions::default()).await;

    assert_eq!(info.user_agent(), "");
    assert_eq!(info.os(), OsLabel::Other);
    assert_eq!(info.browser(), BrowserLabel::Other);
    assert!(info.is_desktop());
    assert!(!info.is_touch_screen());
    assert_eq!(info.platform(), "");
    assert_eq!(info.timezone(), "");
    assert_eq!(*info.screen(), ScreenInfo::default());
    assert_eq!(*info.hardware(), HardwareInfo::default());
    assert_eq!(*info.network(), NetworkInfo::default());
    assert_eq!(*info.media(), MediaInfo::default());
    assert_eq!(*info.privacy(), PrivacyInfo::default());
}

#[tokio::test(start_paused = true)]
async fn test_hanging_decoder_is_bounded_by_the_deadline() {
    let host = HangingHost {
        decoder: HangingDecoder { settles: None },
    };
    let options = DetectOptions::new().with_media_deadline(Duration::from_millis(500));

    let started = tokio::time::Instant::now();
    let info = detect_device(&host, &options).await;

    assert_eq!(*info.media(), MediaInfo::default());
    // Both checks share the wait.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(500), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(1), "{elapsed:?}");
    assert_eq!(info.browser(), BrowserLabel::Chrome);
}

#[tokio::test(start_paused = true)]
async fn test_one_codec_settles_the_other_hangs() {
    let host = HangingHost {
        decoder: HangingDecoder {
            settles: Some(ImageCodec::WebP),
        },
    };
    let info = detect_device(&host, &DetectOptions::default()).await;

    assert!(info.media().webp_support);
    assert!(!info.media().avif_support);
}

#[tokio::test]
async fn test_throwing_rendering_surface_still_snapshots() {
    let info = detect_device(&ThrowingGpuHost, &DetectOptions::default()).await;

    assert_eq!(info.hardware().gpu_renderer, None);
    assert_eq!(info.hardware().gpu_version, None);
    assert_eq!(info.hardware().cores, 8);
    assert_eq!(info.hardware().memory, Some(8.0));
    assert_eq!(info.os(), OsLabel::Windows);
}

#[tokio::test]
async fn test_user_agent_override_beats_host() {
    let options = DetectOptions::new().with_user_agent(CHROME_WINDOWS);
    let info = detect_device(&iphone_host(), &options).await;

    assert_eq!(info.user_agent(), CHROME_WINDOWS);
    assert_eq!(info.os(), OsLabel::Windows);
    assert!(info.is_desktop());
    // Host facts still come from the host.
    assert_eq!(info.platform(), "iPhone");
    assert_eq!(info.hardware().vendor, None);
}

#[tokio::test]
async fn test_brave_capability() {
    let host = StaticEnvironment::new()
        .with_user_agent(CHROME_WINDOWS)
        .with_brave(true);
    let info = detect_device(&host, &DetectOptions::default()).await;

    assert!(info.is_brave());
    assert_eq!(info.browser(), BrowserLabel::Brave);
    assert_eq!(info.browser_version(), "");
}

#[tokio::test]
async fn test_installed_app_and_private_browsing_flags() {
    let host = StaticEnvironment::new()
        .with_standalone_display_mode(true)
        .with_legacy_file_system_api(true);
    let info = detect_device(&host, &DetectOptions::default()).await;

    assert!(info.is_pwa());
    assert!(info.is_private_browsing());
}

#[test]
fn test_snapshot_outside_tokio_runtime() {
    use std::future::Future;
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    struct NoopWake;

    impl Wake for NoopWake {
        fn wake(self: Arc<Self>) {}
    }

    let host = iphone_host();
    let options = DetectOptions::default();
    let waker = Waker::from(Arc::new(NoopWake));
    let mut cx = Context::from_waker(&waker);
    let mut fut = std::pin::pin!(detect_device(&host, &options));

    let info = match fut.as_mut().poll(&mut cx) {
        Poll::Ready(info) => info,
        Poll::Pending => panic!("snapshot should settle without a runtime"),
    };
    assert_eq!(info.os(), OsLabel::IOS);
    assert_eq!(info.screen().resolution, "390x844");
    assert_eq!(*info.media(), MediaInfo::default());
}

#[test]
fn test_basic_snapshot() {
    let basic = detect_device_basic(&iphone_host(), None);

    assert_eq!(basic.classification().os(), OsLabel::IOS);
    assert_eq!(basic.classification().device_vendor(), Some("Apple"));
    assert!(basic.is_touch_screen());
    assert_eq!(basic.language(), "en-US");
    assert_eq!(basic.platform(), "iPhone");
}

#[tokio::test]
async fn test_snapshot_json_shape() {
    let info = detect_device(&iphone_host(), &DetectOptions::default()).await;
    let json = serde_json::to_value(&info).unwrap();

    assert_eq!(json["userAgent"], IPHONE);
    assert_eq!(json["os"], "iOS");
    assert_eq!(json["osVersion"], "16.4");
    assert_eq!(json["deviceType"], "Mobile");
    assert_eq!(json["isMobile"], true);
    assert_eq!(json["isDesktop"], false);
    assert_eq!(json["isPWA"], false);
    assert_eq!(json["deviceVendor"], "Apple");
    assert_eq!(json["screen"]["resolution"], "390x844");
    assert_eq!(json["screen"]["orientation"], "portrait");
    assert_eq!(json["hardware"]["gpuRenderer"], "Apple GPU");
    assert_eq!(json["network"]["type"], "wifi");
    assert_eq!(json["network"]["effectiveType"], "4g");
    assert_eq!(json["media"]["avifSupport"], true);
    assert_eq!(json["privacy"]["doNotTrack"], true);
    assert_eq!(json["timezone"], "Europe/Paris");
}
