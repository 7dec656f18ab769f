mod classifier;
mod db;
mod device_detector;
mod environment;
mod error;
mod helpers;
mod literal;
mod options;
mod parser;
mod parser_data;
mod probes;
mod substitution;
mod types;

pub use device_detector::{classify, detect_device, detect_device_basic, DeviceDetector, RuleSources};
pub use environment::{
    ConnectionReadings, DisplaySurface, HardwareReadings, HeadlessEnvironment, HostEnvironment,
    ImageDecoder, PrivacyReadings, RenderingSurface, StaticEnvironment, StaticGpu,
    StaticImageSupport,
};
pub use error::{Error, ProbeError, Result};
pub use options::DetectOptions;
pub use probes::{ImageCodec, ImageSample, DEFAULT_MEDIA_DEADLINE};
pub use types::*;
