//! Best-effort host probes. Each one returns a filled sub-record; missing
//! capabilities yield the record's "unknown" values and failures are
//! logged, never propagated.

pub(crate) mod hardware;
pub(crate) mod media;
pub(crate) mod network;
pub(crate) mod privacy;
pub(crate) mod screen;
pub(crate) mod touch;

pub use media::{ImageCodec, ImageSample, DEFAULT_MEDIA_DEADLINE};
