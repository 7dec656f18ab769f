use std::fmt;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

use crate::environment::{HostEnvironment, ImageDecoder};
use crate::error::ProbeError;
use crate::types::MediaInfo;

/// How long one codec check may stay unsettled before it counts as
/// unsupported.
pub const DEFAULT_MEDIA_DEADLINE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageCodec {
    WebP,
    Avif,
}

impl ImageCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Avif => "avif",
        }
    }
}

impl fmt::Display for ImageCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A minimal embedded image the host is asked to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSample {
    codec: ImageCodec,
    mime_type: &'static str,
    base64: &'static str,
}

impl ImageSample {
    /// 1x1 lossy WebP.
    pub const WEBP: ImageSample = ImageSample {
        codec: ImageCodec::WebP,
        mime_type: "image/webp",
        base64: "UklGRiIAAABXRUJQVlA4IBYAAAAwAQCdASoBAAEADsD+JaQAA3AAAAAA",
    };

    /// 1x1 AV1 still image.
    pub const AVIF: ImageSample = ImageSample {
        codec: ImageCodec::Avif,
        mime_type: "image/avif",
        base64: "AAAAIGZ0eXBhdmlmAAAAAGF2aWZtaWYxbWlhZk1BMUIAAADybWV0YQAAAAAAAAAoaGRscgAAAAAAAAAAcGljdAAAAAAAAAAAAAAAAGxpYmF2aWYAAAAADnBpdG0AAAAAAAEAAAAeaWxvYwAAAABEAAABAAEAAAABAAABGgAAAB0AAAAoaWluZgAAAAAAAQAAABppbmZlAgAAAAABAABhdjAxQ29sb3IAAAAAamlwcnAAAABLaXBjbwAAABRpc3BlAAAAAAAAAAIAAAACAAAAEHBpeGkAAAAAAwgICAAAAAxhdjFDgQ0MAAAAABNjb2xybmNseAACAAIAAYAAAAAXaXBtYQAAAAAAAAABAAEEAQKDBAAAACVtZGF0EgAKCBgANogQEAwgMg8f8D///8WfhwB8+ErK42A=",
    };

    pub fn codec(&self) -> ImageCodec {
        self.codec
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// `data:` URI, for hosts that load images by URL.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    /// Raw file bytes, for hosts that decode in-process.
    pub fn bytes(&self) -> Result<Vec<u8>, ProbeError> {
        STANDARD
            .decode(self.base64)
            .map_err(|e| ProbeError::Failed(format!("{} sample: {e}", self.codec)))
    }
}

/// Both codec checks run concurrently, each bounded by `deadline`.
///
/// The deadline needs tokio's timer: polled outside a tokio runtime, the
/// decoder is not consulted and both codecs are reported unsupported.
pub(crate) async fn probe(env: &dyn HostEnvironment, deadline: Duration) -> MediaInfo {
    let Some(decoder) = env.image_decoder() else {
        debug!("no image decoder, reporting no codec support");
        return MediaInfo::default();
    };
    if tokio::runtime::Handle::try_current().is_err() {
        warn!("no tokio runtime to bound image decoding, reporting no codec support");
        return MediaInfo::default();
    }

    let (webp_support, avif_support) = tokio::join!(
        supports(decoder, &ImageSample::WEBP, deadline),
        supports(decoder, &ImageSample::AVIF, deadline),
    );

    MediaInfo {
        webp_support,
        avif_support,
    }
}

async fn supports(decoder: &dyn ImageDecoder, sample: &ImageSample, deadline: Duration) -> bool {
    match tokio::time::timeout(deadline, decoder.decode(sample)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            debug!(codec = %sample.codec(), error = %e, "image sample not decoded");
            false
        }
        Err(_) => {
            warn!(
                codec = %sample.codec(),
                deadline_ms = deadline.as_millis() as u64,
                "image decode did not settle before the deadline"
            );
            false
        }
    }
}
