use tracing::warn;

use crate::environment::{HostEnvironment, RenderingSurface};
use crate::error::ProbeError;
use crate::types::HardwareInfo;

/// Cores, memory tier and GPU strings. Vendor and model are filled in by
/// the aggregator from the user agent.
pub(crate) fn probe(env: &dyn HostEnvironment) -> HardwareInfo {
    let readings = env.hardware().unwrap_or_default();
    let (gpu_renderer, gpu_version) = probe_gpu(env);

    HardwareInfo {
        cores: readings.logical_cores.unwrap_or(0),
        memory: readings
            .device_memory
            .filter(|gib| gib.is_finite() && *gib > 0.0),
        model: None,
        vendor: None,
        gpu_renderer,
        gpu_version,
    }
}

/// The surface lives only for the duration of this call.
fn probe_gpu(env: &dyn HostEnvironment) -> (Option<String>, Option<String>) {
    let Some(surface) = env.create_rendering_surface() else {
        return (None, None);
    };

    let renderer = match read_renderer(surface.as_ref()) {
        Ok(renderer) => renderer,
        Err(e) => {
            warn!(error = %e, "could not read GPU renderer");
            return (None, None);
        }
    };

    // A renderer read before a failing version read is kept.
    let version = match surface.version() {
        Ok(version) => Some(version),
        Err(e) => {
            warn!(error = %e, "could not read GPU version");
            None
        }
    };

    (non_empty(renderer), version.and_then(non_empty))
}

/// Prefer the unmasked renderer when the debug extension is exposed.
fn read_renderer(surface: &dyn RenderingSurface) -> Result<String, ProbeError> {
    match surface.debug_renderer()? {
        Some(renderer) => Ok(renderer),
        None => surface.renderer(),
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}
