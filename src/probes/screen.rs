use tracing::debug;

use crate::environment::HostEnvironment;
use crate::types::{Orientation, ScreenInfo};

pub(crate) fn probe(env: &dyn HostEnvironment) -> ScreenInfo {
    let Some(display) = env.display() else {
        debug!("no display surface, using default screen record");
        return ScreenInfo::default();
    };

    let pixel_ratio = display
        .pixel_ratio
        .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
        .unwrap_or(1.0);

    ScreenInfo {
        width: display.width,
        height: display.height,
        resolution: format!("{}x{}", display.width, display.height),
        color_depth: display.color_depth,
        pixel_ratio,
        orientation: Orientation::from_dimensions(display.width, display.height),
    }
}
