use crate::environment::HostEnvironment;
use crate::types::{ConnectionType, EffectiveConnectionType, NetworkInfo};

/// Reads whatever connection hints are exposed right now; never waits.
/// Zero downlink / rtt readings count as absent.
pub(crate) fn probe(env: &dyn HostEnvironment) -> NetworkInfo {
    let Some(connection) = env.connection() else {
        return NetworkInfo::default();
    };

    NetworkInfo {
        connection_type: connection
            .connection_type
            .as_deref()
            .map(ConnectionType::from)
            .unwrap_or_default(),
        effective_type: connection
            .effective_type
            .as_deref()
            .map(EffectiveConnectionType::from)
            .unwrap_or_default(),
        downlink: connection
            .downlink
            .filter(|mbps| mbps.is_finite() && *mbps > 0.0),
        rtt: connection.rtt.filter(|ms| *ms > 0),
        save_data: connection.save_data.unwrap_or(false),
    }
}
