use crate::environment::HostEnvironment;
use crate::types::PrivacyInfo;

pub(crate) fn probe(env: &dyn HostEnvironment) -> PrivacyInfo {
    let Some(privacy) = env.privacy() else {
        return PrivacyInfo::default();
    };

    PrivacyInfo {
        cookies_enabled: privacy.cookies_enabled.unwrap_or(false),
        do_not_track: privacy.do_not_track.as_deref().map(str::trim) == Some("1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{PrivacyReadings, StaticEnvironment};

    fn with_dnt(dnt: &str) -> PrivacyInfo {
        probe(&StaticEnvironment::new().with_privacy(PrivacyReadings {
            cookies_enabled: Some(true),
            do_not_track: Some(dnt.to_string()),
        }))
    }

    #[test]
    fn only_one_means_do_not_track() {
        assert!(with_dnt("1").do_not_track);
        assert!(!with_dnt("0").do_not_track);
        assert!(!with_dnt("unspecified").do_not_track);
        assert!(with_dnt("1").cookies_enabled);
    }
}
