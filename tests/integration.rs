use device_info::{classify, DeviceDetector, RuleSources};
use fixtures::fixtures;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Classification fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ClassificationFixture {
    user_agent: String,
    os: LabelFixture,
    browser: LabelFixture,
    device: DeviceFixture,
}

#[derive(Debug, Deserialize)]
struct LabelFixture {
    name: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct DeviceFixture {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[fixtures(["tests/fixtures/*.yml"])]
#[test]
fn test_classification_fixtures(path: &std::path::Path) {
    let content = std::fs::read_to_string(path).unwrap();
    let fixtures: Vec<ClassificationFixture> = serde_yaml::from_str(&content).unwrap();

    for f in &fixtures {
        let c = classify(&f.user_agent);

        assert_eq!(
            c.os().to_string(),
            f.os.name,
            "os name mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(
            c.os_version(),
            f.os.version,
            "os version mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(
            c.browser().to_string(),
            f.browser.name,
            "browser name mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(
            c.browser_version(),
            f.browser.version,
            "browser version mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(
            c.device_type().to_string(),
            f.device.kind,
            "device type mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(
            c.device_vendor(),
            f.device.vendor.as_deref(),
            "vendor mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(
            c.device_model(),
            f.device.model.as_deref(),
            "model mismatch for UA: {}",
            f.user_agent
        );
        assert_eq!(c.is_desktop(), !c.is_mobile() && !c.is_tablet());
    }
}

// ---------------------------------------------------------------------------
// Rule tables from disk
// ---------------------------------------------------------------------------

#[test]
fn test_from_dir_matches_embedded() {
    let dd = DeviceDetector::from_dir("rules").expect("failed to build DeviceDetector");
    let ua = "Mozilla/5.0 (Linux; Android 13; SM-G991B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Mobile Safari/537.36";
    assert_eq!(dd.classify(ua), DeviceDetector::embedded().classify(ua));
}

#[test]
fn test_missing_rules_dir() {
    assert!(DeviceDetector::from_dir("does/not/exist").is_err());
}

#[test]
fn test_unknown_label_in_rule_table() {
    let sources = RuleSources {
        oss: "rules:\n  - name: BeOS\n    regex: 'beos'\n",
        ..RuleSources::embedded()
    };
    let err = DeviceDetector::from_sources(&sources).err().unwrap();
    assert!(matches!(err, device_info::Error::UnknownLabel { .. }), "{err}");
}

#[test]
fn test_oversized_user_agent() {
    let ua = format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/118.0.0.0 {}",
        "x".repeat(64 * 1024)
    );
    let c = classify(&ua);
    assert_eq!(c.os().to_string(), "Windows");
    assert_eq!(c.browser_version(), "118.0.0.0");
    assert_eq!(c.user_agent(), ua);
}
