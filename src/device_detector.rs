use std::path::Path;
use std::sync::LazyLock;

use tracing::debug;

use super::classifier::LabelTable;
use super::db;
use super::environment::{source_user_agent, HostEnvironment};
use super::error::Result;
use super::options::DetectOptions;
use super::parser::{CompiledParser, CompiledRegex, MatchMode};
use super::parser_data::*;
use super::probes;
use super::substitution::substitute;
use super::types::*;

/// The four YAML rule tables a detector is built from.
#[derive(Debug, Clone, Copy)]
pub struct RuleSources<'a> {
    pub oss: &'a str,
    pub browsers: &'a str,
    pub devices: &'a str,
    pub vendors: &'a str,
}

impl RuleSources<'static> {
    /// The tables shipped in `rules/`.
    pub fn embedded() -> Self {
        Self {
            oss: include_str!("../rules/oss.yml"),
            browsers: include_str!("../rules/browsers.yml"),
            devices: include_str!("../rules/devices.yml"),
            vendors: include_str!("../rules/vendors.yml"),
        }
    }
}

// The embedded tables are covered by `embedded_tables_compile` below.
static EMBEDDED: LazyLock<DeviceDetector> = LazyLock::new(|| {
    DeviceDetector::from_sources(&RuleSources::embedded()).expect("embedded rule tables compile")
});

pub struct DeviceDetector {
    os_table: LabelTable<OsLabel>,
    browser_table: LabelTable<BrowserLabel>,
    mobile_parser: CompiledParser<ClassData>,
    tablet_parser: CompiledParser<ClassData>,
    vendor_parser: CompiledParser<VendorData>,
}

impl DeviceDetector {
    /// Shared detector over the embedded rule tables, compiled on first use.
    pub fn embedded() -> &'static DeviceDetector {
        &EMBEDDED
    }

    /// Load `oss.yml`, `browsers.yml`, `devices.yml` and `vendors.yml` from
    /// `dir` and build the detector.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let oss = std::fs::read_to_string(dir.join("oss.yml"))?;
        let browsers = std::fs::read_to_string(dir.join("browsers.yml"))?;
        let devices = std::fs::read_to_string(dir.join("devices.yml"))?;
        let vendors = std::fs::read_to_string(dir.join("vendors.yml"))?;
        Self::from_sources(&RuleSources {
            oss: &oss,
            browsers: &browsers,
            devices: &devices,
            vendors: &vendors,
        })
    }

    pub fn from_sources(sources: &RuleSources<'_>) -> Result<Self> {
        // Label tables and device/vendor tables compile concurrently.
        let (labels, hardware) = rayon::join(
            || -> Result<_> {
                let oss: db::LabelTableEntry = serde_yaml::from_str(sources.oss)?;
                let browsers: db::LabelTableEntry = serde_yaml::from_str(sources.browsers)?;
                let (os_table, browser_table) = rayon::join(
                    || LabelTable::<OsLabel>::build(oss),
                    || LabelTable::<BrowserLabel>::build(browsers),
                );
                Ok((os_table?, browser_table?))
            },
            || -> Result<_> {
                let classes: db::DeviceClassEntry = serde_yaml::from_str(sources.devices)?;
                let mobile_parser = build_pattern_set(classes.mobile)?;
                let tablet_parser = build_pattern_set(classes.tablet)?;

                let vendors: db::VendorMap = serde_yaml::from_str(sources.vendors)?;
                let vendor_parser = build_vendor_parser(vendors)?;

                Ok((mobile_parser, tablet_parser, vendor_parser))
            },
        );
        let (os_table, browser_table) = labels?;
        let (mobile_parser, tablet_parser, vendor_parser) = hardware?;

        debug!(
            os_rules = os_table.len(),
            browser_rules = browser_table.len(),
            mobile_patterns = mobile_parser.len(),
            tablet_patterns = tablet_parser.len(),
            vendors = vendor_parser.len(),
            "rule tables compiled"
        );

        Ok(Self {
            os_table,
            browser_table,
            mobile_parser,
            tablet_parser,
            vendor_parser,
        })
    }

    // -----------------------------------------------------------------------
    // Classifiers
    // -----------------------------------------------------------------------

    /// Classify `ua` without an environment capability hint.
    pub fn classify(&self, ua: &str) -> Classification {
        self.classify_with(ua, false)
    }

    /// Classify `ua`; `brave_capability` is the host's own Brave signal.
    pub fn classify_with(&self, ua: &str, brave_capability: bool) -> Classification {
        let lowered = ua.to_ascii_lowercase();

        let (os, os_version) = self.os_table.classify(&lowered, ua);
        let (browser, browser_version, is_brave) =
            self.browser_parts(&lowered, ua, brave_capability);
        let (is_mobile, is_tablet) = self.device_parts(&lowered);
        let (device_vendor, device_model) = self.vendor_parts(&lowered, ua);

        debug!(
            os = %os,
            os_version = %os_version,
            browser = %browser,
            browser_version = %browser_version,
            is_mobile,
            is_tablet,
            vendor = device_vendor.as_deref().unwrap_or(""),
            "user agent classified"
        );

        Classification::new(
            ua.to_string(),
            ClassificationParts {
                os,
                os_version,
                browser,
                browser_version,
                is_brave,
                is_mobile,
                is_tablet,
                device_vendor,
                device_model,
            },
        )
    }

    pub fn classify_os(&self, ua: &str) -> (OsLabel, String) {
        self.os_table.classify(&ua.to_ascii_lowercase(), ua)
    }

    /// Browser label, version, and whether the browser is Brave.
    pub fn classify_browser(&self, ua: &str, brave_capability: bool) -> (BrowserLabel, String, bool) {
        self.browser_parts(&ua.to_ascii_lowercase(), ua, brave_capability)
    }

    /// `(is_mobile, is_tablet)`. Both can be true; see [`DeviceType::from_flags`].
    pub fn classify_device(&self, ua: &str) -> (bool, bool) {
        self.device_parts(&ua.to_ascii_lowercase())
    }

    /// Hardware vendor and, when the vendor has a model pattern, the model.
    pub fn detect_vendor(&self, ua: &str) -> (Option<String>, Option<String>) {
        self.vendor_parts(&ua.to_ascii_lowercase(), ua)
    }

    fn browser_parts(
        &self,
        lowered: &str,
        original: &str,
        brave_capability: bool,
    ) -> (BrowserLabel, String, bool) {
        if brave_capability {
            let version = self.browser_table.version_for(BrowserLabel::Brave, original);
            return (BrowserLabel::Brave, version, true);
        }
        let (browser, version) = self.browser_table.classify(lowered, original);
        (browser, version, browser == BrowserLabel::Brave)
    }

    fn device_parts(&self, lowered: &str) -> (bool, bool) {
        (
            matches_class(&self.mobile_parser, lowered),
            matches_class(&self.tablet_parser, lowered),
        )
    }

    fn vendor_parts(&self, lowered: &str, original: &str) -> (Option<String>, Option<String>) {
        let Some(m) = self.vendor_parser.match_first(lowered) else {
            return (None, None);
        };
        let model = m.data.model.as_ref().and_then(|model| {
            let captures = model.regex.captures(original)?;
            let rendered = substitute(&model.template, &captures);
            (!rendered.is_empty()).then(|| rendered.into_owned())
        });
        (Some(m.data.vendor.clone()), model)
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    fn classify_host(&self, env: &dyn HostEnvironment, user_agent: Option<&str>) -> Classification {
        let (ua, source) = source_user_agent(env, user_agent);
        debug!(source = ?source, "user agent sourced");
        self.classify_with(&ua, env.brave_capability())
    }

    /// Classification plus the host facts that need no probing.
    pub fn detect_basic(&self, env: &dyn HostEnvironment, user_agent: Option<&str>) -> BasicDeviceInfo {
        BasicDeviceInfo::new(self.classify_host(env, user_agent), host_facts(env))
    }

    /// Full snapshot. Never fails: unavailable or failing capabilities show
    /// up as their "unknown" values.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn detect(&self, env: &dyn HostEnvironment, options: &DetectOptions) -> DeviceInfo {
        let classification = self.classify_host(env, options.user_agent());

        let mut hardware = probes::hardware::probe(env);
        hardware.vendor = classification.device_vendor().map(str::to_owned);
        hardware.model = classification.device_model().map(str::to_owned);

        let records = ProbeRecords {
            screen: probes::screen::probe(env),
            hardware,
            network: probes::network::probe(env),
            media: probes::media::probe(env, options.media_deadline()).await,
            privacy: probes::privacy::probe(env),
        };

        DeviceInfo::new(classification, host_facts(env), records)
    }
}

// ---------------------------------------------------------------------------
// Free functions over the embedded tables
// ---------------------------------------------------------------------------

/// Classify `ua` with the embedded rule tables.
pub fn classify(ua: &str) -> Classification {
    DeviceDetector::embedded().classify(ua)
}

/// Full snapshot of `env` with the embedded rule tables.
pub async fn detect_device(env: &dyn HostEnvironment, options: &DetectOptions) -> DeviceInfo {
    DeviceDetector::embedded().detect(env, options).await
}

/// Minimal synchronous snapshot of `env` with the embedded rule tables.
pub fn detect_device_basic(env: &dyn HostEnvironment, user_agent: Option<&str>) -> BasicDeviceInfo {
    DeviceDetector::embedded().detect_basic(env, user_agent)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn host_facts(env: &dyn HostEnvironment) -> HostFacts {
    HostFacts {
        platform: env.platform().unwrap_or_default(),
        is_pwa: env.standalone_display_mode().unwrap_or(false),
        is_private_browsing: env.legacy_file_system_api(),
        is_touch_screen: probes::touch::probe(env),
        language: env.language().unwrap_or_default(),
        timezone: env.timezone().unwrap_or_default(),
    }
}

fn build_pattern_set(patterns: Vec<db::ClassPattern>) -> Result<CompiledParser<ClassData>> {
    let items = patterns
        .into_iter()
        .map(|pattern| {
            let (regex, exclude) = pattern.into_parts();
            let exclude = exclude
                .as_deref()
                .map(|p| CompiledRegex::new(p, MatchMode::IgnoreCase))
                .transpose()?;
            Ok((regex, ClassData { exclude }))
        })
        .collect::<Result<Vec<_>>>()?;
    CompiledParser::build(items, MatchMode::IgnoreCase)
}

fn matches_class(parser: &CompiledParser<ClassData>, lowered: &str) -> bool {
    parser
        .match_first_where(lowered, |data| !data.excluded(lowered))
        .is_some()
}

fn build_vendor_parser(vendors: db::VendorMap) -> Result<CompiledParser<VendorData>> {
    let items = vendors
        .into_iter()
        .map(|(vendor, entry)| {
            let model = entry
                .model
                .map(|m| -> Result<_> {
                    Ok(ModelData {
                        regex: CompiledRegex::new(&m.regex, MatchMode::IgnoreCase)?,
                        template: m.template,
                    })
                })
                .transpose()?;
            Ok((entry.regex, VendorData { vendor, model }))
        })
        .collect::<Result<Vec<_>>>()?;
    CompiledParser::build(items, MatchMode::IgnoreCase)
}
