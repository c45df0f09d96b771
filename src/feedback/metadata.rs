use itertools::Itertools;

/// Whitelisted `key: value` pairs of a metadata section, in render order.
pub trait MetadataFields {
    fn fields(&self) -> Vec<(&'static str, Option<String>)>;

    fn render(&self) -> String {
        render_fields(self.fields())
    }
}

/// Renders present fields as `key: value` lines; absent ones are skipped.
pub fn render_fields<'a>(fields: impl IntoIterator<Item = (&'a str, Option<String>)>) -> String {
    fields
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| format!("{key}: {value}")))
        .join("\n")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub model: Option<String>,
    pub brand: Option<String>,
    pub manufacturer: Option<String>,
    pub system_name: Option<String>,
    pub system_version: Option<String>,
    pub platform: Option<String>,
    pub architecture: Option<String>,
    pub is_physical_device: Option<bool>,
}

impl DeviceInfo {
    /// Describes the host the process runs on.
    pub fn detect() -> Self {
        let info = os_info::get();

        Self {
            system_name: Some(info.os_type().to_string()),
            system_version: Some(info.version().to_string()),
            platform: Some(std::env::consts::OS.to_string()),
            architecture: Some(std::env::consts::ARCH.to_string()),
            ..Default::default()
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.platform
            .as_deref()
            .is_some_and(|p| p.eq_ignore_ascii_case("android") || p.eq_ignore_ascii_case("ios"))
    }

    /// Emulators and simulators report themselves as non-physical.
    pub fn is_emulator(&self) -> bool {
        self.is_physical_device == Some(false)
    }
}

impl MetadataFields for DeviceInfo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("model", self.model.clone()),
            ("brand", self.brand.clone()),
            ("manufacturer", self.manufacturer.clone()),
            ("systemName", self.system_name.clone()),
            ("systemVersion", self.system_version.clone()),
            ("platform", self.platform.clone()),
            ("architecture", self.architecture.clone()),
            ("isPhysicalDevice", self.is_physical_device.map(|p| p.to_string())),
        ]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub app_name: Option<String>,
    pub package_name: Option<String>,
    pub version: Option<String>,
    pub build_number: Option<String>,
}

impl PackageInfo {
    pub fn current() -> Self {
        Self {
            app_name: Some(env!("CARGO_PKG_NAME").to_string()),
            package_name: Some(env!("CARGO_CRATE_NAME").to_string()),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            build_number: option_env!("FEEDBOT_BUILD_NUMBER").map(str::to_string),
        }
    }
}

impl MetadataFields for PackageInfo {
    fn fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("appName", self.app_name.clone()),
            ("packageName", self.package_name.clone()),
            ("version", self.version.clone()),
            ("buildNumber", self.build_number.clone()),
        ]
    }
}
