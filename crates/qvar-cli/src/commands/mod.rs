pub mod estimate;
pub mod job;

use qvar_core::RuntimeConfig;

/// Runtime config with CLI overrides applied.
pub fn runtime_config(base_url: Option<&str>, backend: Option<&str>) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    if let Some(url) = base_url {
        config.base_url = url.to_string();
    }
    if let Some(name) = backend {
        config.backend = name.to_string();
    }
    config
}
