use serde::Deserialize;

pub const ENV_PREFIX: &str = "CATALOG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Request validation limits applied at the operation boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_field_len")]
    pub max_field_len: usize,
    #[serde(default = "default_max_labels")]
    pub max_labels: usize,
    #[serde(default = "default_max_label_key_len")]
    pub max_label_key_len: usize,
    #[serde(default = "default_max_label_value_len")]
    pub max_label_value_len: usize,
    /// Upper bound on ids accepted by batch operations such as node removal.
    #[serde(default = "default_max_batch_ids")]
    pub max_batch_ids: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    /// Base DNS domain appended to derived application endpoint FQDNs.
    #[serde(default = "default_endpoint_domain")]
    pub domain: String,
}

fn default_max_field_len() -> usize {
    255
}

fn default_max_labels() -> usize {
    64
}

fn default_max_label_key_len() -> usize {
    63
}

fn default_max_label_value_len() -> usize {
    255
}

fn default_max_batch_ids() -> usize {
    100
}

fn default_endpoint_domain() -> String {
    "apps.local".to_string()
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_field_len: default_max_field_len(),
            max_labels: default_max_labels(),
            max_label_key_len: default_max_label_key_len(),
            max_label_value_len: default_max_label_value_len(),
            max_batch_ids: default_max_batch_ids(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            domain: default_endpoint_domain(),
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        // Keep try_parsing disabled so string-typed values are not coerced.
        .try_parsing(false);

    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(env)
        .set_default("limits.max_field_len", default_max_field_len() as u64)?
        .set_default("limits.max_labels", default_max_labels() as u64)?
        .set_default("limits.max_label_key_len", default_max_label_key_len() as u64)?
        .set_default(
            "limits.max_label_value_len",
            default_max_label_value_len() as u64,
        )?
        .set_default("limits.max_batch_ids", default_max_batch_ids() as u64)?
        .set_default("endpoints.domain", default_endpoint_domain())?;

    let config = builder.build()?;
    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_environment() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_field_len, 255);
        assert_eq!(limits.max_labels, 64);
        assert!(limits.max_batch_ids > 0);

        let endpoints = EndpointsConfig::default();
        assert!(!endpoints.domain.is_empty());
    }
}
