use serde::Deserialize;
use tracing::warn;

use crate::error::{ConfigError, Result};

pub const DEFAULT_PERCENTAGE: f64 = 20.0;
pub const DEFAULT_PATCHES_PER_BUNDLE: u32 = 3;

// Stored as JSON in the discount's `$app:bundle-discount.function-configuration`
// metafield. Every key is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleConfig {
    pub percentage: f64,
    pub patches_per_bundle: u32,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            percentage: DEFAULT_PERCENTAGE,
            patches_per_bundle: DEFAULT_PATCHES_PER_BUNDLE,
        }
    }
}

impl BundleConfig {
    pub fn from_json(value: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Missing or invalid metafield values resolve to the defaults.
    pub fn from_metafield(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        Self::from_json(value).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring discount configuration");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.percentage > 0.0 && self.percentage <= 100.0) {
            return Err(ConfigError::Invalid {
                reason: format!("percentage must be in (0, 100], got {}", self.percentage),
            });
        }
        if self.patches_per_bundle == 0 {
            return Err(ConfigError::Invalid {
                reason: "patchesPerBundle must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
