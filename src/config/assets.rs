//! Asset presigning configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Asset presigning configuration.
///
/// Controls how long resolved public URLs stay valid. The retrieval core
/// consumes pre-resolved URLs; this knob belongs to the resolver adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Presigned URL lifetime in seconds
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_secs: u64,
}

impl AssetConfig {
    /// Validate asset configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.presign_expiry_secs == 0 {
            return Err(ValidationError::InvalidPresignExpiry);
        }
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            presign_expiry_secs: default_presign_expiry(),
        }
    }
}

fn default_presign_expiry() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_expiry_is_one_hour() {
        assert_eq!(AssetConfig::default().presign_expiry_secs, 3600);
    }

    #[test]
    fn rejects_zero_expiry() {
        let config = AssetConfig {
            presign_expiry_secs: 0,
        };
        assert!(config.validate().is_err());
    }
}
