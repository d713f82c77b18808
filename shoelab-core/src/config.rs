//! Serializable engine configuration.
//!
//! Every threshold the decision rules use is a named field here; nothing is
//! hard-coded in the rules. Missing TOML keys fall back to the defaults, so a
//! config file only needs the values it changes:
//!
//! ```toml
//! [indicators]
//! rsi_window = 14
//!
//! [strategy]
//! kind = "bounce"
//!
//! [strategy.bounce]
//! band = 1.5
//!
//! [staking]
//! starting_bankroll = 2000.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::indicators::DenominatorPolicy;
use crate::strategy::{
    BounceParams, ProportionThresholdParams, SlopeCrossParams, StakingParams, StreakFollowParams,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Full configuration of one session's engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub strategy: StrategyConfig,
    pub staking: StakingParams,
}

/// Indicator windows and the proportion denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Oscillator window (10 by default; 14 is the other common choice).
    pub rsi_window: usize,
    pub slope_short: usize,
    pub slope_long: usize,
    pub denominator: DenominatorPolicy,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_window: 10,
            slope_short: 2,
            slope_long: 5,
            denominator: DenominatorPolicy::PriorNonTie,
        }
    }
}

/// Decision rule selection (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Bounce entries first, slope-cross entries when no bounce fires.
    BounceSlope {
        #[serde(default)]
        bounce: BounceParams,
        #[serde(default)]
        slope_cross: SlopeCrossParams,
    },
    Bounce {
        #[serde(default)]
        bounce: BounceParams,
    },
    SlopeCross {
        #[serde(default)]
        slope_cross: SlopeCrossParams,
    },
    ProportionThreshold {
        #[serde(default)]
        params: ProportionThresholdParams,
    },
    StreakFollow {
        #[serde(default)]
        params: StreakFollowParams,
    },
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::BounceSlope {
            bounce: BounceParams::default(),
            slope_cross: SlopeCrossParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the indicators or the ladder cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        if ind.rsi_window == 0 {
            return Err(ConfigError::Invalid("indicators.rsi_window must be >= 1".into()));
        }
        if ind.slope_short == 0 || ind.slope_long == 0 {
            return Err(ConfigError::Invalid("slope offsets must be >= 1".into()));
        }

        let st = &self.staking;
        if !is_positive(st.starting_bankroll) {
            return Err(ConfigError::Invalid("staking.starting_bankroll must be > 0".into()));
        }
        if !is_positive(st.base_divisor) {
            return Err(ConfigError::Invalid("staking.base_divisor must be > 0".into()));
        }
        if st.multiplier.is_nan() || st.multiplier < 1.0 {
            return Err(ConfigError::Invalid("staking.multiplier must be >= 1".into()));
        }
        if !is_positive(st.unit_stake) {
            return Err(ConfigError::Invalid("staking.unit_stake must be > 0".into()));
        }

        if let StrategyConfig::StreakFollow { params } = &self.strategy {
            if params.streak_len == 0 {
                return Err(ConfigError::Invalid("strategy.params.streak_len must be >= 1".into()));
            }
        }
        Ok(())
    }
}

/// Finite and strictly positive (NaN fails).
fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}
