use serde::Deserialize;

use crate::error::Result;
use crate::scoring::composite::ScoreWeights;
use crate::suitability::SuitabilityWeights;

const CONFIG_FILE: &str = "aqua_suitability";
const ENV_PREFIX: &str = "AQUA";

/// Lines scanned after the "Application Fees" label.
pub const DEFAULT_FEE_WINDOW: usize = 20;
/// Lines scanned after the "Lease Review/Approval Timeframe" label.
pub const DEFAULT_TIMEFRAME_WINDOW: usize = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fee_window: usize,
    pub timeframe_window: usize,
    pub weights: ScoreWeights,
    pub suitability: SuitabilityWeights,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            fee_window: DEFAULT_FEE_WINDOW,
            timeframe_window: DEFAULT_TIMEFRAME_WINDOW,
            weights: ScoreWeights::default(),
            suitability: SuitabilityWeights::default(),
        }
    }
}

impl Settings {
    /// Optional `aqua_suitability.{toml,yaml,json}` in the working directory,
    /// then `AQUA__*` environment overrides (e.g. `AQUA__WEIGHTS__FEES=0.5`).
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

// ── Tests ──
