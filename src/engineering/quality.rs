//! Roll quality quantizer
//!
//! Maps the continuous roll quality in [0, 1] to the discrete buckets the
//! roll control highlights.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{EngineeringError, EngineeringResult};

/// Roll quality every freshly chosen template starts at
pub const SEED_QUALITY: f64 = 1.0;

/// Discrete classification of a roll quality value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollBucket {
    /// Exactly 0.0
    Worst,
    /// Exactly 0.5
    Half,
    /// Exactly 1.0
    Best,
    /// Anything else, including almost every random draw.
    /// The "random" control is shown active for this bucket.
    Other,
}

impl RollBucket {
    /// Translation key for the bucket label
    pub fn label_key(&self) -> &'static str {
        match self {
            RollBucket::Worst => "0%",
            RollBucket::Half => "50%",
            RollBucket::Best => "100%",
            RollBucket::Other => "random",
        }
    }
}

/// Classify a roll quality value
pub fn bucket_of(value: f64) -> RollBucket {
    if value == 0.0 {
        RollBucket::Worst
    } else if value == 0.5 {
        RollBucket::Half
    } else if value == 1.0 {
        RollBucket::Best
    } else {
        RollBucket::Other
    }
}

/// Inputs offered by the roll control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollInput {
    Worst,
    Half,
    Best,
    Random,
}

impl RollInput {
    pub const ALL: [RollInput; 4] = [RollInput::Worst, RollInput::Half, RollInput::Best, RollInput::Random];

    /// Roll quality this input issues. `Random` draws uniformly from [0, 1).
    pub fn value(&self, rng: &mut impl Rng) -> f64 {
        match self {
            RollInput::Worst => 0.0,
            RollInput::Half => 0.5,
            RollInput::Best => 1.0,
            RollInput::Random => rng.gen::<f64>(),
        }
    }

    /// Whether this control is highlighted for the displayed bucket
    pub fn is_active(&self, bucket: Option<RollBucket>) -> bool {
        matches!(
            (self, bucket),
            (RollInput::Worst, Some(RollBucket::Worst))
                | (RollInput::Half, Some(RollBucket::Half))
                | (RollInput::Best, Some(RollBucket::Best))
                | (RollInput::Random, Some(RollBucket::Other))
        )
    }

    /// Translation key for the control's tooltip
    pub fn tooltip_key(&self) -> &'static str {
        match self {
            RollInput::Worst => "PHRASE_BLUEPRINT_WORST",
            RollInput::Half => "PHRASE_BLUEPRINT_FIFTY",
            RollInput::Best => "PHRASE_BLUEPRINT_BEST",
            RollInput::Random => "PHRASE_BLUEPRINT_RANDOM",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            RollInput::Worst => "0%",
            RollInput::Half => "50%",
            RollInput::Best => "100%",
            RollInput::Random => "random",
        }
    }
}

/// Reject roll qualities outside [0, 1] (NaN included)
pub fn validate_roll_quality(value: f64) -> EngineeringResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(EngineeringError::OutOfRange(value))
    }
}
