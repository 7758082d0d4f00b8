use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::error::{MarketError, Result};

/// Bounds of the tax control the front-end renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct TaxSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// A labelled tick is drawn every `mark_every` units.
    pub mark_every: f64,
    /// Tax the control shows before the user moves it.
    pub initial: f64,
}

impl Default for TaxSlider {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            mark_every: 5.0,
            initial: 0.0,
        }
    }
}

/// Most labelled ticks a slider may ask for.
pub const MAX_MARKS: f64 = 1000.0;

impl TaxSlider {
    /// Check the control's own bounds before it is installed.
    ///
    /// Every field must be finite, `min <= max`, `step >= 0` (zero means any
    /// value in range), `mark_every > 0` with at most [`MAX_MARKS`] ticks, and
    /// `initial` must be a value the control accepts.
    pub fn check(&self) -> Result<()> {
        let fields = [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("mark_every", self.mark_every),
            ("initial", self.initial),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MarketError::InvalidSlider(format!("{name} must be finite, got {value}")));
        }
        if self.min > self.max {
            return Err(MarketError::InvalidSlider(format!(
                "min {} is above max {}",
                self.min, self.max
            )));
        }
        if self.step < 0.0 {
            return Err(MarketError::InvalidSlider(format!(
                "step must be non-negative, got {}",
                self.step
            )));
        }
        if self.mark_every <= 0.0 {
            return Err(MarketError::InvalidSlider(format!(
                "mark_every must be positive, got {}",
                self.mark_every
            )));
        }
        if (self.max - self.min) / self.mark_every > MAX_MARKS {
            return Err(MarketError::InvalidSlider(format!(
                "mark_every {} gives more than {MAX_MARKS} marks",
                self.mark_every
            )));
        }
        self.validate(self.initial).map_err(|e| {
            MarketError::InvalidSlider(format!("initial value rejected: {e}"))
        })?;
        Ok(())
    }

    /// Accept only values the control itself could produce.
    pub fn validate(&self, value: f64) -> Result<f64> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(MarketError::TaxOutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        if self.step > 0.0 {
            let steps = (value - self.min) / self.step;
            if (steps - steps.round()).abs() > crate::EPSILON {
                return Err(MarketError::TaxOffStep {
                    value,
                    step: self.step,
                });
            }
        }
        Ok(value)
    }

    /// Positions of the labelled ticks, `min` through `max` inclusive.
    pub fn marks(&self) -> Vec<f64> {
        if self.mark_every <= 0.0 {
            return vec![self.min, self.max];
        }
        let count = ((self.max - self.min) / self.mark_every).floor() as usize;
        (0..=count)
            .map(|i| self.min + self.mark_every * i as f64)
            .collect()
    }
}
