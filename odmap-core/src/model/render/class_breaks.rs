use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Rgba;
use crate::model::{filter::Mode, OdError};

/// a trip-count range [min, max], both inclusive, drawn with one fill color.
/// a missing max leaves the range unbounded above.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassBreak {
    pub min: f64,
    pub max: Option<f64>,
    pub color: Rgba,
    pub label: String,
}

impl ClassBreak {
    pub fn new(min: f64, max: Option<f64>, color: Rgba, label: &str) -> Self {
        Self {
            min,
            max,
            color,
            label: label.to_string(),
        }
    }

    pub fn contains(&self, trips: f64) -> bool {
        self.min <= trips && self.max.map(|max| trips <= max).unwrap_or(true)
    }
}

/// choropleth coloring by trip count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassBreakRenderer {
    breaks: Vec<ClassBreak>,
    default_color: Rgba,
}

impl ClassBreakRenderer {
    /// breaks must be ascending and non-overlapping, and only the last one may
    /// be unbounded.
    pub fn new(breaks: Vec<ClassBreak>, default_color: Rgba) -> Result<Self, OdError> {
        if breaks.is_empty() {
            return Err(OdError::InvalidClassBreaks(String::from(
                "at least one class break is required",
            )));
        }
        for (idx, b) in breaks.iter().enumerate() {
            if let Some(max) = b.max {
                if max < b.min {
                    let msg = format!("break {idx} '{}' has max {max} < min {}", b.label, b.min);
                    return Err(OdError::InvalidClassBreaks(msg));
                }
            } else if idx != breaks.len() - 1 {
                let msg = format!("break {idx} '{}' is unbounded but is not last", b.label);
                return Err(OdError::InvalidClassBreaks(msg));
            }
        }
        for (prev, next) in breaks.iter().tuple_windows() {
            match prev.max {
                Some(max) if max < next.min => {}
                _ => {
                    let msg = format!(
                        "break '{}' overlaps or is out of order with '{}'",
                        prev.label, next.label
                    );
                    return Err(OdError::InvalidClassBreaks(msg));
                }
            }
        }
        Ok(Self {
            breaks,
            default_color,
        })
    }

    pub fn breaks(&self) -> &[ClassBreak] {
        &self.breaks
    }

    pub fn default_color(&self) -> Rgba {
        self.default_color
    }

    /// the break containing a trip count, if any. counts below the first
    /// break, including zero, have none, as do fractional sums falling
    /// between two breaks.
    pub fn class_for(&self, trips: f64) -> Option<&ClassBreak> {
        self.breaks.iter().find(|b| b.contains(trips))
    }

    /// the fill for a trip count, falling back to the default color between
    /// breaks
    pub fn color_for(&self, trips: f64) -> Rgba {
        self.class_for(trips)
            .map(|b| b.color)
            .unwrap_or(self.default_color)
    }

    /// legend heading for a mode
    pub fn legend_title(mode: &Mode) -> String {
        format!("Number of Trips ({})", mode.legend_scope())
    }
}

impl Default for ClassBreakRenderer {
    fn default() -> Self {
        Self {
            breaks: vec![
                ClassBreak::new(1.0, Some(5.0), Rgba::new(255, 241, 169, 0.7), "1-5 trips"),
                ClassBreak::new(6.0, Some(15.0), Rgba::new(254, 204, 92, 0.7), "6-15 trips"),
                ClassBreak::new(16.0, Some(25.0), Rgba::new(253, 141, 60, 0.7), "16-25 trips"),
                ClassBreak::new(26.0, Some(50.0), Rgba::new(240, 59, 32, 0.7), "26-50 trips"),
                ClassBreak::new(51.0, None, Rgba::new(189, 0, 38, 0.7), ">50 trips"),
            ],
            default_color: Rgba::new(180, 230, 180, 0.6),
        }
    }
}
