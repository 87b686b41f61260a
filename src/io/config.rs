use log::debug;
use serde::{Deserialize, Serialize};

use crate::profile::AltitudeReference;
use crate::units::{AltitudeUnit, DirectionUnit, SpeedUnit};

/// Field separator for exported rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
    Space,
    Tab,
}

impl Separator {
    pub const ALL: [Separator; 4] =
        [Separator::Comma, Separator::Semicolon, Separator::Space, Separator::Tab];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Comma => ",",
            Separator::Semicolon => ";",
            Separator::Space => " ",
            Separator::Tab => "\t",
        }
    }
}

// ---------------------------------------------------------------------------
// Export configuration
// ---------------------------------------------------------------------------

/// How a profile is written out. Missing JSON keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub separator: Separator,
    pub altitude_name: String,
    pub speed_name: String,
    pub direction_name: String,
    pub std_dev_name: String,
    pub altitude_unit: AltitudeUnit,
    pub speed_unit: SpeedUnit,
    pub direction_unit: DirectionUnit,
    pub reference: AltitudeReference,
    pub std_dev: f64,
    pub std_dev_unit: SpeedUnit,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            separator: Separator::Comma,
            altitude_name: "altitude".into(),
            speed_name: "speed".into(),
            direction_name: "direction".into(),
            std_dev_name: "stddev".into(),
            altitude_unit: AltitudeUnit::Feet,
            speed_unit: SpeedUnit::Knots,
            direction_unit: DirectionUnit::Degrees,
            reference: AltitudeReference::Agl,
            std_dev: 0.0,
            std_dev_unit: SpeedUnit::Knots,
        }
    }
}

/// Selection indices as a form would submit them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportSelection {
    pub separator: usize,
    pub altitude_unit: usize,
    pub speed_unit: usize,
    pub direction_unit: usize,
    pub reference: usize,
    pub std_dev_unit: usize,
}

impl ExportConfig {
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build from selection indices. An index past the end of its list falls
    /// back to that field's default: comma, ft, kt, deg, AGL and kt.
    pub fn from_indices(selection: ExportSelection) -> Self {
        let defaults = Self::default();
        let reference = match selection.reference {
            0 => Some(AltitudeReference::Msl),
            1 => Some(AltitudeReference::Agl),
            _ => None,
        };
        Self {
            separator: pick(
                "separator",
                selection.separator,
                Separator::from_index,
                defaults.separator,
            ),
            altitude_unit: pick(
                "altitude unit",
                selection.altitude_unit,
                AltitudeUnit::from_index,
                defaults.altitude_unit,
            ),
            speed_unit: pick(
                "speed unit",
                selection.speed_unit,
                SpeedUnit::from_index,
                defaults.speed_unit,
            ),
            direction_unit: pick(
                "direction unit",
                selection.direction_unit,
                DirectionUnit::from_index,
                defaults.direction_unit,
            ),
            reference: pick("reference", selection.reference, |_| reference, defaults.reference),
            std_dev_unit: pick(
                "std dev unit",
                selection.std_dev_unit,
                SpeedUnit::from_index,
                defaults.std_dev_unit,
            ),
            ..defaults
        }
    }

    /// Standard deviation limited to [0, max] of its unit; non-finite reads as 0.
    pub fn std_dev_clamped(&self) -> f64 {
        if self.std_dev.is_finite() {
            self.std_dev.clamp(0.0, self.std_dev_unit.max_std_dev())
        } else {
            0.0
        }
    }

    /// Header names in column order.
    pub fn header(&self) -> String {
        let sep = self.separator.as_str();
        [
            self.altitude_name.as_str(),
            self.speed_name.as_str(),
            self.direction_name.as_str(),
            self.std_dev_name.as_str(),
        ]
        .join(sep)
    }
}

fn pick<T: Copy + std::fmt::Debug>(
    field: &str,
    index: usize,
    lookup: impl Fn(usize) -> Option<T>,
    default: T,
) -> T {
    lookup(index).unwrap_or_else(|| {
        debug!("{field} index {index} out of range, using {default:?}");
        default
    })
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self { config: ExportConfig::default() }
    }

    pub fn separator(mut self, v: Separator) -> Self { self.config.separator = v; self }
    pub fn altitude_unit(mut self, v: AltitudeUnit) -> Self { self.config.altitude_unit = v; self }
    pub fn speed_unit(mut self, v: SpeedUnit) -> Self { self.config.speed_unit = v; self }
    pub fn direction_unit(mut self, v: DirectionUnit) -> Self { self.config.direction_unit = v; self }
    pub fn reference(mut self, v: AltitudeReference) -> Self { self.config.reference = v; self }

    pub fn std_dev(mut self, value: f64, unit: SpeedUnit) -> Self {
        self.config.std_dev = value;
        self.config.std_dev_unit = unit;
        self
    }

    pub fn names(
        mut self,
        altitude: impl Into<String>,
        speed: impl Into<String>,
        direction: impl Into<String>,
        std_dev: impl Into<String>,
    ) -> Self {
        self.config.altitude_name = altitude.into();
        self.config.speed_name = speed.into();
        self.config.direction_name = direction.into();
        self.config.std_dev_name = std_dev.into();
        self
    }

    pub fn build(self) -> ExportConfig {
        self.config
    }
}

impl Default for ExportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
