//! ECMO circuit configuration.
//!
//! Static reference data picked by the clinician and shown in the header.
//! Nothing else in the dashboard depends on it.

use anyhow::{bail, Result};
use serde::Deserialize;

/// Drainage cannula sizes on offer, in French.
pub const DRAINAGE_CANNULA_SIZES: [u8; 7] = [19, 21, 23, 25, 27, 29, 31];

/// Return cannula sizes on offer, in French.
pub const RETURN_CANNULA_SIZES: [u8; 6] = [15, 17, 19, 21, 23, 25];

/// Oxygenator models on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Oxygenator {
    #[default]
    #[serde(rename = "quadrox_adult")]
    QuadroxAdult,
    #[serde(rename = "quadrox_ped")]
    QuadroxPediatric,
    #[serde(rename = "medos_7000")]
    MedosHilite7000,
    #[serde(rename = "medos_2400")]
    MedosHilite2400,
    #[serde(rename = "nautilus")]
    Nautilus,
}

impl Oxygenator {
    pub const ALL: [Oxygenator; 5] = [
        Oxygenator::QuadroxAdult,
        Oxygenator::QuadroxPediatric,
        Oxygenator::MedosHilite7000,
        Oxygenator::MedosHilite2400,
        Oxygenator::Nautilus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Oxygenator::QuadroxAdult => "Quadrox-i Adult",
            Oxygenator::QuadroxPediatric => "Quadrox-i Pediatric",
            Oxygenator::MedosHilite7000 => "Medos HILITE 7000",
            Oxygenator::MedosHilite2400 => "Medos HILITE 2400",
            Oxygenator::Nautilus => "Nautilus",
        }
    }
}

/// Rows of the circuit view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CircuitField {
    #[default]
    DrainageCannula,
    ReturnCannula,
    Oxygenator,
}

impl CircuitField {
    pub const ALL: [CircuitField; 3] = [
        CircuitField::DrainageCannula,
        CircuitField::ReturnCannula,
        CircuitField::Oxygenator,
    ];

    pub fn next(self) -> Self {
        match self {
            CircuitField::DrainageCannula => CircuitField::ReturnCannula,
            CircuitField::ReturnCannula => CircuitField::Oxygenator,
            CircuitField::Oxygenator => CircuitField::Oxygenator,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            CircuitField::DrainageCannula => CircuitField::DrainageCannula,
            CircuitField::ReturnCannula => CircuitField::DrainageCannula,
            CircuitField::Oxygenator => CircuitField::ReturnCannula,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CircuitField::DrainageCannula => "Drainage Cannula",
            CircuitField::ReturnCannula => "Return Cannula",
            CircuitField::Oxygenator => "Oxygenator",
        }
    }
}

/// Circuit configuration as read from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CircuitSettings {
    pub drainage_cannula: u8,
    pub return_cannula: u8,
    pub oxygenator: Oxygenator,
}

impl Default for CircuitSettings {
    fn default() -> Self {
        Self {
            drainage_cannula: 25,
            return_cannula: 19,
            oxygenator: Oxygenator::default(),
        }
    }
}

/// The selected circuit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circuit {
    drainage: usize,
    return_: usize,
    pub oxygenator: Oxygenator,
}

impl Default for Circuit {
    fn default() -> Self {
        // 25 Fr drainage, 19 Fr return
        Self {
            drainage: 3,
            return_: 2,
            oxygenator: Oxygenator::default(),
        }
    }
}

impl Circuit {
    /// Build from settings, rejecting sizes that are not on offer.
    pub fn from_settings(settings: &CircuitSettings) -> Result<Self> {
        let Some(drainage) =
            DRAINAGE_CANNULA_SIZES.iter().position(|&s| s == settings.drainage_cannula)
        else {
            bail!(
                "Unknown drainage cannula size {} Fr (expected one of {:?})",
                settings.drainage_cannula,
                DRAINAGE_CANNULA_SIZES
            );
        };
        let Some(return_) = RETURN_CANNULA_SIZES.iter().position(|&s| s == settings.return_cannula)
        else {
            bail!(
                "Unknown return cannula size {} Fr (expected one of {:?})",
                settings.return_cannula,
                RETURN_CANNULA_SIZES
            );
        };
        Ok(Self {
            drainage,
            return_,
            oxygenator: settings.oxygenator,
        })
    }

    /// Drainage cannula size in French.
    pub fn drainage_fr(&self) -> u8 {
        DRAINAGE_CANNULA_SIZES[self.drainage]
    }

    /// Return cannula size in French.
    pub fn return_fr(&self) -> u8 {
        RETURN_CANNULA_SIZES[self.return_]
    }

    /// Display value of one row.
    pub fn value_label(&self, field: CircuitField) -> String {
        match field {
            CircuitField::DrainageCannula => format!("{} Fr", self.drainage_fr()),
            CircuitField::ReturnCannula => format!("{} Fr", self.return_fr()),
            CircuitField::Oxygenator => self.oxygenator.label().to_string(),
        }
    }

    /// Move one option forward or back, wrapping around.
    pub fn cycle(&mut self, field: CircuitField, forward: bool) {
        match field {
            CircuitField::DrainageCannula => {
                self.drainage = wrap(self.drainage, DRAINAGE_CANNULA_SIZES.len(), forward)
            }
            CircuitField::ReturnCannula => {
                self.return_ = wrap(self.return_, RETURN_CANNULA_SIZES.len(), forward)
            }
            CircuitField::Oxygenator => {
                let current = Oxygenator::ALL.iter().position(|&o| o == self.oxygenator).unwrap_or(0);
                self.oxygenator = Oxygenator::ALL[wrap(current, Oxygenator::ALL.len(), forward)];
            }
        }
    }

    /// One-line summary for the header bar.
    pub fn summary(&self) -> String {
        format!(
            "Drain {}Fr / Return {}Fr / {}",
            self.drainage_fr(),
            self.return_fr(),
            self.oxygenator.label()
        )
    }
}

fn wrap(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
