//! Control panel state.
//!
//! Every value stays inside its control's bounds: numbers are clamped and
//! snapped to the slider step, choices are restricted to the catalog.

use crate::{LabError, LabResult};
use sl_core::{Catalog, SlError, ensure_finite, snap_to_step};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    Range { min: f64, max: f64, step: f64 },
    /// Closed selector; options are `(id, label)` pairs
    Choice {
        kind: &'static str,
        options: Vec<(&'static str, &'static str)>,
    },
    Toggle,
}

impl ControlKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Range { .. } => "range",
            Self::Choice { .. } => "choice",
            Self::Toggle => "toggle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlValue {
    Number(f64),
    /// Catalog id
    Choice(&'static str),
    Toggle(bool),
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Choice(id) => f.write_str(id),
            Self::Toggle(on) => write!(f, "{on}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub kind: ControlKind,
    pub default: ControlValue,
}

impl ControlSpec {
    pub fn range(
        name: &'static str,
        label: &'static str,
        unit: &'static str,
        (min, max, step): (f64, f64, f64),
        default: f64,
    ) -> Self {
        Self {
            name,
            label,
            unit,
            kind: ControlKind::Range { min, max, step },
            default: ControlValue::Number(default),
        }
    }

    pub fn choice<T: Catalog>(name: &'static str, label: &'static str, default: T) -> Self {
        Self {
            name,
            label,
            unit: "",
            kind: ControlKind::Choice {
                kind: T::KIND,
                options: T::ALL.iter().map(|o| (o.id(), o.label())).collect(),
            },
            default: ControlValue::Choice(default.id()),
        }
    }

    pub fn toggle(name: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            name,
            label,
            unit: "",
            kind: ControlKind::Toggle,
            default: ControlValue::Toggle(default),
        }
    }

    /// Bring `value` inside the range and onto the step grid.
    fn quantize(&self, value: f64) -> f64 {
        match self.kind {
            ControlKind::Range { min, max, step } => {
                let snapped = snap_to_step(value.clamp(min, max), min, step);
                snapped.clamp(min, max)
            }
            _ => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    spec: ControlSpec,
    initial: ControlSpec,
    value: ControlValue,
}

/// Current control values of one bench.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    owner: &'static str,
    slots: Vec<Slot>,
}

impl ControlState {
    pub fn new(owner: &'static str, specs: Vec<ControlSpec>) -> Self {
        let slots = specs
            .into_iter()
            .map(|mut spec| {
                if let ControlValue::Number(v) = spec.default {
                    spec.default = ControlValue::Number(spec.quantize(v));
                }
                Slot {
                    initial: spec.clone(),
                    value: spec.default,
                    spec,
                }
            })
            .collect();
        Self { owner, slots }
    }

    pub fn specs(&self) -> impl Iterator<Item = &ControlSpec> {
        self.slots.iter().map(|s| &s.spec)
    }

    pub fn values(&self) -> impl Iterator<Item = (&'static str, ControlValue)> + '_ {
        self.slots.iter().map(|s| (s.spec.name, s.value))
    }

    pub fn get(&self, name: &str) -> Option<ControlValue> {
        self.slots.iter().find(|s| s.spec.name == name).map(|s| s.value)
    }

    pub fn spec(&self, name: &str) -> LabResult<&ControlSpec> {
        self.slot(name).map(|s| &s.spec)
    }

    /// Set a numeric control; returns the stored (clamped, snapped) value.
    pub fn set_number(&mut self, name: &str, value: f64) -> LabResult<f64> {
        let value = ensure_finite(value, "control value")?;
        let slot = self.slot_mut(name)?;
        expect_kind(slot, "range")?;
        let stored = slot.spec.quantize(value);
        slot.value = ControlValue::Number(stored);
        Ok(stored)
    }

    /// Select a catalog entry by id or label.
    pub fn set_choice(&mut self, name: &str, id: &str) -> LabResult<()> {
        let slot = self.slot_mut(name)?;
        let ControlKind::Choice { kind, options } = &slot.spec.kind else {
            return Err(wrong_kind(slot, "choice"));
        };
        let query = id.trim();
        let matched = options
            .iter()
            .find(|(oid, label)| {
                oid.eq_ignore_ascii_case(query) || label.eq_ignore_ascii_case(query)
            })
            .map(|(oid, _)| *oid)
            .ok_or_else(|| SlError::KindNotFound {
                kind: *kind,
                id: id.to_string(),
            })?;
        slot.value = ControlValue::Choice(matched);
        Ok(())
    }

    pub fn set_toggle(&mut self, name: &str, on: bool) -> LabResult<()> {
        let slot = self.slot_mut(name)?;
        expect_kind(slot, "toggle")?;
        slot.value = ControlValue::Toggle(on);
        Ok(())
    }

    /// Parse and set a value given as text, the way a command line or
    /// config file supplies it.
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> LabResult<()> {
        let invalid = || LabError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        };
        let kind = self.slot(name)?.spec.kind.clone();
        match kind {
            ControlKind::Range { .. } => {
                let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
                self.set_number(name, value).map(|_| ())
            }
            ControlKind::Choice { .. } => self.set_choice(name, raw),
            ControlKind::Toggle => {
                let on = match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => return Err(invalid()),
                };
                self.set_toggle(name, on)
            }
        }
    }

    pub fn number(&self, name: &str) -> LabResult<f64> {
        let slot = self.slot(name)?;
        match slot.value {
            ControlValue::Number(v) => Ok(v),
            _ => Err(wrong_kind(slot, "range")),
        }
    }

    pub fn choice<T: Catalog>(&self, name: &str) -> LabResult<T> {
        let slot = self.slot(name)?;
        match slot.value {
            ControlValue::Choice(id) => Ok(T::from_id(id)?),
            _ => Err(wrong_kind(slot, "choice")),
        }
    }

    pub fn toggle(&self, name: &str) -> LabResult<bool> {
        let slot = self.slot(name)?;
        match slot.value {
            ControlValue::Toggle(on) => Ok(on),
            _ => Err(wrong_kind(slot, "toggle")),
        }
    }

    /// Change a range's bounds and pull the current value back inside.
    pub fn set_range(&mut self, name: &str, min: f64, max: f64) -> LabResult<()> {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(LabError::InvalidValue {
                name: name.to_string(),
                value: format!("{min}..{max}"),
            });
        }
        let slot = self.slot_mut(name)?;
        let ControlKind::Range { step, .. } = slot.spec.kind else {
            return Err(wrong_kind(slot, "range"));
        };
        slot.spec.kind = ControlKind::Range { min, max, step };
        if let ControlValue::Number(v) = slot.value {
            slot.value = ControlValue::Number(slot.spec.quantize(v));
        }
        Ok(())
    }

    /// Replace a control's default, e.g. from a config file, and apply it.
    pub fn override_default(&mut self, name: &str, raw: &str) -> LabResult<()> {
        self.set_from_str(name, raw)?;
        let slot = self.slot_mut(name)?;
        slot.spec.default = slot.value;
        slot.initial.default = slot.value;
        Ok(())
    }

    /// Restore every control's original bounds and default value.
    ///
    /// Defaults are restored as stored, even outside the original bounds:
    /// an overridden default may rely on bounds widened by another control.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.spec = slot.initial.clone();
            slot.value = slot.spec.default;
        }
    }

    fn slot(&self, name: &str) -> LabResult<&Slot> {
        self.slots
            .iter()
            .find(|s| s.spec.name == name)
            .ok_or_else(|| LabError::UnknownControl {
                experiment: self.owner.to_string(),
                name: name.to_string(),
            })
    }

    fn slot_mut(&mut self, name: &str) -> LabResult<&mut Slot> {
        let owner = self.owner;
        self.slots
            .iter_mut()
            .find(|s| s.spec.name == name)
            .ok_or_else(|| LabError::UnknownControl {
                experiment: owner.to_string(),
                name: name.to_string(),
            })
    }
}

fn wrong_kind(slot: &Slot, expected: &'static str) -> LabError {
    LabError::WrongControlKind {
        name: slot.spec.name.to_string(),
        expected,
        actual: slot.spec.kind.name(),
    }
}

fn expect_kind(slot: &Slot, expected: &'static str) -> LabResult<()> {
    if slot.spec.kind.name() == expected {
        Ok(())
    } else {
        Err(wrong_kind(slot, expected))
    }
}
