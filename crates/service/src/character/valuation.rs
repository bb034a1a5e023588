//! Rules deriving `character_value` from a character's code and power.
//!
//! There are two rule families. [`create_value`] is applied when a character
//! is created; [`update_value`] when its power changes. They disagree for
//! every class (see DESIGN.md, "Open-question decisions") and are kept apart.

use crate::errors::ServiceError;

/// Behavior class selected by `character_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Wizard,
    Elf,
    Hobbit,
}

impl CharacterClass {
    pub const WIZARD: i64 = 1;
    pub const ELF: i64 = 2;
    pub const HOBBIT: i64 = 3;

    /// `None` for codes without a rule; such characters are worth zero.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::WIZARD => Some(Self::Wizard),
            Self::ELF => Some(Self::Elf),
            Self::HOBBIT => Some(Self::Hobbit),
            _ => None,
        }
    }
}

/// Hobbits below this power use the lower multiplier.
pub const HOBBIT_POWER_THRESHOLD: i64 = 20;

const ELF_BONUS: i64 = 2;

fn overflow() -> ServiceError { ServiceError::invalid("character_power", "is out of range") }

/// `power * percent / 100`, multiplying first.
fn percent_of(power: i64, percent: i64) -> Result<i64, ServiceError> {
    power.checked_mul(percent).map(|v| v / 100).ok_or_else(overflow)
}

fn times(power: i64, factor: i64) -> Result<i64, ServiceError> {
    power.checked_mul(factor).ok_or_else(overflow)
}

/// Value assigned when a character is created.
///
/// | class | value |
/// |---|---|
/// | Wizard | `power * 150 / 100` |
/// | Elf | `2 + power * 110 / 100` |
/// | Hobbit, power < 20 | `power * 200 / 100` |
/// | Hobbit, power >= 20 | `power * 300 / 100` |
/// | other | `0` |
pub fn create_value(code: i64, power: i64) -> Result<i64, ServiceError> {
    match CharacterClass::from_code(code) {
        Some(CharacterClass::Wizard) => percent_of(power, 150),
        Some(CharacterClass::Elf) => percent_of(power, 110)?.checked_add(ELF_BONUS).ok_or_else(overflow),
        Some(CharacterClass::Hobbit) if power < HOBBIT_POWER_THRESHOLD => percent_of(power, 200),
        Some(CharacterClass::Hobbit) => percent_of(power, 300),
        None => Ok(0),
    }
}

// The percentages below are divided before they are applied, so they truncate
// to whole multipliers and the Elf rule does not depend on power.
const WIZARD_UPDATE_FACTOR: i64 = 150 / 100;
const ELF_UPDATE_VALUE: i64 = ELF_BONUS + 110 / 100;
const HOBBIT_LOW_UPDATE_FACTOR: i64 = 200 / 100;
const HOBBIT_HIGH_UPDATE_FACTOR: i64 = 300 / 100;

/// Value assigned when an existing character's power is updated.
///
/// | class | value |
/// |---|---|
/// | Wizard | `power * (150 / 100)` = `power` |
/// | Elf | `2 + (110 / 100)` = `3` |
/// | Hobbit, power < 20 | `power * (200 / 100)` = `power * 2` |
/// | Hobbit, power >= 20 | `power * (300 / 100)` = `power * 3` |
/// | other | `0` |
pub fn update_value(code: i64, power: i64) -> Result<i64, ServiceError> {
    match CharacterClass::from_code(code) {
        Some(CharacterClass::Wizard) => times(power, WIZARD_UPDATE_FACTOR),
        Some(CharacterClass::Elf) => Ok(ELF_UPDATE_VALUE),
        Some(CharacterClass::Hobbit) if power < HOBBIT_POWER_THRESHOLD => times(power, HOBBIT_LOW_UPDATE_FACTOR),
        Some(CharacterClass::Hobbit) => times(power, HOBBIT_HIGH_UPDATE_FACTOR),
        None => Ok(0),
    }
}
