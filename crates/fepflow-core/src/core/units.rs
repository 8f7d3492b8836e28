//! Unit conversions used when preparing solvation free-energy runs.
//!
//! Energies are in kJ/mol and lengths in nm, matching the engine's units.

/// Avogadro constant in 1/mol.
pub const AVOGADRO: f64 = 6.022_140_76e23;
/// Molar gas constant in J/(mol K).
pub const GAS_CONSTANT: f64 = 8.314_462_618;
/// Thermochemical calorie in joules.
pub const KCAL_TO_KJ: f64 = 4.184;

/// Molar concentration (mol/L) to number density in nm^-3.
pub fn molar_to_nm3(c: f64) -> f64 {
    c * AVOGADRO * 1e-24
}

/// Pressure in bar to an energy density in kJ/(mol nm^3).
pub fn bar_to_kjmolnm3(p: f64) -> f64 {
    p * AVOGADRO * 1e-25
}

pub fn kcal_to_kj(x: f64) -> f64 {
    KCAL_TO_KJ * x
}

pub fn kj_to_kcal(x: f64) -> f64 {
    x / KCAL_TO_KJ
}

/// `x` multiples of kT at `temperature` (K) expressed in kJ/mol.
pub fn kbt_to_kj(x: f64, temperature: f64) -> f64 {
    x * GAS_CONSTANT * temperature * 1e-3
}
