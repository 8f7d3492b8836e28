use crate::cli::{Conversion, UnitsArgs};
use crate::error::Result;
use fepflow::core::units;

pub fn run(args: UnitsArgs) -> Result<()> {
    let (value, unit) = convert(args.conversion, args.value, args.temperature);
    println!("{} {}", value, unit);
    Ok(())
}

fn convert(conversion: Conversion, value: f64, temperature: f64) -> (f64, &'static str) {
    match conversion {
        Conversion::MolarToNm3 => (units::molar_to_nm3(value), "nm^-3"),
        Conversion::BarToKjmolnm3 => (units::bar_to_kjmolnm3(value), "kJ/mol/nm^3"),
        Conversion::KcalToKj => (units::kcal_to_kj(value), "kJ/mol"),
        Conversion::KjToKcal => (units::kj_to_kcal(value), "kcal/mol"),
        Conversion::KbtToKj => (units::kbt_to_kj(value, temperature), "kJ/mol"),
    }
}
