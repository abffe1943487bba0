//! # Element Properties
//!
//! Static per-element reference data used to enrich atom embeddings.
//!
//! Sources:
//! - Electron affinity: <https://periodictable.com/Properties/A/ElectronAffinity.v.log.html>
//! - Electronegativity: <https://periodictable.com/Properties/A/Electronegativity.al.html>
//! - Valence electrons: <https://periodictable.com/Properties/A/Valence.al.html>
//! - Covalent radius: <https://periodictable.com/Properties/A/CovalentRadius.an.html>
//! - First ionization energy: <https://periodictable.com/Properties/A/IonizationEnergies.an.html>
//! - Atomic volume: <http://hyperphysics.phy-astr.gsu.edu/hbase/pertab/H.html>
//!
//! Only the ten elements common in small organic molecules are covered.
//!
use crate::error::{FeaturizeError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The scalar properties stored for each element, in table order.
///
/// The declaration order is the default column order of the property block
/// inside an embedding.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Electronegativity,
    AtomicMass,
    ValenceElectrons,
    GroupNumber,
    CovalentRadius,
    FirstIonizationEnergy,
    ElectronAffinity,
    AtomicVolume,
}

/// Immutable property record for a single element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementProperties {
    pub electronegativity: f32,
    pub atomic_mass: f32,
    pub valence_electrons: f32,
    pub group_number: f32,
    /// picometers
    pub covalent_radius: f32,
    /// kJ/mol
    pub first_ionization_energy: f32,
    /// kJ/mol
    pub electron_affinity: f32,
    /// cm^3/mol
    pub atomic_volume: f32,
}

impl ElementProperties {
    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Electronegativity => self.electronegativity,
            Property::AtomicMass => self.atomic_mass,
            Property::ValenceElectrons => self.valence_electrons,
            Property::GroupNumber => self.group_number,
            Property::CovalentRadius => self.covalent_radius,
            Property::FirstIonizationEnergy => self.first_ionization_energy,
            Property::ElectronAffinity => self.electron_affinity,
            Property::AtomicVolume => self.atomic_volume,
        }
    }
}

macro_rules! define_elements {
    ($($name:ident: $number:literal, [$en:expr, $mass:expr, $val:expr, $group:expr, $rad:expr, $ie:expr, $ea:expr, $vol:expr]),* $(,)?) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            Display, EnumString, EnumIter, IntoStaticStr,
            Serialize, Deserialize,
        )]
        pub enum Element {
            $($name),*
        }

        static ELEMENT_TABLE: &[ElementProperties] = &[
            $(ElementProperties {
                electronegativity: $en,
                atomic_mass: $mass,
                valence_electrons: $val,
                group_number: $group,
                covalent_radius: $rad,
                first_ionization_energy: $ie,
                electron_affinity: $ea,
                atomic_volume: $vol,
            }),*
        ];

        impl Element {
            pub const fn atomic_number(&self) -> u32 {
                match self {
                    $(Self::$name => $number),*
                }
            }

            /// Strict atomic-number lookup. `None` for anything outside the table.
            pub const fn from_atomic_number(number: u32) -> Option<Self> {
                match number {
                    $($number => Some(Self::$name),)*
                    _ => None,
                }
            }

            pub fn properties(&self) -> &'static ElementProperties {
                &ELEMENT_TABLE[*self as usize]
            }
        }
    }
}

// Nitrogen carries 5 valence electrons. An older copy of this table used 3.
#[rustfmt::skip]
define_elements! {
    //   Z    EN    mass      val  grp   rad    IE       EA     vol
    H:   1,  [2.20, 1.008,   1.0, 1.0,  31.0,  1312.0,  73.0,  14.0],
    C:   6,  [2.55, 12.01,   4.0, 14.0, 76.0,  1086.0,  153.9, 4.58],
    N:   7,  [3.04, 14.007,  5.0, 15.0, 71.0,  1402.0,  7.0,   17.3],
    O:   8,  [3.44, 15.999,  2.0, 16.0, 66.0,  1314.0,  141.0, 14.0],
    F:   9,  [3.98, 18.998,  7.0, 17.0, 57.0,  1681.0,  328.0, 17.1],
    P:   15, [2.19, 30.974,  5.0, 15.0, 107.0, 1011.8,  72.0,  17.0],
    S:   16, [2.58, 32.06,   6.0, 16.0, 105.0, 999.6,   200.0, 15.5],
    Cl:  17, [3.16, 35.45,   7.0, 17.0, 102.0, 1251.2,  349.0, 22.7],
    Br:  35, [2.96, 79.904,  7.0, 17.0, 120.0, 1139.9,  324.6, 23.5],
    I:   53, [2.66, 126.90,  7.0, 17.0, 139.0, 1008.4,  295.2, 25.7],
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        self.into()
    }
}

/// Property record for an element symbol such as `"Cl"`.
pub fn lookup(symbol: &str) -> Result<&'static ElementProperties> {
    Element::from_str(symbol)
        .map(|element| element.properties())
        .map_err(|_| FeaturizeError::UnknownElement(symbol.to_string()))
}

/// Element symbol for an atomic number.
///
/// Every atomic number outside the table maps to `"H"`. This is a lossy
/// default; use [`Element::from_atomic_number`] to detect misses.
pub fn symbol_for_atomic_number(number: u32) -> &'static str {
    Element::from_atomic_number(number)
        .unwrap_or(Element::H)
        .symbol()
}

/// Interpret a raw tensor value as an atomic number.
///
/// Only finite, non-negative, integral values are atomic numbers.
pub(crate) fn atomic_number_from_f32(value: f32) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f32 {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lookup_by_symbol() {
        let chlorine = lookup("Cl").unwrap();
        assert_eq!(chlorine.atomic_mass, 35.45);
        assert_eq!(chlorine.group_number, 17.0);

        let nitrogen = lookup("N").unwrap();
        assert_eq!(nitrogen.valence_electrons, 5.0);
    }

    #[test]
    fn test_lookup_unknown_symbol() {
        match lookup("Xe") {
            Err(FeaturizeError::UnknownElement(s)) => assert_eq!(s, "Xe"),
            other => panic!("expected UnknownElement, got {:?}", other),
        }
        // symbols are case sensitive
        assert!(lookup("CL").is_err());
    }

    #[test]
    fn test_symbol_for_atomic_number() {
        assert_eq!(symbol_for_atomic_number(6), "C");
        assert_eq!(symbol_for_atomic_number(17), "Cl");
        assert_eq!(symbol_for_atomic_number(53), "I");
        // lossy default
        assert_eq!(symbol_for_atomic_number(26), "H");
        assert_eq!(symbol_for_atomic_number(0), "H");
    }

    #[test]
    fn test_atomic_number_roundtrip() {
        for element in Element::iter() {
            let number = element.atomic_number();
            assert_eq!(Element::from_atomic_number(number), Some(element));
            assert_eq!(lookup(element.symbol()).unwrap(), element.properties());
        }
        assert_eq!(Element::iter().count(), 10);
    }

    #[test]
    fn test_property_order_and_names() {
        let names: Vec<String> = Property::iter().map(|p| p.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "electronegativity",
                "atomic_mass",
                "valence_electrons",
                "group_number",
                "covalent_radius",
                "first_ionization_energy",
                "electron_affinity",
                "atomic_volume",
            ]
        );
        assert_eq!(
            Property::from_str("first_ionization_energy").unwrap(),
            Property::FirstIonizationEnergy
        );
        let oxygen = Element::O.properties();
        assert_eq!(oxygen.get(Property::Electronegativity), 3.44);
        assert_eq!(oxygen.get(Property::AtomicVolume), 14.0);
    }

    #[test]
    fn test_atomic_number_from_f32() {
        assert_eq!(atomic_number_from_f32(6.0), Some(6));
        assert_eq!(atomic_number_from_f32(0.0), Some(0));
        assert_eq!(atomic_number_from_f32(6.5), None);
        assert_eq!(atomic_number_from_f32(-1.0), None);
        assert_eq!(atomic_number_from_f32(f32::NAN), None);
    }
}
