use std::{borrow::Borrow, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Whether a state transition produced a new state. `Unchanged` covers the
/// silent no-ops: duplicate add, absent remove, unknown field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl Outcome {
    pub fn changed(self) -> bool {
        self == Self::Changed
    }
}

/// Coordinate-derived key, `"<lat>_<lon>"`. The lookup service issues no ids of
/// its own so this is the only identity an address has.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(String);

impl AddressId {
    pub fn from_coordinates(lat: f64, lon: f64) -> Self {
        Self(format!("{lat}_{lon}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AddressId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AddressId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for AddressId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub house_number: String,
    // kept as text so re-display never reformats the source value
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Address {
    /// Copy of this candidate carrying the owner's name, ready for the book.
    pub fn with_owner(&self, first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..self.clone()
        }
    }

    pub fn owner(&self) -> Option<String> {
        let name = [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|x| !x.is_empty())
            .join(" ");
        (!name.is_empty()).then_some(name)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {}, {}",
            self.street, self.house_number, self.postcode, self.city
        )?;
        if let Some(owner) = self.owner() {
            write!(f, " ({owner})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            id: AddressId::from_coordinates(52.1, 4.3),
            street: "Main".to_string(),
            city: "Town".to_string(),
            postcode: "1000AB".to_string(),
            house_number: "12".to_string(),
            lat: "52.1".to_string(),
            lon: "4.3".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    #[test]
    fn id_from_coordinates() {
        assert_eq!(AddressId::from_coordinates(52.1, 4.3).as_str(), "52.1_4.3");
        assert_eq!(AddressId::from_coordinates(-33.0, 151.25).as_str(), "-33_151.25");
    }

    #[test]
    fn with_owner_keeps_identity() {
        let a = address();
        let owned = a.with_owner("Jane", "Doe");
        assert_eq!(owned.id, a.id);
        assert_eq!(owned.first_name, "Jane");
        assert_eq!(a.first_name, "");
        assert_eq!(owned.to_string(), "Main 12, 1000AB, Town (Jane Doe)");
        assert_eq!(a.to_string(), "Main 12, 1000AB, Town");
    }

    #[test]
    fn camel_case_fields() {
        let json = serde_json::to_value(address()).unwrap();
        assert_eq!(json["id"], "52.1_4.3");
        assert_eq!(json["houseNumber"], "12");
        assert_eq!(json["firstName"], "");
    }
}
