use core::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::form::FieldState;

/// Inputs of the lookup page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PostCode,
    HouseNumber,
    FirstName,
    LastName,
    SelectedAddress,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "postCode" => Self::PostCode,
            "houseNumber" => Self::HouseNumber,
            "firstName" => Self::FirstName,
            "lastName" => Self::LastName,
            "selectedAddress" => Self::SelectedAddress,
            _ => bail!("Unknown field: {s}"),
        })
    }
}

impl Field {
    pub fn all() -> Vec<Self> {
        vec![
            Field::PostCode,
            Field::HouseNumber,
            Field::FirstName,
            Field::LastName,
            Field::SelectedAddress,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PostCode => "postCode",
            Self::HouseNumber => "houseNumber",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::SelectedAddress => "selectedAddress",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::PostCode => "Post Code",
            Self::HouseNumber => "House number",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::SelectedAddress => "Selected address",
        }
    }

    /// Every field, blank.
    pub fn defaults() -> FieldState<Field> {
        Self::all().into_iter().map(|x| (x, String::new())).collect()
    }
}
