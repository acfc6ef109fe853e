use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};
use ureq::{Agent, AgentBuilder};

use crate::{
    config::Settings,
    error::{LookupError, ValidationError},
    model::{Address, AddressId},
};

#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub details: Vec<RawAddress>,
    #[serde(default)]
    pub status: String,
}

/// One record as the lookup service returns it. Coordinates are left untyped
/// and text fields accept any scalar, so a bad record fails on its own in
/// [`normalize`] instead of failing the whole payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    #[serde(default, deserialize_with = "text")]
    pub city: String,
    // informational, the searched number wins
    #[serde(default, deserialize_with = "text")]
    pub house_number: String,
    pub lat: Option<Value>,
    #[serde(alias = "lon")]
    pub long: Option<Value>,
    #[serde(default, deserialize_with = "text")]
    pub postcode: String,
    #[serde(default, deserialize_with = "text")]
    pub street: String,
}

// null becomes empty, numbers keep their JSON text
fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(x) => x,
        Value::Null => String::new(),
        x => x.to_string(),
    })
}

fn coordinate(field: &'static str, raw: Option<&Value>, limit: f64) -> Result<f64, ValidationError> {
    let value = match raw {
        None | Some(Value::Null) => return Err(ValidationError::MissingCoordinate { field }),
        Some(Value::Number(x)) => x.as_f64(),
        Some(_) => None,
    };
    let Some(value) = value else {
        return Err(ValidationError::NotNumeric {
            field,
            value: raw.map(Value::to_string).unwrap_or_default(),
        });
    };
    if !(-limit..=limit).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    // -0 prints as "0", as the lookup page showed it
    Ok(value + 0.0)
}

/// Turns a lookup record into a candidate address. The house number is the
/// one that was searched for, never the record's own.
pub fn normalize(raw: &RawAddress, house_number: &str) -> Result<Address, ValidationError> {
    let lat = coordinate("lat", raw.lat.as_ref(), 90.0)?;
    let lon = coordinate("long", raw.long.as_ref(), 180.0)?;

    Ok(Address {
        id: AddressId::from_coordinates(lat, lon),
        street: raw.street.clone(),
        city: raw.city.clone(),
        postcode: raw.postcode.clone(),
        house_number: house_number.to_string(),
        lat: lat.to_string(),
        lon: lon.to_string(),
        first_name: String::new(),
        last_name: String::new(),
    })
}

/// Normalizes a batch, dropping (and logging) records that fail validation.
pub fn normalize_all(records: &[RawAddress], house_number: &str) -> Vec<Address> {
    let mut output = Vec::with_capacity(records.len());
    let mut skipped = 0usize;
    for record in records {
        match normalize(record, house_number) {
            Ok(x) => output.push(x),
            Err(err) => {
                skipped += 1;
                warn!(street = %record.street, %err, "dropping lookup record");
            }
        }
    }
    if skipped > 0 {
        warn!("Normalized {} records (skipped {skipped})", output.len());
    }
    output
}

/// Source of raw lookup records for a postcode and house number.
pub trait Finder {
    fn find(&self, postcode: &str, house_number: &str) -> Result<Vec<RawAddress>, LookupError>;
}

pub struct Lookup {
    agent: Agent,
    base_url: String,
}

impl Lookup {
    pub fn new(settings: &Settings) -> Self {
        let agent = AgentBuilder::new()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build();
        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Finder for Lookup {
    fn find(&self, postcode: &str, house_number: &str) -> Result<Vec<RawAddress>, LookupError> {
        info!(postcode, house_number, "Fetching addresses");
        let response: LookupResponse = self
            .agent
            .get(&format!("{}/api/getAddresses", self.base_url))
            .query("postcode", postcode)
            .query("streetnumber", house_number)
            .call()?
            .into_json()?;
        info!(
            status = %response.status,
            "Found {} addresses",
            response.details.len()
        );
        Ok(response.details)
    }
}
