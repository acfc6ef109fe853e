use thiserror::Error;

/// A lookup record that cannot become an [`crate::Address`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing coordinate: {field}")]
    MissingCoordinate { field: &'static str },

    #[error("coordinate {field} is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    #[error("coordinate {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Network response was not ok")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("Failed to decode lookup response: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for LookupError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(x) => Self::Transport(x.to_string()),
        }
    }
}

/// Page-level failures. Messages are shown to the user verbatim.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Postcode and house number fields mandatory!")]
    MissingSearchFields,

    #[error("First name and last name fields mandatory!")]
    MissingPersonFields,

    #[error("No address selected, try to select an address or find one if you haven't")]
    NoSelection,

    #[error("Selected address not found")]
    SelectionNotFound,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
