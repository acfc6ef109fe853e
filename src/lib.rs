pub mod book;
pub mod config;
pub mod error;
pub mod fields;
pub mod form;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod session;

pub use book::{reduce, Action, AddressBook};
pub use error::{LookupError, SessionError, ValidationError};
pub use fields::Field;
pub use form::{FieldState, Form};
pub use lookup::{normalize, normalize_all, Finder, Lookup, RawAddress};
pub use model::{Address, AddressId, Outcome};
pub use session::{Search, Session};
