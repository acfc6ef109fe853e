use tracing::{debug, info};

use crate::{
    book::AddressBook,
    error::{LookupError, SessionError},
    fields::Field,
    form::Form,
    lookup::{normalize_all, Finder, RawAddress},
    model::{Address, Outcome},
};

/// Search terms captured by [`Session::begin_find`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search {
    pub postcode: String,
    pub house_number: String,
}

/// State of one user's page: the form, the latest search results, the error
/// banner and the address book they are building.
#[derive(Debug)]
pub struct Session {
    pub form: Form<Field>,
    results: Vec<Address>,
    error: Option<String>,
    loading: bool,
    book: AddressBook,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            form: Form::new(&Field::defaults()),
            results: Vec::new(),
            error: None,
            loading: false,
            book: AddressBook::new(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.form.get(&field).unwrap_or_default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Outcome {
        self.form.on_change(&field, value)
    }

    pub fn results(&self) -> &[Address] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut AddressBook {
        &mut self.book
    }

    fn fail<T>(&mut self, err: SessionError) -> Result<T, SessionError> {
        self.error = Some(err.to_string());
        Err(err)
    }

    /// Validates the search fields, drops the previous results and marks the
    /// session as loading until [`Session::finish_find`] is called.
    pub fn begin_find(&mut self) -> Result<Search, SessionError> {
        let search = Search {
            postcode: self.value(Field::PostCode).to_string(),
            house_number: self.value(Field::HouseNumber).to_string(),
        };
        if search.postcode.is_empty() || search.house_number.is_empty() {
            return self.fail(SessionError::MissingSearchFields);
        }

        self.error = None;
        self.results.clear();
        self.loading = true;
        Ok(search)
    }

    pub fn finish_find(
        &mut self,
        search: &Search,
        found: Result<Vec<RawAddress>, LookupError>,
    ) -> Result<&[Address], SessionError> {
        self.loading = false;
        match found {
            Ok(records) => {
                self.results = normalize_all(&records, &search.house_number);
                info!(
                    postcode = %search.postcode,
                    house_number = %search.house_number,
                    "{} candidates",
                    self.results.len()
                );
                Ok(&self.results)
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Looks up candidates for the entered postcode and house number. Previous
    /// results are discarded whether or not the lookup succeeds.
    pub fn find(&mut self, finder: &impl Finder) -> Result<&[Address], SessionError> {
        let search = self.begin_find()?;
        let found = finder.find(&search.postcode, &search.house_number);
        self.finish_find(&search, found)
    }

    pub fn select(&mut self, id: &str) -> Outcome {
        self.set(Field::SelectedAddress, id)
    }

    /// Adds the selected candidate, carrying the entered name, to the book.
    pub fn commit(&mut self) -> Result<Outcome, SessionError> {
        self.error = None;

        let first_name = self.value(Field::FirstName).to_string();
        let last_name = self.value(Field::LastName).to_string();
        if first_name.is_empty() || last_name.is_empty() {
            return self.fail(SessionError::MissingPersonFields);
        }

        let selected = self.value(Field::SelectedAddress);
        if selected.is_empty() || self.results.is_empty() {
            return self.fail(SessionError::NoSelection);
        }

        let Some(found) = self.results.iter().find(|x| x.id.as_str() == selected) else {
            return self.fail(SessionError::SelectionNotFound);
        };

        let address = found.with_owner(&first_name, &last_name);
        let outcome = self.book.add(address);
        if outcome.changed() {
            info!(id = %found.id, "added to address book");
        } else {
            debug!(id = %found.id, "already in address book");
        }
        Ok(outcome)
    }

    pub fn remove(&mut self, id: &str) -> Outcome {
        self.book.remove(id)
    }

    /// Clears every field, the search results and any error. The book is kept.
    pub fn clear(&mut self) {
        self.form.reset();
        self.results.clear();
        self.error = None;
    }
}
