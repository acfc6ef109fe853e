use tracing::debug;

use crate::model::{Address, AddressId, Outcome};

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Appends, unless an entry with the same id is already stored.
    Add(Address),
    Remove(AddressId),
    /// Swaps in the given entries verbatim, without deduplication.
    ReplaceAll(Vec<Address>),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::ReplaceAll(_) => "replace-all",
        }
    }
}

/// Pure transition from one ordered address list to the next. Entries keep
/// their relative order through every action.
pub fn reduce(mut addresses: Vec<Address>, action: Action) -> (Vec<Address>, Outcome) {
    let outcome = match action {
        Action::Add(address) => {
            if addresses.iter().any(|x| x.id == address.id) {
                Outcome::Unchanged
            } else {
                addresses.push(address);
                Outcome::Changed
            }
        }
        Action::Remove(id) => match addresses.iter().position(|x| x.id == id) {
            Some(index) => {
                addresses.remove(index);
                Outcome::Changed
            }
            None => Outcome::Unchanged,
        },
        Action::ReplaceAll(next) => {
            addresses = next;
            Outcome::Changed
        }
    };
    (addresses, outcome)
}

/// Session-owned address collection; ids are unique as long as it is only
/// mutated through [`Action::Add`] and [`Action::Remove`].
#[derive(Clone, Debug, Default)]
pub struct AddressBook {
    addresses: Vec<Address>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let name = action.name();
        let (next, outcome) = reduce(std::mem::take(&mut self.addresses), action);
        self.addresses = next;
        debug!(action = name, ?outcome, len = self.addresses.len(), "dispatched");
        outcome
    }

    pub fn add(&mut self, address: Address) -> Outcome {
        self.dispatch(Action::Add(address))
    }

    pub fn remove(&mut self, id: impl Into<AddressId>) -> Outcome {
        self.dispatch(Action::Remove(id.into()))
    }

    pub fn replace_all(&mut self, addresses: Vec<Address>) -> Outcome {
        self.dispatch(Action::ReplaceAll(addresses))
    }

    pub fn list(&self) -> &[Address] {
        &self.addresses
    }

    pub fn get(&self, id: &str) -> Option<&Address> {
        self.addresses.iter().find(|x| x.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::AddressId;

    use super::*;

    fn address(lat: f64, lon: f64) -> Address {
        Address {
            id: AddressId::from_coordinates(lat, lon),
            street: "Main".to_string(),
            city: "Town".to_string(),
            postcode: "1000AB".to_string(),
            house_number: "1".to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    fn ids(book: &AddressBook) -> Vec<&str> {
        book.list().iter().map(|x| x.id.as_str()).collect()
    }

    #[test]
    fn add_is_idempotent() {
        let a = address(1.0, 2.0);
        let mut once = AddressBook::new();
        once.add(a.clone());

        let mut twice = AddressBook::new();
        assert_eq!(twice.add(a.clone()), Outcome::Changed);
        assert_eq!(twice.add(a), Outcome::Unchanged);
        assert_eq!(twice.list(), once.list());
    }

    #[test]
    fn add_keeps_first_write_for_same_id() {
        let mut book = AddressBook::new();
        book.add(address(1.0, 2.0).with_owner("Jane", "Doe"));
        assert_eq!(
            book.add(address(1.0, 2.0).with_owner("John", "Roe")),
            Outcome::Unchanged
        );
        assert_eq!(book.len(), 1);
        assert_eq!(book.list()[0].first_name, "Jane");
    }

    #[test]
    fn add_appends_in_order() {
        let mut book = AddressBook::new();
        book.add(address(3.0, 3.0));
        book.add(address(1.0, 1.0));
        book.add(address(2.0, 2.0));
        assert_eq!(ids(&book), vec!["3_3", "1_1", "2_2"]);
    }

    #[test]
    fn remove_preserves_order() {
        let mut book = AddressBook::new();
        for i in 0..5 {
            book.add(address(i as f64, 0.5));
        }
        assert_eq!(book.remove("2_0.5"), Outcome::Changed);
        assert_eq!(ids(&book), vec!["0_0.5", "1_0.5", "3_0.5", "4_0.5"]);
        assert_eq!(book.remove(AddressId::from_coordinates(0.0, 0.5)), Outcome::Changed);
        assert_eq!(ids(&book), vec!["1_0.5", "3_0.5", "4_0.5"]);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut book = AddressBook::new();
        book.add(address(1.0, 1.0));
        assert_eq!(book.remove("9_9"), Outcome::Unchanged);
        assert_eq!(ids(&book), vec!["1_1"]);

        let mut empty = AddressBook::new();
        assert_eq!(empty.remove("1_1"), Outcome::Unchanged);
        assert!(empty.is_empty());
    }

    #[test]
    fn replace_all_overwrites() {
        let (a, b, c) = (address(1.0, 1.0), address(2.0, 2.0), address(3.0, 3.0));
        let mut book = AddressBook::new();
        book.add(a);
        book.add(b);
        book.replace_all(vec![c.clone()]);
        assert_eq!(book.list(), &[c]);
    }

    #[test]
    fn replace_all_is_verbatim() {
        let a = address(1.0, 1.0);
        let mut book = AddressBook::new();
        book.replace_all(vec![a.clone(), a.clone()]);
        assert_eq!(book.len(), 2);

        book.remove("1_1");
        assert_eq!(book.list(), &[a]);
    }

    #[test]
    fn reduce_is_pure() {
        let a = address(1.0, 1.0);
        let (state, outcome) = reduce(Vec::new(), Action::Add(a.clone()));
        assert_eq!(outcome, Outcome::Changed);
        let (state, outcome) = reduce(state, Action::Add(a.clone()));
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(state, vec![a.clone()]);

        let (state, outcome) = reduce(state, Action::Remove(AddressId::from("1_1")));
        assert_eq!(outcome, Outcome::Changed);
        assert!(state.is_empty());
    }
}
