use std::{borrow::Borrow, collections::BTreeMap, fmt};

use tracing::debug;

use crate::model::Outcome;

/// Named, string-valued inputs tracked together.
pub type FieldState<K = String> = BTreeMap<K, String>;

type Subscriber<K> = Box<dyn FnMut(&FieldState<K>)>;

/// Holds a fixed set of form fields. The key set is taken from the defaults
/// passed to [`Form::new`] and never grows afterwards.
pub struct Form<K = String> {
    defaults: FieldState<K>,
    values: FieldState<K>,
    subscribers: Vec<Subscriber<K>>,
}

impl<K: Ord + Clone + fmt::Debug> Form<K> {
    /// Snapshots `defaults` by value: later edits to the caller's map do not
    /// affect what [`Form::reset`] restores.
    pub fn new(defaults: &FieldState<K>) -> Self {
        Self {
            defaults: defaults.clone(),
            values: defaults.clone(),
            subscribers: Vec::new(),
        }
    }

    pub fn read(&self) -> &FieldState<K> {
        &self.values
    }

    pub fn get<Q>(&self, name: &Q) -> Option<&str>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains<Q>(&self, name: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.values.contains_key(name)
    }

    /// Called once, synchronously, after every accepted change or reset.
    pub fn subscribe(&mut self, f: impl FnMut(&FieldState<K>) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Sets `name` to `value`. Names outside the initial key set are ignored
    /// and leave the state untouched; subscribers are not notified for them.
    pub fn on_change<Q>(&mut self, name: &Q, value: impl Into<String>) -> Outcome
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        let Some(slot) = self.values.get_mut(name) else {
            debug!(field = ?name, "ignoring change to unknown field");
            return Outcome::Unchanged;
        };
        *slot = value.into();
        debug!(field = ?name, "field changed");
        self.notify();
        Outcome::Changed
    }

    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        debug!("form reset");
        self.notify();
    }

    fn notify(&mut self) {
        for f in &mut self.subscribers {
            f(&self.values);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Form<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("values", &self.values)
            .field("defaults", &self.defaults)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn state(pairs: &[(&str, &str)]) -> FieldState {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn on_change_updates_known_field() {
        let mut form = Form::new(&state(&[("x", "1"), ("y", "")]));
        assert_eq!(form.on_change("y", "2"), Outcome::Changed);
        assert_eq!(form.read(), &state(&[("x", "1"), ("y", "2")]));
        assert_eq!(form.get("y"), Some("2"));
    }

    #[test]
    fn on_change_ignores_unknown_field() {
        let mut form = Form::new(&state(&[("x", "1")]));
        assert_eq!(form.on_change("y", "2"), Outcome::Unchanged);
        assert_eq!(form.read(), &state(&[("x", "1")]));
        assert!(!form.contains("y"));
    }

    #[test]
    fn reset_restores_snapshot() {
        let mut defaults = state(&[("x", "1")]);
        let mut form = Form::new(&defaults);
        form.on_change("x", "2");

        defaults.insert("x".to_string(), "changed".to_string());
        defaults.insert("z".to_string(), "3".to_string());

        form.reset();
        assert_eq!(form.read(), &state(&[("x", "1")]));
    }

    #[test]
    fn notifies_once_per_accepted_call() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut form = Form::new(&state(&[("x", "1")]));
        let sink = seen.clone();
        form.subscribe(move |values| sink.borrow_mut().push(values["x"].clone()));

        form.on_change("x", "2");
        form.on_change("nope", "3");
        form.reset();

        assert_eq!(*RefCell::borrow(&seen), vec!["2".to_string(), "1".to_string()]);
    }
}
