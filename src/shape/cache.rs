/// A memoized value with a validity flag.
///
/// The value is recomputed on read when the cell was invalidated, or when it was computed for a
/// different key.
#[derive(Debug, Clone)]
pub struct Cached<K, T> {
    entry: Option<(K, T)>,
    valid: bool,
}

impl<K: PartialEq, T> Cached<K, T> {
    pub fn new() -> Cached<K, T> {
        Cached {
            entry: None,
            valid: false,
        }
    }

    /// Marks the value as outdated. The stale value is kept until the next update.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Returns true if a read with this key would not recompute.
    pub fn is_fresh(&self, key: &K) -> bool {
        self.valid && self.entry.as_ref().map_or(false, |(k, _)| k == key)
    }

    /// Returns the stored value regardless of validity.
    pub fn peek(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, value)| value)
    }

    /// Returns the value, recomputing it first if necessary.
    pub fn get_or_update<F: FnOnce() -> T>(&mut self, key: K, update: F) -> &T {
        let entry = match self.entry.take() {
            Some(entry) if self.valid && entry.0 == key => entry,
            _ => (key, update()),
        };
        self.valid = true;
        &self.entry.get_or_insert(entry).1
    }

    /// Like [`Cached::get_or_update`], but the update may fail. A failed update leaves the cell
    /// empty and invalid.
    pub fn get_or_try_update<E, F>(&mut self, key: K, update: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let entry = match self.entry.take() {
            Some(entry) if self.valid && entry.0 == key => entry,
            _ => {
                self.valid = false;
                (key, update()?)
            }
        };
        self.valid = true;
        Ok(&self.entry.get_or_insert(entry).1)
    }
}

impl<K: PartialEq, T> Default for Cached<K, T> {
    fn default() -> Cached<K, T> {
        Cached::new()
    }
}
