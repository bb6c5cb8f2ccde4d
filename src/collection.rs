/// An ordered bag of game objects.
///
/// Iteration always follows insertion order, which is what makes per-frame
/// collision outcomes deterministic.  Removal during iteration goes through
/// [`Collection::sweep`]: the callback marks members for removal and the
/// collection is compacted only after every member has been visited.

#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { items: Vec::new() }
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Remove and return the first member matching `pred`.
    pub fn remove_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let idx = self.items.iter().position(|item| pred(item))?;
        Some(self.items.remove(idx))
    }

    /// Visit every member in insertion order; members for which `visit`
    /// returns `true` are removed once the pass is complete and handed back
    /// in their original order.
    pub fn sweep<F>(&mut self, mut visit: F) -> Vec<T>
    where
        F: FnMut(&mut T) -> bool,
    {
        // Phase 1: mark
        let marks: Vec<bool> = self.items.iter_mut().map(|item| visit(item)).collect();
        if !marks.contains(&true) {
            return Vec::new();
        }

        // Phase 2: compact
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for (item, remove) in self.items.drain(..).zip(marks) {
            if remove {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        removed
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
