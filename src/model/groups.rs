pub const UNGROUPED: &str = "ungrouped";
pub const IGNORED: &str = "ignored";

/// Named groups of series indices, kept in insertion order.
///
/// Every index belongs to at most one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    entries: Vec<(String, Vec<usize>)>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    /// All of `0..count` in the ungrouped group.
    pub fn ungrouped(count: usize) -> Self {
        Self {
            entries: vec![(UNGROUPED.to_string(), (0..count).collect())],
        }
    }

    pub fn get(&self, name: &str) -> Option<&[usize]> {
        self.entries
            .iter()
            .find(|(group, _)| group == name)
            .map(|(_, members)| members.as_slice())
    }

    pub fn group_of(&self, index: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, members)| members.contains(&index))
            .map(|(group, _)| group.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries
            .iter()
            .map(|(group, members)| (group.as_str(), members.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(group, _)| group.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves `indices` into `name`, appending to it if it already exists.
    ///
    /// Groups emptied by the move are removed.
    pub fn assign(&mut self, indices: &[usize], name: &str) {
        let mut moving: Vec<usize> = Vec::with_capacity(indices.len());
        for &index in indices {
            if !moving.contains(&index) {
                moving.push(index);
            }
        }
        if moving.is_empty() {
            return;
        }

        self.entries.retain_mut(|(_, members)| {
            let before = members.len();
            members.retain(|index| !moving.contains(index));
            members.len() == before || !members.is_empty()
        });

        match self.entries.iter_mut().find(|(group, _)| group == name) {
            Some((_, members)) => members.extend(moving),
            None => self.entries.push((name.to_string(), moving)),
        }
    }
}

impl<const N: usize> From<[(&str, Vec<usize>); N]> for Groups {
    fn from(entries: [(&str, Vec<usize>); N]) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, members)| (name.to_string(), members))
                .collect(),
        }
    }
}
