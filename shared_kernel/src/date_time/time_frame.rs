use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeFrame<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialOrd> TimeFrame<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// `true` when `to` is strictly after `from`.
    pub fn is_forward(&self) -> bool {
        self.to > self.from
    }

    pub fn contains(&self, value: &T) -> bool {
        *value >= self.from && *value <= self.to
    }
}
