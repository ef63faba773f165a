use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two outcome groups compared by the profile views.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GroupKey {
    #[display("positive")]
    Positive,
    #[display("negative")]
    Negative,
}

impl GroupKey {
    pub const ALL: [Self; 2] = [Self::Positive, Self::Negative];
}

/// A value for each [`GroupKey`].
///
/// Both groups are always present, so lookups are total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMap<T> {
    pub positive: T,
    pub negative: T,
}

impl<T> GroupMap<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(GroupKey) -> T,
    {
        Self {
            positive: f(GroupKey::Positive),
            negative: f(GroupKey::Negative),
        }
    }

    pub fn map<U, F>(self, mut f: F) -> GroupMap<U>
    where
        F: FnMut(GroupKey, T) -> U,
    {
        GroupMap {
            positive: f(GroupKey::Positive, self.positive),
            negative: f(GroupKey::Negative, self.negative),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &T)> {
        [
            (GroupKey::Positive, &self.positive),
            (GroupKey::Negative, &self.negative),
        ]
        .into_iter()
    }
}

impl<T> Index<GroupKey> for GroupMap<T> {
    type Output = T;

    fn index(&self, key: GroupKey) -> &Self::Output {
        match key {
            GroupKey::Positive => &self.positive,
            GroupKey::Negative => &self.negative,
        }
    }
}

impl<T> IndexMut<GroupKey> for GroupMap<T> {
    fn index_mut(&mut self, key: GroupKey) -> &mut Self::Output {
        match key {
            GroupKey::Positive => &mut self.positive,
            GroupKey::Negative => &mut self.negative,
        }
    }
}
