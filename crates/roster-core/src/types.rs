//! Shared primitive types

/// Primary key type for records
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Highest id among `items`, or `None` when there are none.
pub fn max_id<'a, T, I>(items: I) -> Option<Id>
where
    T: Identifiable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(Identifiable::id).max()
}
