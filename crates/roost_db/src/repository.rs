//! Repository plumbing shared by all stores.

/// A trait for database repository factories
///
/// Generic over the repository type and what it is built from, so the
/// backend can wire a store without knowing its concrete construction.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
