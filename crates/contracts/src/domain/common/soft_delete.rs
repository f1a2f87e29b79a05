/// Запись, которая не удаляется физически, а помечается `delete_flag`.
///
/// Implemented by the object aggregate and by every reference catalog so
/// that dropdown sources can drop archived entries uniformly.
pub trait SoftDeletable {
    fn is_deleted(&self) -> bool;

    fn is_active(&self) -> bool {
        !self.is_deleted()
    }
}

/// Returns clones of the entries whose `delete_flag` is not set.
pub fn active_only<T: SoftDeletable + Clone>(items: &[T]) -> Vec<T> {
    items.iter().filter(|i| i.is_active()).cloned().collect()
}
