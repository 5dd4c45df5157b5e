use downcast_rs::{DowncastSync, impl_downcast};

/// Extendable configuration trait for dynamic extension of configuration structures.
pub trait OpaqueObject: DowncastSync {}
impl_downcast!(sync OpaqueObject);

/// A list of extendable configuration entries.
#[derive(Default)]
pub struct ExtList(pub Vec<Box<dyn OpaqueObject>>);

impl ExtList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, object: impl OpaqueObject) {
        self.0.push(Box::new(object));
    }

    /// First entry of type `T`, if any.
    pub fn find<T: OpaqueObject>(&self) -> Option<&T> {
        self.0.iter().find_map(|object| object.downcast_ref::<T>())
    }

    /// Remove and return the first entry of type `T`.
    pub fn take<T: OpaqueObject>(&mut self) -> Option<Box<T>> {
        let index = self.0.iter().position(|object| object.is::<T>())?;
        self.0.remove(index).downcast::<T>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct First(u32);
    impl OpaqueObject for First {}

    struct Second;
    impl OpaqueObject for Second {}

    #[test]
    fn entries_are_found_by_type() {
        let mut list = ExtList::new();
        list.push(Second);
        list.push(First(7));

        assert_eq!(list.find::<First>().map(|f| f.0), Some(7));
        assert!(list.take::<Second>().is_some());
        assert!(list.take::<Second>().is_none());
        assert_eq!(list.0.len(), 1);
    }
}
