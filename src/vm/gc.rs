use gc::{Gc, GcCell, Trace};

/// A garbage-collected, interior-mutable handle
pub type GcShared<T> = Gc<GcCell<T>>;

pub fn shared<T: Trace>(x: T) -> GcShared<T> {
    Gc::new(GcCell::new(x))
}
