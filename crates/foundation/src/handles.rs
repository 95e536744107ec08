/// Generational handle: `(index, generation)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }

    /// Same slot, next generation. Used when a slot is recycled.
    pub fn bumped(self) -> Self {
        Handle(self.0, self.1.wrapping_add(1))
    }
}
