//! The card's horizontal offset as a base-plus-delta animated value.
//!
//! The rendered offset is always `value + offset`. During a drag the base
//! lives in `offset` and the finger delta in `value`; flattening folds the
//! two back into a single resting `value`.

/// Owned animated scalar read by the render layer every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatedValue {
    value: f32,
    offset: f32,
}

impl AnimatedValue {
    /// Create a value resting at `value` with no base offset.
    pub fn new(value: f32) -> Self {
        Self { value, offset: 0.0 }
    }

    /// The rendered offset.
    pub fn current(&self) -> f32 {
        self.value + self.offset
    }

    /// The delta component.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The base component.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Set the delta component, keeping the base.
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    /// Set the base component, keeping the delta.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Fold the base into the delta so `offset` becomes zero.
    pub fn flatten_offset(&mut self) {
        self.value += self.offset;
        self.offset = 0.0;
    }

    /// Move the whole rendered offset into the base and zero the delta.
    pub fn extract_offset(&mut self) {
        self.offset += self.value;
        self.value = 0.0;
    }

    /// Hard reset both components.
    pub fn reset(&mut self, value: f32) {
        self.value = value;
        self.offset = 0.0;
    }

    /// Clamp the rendered offset into `[min, max]`, flattening it.
    pub fn clamp_into(&mut self, min: f32, max: f32) {
        let clamped = self.current().clamp(min, max);
        self.reset(clamped);
    }
}
