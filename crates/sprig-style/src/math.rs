//! Arithmetic over possibly-indefinite lengths.
//!
//! [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-available)
//!
//! "Determine the available main and cross space for the flex items. For
//! each dimension, if that dimension of the flex container's content box is
//! a definite size, use that; [...] otherwise, subtract the flex container's
//! margin, border, and padding from the space available to the flex
//! container in that dimension and use that value. This might result in an
//! infinite value."
//!
//! An indefinite length is `None`. Operations on an indefinite left-hand
//! side stay indefinite; an indefinite right-hand side leaves the left-hand
//! side untouched, which is exactly what "no min" or "no max" means.

/// Min/max/add/sub where either side may be indefinite.
pub trait MaybeMath<Rhs> {
    /// `self.min(rhs)`, ignoring an indefinite `rhs`.
    #[must_use]
    fn maybe_min(self, rhs: Rhs) -> Self;
    /// `self.max(rhs)`, ignoring an indefinite `rhs`.
    #[must_use]
    fn maybe_max(self, rhs: Rhs) -> Self;
    /// `self + rhs`, ignoring an indefinite `rhs`.
    #[must_use]
    fn maybe_add(self, rhs: Rhs) -> Self;
    /// `self - rhs`, ignoring an indefinite `rhs`.
    #[must_use]
    fn maybe_sub(self, rhs: Rhs) -> Self;
}

impl MaybeMath<Option<f32>> for Option<f32> {
    fn maybe_min(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (l, _) => l,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l.max(r)),
            (l, _) => l,
        }
    }

    fn maybe_add(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l + r),
            (l, _) => l,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> Self {
        match (self, rhs) {
            (Some(l), Some(r)) => Some(l - r),
            (l, _) => l,
        }
    }
}

impl MaybeMath<f32> for Option<f32> {
    fn maybe_min(self, rhs: f32) -> Self {
        self.map(|l| l.min(rhs))
    }

    fn maybe_max(self, rhs: f32) -> Self {
        self.map(|l| l.max(rhs))
    }

    fn maybe_add(self, rhs: f32) -> Self {
        self.map(|l| l + rhs)
    }

    fn maybe_sub(self, rhs: f32) -> Self {
        self.map(|l| l - rhs)
    }
}

impl MaybeMath<Option<f32>> for f32 {
    fn maybe_min(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |r| self.min(r))
    }

    fn maybe_max(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |r| self.max(r))
    }

    fn maybe_add(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |r| self + r)
    }

    fn maybe_sub(self, rhs: Option<f32>) -> Self {
        rhs.map_or(self, |r| self - r)
    }
}

/// [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
///
/// Clamp `value` by its used min and max sizes. The max is applied first so
/// that a min larger than the max wins, as
/// [CSS 2 § 10.4](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
/// requires.
#[must_use]
pub fn clamp_size(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    value.maybe_min(max).maybe_max(min)
}

/// [`clamp_size`] for a possibly-indefinite value.
#[must_use]
pub fn clamp_maybe(value: Option<f32>, min: Option<f32>, max: Option<f32>) -> Option<f32> {
    value.map(|v| clamp_size(v, min, max))
}

/// `Some(value)` when `value` is finite, `None` otherwise.
#[must_use]
pub fn finite(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

/// Normalize a used length: non-finite values become 0, negatives floor
/// at 0.
#[must_use]
pub fn sanitize_length(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
