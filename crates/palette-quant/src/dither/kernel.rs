//! Error diffusion kernel definition.
//!
//! A kernel specifies how a pixel's quantization residual is spread over
//! neighbors that have not been visited yet.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` and a weight. A neighbor receives
/// `residual * weight / divisor` per channel.
///
/// Every entry must point forward in row-major order (`dy > 0`, or
/// `dy == 0` with `dx > 0`). The quantizer relies on this to work in a
/// single in-place pass.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Weight of an entry as a fraction of the residual.
    #[inline]
    pub fn fraction(&self, weight: u8) -> f64 {
        weight as f64 / self.divisor as f64
    }

    /// Returns true if every entry points to a later pixel in row-major order.
    pub fn is_forward(&self) -> bool {
        self.entries
            .iter()
            .all(|&(dx, dy, _)| dy > 0 || (dy == 0 && dx > 0))
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
