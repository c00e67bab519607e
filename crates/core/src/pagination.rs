//! Skip/take pagination window for list endpoints.
//!
//! Out-of-range input never fails: negative values collapse to zero and an
//! empty window simply yields no rows.

/// Rows skipped when the caller gives no `skip`.
pub const DEFAULT_SKIP: i64 = 0;

/// Rows returned when the caller gives no `take`.
pub const DEFAULT_TAKE: i64 = 50;

/// A normalized `skip`/`take` window. Both fields are always `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub take: i64,
}

impl Page {
    /// Build a window from optional user input, applying defaults and
    /// clamping negatives to zero.
    pub fn new(skip: Option<i64>, take: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(DEFAULT_SKIP).max(0),
            take: take.unwrap_or(DEFAULT_TAKE).max(0),
        }
    }

    /// Apply the window to an already-ordered iterator.
    pub fn slice<I: IntoIterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items
            .into_iter()
            .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.take).unwrap_or(usize::MAX))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
