/// Position in a paginated list. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub total: usize,
}

impl Page {
    pub fn previous(&self) -> Option<usize> {
        (self.number > 1).then(|| self.number - 1)
    }

    pub fn next(&self) -> Option<usize> {
        (self.number < self.total).then(|| self.number + 1)
    }
}

/// Slice of `items` for the requested page. Out-of-range requests are clamped
/// to the first or last page. An empty list still has one (empty) page.
pub fn paginate<T>(items: &[T], requested: Option<usize>, size: usize) -> (&[T], Page) {
    let size = size.max(1);
    let total = items.len().div_ceil(size).max(1);
    let number = requested.unwrap_or(1).clamp(1, total);

    let start = (number - 1) * size;
    let end = (start + size).min(items.len());
    let slice = items.get(start..end).unwrap_or(&[]);

    (slice, Page { number, total })
}
