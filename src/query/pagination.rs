//! Listing pagination

/// One page of a listing; 1-indexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_number: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Previous page number, if that page has items
    pub fn prev(&self) -> Option<usize> {
        (self.page_number > 1 && self.page_number <= self.total_pages)
            .then(|| self.page_number - 1)
    }

    /// Next page number, if that page has items
    pub fn next(&self) -> Option<usize> {
        (self.page_number < self.total_pages).then(|| self.page_number + 1)
    }
}

/// Number of pages needed for `len` items; zero when there are no items
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice out page `page_number` (1-indexed).
///
/// Out-of-range pages, including page 0, come back empty rather than as an
/// error so one bad request cannot fail a render pass.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);

    let items = if page_number == 0 || page_number > total_pages {
        &items[..0]
    } else {
        let start = page_size * (page_number - 1);
        let end = (start + page_size).min(items.len());
        &items[start..end]
    };

    Page {
        items,
        page_number,
        total_pages,
    }
}

/// Interpret a `?page=` query value.
///
/// Missing, non-numeric and zero values mean the first page; negative values
/// map to page 0, which is always empty.
pub fn page_param(raw: Option<&str>) -> usize {
    match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(n)) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX),
        Some(Ok(n)) if n < 0 => 0,
        _ => 1,
    }
}
