use std::fmt;
use std::slice::Chunks;

/// Fixed-size pages over an already computed result list. Nothing is copied.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// A `page_size` of zero is treated as one.
    pub fn new(items: &'a [T], page_size: usize) -> Self { Self { items, page_size: page_size.max(1) } }

    pub fn page_size(&self) -> usize { self.page_size }

    /// Number of pages; zero for an empty list.
    pub fn len(&self) -> usize { self.items.len().div_ceil(self.page_size) }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// A fresh pass over the pages. Can be called any number of times.
    pub fn pages(&self) -> Pages<'a, T> { Pages { chunks: self.items.chunks(self.page_size) } }
}

impl<'a, T> IntoIterator for Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Pages<'a, T> { self.pages() }
}

impl<'a, T> IntoIterator for &Paginator<'a, T> {
    type Item = Page<'a, T>;
    type IntoIter = Pages<'a, T>;

    fn into_iter(self) -> Pages<'a, T> { self.pages() }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Paginator<'_, T> { Paginator::new(items, page_size) }

#[derive(Debug, Clone)]
pub struct Pages<'a, T> {
    chunks: Chunks<'a, T>,
}

impl<'a, T> Iterator for Pages<'a, T> {
    type Item = Page<'a, T>;

    fn next(&mut self) -> Option<Page<'a, T>> { self.chunks.next().map(|items| Page { items }) }

    fn size_hint(&self) -> (usize, Option<usize>) { self.chunks.size_hint() }
}

impl<T> ExactSizeIterator for Pages<'_, T> {}

/// One contiguous slice of results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] { self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
