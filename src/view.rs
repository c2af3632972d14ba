use std::ops::Index;

/// Non-owning view of contiguous data.
///
/// A view is a cursor: `drop`, `take` and `advance` only move its bounds, the
/// borrowed buffer is never written to. Over-dropping or over-taking clamps to
/// the available items instead of failing.
#[derive(Debug)]
pub struct View<'a, T> {
    data: &'a [T],
}

impl<'a, T> Clone for View<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for View<'a, T> {}

impl<'a, T> Default for View<'a, T> {
    fn default() -> Self {
        Self { data: &[] }
    }
}

impl<'a, T> View<'a, T> {
    pub const fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A view is valid when it has at least one item left.
    pub const fn is_valid(&self) -> bool {
        !self.data.is_empty()
    }

    pub const fn as_slice(&self) -> &'a [T] {
        self.data
    }

    pub fn front(&self) -> Option<&'a T> {
        self.data.first()
    }

    pub fn back(&self) -> Option<&'a T> {
        self.data.last()
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.data.get(index)
    }

    /// Step past the first item and return it.
    pub fn advance(&mut self) -> Option<&'a T> {
        let (first, rest) = self.data.split_first()?;
        self.data = rest;

        Some(first)
    }

    /// Drop the first (`n > 0`) or last (`n < 0`) `|n|` items.
    pub fn drop(&mut self, n: isize) -> &mut Self {
        let len = self.signed_len();
        let n = n.clamp(-len, len);

        if n >= 0 {
            self.data = &self.data[n.unsigned_abs()..];
        } else {
            self.data = &self.data[..(len + n).unsigned_abs()];
        }

        self
    }

    /// Keep the first (`n > 0`) or last (`n < 0`) `|n|` items.
    pub fn take(&mut self, n: isize) -> &mut Self {
        let len = self.signed_len();
        let n = n.clamp(-len, len);

        if n >= 0 {
            self.data = &self.data[..n.unsigned_abs()];
        } else {
            self.data = &self.data[(len + n).unsigned_abs()..];
        }

        self
    }

    pub fn dropped(mut self, n: isize) -> Self {
        self.drop(n);
        self
    }

    pub fn taken(mut self, n: isize) -> Self {
        self.take(n);
        self
    }

    /// Identity equality: same start and same length over the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data.as_ptr(), other.data.as_ptr()) && self.len() == other.len()
    }

    /// Item offset of this view inside `base`, or `None` when it does not lie
    /// within `base`.
    pub fn offset_from(&self, base: &View<'_, T>) -> Option<usize> {
        let size = std::mem::size_of::<T>().max(1);
        let start = base.data.as_ptr() as usize;
        let at = self.data.as_ptr() as usize;

        if at < start || at + self.len() * size > start + base.len() * size {
            return None;
        }

        Some((at - start) / size)
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }

    fn signed_len(&self) -> isize {
        isize::try_from(self.data.len()).unwrap_or(isize::MAX)
    }
}

impl<'a, T> From<&'a [T]> for View<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for View<'a, T> {
    fn from(data: &'a [T; N]) -> Self {
        Self::new(data)
    }
}

impl<'a, T> AsRef<[T]> for View<'a, T> {
    fn as_ref(&self) -> &[T] {
        self.data
    }
}

impl<'a, T> Index<usize> for View<'a, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

// Content equality. Use `ptr_eq` to compare identity.
impl<'a, 'b, T: PartialEq> PartialEq<View<'b, T>> for View<'a, T> {
    fn eq(&self, other: &View<'b, T>) -> bool {
        self.data == other.data
    }
}

impl<'a, T: Eq> Eq for View<'a, T> {}

impl<'a, T: PartialEq> PartialEq<[T]> for View<'a, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.data == other
    }
}

impl<'a, 'b, T: PartialEq> PartialEq<&'b [T]> for View<'a, T> {
    fn eq(&self, other: &&'b [T]) -> bool {
        self.data == *other
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, 'v, T> IntoIterator for &'v View<'a, T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
