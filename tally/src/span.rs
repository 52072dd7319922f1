use serde::Serialize;

/// Range of character offsets into the input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    /// inclusive, 0-indexed
    pub start: usize,
    /// exclusive
    pub end: usize,
}

impl Span {
    pub const fn of(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn pos(pos: usize) -> Self {
        Self::of(pos, pos + 1)
    }

    pub const fn across(a: Self, b: Self) -> Self {
        Self::of(a.start, b.end)
    }

    pub const fn after(&self) -> Self {
        Self::pos(self.end)
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn intersects(&self, other: &Self) -> bool {
        self.contains(other.start) || other.contains(self.start)
    }

    pub const fn contains(&self, pos: usize) -> bool {
        self.start <= pos && self.end > pos
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn across_and_after() {
        let s = Span::across(Span::pos(2), Span::of(5, 8));
        assert_eq!(s, Span::of(2, 8));
        assert_eq!(s.after(), Span::pos(8));
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn intersecting() {
        assert!(Span::of(0, 4).intersects(&Span::of(3, 6)));
        assert!(Span::of(3, 6).intersects(&Span::of(0, 4)));
        assert!(!Span::of(0, 3).intersects(&Span::of(3, 6)));
        assert!(Span::of(1, 1).is_empty());
    }
}
