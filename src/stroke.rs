// The pointer trail of a cell: ordered samples, consecutive pairs form the erase segments.

use crate::types::Position;

/// What happens to the trail when a new press starts on a cell that was
/// already scratched this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeRetention {
    /// Every press starts an empty trail; separate gestures are separate strokes.
    #[default]
    PerGesture,
    /// The trail lives for the whole round. A new press continues from the
    /// last sample of the previous gesture, so the two gestures get joined by
    /// a straight erase segment.
    Round,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokePath {
    points: Vec<Position>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample and hand back the segment it closes.
    /// The first sample yields a zero-length segment (a dab).
    pub fn push(&mut self, p: Position) -> (Position, Position) {
        let from = self.points.last().copied().unwrap_or(p);
        self.points.push(p);
        (from, p)
    }

    pub fn last(&self) -> Option<Position> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// All segments in temporal order.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_is_a_dab_then_segments_chain() {
        let mut path = StrokePath::new();
        let a = Position::new(1.0, 2.0);
        let b = Position::new(5.0, 2.0);
        let c = Position::new(5.0, 9.0);
        assert_eq!(path.push(a), (a, a));
        assert_eq!(path.push(b), (a, b));
        assert_eq!(path.push(c), (b, c));
        assert_eq!(path.segments().collect::<Vec<_>>(), vec![(a, b), (b, c)]);
        assert_eq!(path.last(), Some(c));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut path = StrokePath::new();
        path.push(Position::new(3.0, 3.0));
        path.clear();
        assert!(path.is_empty());
        let p = Position::new(7.0, 7.0);
        assert_eq!(path.push(p), (p, p));
    }
}
