use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Snake body, head first. `body_set` mirrors `body` for O(1) occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Direction,
}

impl Snake {
    /// A straight snake whose tail trails behind `head`, opposite to `direction`.
    pub fn new(head: Point, direction: Direction, length: usize) -> Self {
        let trailing = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut segment = head;
        for _ in 0..length.max(1) {
            body.push_back(segment);
            segment = segment.step(trailing);
        }
        let body_set = body.iter().copied().collect();

        Self {
            body,
            body_set,
            direction,
            pending_direction: direction,
        }
    }

    /// Head first. Consecutive segments must be 4-adjacent and `direction`
    /// must not point back into the neck.
    pub fn from_segments(segments: Vec<Point>, direction: Direction) -> Result<Self, String> {
        if segments.is_empty() {
            return Err("Snake must have at least one segment".to_string());
        }
        if let Some(pair) = segments.windows(2).find(|pair| !pair[0].is_adjacent(pair[1])) {
            return Err(format!(
                "Segments ({}, {}) and ({}, {}) are not adjacent",
                pair[0].x, pair[0].y, pair[1].x, pair[1].y
            ));
        }
        if let [head, neck, ..] = segments.as_slice()
            && head.step(direction) == *neck
        {
            return Err(format!("Direction {:?} points back into the neck", direction));
        }

        let body: VecDeque<Point> = segments.into();
        let body_set: HashSet<Point> = body.iter().copied().collect();
        if body_set.len() != body.len() {
            return Err("Snake segments must not overlap".to_string());
        }

        Ok(Self {
            body,
            body_set,
            direction,
            pending_direction: direction,
        })
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn push_head(&mut self, head: Point) {
        self.body.push_front(head);
        self.body_set.insert(head);
    }

    /// Moves one cell without growing and returns the cell the tail vacated.
    /// `head` must not be part of the current body.
    pub fn slide(&mut self, head: Point) -> Point {
        self.push_head(head);
        let tail = self.body.pop_back().expect("Snake body should never be empty");
        self.body_set.remove(&tail);
        tail
    }
}
