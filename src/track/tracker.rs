// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame-to-frame identity assignment.
//!
//! Matched shapes inherit the track id and label of their previous-frame
//! counterpart; everything else gets a fresh id from the session counter.
//! Stateless beyond the previous frame's shapes, no motion prediction.

use crate::models::Shape;
use crate::track::matcher::Matcher;

/// Continuous tracker for a labelling session.
#[derive(Debug)]
pub struct Tracker {
    matcher: Matcher,
    next_track_id: u32,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new(Matcher::default())
    }
}

impl Tracker {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            next_track_id: 1,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Carry identities from `prev` into `curr`.
    ///
    /// Returns the number of current shapes that inherited an identity.
    /// With an empty previous frame every shape is treated as a new object.
    pub fn track(&mut self, prev: &[Shape], curr: &mut [Shape]) -> usize {
        if curr.is_empty() {
            return 0;
        }
        if prev.is_empty() {
            for shape in curr.iter_mut() {
                shape.track_id = Some(self.fresh_id());
            }
            return 0;
        }

        let pairs = self.matcher.match_sets(prev, curr);
        let mut matched = vec![false; curr.len()];
        for pair in &pairs {
            let source = &prev[pair.prev];
            curr[pair.curr].track_id = source.track_id;
            curr[pair.curr].label = source.label.clone();
            matched[pair.curr] = true;
            log::debug!(
                "tracked shape {} -> {} (iou {:.2}, id {:?})",
                pair.prev,
                pair.curr,
                pair.iou,
                source.track_id
            );
        }

        for (shape, was_matched) in curr.iter_mut().zip(matched.iter()) {
            if !was_matched {
                shape.track_id = Some(self.fresh_id());
            }
        }
        pairs.len()
    }

    /// Reset the session: the next assigned id starts over at 1.
    pub fn reset(&mut self) {
        self.next_track_id = 1;
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_track_id;
        self.next_track_id += 1;
        id
    }
}
