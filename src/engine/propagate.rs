// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label propagation across subsequent frames.
//!
//! Walks forward from a source shape, re-matching it frame by frame and
//! rewriting the matched shape's label until a stop condition: no
//! annotation, no match above threshold, or the label has caught up with a
//! prior assignment. The match target of each frame becomes the reference
//! geometry for the next, so the walk follows the object as it drifts.

use crate::error::Error;
use crate::history::{MultiFrameOperation, OperationKind, OperationLog};
use crate::io::AnnotationPort;
use crate::models::{from_records, to_records, FrameState, Shape};
use crate::track::Matcher;
use crate::util::CancelToken;

/// Which label a propagation rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    Primary,
    Secondary,
}

/// Why a propagation run ended.
#[derive(Debug)]
pub enum StopReason {
    /// Ran out of frames.
    EndOfSequence,
    /// A frame had no annotation.
    NoAnnotation,
    /// No shape cleared the IOU threshold.
    NoMatch,
    /// The matched shape already carries the propagated label.
    LabelCaughtUp,
    Cancelled,
    /// Persisting a frame failed; frames already written are kept.
    Io(Error),
}

#[derive(Debug)]
pub struct PropagationReport {
    /// Frames whose label was rewritten and persisted.
    pub frames_updated: usize,
    pub stop: StopReason,
}

/// Forward label propagation engine.
pub struct PropagationEngine<'a, P: AnnotationPort> {
    port: &'a mut P,
    matcher: Matcher,
}

impl<'a, P: AnnotationPort> PropagationEngine<'a, P> {
    pub fn new(port: &'a mut P, matcher: Matcher) -> Self {
        Self { port, matcher }
    }

    /// Propagate `new_label` from `source` (on `frames[start]`) through the
    /// following frames, committing the result to `log` as one operation.
    ///
    /// Not reentrant; callers serialize multi-frame operations.
    pub fn propagate(
        &mut self,
        log: &mut OperationLog,
        frames: &[String],
        start: usize,
        source: &Shape,
        field: LabelField,
        new_label: &str,
        cancel: &CancelToken,
    ) -> PropagationReport {
        log::info!(
            "propagating {:?} label '{}' from frame {}",
            field,
            new_label,
            start
        );

        let mut operation = MultiFrameOperation::new(
            OperationKind::LabelPropagation,
            format!("Propagate '{new_label}'"),
        );
        let mut prev_shape = source.clone();
        let mut frames_updated = 0;

        let stop = 'walk: {
            for frame_id in frames.iter().skip(start + 1) {
                if cancel.is_cancelled() {
                    log::info!("propagation cancelled at {frame_id}");
                    break 'walk StopReason::Cancelled;
                }

                let Some(records) = self.port.load_shapes(frame_id) else {
                    log::debug!("no annotation at {frame_id}, stopping");
                    break 'walk StopReason::NoAnnotation;
                };
                if records.is_empty() {
                    break 'walk StopReason::NoAnnotation;
                }
                let mut shapes = from_records(&records);

                let Some((matched, iou)) = self.matcher.best_match(&prev_shape, &shapes) else {
                    log::debug!("no match at {frame_id}, stopping");
                    break 'walk StopReason::NoMatch;
                };

                let current = match field {
                    LabelField::Primary => shapes[matched].label.clone(),
                    LabelField::Secondary => shapes[matched].label2.clone().unwrap_or_default(),
                };
                if current == new_label {
                    // Caught up with a previous assignment; overwriting
                    // would cascade through the already-labeled stretch.
                    log::debug!("label already '{new_label}' at {frame_id}, stopping");
                    break 'walk StopReason::LabelCaughtUp;
                }

                log::debug!("match at {frame_id} (iou {iou:.2}, was '{current}')");
                let before = FrameState::new(frame_id.clone(), shapes.clone());
                match field {
                    LabelField::Primary => shapes[matched].label = new_label.to_string(),
                    LabelField::Secondary => shapes[matched].label2 = Some(new_label.to_string()),
                }
                let after = FrameState::new(frame_id.clone(), shapes.clone());

                if let Err(e) = self.port.save_shapes(frame_id, &to_records(&shapes)) {
                    log::warn!("failed to save {frame_id}: {e}");
                    break 'walk StopReason::Io(e);
                }

                operation.record(before, after);
                // Follow the matched geometry, not the original source.
                prev_shape = shapes[matched].clone();
                frames_updated += 1;
            }
            StopReason::EndOfSequence
        };

        log.record_multi(operation);
        log::info!("propagated to {frames_updated} frames ({stop:?})");
        PropagationReport {
            frames_updated,
            stop,
        }
    }
}
