// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! File-backed annotation store.
//!
//! One annotation file per frame, named after the frame's file stem, in
//! YAML or JSON format. Covers the simple sidecar layout; richer formats
//! live in the host application's format layer.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::AnnotationPort;
use crate::models::ShapeRecord;

/// On-disk annotation format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationFormat {
    Json,
    Yaml,
}

impl AnnotationFormat {
    fn extension(self) -> &'static str {
        match self {
            AnnotationFormat::Json => "json",
            AnnotationFormat::Yaml => "yaml",
        }
    }
}

/// Per-frame sidecar files in a single annotation directory.
#[derive(Debug)]
pub struct FilePort {
    dir: PathBuf,
    format: AnnotationFormat,
}

impl FilePort {
    pub fn new(dir: impl Into<PathBuf>, format: AnnotationFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    fn annotation_path(&self, frame_id: &str) -> PathBuf {
        let stem = Path::new(frame_id)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| frame_id.to_string());
        self.dir.join(stem).with_extension(self.format.extension())
    }
}

impl AnnotationPort for FilePort {
    fn load_shapes(&self, frame_id: &str) -> Option<Vec<ShapeRecord>> {
        let path = self.annotation_path(frame_id);
        if !path.is_file() {
            return None;
        }
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        let parsed = match self.format {
            AnnotationFormat::Json => serde_json::from_str(&text).map_err(|e| e.to_string()),
            AnnotationFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        };
        match parsed {
            Ok(shapes) => Some(shapes),
            Err(e) => {
                log::warn!("failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save_shapes(&mut self, frame_id: &str, shapes: &[ShapeRecord]) -> Result<()> {
        let path = self.annotation_path(frame_id);
        let text = match self.format {
            AnnotationFormat::Json => serde_json::to_string_pretty(shapes)?,
            AnnotationFormat::Yaml => serde_yaml::to_string(shapes)?,
        };
        std::fs::write(&path, text)?;
        log::debug!("saved {} shapes to {}", shapes.len(), path.display());
        Ok(())
    }
}
