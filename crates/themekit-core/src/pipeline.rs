/*
 * pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Default processor pipeline for new theme targets.
 */

//! Default processor pipeline.
//!
//! Production targets get three stages:
//!
//! 1. `transform` - the CSS transform, with inline source maps when enabled
//! 2. `combine-duplicates` - merge rules that share a selector
//! 3. `minify`
//!
//! Debug targets stop after `transform` so the output stays readable and
//! traceable to its sources.

use serde_json::json;

use crate::types::ProcessorConfig;

/// The CSS transform stage.
pub const TRANSFORM: &str = "transform";

/// Duplicate-selector combination.
pub const COMBINE_DUPLICATES: &str = "combine-duplicates";

pub const MINIFY: &str = "minify";

/// Build the pipeline used when a create request names no processors.
pub fn default_processors(source_map: bool, debug: bool) -> Vec<ProcessorConfig> {
    let map = if source_map {
        json!({ "inline": true })
    } else {
        json!(false)
    };

    let mut processors = vec![ProcessorConfig::new(TRANSFORM).with_option("map", map)];
    if !debug {
        processors.push(ProcessorConfig::new(COMBINE_DUPLICATES));
        processors.push(ProcessorConfig::new(MINIFY));
    }
    processors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(processors: &[ProcessorConfig]) -> Vec<&str> {
        processors.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_production_pipeline_has_three_stages() {
        let processors = default_processors(true, false);
        assert_eq!(names(&processors), vec![TRANSFORM, COMBINE_DUPLICATES, MINIFY]);
        assert_eq!(processors[0].options["map"], json!({ "inline": true }));
    }

    #[test]
    fn test_debug_pipeline_only_transforms() {
        let processors = default_processors(true, true);
        assert_eq!(names(&processors), vec![TRANSFORM]);
    }

    #[test]
    fn test_source_map_disabled() {
        let processors = default_processors(false, false);
        assert_eq!(processors[0].options["map"], json!(false));
        assert_eq!(processors.len(), 3);
    }
}
