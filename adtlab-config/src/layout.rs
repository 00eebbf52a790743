//! Render geometry configuration.
//!
//! Coordinates the simulators emit in their render models. Defaults match a
//! 800 px wide tree canvas, a 300x500 stack column and a 700 px bucket table.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geometry for every render model.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct LayoutConfig {
    #[validate(nested)]
    #[serde(default)]
    pub tree: TreeLayoutConfig,

    #[validate(nested)]
    #[serde(default)]
    pub list: RowLayoutConfig,

    #[validate(nested)]
    #[serde(default)]
    pub stack: StackLayoutConfig,

    #[validate(nested)]
    #[serde(default = "RowLayoutConfig::queue")]
    pub queue: RowLayoutConfig,

    #[validate(nested)]
    #[serde(default)]
    pub hash_table: BucketLayoutConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tree: TreeLayoutConfig::default(),
            list: RowLayoutConfig::default(),
            stack: StackLayoutConfig::default(),
            queue: RowLayoutConfig::queue(),
            hash_table: BucketLayoutConfig::default(),
        }
    }
}

/// Binary search tree canvas.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct TreeLayoutConfig {
    /// Canvas width; the root sits at `width / 2`.
    #[validate(range(min = 100.0, max = 10000.0))]
    pub width: f64,

    /// Vertical position of the root.
    #[validate(range(min = 0.0))]
    pub origin_y: f64,

    /// Vertical distance between depths.
    #[validate(range(min = 1.0))]
    pub row_height: f64,
}

impl Default for TreeLayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            origin_y: 50.0,
            row_height: 80.0,
        }
    }
}

/// Horizontal row of nodes (linked list, queue).
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct RowLayoutConfig {
    #[validate(range(min = 0.0))]
    pub origin_x: f64,

    #[validate(range(min = 1.0))]
    pub spacing: f64,

    #[validate(range(min = 0.0))]
    pub y: f64,
}

impl RowLayoutConfig {
    /// Queue row: slots 110 px apart starting at 50.
    pub fn queue() -> Self {
        Self {
            origin_x: 50.0,
            spacing: 110.0,
            y: 50.0,
        }
    }
}

impl Default for RowLayoutConfig {
    /// Linked list row: nodes 150 px apart, vertically centered on a 300 px canvas.
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            spacing: 150.0,
            y: 150.0,
        }
    }
}

/// Bottom-up stack column.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct StackLayoutConfig {
    #[validate(range(min = 1.0))]
    pub width: f64,

    #[validate(range(min = 1.0))]
    pub height: f64,

    #[validate(range(min = 1.0))]
    pub slot_height: f64,
}

impl Default for StackLayoutConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 500.0,
            slot_height: 60.0,
        }
    }
}

/// Hash table rows, one per bucket.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct BucketLayoutConfig {
    #[validate(range(min = 0.0))]
    pub origin_x: f64,

    #[validate(range(min = 0.0))]
    pub origin_y: f64,

    #[validate(range(min = 1.0))]
    pub row_height: f64,

    #[validate(range(min = 1.0))]
    pub entry_spacing: f64,
}

impl Default for BucketLayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 50.0,
            origin_y: 50.0,
            row_height: 40.0,
            entry_spacing: 120.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        LayoutConfig::default()
            .validate()
            .expect("Default layout should be valid");
    }

    #[test]
    fn queue_default_differs_from_list() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.list.spacing, 150.0);
        assert_eq!(layout.queue.spacing, 110.0);

        let parsed: LayoutConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(parsed, layout);
    }

    #[test]
    fn rejects_zero_spacing() {
        let mut layout = LayoutConfig::default();
        layout.list.spacing = 0.0;
        assert!(layout.validate().is_err());
    }
}
