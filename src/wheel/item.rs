//! Weighted prize items

use serde::{Deserialize, Serialize};

use crate::error::WheelError;

/// One prize on the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub id: u32,
    /// Relative weight (must be positive)
    pub weight: f64,
    pub label: String,
    /// Fill color hint for the renderer
    #[serde(default)]
    pub color: String,
}

impl WeightedItem {
    pub fn new(id: u32, weight: f64, label: impl Into<String>) -> Self {
        Self {
            id,
            weight,
            label: label.into(),
            color: String::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Check the invariants shared by selection and layout and return the
/// items sorted by id together with their total weight.
pub fn validated_by_id(items: &[WeightedItem]) -> Result<(Vec<&WeightedItem>, f64), WheelError> {
    if items.is_empty() {
        return Err(WheelError::EmptyItems);
    }

    let mut sorted: Vec<&WeightedItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.id);

    for pair in sorted.windows(2) {
        if pair[0].id == pair[1].id {
            return Err(WheelError::DuplicateId { id: pair[0].id });
        }
    }

    let mut total = 0.0;
    for item in &sorted {
        if !(item.weight.is_finite() && item.weight > 0.0) {
            return Err(WheelError::InvalidWeight {
                id: item.id,
                weight: item.weight,
            });
        }
        total += item.weight;
    }

    if !(total.is_finite() && total > 0.0) {
        return Err(WheelError::NonPositiveTotal(total));
    }

    Ok((sorted, total))
}

/// The stock prize table: three real prizes and five blanks
pub fn default_prizes() -> Vec<WeightedItem> {
    vec![
        WeightedItem::new(1, 3.0, "Apple Vision Pro").with_color("#E7EFF3"),
        WeightedItem::new(2, 7.0, "LG TV").with_color("#ffffff"),
        WeightedItem::new(3, 10.0, "Samsung Air Conditioner").with_color("#E7EFF3"),
        WeightedItem::new(4, 20.0, "Blank").with_color("#ffffff"),
        WeightedItem::new(5, 20.0, "Blank").with_color("#E7EFF3"),
        WeightedItem::new(6, 20.0, "Blank").with_color("#ffffff"),
        WeightedItem::new(7, 10.0, "Blank").with_color("#E7EFF3"),
        WeightedItem::new(8, 10.0, "Blank").with_color("#ffffff"),
    ]
}
