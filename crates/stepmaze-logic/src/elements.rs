//! Challenge-mode element placement records.
//!
//! Elements (dogs, bones, shields, special items) are opaque to the maze
//! algorithms: a level only stores a list of `{type, detectionSize}`
//! records. This module derives the allowed counts for a maze size and
//! turns a player's selection into that list.

use crate::constants::element_types;
use serde::{Deserialize, Serialize};

/// A known element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Dog,
    Bones,
    Shield,
    Special,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Dog => element_types::DOG,
            ElementKind::Bones => element_types::BONES,
            ElementKind::Shield => element_types::SHIELD,
            ElementKind::Special => element_types::SPECIAL,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            element_types::DOG => Some(ElementKind::Dog),
            element_types::BONES => Some(ElementKind::Bones),
            element_types::SHIELD => Some(ElementKind::Shield),
            element_types::SPECIAL => Some(ElementKind::Special),
            _ => None,
        }
    }
}

/// One element record as stored in a level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementData {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(rename = "detectionSize", default)]
    pub detection_size: f32,
}

impl ElementData {
    pub fn new(kind: ElementKind, detection_size: f32) -> Self {
        Self {
            element_type: kind.name().to_string(),
            detection_size,
        }
    }

    /// `None` for element types this crate does not know about.
    pub fn kind(&self) -> Option<ElementKind> {
        ElementKind::from_name(&self.element_type)
    }
}

/// Allowed element counts for a square maze of side `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRanges {
    pub dog_min: usize,
    pub dog_max: usize,
    pub bones_min: usize,
    pub bones_max: usize,
    /// Dogs and shields share a range.
    pub shield_min: usize,
    pub shield_max: usize,
    pub special_count: usize,
    pub detection_min: usize,
    pub detection_max: usize,
}

impl ElementRanges {
    pub fn for_size(size: usize) -> Self {
        let area = size * size;
        let dog_min = 2 + size.saturating_sub(7);
        let dog_max = area / 10;
        Self {
            dog_min,
            dog_max,
            bones_min: area / 10,
            bones_max: area / 5,
            shield_min: dog_min,
            shield_max: dog_max,
            special_count: size / 2,
            detection_min: 1,
            detection_max: size.max(1),
        }
    }

    /// Clamp a requested count for `kind` into range. Specials have a fixed
    /// count.
    pub fn clamp_count(&self, kind: ElementKind, requested: usize) -> usize {
        match kind {
            ElementKind::Dog => clamp(requested, self.dog_min, self.dog_max),
            ElementKind::Bones => clamp(requested, self.bones_min, self.bones_max),
            ElementKind::Shield => clamp(requested, self.shield_min, self.shield_max),
            ElementKind::Special => self.special_count,
        }
    }

    pub fn clamp_detection(&self, requested: usize) -> usize {
        clamp(requested, self.detection_min, self.detection_max)
    }
}

// `usize::clamp` panics when min > max, which small sizes can produce.
fn clamp(value: usize, min: usize, max: usize) -> usize {
    value.max(min).min(max)
}

/// Dogs plus their detection radius, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DogSelection {
    pub count: usize,
    pub detection_size: usize,
}

/// The element toggles and counts a player picked for a challenge level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementSelection {
    pub dogs: Option<DogSelection>,
    /// Ignored without dogs.
    pub bones: Option<usize>,
    /// Ignored without dogs.
    pub shields: Option<usize>,
    pub specials: bool,
}

impl ElementSelection {
    /// Build the element list for a maze of side `size`, clamping every
    /// count into [`ElementRanges::for_size`].
    pub fn build(&self, size: usize) -> Vec<ElementData> {
        let ranges = ElementRanges::for_size(size);
        let mut elements = Vec::new();

        if let Some(dogs) = self.dogs {
            let count = ranges.clamp_count(ElementKind::Dog, dogs.count);
            let detection = ranges.clamp_detection(dogs.detection_size) as f32;
            elements.extend((0..count).map(|_| ElementData::new(ElementKind::Dog, detection)));

            if let Some(bones) = self.bones {
                let count = ranges.clamp_count(ElementKind::Bones, bones);
                elements.extend((0..count).map(|_| ElementData::new(ElementKind::Bones, 0.0)));
            }
            if let Some(shields) = self.shields {
                let count = ranges.clamp_count(ElementKind::Shield, shields);
                elements.extend((0..count).map(|_| ElementData::new(ElementKind::Shield, 0.0)));
            }
        }

        if self.specials {
            elements.extend(
                (0..ranges.special_count).map(|_| ElementData::new(ElementKind::Special, 0.0)),
            );
        }
        elements
    }

    /// Recover a selection from a stored element list. Unknown types are
    /// ignored; a missing dog detection size falls back to `size / 2`.
    pub fn from_elements(elements: &[ElementData], size: usize) -> Self {
        let counts = ElementCounts::tally(elements);
        let dogs = (counts.dogs > 0).then(|| {
            let detection = elements
                .iter()
                .find(|e| e.kind() == Some(ElementKind::Dog))
                .map(|e| e.detection_size.round() as usize)
                .filter(|&d| d > 0)
                .unwrap_or(size / 2);
            DogSelection {
                count: counts.dogs,
                detection_size: detection,
            }
        });
        let has_dogs = dogs.is_some();
        Self {
            dogs,
            bones: (has_dogs && counts.bones > 0).then_some(counts.bones),
            shields: (has_dogs && counts.shields > 0).then_some(counts.shields),
            specials: counts.specials > 0,
        }
    }
}

/// Per-kind element totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementCounts {
    pub dogs: usize,
    pub bones: usize,
    pub shields: usize,
    pub specials: usize,
    pub unknown: usize,
}

impl ElementCounts {
    pub fn tally(elements: &[ElementData]) -> Self {
        let mut counts = Self::default();
        for e in elements {
            match e.kind() {
                Some(ElementKind::Dog) => counts.dogs += 1,
                Some(ElementKind::Bones) => counts.bones += 1,
                Some(ElementKind::Shield) => counts.shields += 1,
                Some(ElementKind::Special) => counts.specials += 1,
                None => counts.unknown += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_by_size() {
        let r7 = ElementRanges::for_size(7);
        assert_eq!((r7.dog_min, r7.dog_max), (2, 4));
        assert_eq!((r7.bones_min, r7.bones_max), (4, 9));
        assert_eq!(r7.special_count, 3);
        assert_eq!((r7.detection_min, r7.detection_max), (1, 7));

        let r11 = ElementRanges::for_size(11);
        assert_eq!((r11.dog_min, r11.dog_max), (6, 12));
        assert_eq!((r11.bones_min, r11.bones_max), (12, 24));
        assert_eq!(r11.special_count, 5);
    }

    #[test]
    fn test_clamping() {
        let r = ElementRanges::for_size(9);
        assert_eq!(r.clamp_count(ElementKind::Dog, 0), 4);
        assert_eq!(r.clamp_count(ElementKind::Dog, 100), 8);
        assert_eq!(r.clamp_count(ElementKind::Special, 100), 4);
        assert_eq!(r.clamp_detection(0), 1);
        assert_eq!(r.clamp_detection(20), 9);
    }

    #[test]
    fn test_build_requires_dogs_for_bones_and_shields() {
        let selection = ElementSelection {
            dogs: None,
            bones: Some(5),
            shields: Some(3),
            specials: true,
        };
        let elements = selection.build(7);
        let counts = ElementCounts::tally(&elements);
        assert_eq!(counts.bones, 0);
        assert_eq!(counts.shields, 0);
        assert_eq!(counts.specials, 3);
    }

    #[test]
    fn test_build_and_recover() {
        let selection = ElementSelection {
            dogs: Some(DogSelection {
                count: 3,
                detection_size: 4,
            }),
            bones: Some(6),
            shields: Some(2),
            specials: false,
        };
        let elements = selection.build(7);
        assert_eq!(elements.len(), 11);
        assert!(elements
            .iter()
            .filter(|e| e.kind() == Some(ElementKind::Dog))
            .all(|e| e.detection_size == 4.0));
        assert_eq!(ElementSelection::from_elements(&elements, 7), selection);
    }

    #[test]
    fn test_unknown_elements_are_kept_opaque() {
        let elements = vec![
            ElementData {
                element_type: "Lantern".into(),
                detection_size: 1.0,
            },
            ElementData::new(ElementKind::Special, 0.0),
        ];
        let counts = ElementCounts::tally(&elements);
        assert_eq!(counts.unknown, 1);
        assert_eq!(counts.specials, 1);
        let json = serde_json::to_string(&elements[0]).unwrap();
        assert_eq!(json, r#"{"type":"Lantern","detectionSize":1.0}"#);
    }
}
