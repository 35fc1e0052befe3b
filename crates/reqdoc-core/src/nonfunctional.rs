//! Editing model for non-functional requirements: one text slot per category.
//!
//! Writing a category replaces its slot, so a list produced by [`NonFunctionalSheet::requirements`]
//! never holds two requirements for the same category.

use crate::model::{NfrCategory, NonFunctionalRequirement};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Slot {
    id: String,
    description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NonFunctionalSheet {
    slots: BTreeMap<NfrCategory, Slot>,
}

impl NonFunctionalSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a sheet from a stored list. Later entries for a category replace earlier ones.
    pub fn from_requirements(requirements: &[NonFunctionalRequirement]) -> Self {
        let mut sheet = Self::new();
        for req in requirements {
            if req.description.trim().is_empty() {
                continue;
            }
            sheet.slots.insert(
                req.category,
                Slot {
                    id: req.id.clone(),
                    description: req.description.clone(),
                },
            );
        }
        sheet
    }

    /// Replaces the text for `category`. Blank text clears the slot.
    pub fn set(&mut self, category: NfrCategory, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.slots.remove(&category);
            return;
        }
        match self.slots.get_mut(&category) {
            Some(slot) => slot.description = text,
            None => {
                self.slots.insert(
                    category,
                    Slot {
                        id: category.as_str().to_string(),
                        description: text,
                    },
                );
            }
        }
    }

    pub fn get(&self, category: NfrCategory) -> Option<&str> {
        self.slots.get(&category).map(|s| s.description.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Filled slots in category order.
    pub fn requirements(&self) -> Vec<NonFunctionalRequirement> {
        self.slots
            .iter()
            .map(|(category, slot)| NonFunctionalRequirement {
                id: slot.id.clone(),
                category: *category,
                description: slot.description.clone(),
            })
            .collect()
    }
}
