//! The project record produced by the requirements wizard.
//!
//! Field names serialize in camelCase so records round-trip with the wizard's JSON payloads.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role labels offered by the stakeholder form. Roles are free-form; these are only suggestions.
pub const STAKEHOLDER_ROLES: [&str; 6] = [
    "Product Manager",
    "Developer",
    "Designer",
    "End User",
    "Business Owner",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalRequirement {
    pub id: String,
    /// Lookup key into [`Project::stakeholders`]. The stakeholder may no longer exist.
    pub stakeholder_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NfrCategory {
    Security,
    Performance,
    Usability,
    Scalability,
}

impl NfrCategory {
    /// All categories in the order the wizard lists them.
    pub const ALL: [NfrCategory; 4] = [
        NfrCategory::Security,
        NfrCategory::Performance,
        NfrCategory::Usability,
        NfrCategory::Scalability,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NfrCategory::Security => "security",
            NfrCategory::Performance => "performance",
            NfrCategory::Usability => "usability",
            NfrCategory::Scalability => "scalability",
        }
    }

    /// Uppercased label used as the block heading in the generated document.
    pub fn heading(self) -> &'static str {
        match self {
            NfrCategory::Security => "SECURITY",
            NfrCategory::Performance => "PERFORMANCE",
            NfrCategory::Usability => "USABILITY",
            NfrCategory::Scalability => "SCALABILITY",
        }
    }
}

impl fmt::Display for NfrCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NfrCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "security" => Ok(Self::Security),
            "performance" => Ok(Self::Performance),
            "usability" => Ok(Self::Usability),
            "scalability" => Ok(Self::Scalability),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFunctionalRequirement {
    pub id: String,
    pub category: NfrCategory,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub description: String,
    #[serde(default)]
    pub stakeholders: Vec<Stakeholder>,
    #[serde(default)]
    pub functional_requirements: Vec<FunctionalRequirement>,
    #[serde(default)]
    pub non_functional_requirements: Vec<NonFunctionalRequirement>,
}

impl Project {
    /// Builds a record from a create payload and a store-assigned id.
    pub fn from_insert(id: String, insert: InsertProject) -> Self {
        Self {
            id,
            name: insert.name,
            domain: insert.domain,
            description: insert.description,
            stakeholders: insert.stakeholders,
            functional_requirements: insert.functional_requirements,
            non_functional_requirements: insert.non_functional_requirements,
        }
    }

    pub fn stakeholder_index(&self) -> StakeholderIndex<'_> {
        StakeholderIndex::new(&self.stakeholders)
    }

    /// Applies a partial update. Present fields replace the current value; list fields are
    /// replaced wholesale and never merged element-wise.
    pub fn apply_patch(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(domain) = patch.domain {
            self.domain = domain;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(stakeholders) = patch.stakeholders {
            self.stakeholders = stakeholders;
        }
        if let Some(functional) = patch.functional_requirements {
            self.functional_requirements = functional;
        }
        if let Some(non_functional) = patch.non_functional_requirements {
            self.non_functional_requirements = non_functional;
        }
    }
}

/// Create payload: a project without its server-assigned id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertProject {
    pub name: String,
    pub domain: String,
    pub description: String,
    #[serde(default)]
    pub stakeholders: Vec<Stakeholder>,
    #[serde(default)]
    pub functional_requirements: Vec<FunctionalRequirement>,
    #[serde(default)]
    pub non_functional_requirements: Vec<NonFunctionalRequirement>,
}

/// Partial update payload. `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakeholders: Option<Vec<Stakeholder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_requirements: Option<Vec<FunctionalRequirement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_functional_requirements: Option<Vec<NonFunctionalRequirement>>,
}

/// Id → stakeholder lookup over a project's stakeholder list.
///
/// Functional requirements only reference stakeholders by id, so every lookup may miss.
#[derive(Debug, Clone, Default)]
pub struct StakeholderIndex<'a> {
    by_id: FxHashMap<&'a str, &'a Stakeholder>,
}

impl<'a> StakeholderIndex<'a> {
    pub fn new(stakeholders: &'a [Stakeholder]) -> Self {
        let mut by_id = FxHashMap::default();
        for s in stakeholders {
            // First occurrence wins, mirroring a front-to-back `find`.
            by_id.entry(s.id.as_str()).or_insert(s);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Stakeholder> {
        self.by_id.get(id).copied()
    }

    pub fn name_of(&self, id: &str) -> Option<&'a str> {
        self.get(id).map(|s| s.name.as_str())
    }
}
