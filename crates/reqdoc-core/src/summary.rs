use crate::model::Project;
use serde::Serialize;

/// Counts and progress shown on the summary dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub stakeholder_count: usize,
    pub functional_count: usize,
    pub non_functional_count: usize,
    pub completion: &'static str,
    pub progress: String,
}

impl ProjectSummary {
    pub fn of(project: &Project) -> Self {
        let stakeholder_count = project.stakeholders.len();
        let functional_count = project.functional_requirements.len();
        let non_functional_count = project.non_functional_requirements.len();
        let complete = stakeholder_count > 0 && functional_count > 0 && non_functional_count > 0;
        Self {
            stakeholder_count,
            functional_count,
            non_functional_count,
            completion: if complete { "100%" } else { "Incomplete" },
            progress: progress_message(stakeholder_count, functional_count, non_functional_count),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion == "100%"
    }
}

pub fn progress_message(stakeholders: usize, functional: usize, non_functional: usize) -> String {
    if stakeholders + functional + non_functional == 0 {
        return "Get started by filling in the project details.".to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    if stakeholders > 0 {
        parts.push(format!(
            "{stakeholders} stakeholder{}",
            if stakeholders > 1 { "s" } else { "" }
        ));
    }
    if functional > 0 {
        parts.push(format!(
            "{functional} functional requirement{}",
            if functional > 1 { "s" } else { "" }
        ));
    }
    if non_functional > 0 {
        parts.push(format!(
            "{non_functional} non-functional categor{}",
            if non_functional > 1 { "ies" } else { "y" }
        ));
    }
    format!("Progress: You've added {}.", parts.join(", "))
}
