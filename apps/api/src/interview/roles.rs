//! Job role catalog offered on the setup screen.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry Level",
            ExperienceLevel::Mid => "Mid Level",
            ExperienceLevel::Senior => "Senior Level",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobRole {
    pub id: u32,
    pub title: &'static str,
    pub level: ExperienceLevel,
}

impl JobRole {
    /// Display title used in prompts and reports, e.g. "Software Developer - Mid Level".
    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.level.label())
    }
}

const fn role(id: u32, title: &'static str, level: ExperienceLevel) -> JobRole {
    JobRole { id, title, level }
}

pub const JOB_ROLES: &[JobRole] = &[
    role(1, "Software Developer", ExperienceLevel::Entry),
    role(2, "Software Developer", ExperienceLevel::Mid),
    role(3, "Software Developer", ExperienceLevel::Senior),
    role(4, "Product Manager", ExperienceLevel::Entry),
    role(5, "Product Manager", ExperienceLevel::Mid),
    role(6, "Product Manager", ExperienceLevel::Senior),
    role(7, "UX Designer", ExperienceLevel::Entry),
    role(8, "UX Designer", ExperienceLevel::Mid),
    role(9, "UX Designer", ExperienceLevel::Senior),
    role(10, "Data Scientist", ExperienceLevel::Entry),
    role(11, "Data Scientist", ExperienceLevel::Mid),
    role(12, "Data Scientist", ExperienceLevel::Senior),
];

pub fn find_role(id: u32) -> Option<&'static JobRole> {
    JOB_ROLES.iter().find(|r| r.id == id)
}
