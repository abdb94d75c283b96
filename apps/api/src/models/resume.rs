use serde::{Deserialize, Serialize};

/// Skill categories offered by the editor form. Exports accept any string.
pub const SKILL_CATEGORIES: &[&str] = &[
    "Programming Languages",
    "Frameworks & Libraries",
    "Databases",
    "Cloud & DevOps",
    "Tools",
    "Soft Skills",
    "Other",
];

/// Category used when a skill arrives without one.
pub const FALLBACK_SKILL_CATEGORY: &str = "Other";

// ────────────────────────────────────────────────────────────────────────────
// Resume content
// ────────────────────────────────────────────────────────────────────────────

/// Complete editor model for one resume.
///
/// Every field is optional on the wire: a missing value deserializes as empty.
/// Entry ids are session-scoped render keys, not durable identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub certifications: Vec<Certification>,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub address: String,
    pub github: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub id: u64,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: u64,
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    /// May hold blank strings while the user is typing; exports drop them.
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Skill {
    pub id: u64,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub id: u64,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub credential_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Achievement {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub date: String,
}

impl ResumeData {
    /// True when there is nothing to render at all.
    pub fn is_blank(&self) -> bool {
        let info = &self.personal_info;
        [
            &info.full_name,
            &info.email,
            &info.phone,
            &info.linkedin,
            &info.address,
            &info.github,
            &info.website,
            &self.summary,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
            && self.education.is_empty()
            && self.experience.is_empty()
            && self.skills.is_empty()
            && self.certifications.is_empty()
            && self.achievements.is_empty()
    }

    /// Owner name as entered, trimmed. May be empty.
    pub fn owner_name(&self) -> &str {
        self.personal_info.full_name.trim()
    }
}

impl Experience {
    /// Responsibilities with blank entries removed, trimmed.
    pub fn filled_responsibilities(&self) -> impl Iterator<Item = &str> {
        self.responsibilities
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
    }
}

impl Skill {
    pub fn category_or_default(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            FALLBACK_SKILL_CATEGORY
        } else {
            category
        }
    }
}

/// Groups skills by category in first-seen order. Skills with blank names are skipped.
pub fn group_skills(skills: &[Skill]) -> Vec<(&str, Vec<&Skill>)> {
    let mut groups: Vec<(&str, Vec<&Skill>)> = Vec::new();
    for skill in skills.iter().filter(|s| !s.name.trim().is_empty()) {
        let category = skill.category_or_default();
        match groups.iter_mut().find(|(c, _)| *c == category) {
            Some((_, members)) => members.push(skill),
            None => groups.push((category, vec![skill])),
        }
    }
    groups
}
