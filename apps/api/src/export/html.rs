//! Resume content serializer: pure `ResumeData` + `Theme` to HTML fragment.
//!
//! Rendering goes through `maud`, so every interpolated user string is escaped.
//! The fragment never contains `<script>`; the bundle builder injects scripting.

use chrono::NaiveDate;
use maud::{html, Markup};

use crate::models::resume::{
    group_skills, Achievement, Certification, Education, Experience, PersonalInfo, ResumeData,
};
use crate::models::theme::Theme;

// ────────────────────────────────────────────────────────────────────────────
// Section table
// ────────────────────────────────────────────────────────────────────────────

/// Optional resume sections, in rendering order. The header is always emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Achievements,
}

impl SectionKind {
    pub const ORDER: [SectionKind; 6] = [
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Achievements,
    ];

    pub fn class(&self) -> &'static str {
        match self {
            SectionKind::Summary => "section-summary",
            SectionKind::Experience => "section-experience",
            SectionKind::Education => "section-education",
            SectionKind::Skills => "section-skills",
            SectionKind::Certifications => "section-certifications",
            SectionKind::Achievements => "section-achievements",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Certifications => "Certifications",
            SectionKind::Achievements => "Achievements",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Serializes the resume body as an HTML fragment string.
pub fn render_resume_html(resume: &ResumeData, theme: Theme) -> String {
    render_resume(resume, theme).into_string()
}

pub fn render_resume(resume: &ResumeData, theme: Theme) -> Markup {
    html! {
        div class=(format!("resume-container {}", theme.css_class())) data-theme=(theme.id()) {
            (render_header(&resume.personal_info))
            @for kind in SectionKind::ORDER {
                @if let Some(body) = section_body(kind, resume) {
                    section class=(format!("resume-section {}", kind.class())) {
                        h2.section-title { (kind.title()) }
                        (body)
                    }
                }
            }
        }
    }
}

/// Returns `None` when the section has no data, which omits it entirely.
fn section_body(kind: SectionKind, resume: &ResumeData) -> Option<Markup> {
    match kind {
        SectionKind::Summary => {
            let summary = resume.summary.trim();
            (!summary.is_empty()).then(|| html! { p.summary-text { (summary) } })
        }
        SectionKind::Experience => (!resume.experience.is_empty()).then(|| {
            html! { @for exp in &resume.experience { (render_experience(exp)) } }
        }),
        SectionKind::Education => (!resume.education.is_empty()).then(|| {
            html! { @for edu in &resume.education { (render_education(edu)) } }
        }),
        SectionKind::Skills => {
            let groups = group_skills(&resume.skills);
            (!groups.is_empty()).then(|| {
                html! {
                    div.skills-grid {
                        @for (category, skills) in &groups {
                            div.skill-category {
                                h3.skill-category-title { (category) }
                                div.skill-tags {
                                    @for skill in skills {
                                        span.skill-tag { (skill.name.trim()) }
                                    }
                                }
                            }
                        }
                    }
                }
            })
        }
        SectionKind::Certifications => (!resume.certifications.is_empty()).then(|| {
            html! { @for cert in &resume.certifications { (render_certification(cert)) } }
        }),
        SectionKind::Achievements => (!resume.achievements.is_empty()).then(|| {
            html! {
                @for achievement in &resume.achievements { (render_achievement(achievement)) }
            }
        }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

struct ContactItem<'a> {
    kind: &'static str,
    label: &'a str,
    href: Option<String>,
}

fn contact_items(info: &PersonalInfo) -> Vec<ContactItem<'_>> {
    let mut items = Vec::new();
    push_contact(
        &mut items,
        "email",
        &info.email,
        Some(format!("mailto:{}", info.email.trim())),
    );
    push_contact(
        &mut items,
        "phone",
        &info.phone,
        Some(format!("tel:{}", dialable(&info.phone))),
    );
    push_contact(&mut items, "address", &info.address, None);
    push_contact(
        &mut items,
        "linkedin",
        &info.linkedin,
        Some(profile_url(&info.linkedin, "linkedin.com", "https://www.linkedin.com/in/")),
    );
    push_contact(
        &mut items,
        "github",
        &info.github,
        Some(profile_url(&info.github, "github.com", "https://github.com/")),
    );
    push_contact(
        &mut items,
        "website",
        &info.website,
        Some(external_url(&info.website)),
    );
    items
}

fn push_contact<'a>(
    items: &mut Vec<ContactItem<'a>>,
    kind: &'static str,
    value: &'a str,
    href: Option<String>,
) {
    let value = value.trim();
    if !value.is_empty() {
        items.push(ContactItem {
            kind,
            label: value,
            href,
        });
    }
}

fn render_header(info: &PersonalInfo) -> Markup {
    let contacts = contact_items(info);
    html! {
        header.resume-header {
            h1.resume-name { (info.full_name.trim()) }
            @if !contacts.is_empty() {
                div.contact-info {
                    @for item in &contacts {
                        span class=(format!("contact-item contact-{}", item.kind)) {
                            @if let Some(href) = &item.href {
                                a href=(href) { (item.label) }
                            } @else {
                                (item.label)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Keeps only the characters a `tel:` URI accepts.
fn dialable(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Expands a bare handle (`alexj`, `@alexj`) into a profile URL on `host`.
fn profile_url(value: &str, host: &str, base: &str) -> String {
    let value = value.trim();
    if has_web_scheme(value) {
        value.to_string()
    } else if value.contains(host) {
        format!("https://{value}")
    } else {
        format!("{base}{}", value.trim_start_matches('@'))
    }
}

/// Only http(s) links are emitted; anything else is treated as a bare host.
fn external_url(value: &str) -> String {
    let value = value.trim();
    if has_web_scheme(value) {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}

fn has_web_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

fn render_experience(exp: &Experience) -> Markup {
    let responsibilities: Vec<&str> = exp.filled_responsibilities().collect();
    let dates = date_range(&exp.start_date, &exp.end_date, exp.current);
    html! {
        article.entry.experience-entry {
            div.entry-header {
                div.entry-heading {
                    h3.entry-title { (exp.position.trim()) }
                    (subtitle(&exp.company, &exp.location))
                }
                @if let Some(dates) = &dates {
                    span.entry-date { (dates) }
                }
            }
            @if !exp.description.trim().is_empty() {
                p.entry-description { (exp.description.trim()) }
            }
            @if !responsibilities.is_empty() {
                ul.responsibilities {
                    @for item in &responsibilities {
                        li { (item) }
                    }
                }
            }
        }
    }
}

fn render_education(edu: &Education) -> Markup {
    let dates = date_range(&edu.start_date, &edu.end_date, false);
    html! {
        article.entry.education-entry {
            div.entry-header {
                div.entry-heading {
                    h3.entry-title { (edu.degree.trim()) }
                    (subtitle(&edu.institution, &edu.location))
                }
                @if let Some(dates) = &dates {
                    span.entry-date { (dates) }
                }
            }
            @if !edu.gpa.trim().is_empty() {
                p.entry-meta { "GPA: " (edu.gpa.trim()) }
            }
            @if !edu.description.trim().is_empty() {
                p.entry-description { (edu.description.trim()) }
            }
        }
    }
}

fn render_certification(cert: &Certification) -> Markup {
    let date = format_month(&cert.date);
    html! {
        article.entry.certification-entry {
            div.entry-header {
                div.entry-heading {
                    h3.entry-title { (cert.name.trim()) }
                    @if !cert.issuer.trim().is_empty() {
                        p.entry-subtitle { span.entry-organization { (cert.issuer.trim()) } }
                    }
                }
                @if !date.is_empty() {
                    span.entry-date { (date) }
                }
            }
            @if !cert.credential_id.trim().is_empty() {
                p.entry-meta { "Credential ID: " (cert.credential_id.trim()) }
            }
            @if !cert.url.trim().is_empty() {
                a.entry-link href=(external_url(&cert.url)) { "View credential" }
            }
        }
    }
}

fn render_achievement(achievement: &Achievement) -> Markup {
    let date = format_month(&achievement.date);
    html! {
        article.entry.achievement-entry {
            div.entry-header {
                div.entry-heading {
                    h3.entry-title { (achievement.title.trim()) }
                }
                @if !date.is_empty() {
                    span.entry-date { (date) }
                }
            }
            @if !achievement.description.trim().is_empty() {
                p.entry-description { (achievement.description.trim()) }
            }
        }
    }
}

fn subtitle(organization: &str, location: &str) -> Markup {
    let organization = organization.trim();
    let location = location.trim();
    html! {
        @if !organization.is_empty() || !location.is_empty() {
            p.entry-subtitle {
                @if !organization.is_empty() {
                    span.entry-organization { (organization) }
                }
                @if !organization.is_empty() && !location.is_empty() {
                    " · "
                }
                @if !location.is_empty() {
                    span.entry-location { (location) }
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// Renders `YYYY-MM` / `YYYY-MM-DD` as `Mon YYYY`; other text passes through trimmed.
pub fn format_month(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d"))
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| value.to_string())
}

fn date_range(start: &str, end: &str, current: bool) -> Option<String> {
    let start = format_month(start);
    let end = if current {
        "Present".to_string()
    } else {
        format_month(end)
    };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => None,
        (false, true) => Some(start),
        (true, false) => Some(end),
        (false, false) => Some(format!("{start} - {end}")),
    }
}
