//! Style composer for the exported site.
//!
//! Output is assembled only from static text and the theme lookup table, so the
//! same theme always yields byte-identical stylesheets.


use crate::models::theme::{Theme, ThemePalette};

/// The two stylesheets shipped in every bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheets {
    pub main: String,
    pub mobile: String,
}

/// Builds `main.css` and `mobile.css` for `theme`.
///
/// `main.css` declares every theme under its `.theme-<id>` class; `:root` carries
/// the selected theme so the page still renders correctly if the class is lost.
pub fn compose_styles(theme: Theme) -> Stylesheets {
    let mut main = String::with_capacity(BASE_CSS.len() + PRINT_CSS.len() + 4096);
    main.push_str(&format!(
        "/* Resume website stylesheet. Active theme: {} */\n\n",
        theme.id()
    ));
    push_theme_block(&mut main, ":root", theme.palette());
    for t in Theme::ALL {
        push_theme_block(&mut main, &format!(".{}", t.css_class()), t.palette());
    }
    main.push_str(BASE_CSS);
    main.push_str(PRINT_CSS);

    Stylesheets {
        main,
        mobile: MOBILE_CSS.to_string(),
    }
}

fn push_theme_block(css: &mut String, selector: &str, palette: &ThemePalette) {
    css.push_str(&format!("{selector} {{\n"));
    css.push_str(&format!("  --primary-color: {};\n", palette.primary));
    css.push_str(&format!("  --secondary-color: {};\n", palette.secondary));
    css.push_str(&format!("  --accent-color: {};\n", palette.accent));
    css.push_str(&format!("  --background-color: {};\n", palette.background));
    css.push_str(&format!("  --surface-color: {};\n", palette.surface));
    css.push_str(&format!("  --text-color: {};\n", palette.text));
    css.push_str(&format!("  --text-muted: {};\n", palette.text_muted));
    css.push_str(&format!("  --border-color: {};\n", palette.border));
    css.push_str(&format!("  --header-text: {};\n", palette.header_text));
    css.push_str(&format!("  --font-family: {};\n", palette.font_family));
    css.push_str("}\n\n");
}

const BASE_CSS: &str = r#"/* Reset */
*,
*::before,
*::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-family);
  font-size: 16px;
  line-height: 1.6;
  color: var(--text-color);
  background: var(--background-color);
  -webkit-font-smoothing: antialiased;
}

a {
  color: var(--accent-color);
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

/* Layout */
.resume-container {
  max-width: 900px;
  margin: 40px auto;
  background: var(--surface-color);
  color: var(--text-color);
  border-radius: 12px;
  box-shadow: 0 10px 30px rgba(0, 0, 0, 0.12);
  overflow: hidden;
}

/* Header */
.resume-header {
  background: linear-gradient(135deg, var(--primary-color), var(--secondary-color));
  color: var(--header-text);
  padding: 40px;
  text-align: center;
}

.resume-name {
  font-size: 2.5rem;
  font-weight: 700;
  letter-spacing: 0.5px;
  margin-bottom: 12px;
}

.contact-info {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 8px 20px;
  font-size: 0.95rem;
}

.contact-item a {
  color: var(--header-text);
}

/* Sections */
.resume-section {
  padding: 28px 40px;
  border-bottom: 1px solid var(--border-color);
}

.resume-section:last-child {
  border-bottom: none;
}

.section-title {
  font-size: 1.35rem;
  color: var(--accent-color);
  text-transform: uppercase;
  letter-spacing: 1px;
  margin-bottom: 18px;
  padding-bottom: 6px;
  border-bottom: 2px solid var(--accent-color);
  display: inline-block;
}

.summary-text {
  font-size: 1.05rem;
}

/* Entries */
.entry {
  margin-bottom: 22px;
}

.entry:last-child {
  margin-bottom: 0;
}

.entry-header {
  display: flex;
  justify-content: space-between;
  align-items: flex-start;
  gap: 16px;
  margin-bottom: 6px;
}

.entry-title {
  font-size: 1.1rem;
  font-weight: 600;
}

.entry-subtitle {
  color: var(--text-muted);
  font-size: 0.95rem;
}

.entry-organization {
  font-weight: 500;
}

.entry-date {
  flex-shrink: 0;
  color: var(--text-muted);
  font-size: 0.9rem;
  white-space: nowrap;
}

.entry-description,
.entry-meta {
  margin-top: 6px;
}

.entry-meta {
  color: var(--text-muted);
  font-size: 0.9rem;
}

.entry-link {
  display: inline-block;
  margin-top: 6px;
  font-size: 0.9rem;
}

.responsibilities {
  margin-top: 8px;
  padding-left: 20px;
}

.responsibilities li {
  margin-bottom: 4px;
}

/* Skills */
.skills-grid {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
  gap: 18px;
}

.skill-category-title {
  font-size: 1rem;
  font-weight: 600;
  margin-bottom: 8px;
}

.skill-tags {
  display: flex;
  flex-wrap: wrap;
  gap: 6px;
}

.skill-tag {
  background: var(--background-color);
  color: var(--text-color);
  border: 1px solid var(--border-color);
  border-radius: 999px;
  padding: 3px 12px;
  font-size: 0.85rem;
}

/* Controls */
.print-button {
  position: fixed;
  right: 24px;
  bottom: 24px;
  padding: 12px 20px;
  border: none;
  border-radius: 999px;
  background: var(--accent-color);
  color: #ffffff;
  font: inherit;
  font-weight: 600;
  cursor: pointer;
  box-shadow: 0 6px 16px rgba(0, 0, 0, 0.2);
}

/* Entrance animation */
.animate-on-load {
  opacity: 0;
  transform: translateY(16px);
  transition: opacity 0.5s ease, transform 0.5s ease;
}

.animate-on-load.is-visible {
  opacity: 1;
  transform: none;
}

"#;

const PRINT_CSS: &str = r#"/* Print */
@media print {
  @page {
    margin: 12mm;
  }

  body {
    background: #ffffff;
    font-size: 11pt;
    line-height: 1.4;
  }

  .resume-container {
    max-width: none;
    margin: 0;
    border-radius: 0;
    box-shadow: none;
  }

  .resume-header {
    padding: 16px 0;
    border-radius: 0;
    -webkit-print-color-adjust: exact;
    print-color-adjust: exact;
  }

  .resume-section {
    padding: 10px 0;
  }

  .resume-section,
  .entry,
  .skill-category {
    break-inside: avoid;
    page-break-inside: avoid;
  }

  .section-title {
    margin-bottom: 8px;
    break-after: avoid;
    page-break-after: avoid;
  }

  .entry {
    margin-bottom: 10px;
  }

  .skill-tag {
    border-radius: 0;
    box-shadow: none;
  }

  .animate-on-load {
    opacity: 1;
    transform: none;
    transition: none;
  }

  .print-button,
  .no-print {
    display: none !important;
  }
}
"#;

const MOBILE_CSS: &str = r#"/* Responsive overrides */

/* Tablet */
@media (max-width: 768px) {
  .resume-container {
    margin: 0;
    border-radius: 0;
    box-shadow: none;
  }

  .resume-header {
    padding: 32px 24px;
  }

  .resume-name {
    font-size: 2rem;
  }

  .resume-section {
    padding: 24px;
  }

  .skills-grid {
    grid-template-columns: repeat(2, 1fr);
  }

  .entry-header {
    flex-direction: column;
    gap: 4px;
  }
}

/* Phone */
@media (max-width: 480px) {
  body {
    font-size: 15px;
  }

  .resume-header {
    padding: 24px 16px;
  }

  .resume-name {
    font-size: 1.6rem;
  }

  .contact-info {
    flex-direction: column;
    align-items: center;
    gap: 4px;
  }

  .resume-section {
    padding: 18px 16px;
  }

  .section-title {
    font-size: 1.15rem;
  }

  .skills-grid {
    grid-template-columns: 1fr;
  }

  .entry-date {
    white-space: normal;
  }

  .print-button {
    right: 16px;
    bottom: 16px;
    padding: 10px 16px;
  }
}
"#;
