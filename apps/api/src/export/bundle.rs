//! Asset bundle builder: wraps the serialized resume into a static site file map.

use maud::{html, PreEscaped, DOCTYPE};

use crate::export::styles::Stylesheets;
use crate::models::theme::Theme;

/// Name used wherever the owner left their name blank.
pub const PLACEHOLDER_NAME: &str = "Resume";

pub const INDEX_PATH: &str = "index.html";
pub const README_PATH: &str = "README.md";
pub const MAIN_CSS_PATH: &str = "styles/main.css";
pub const MOBILE_CSS_PATH: &str = "styles/mobile.css";
pub const SCRIPT_PATH: &str = "scripts/main.js";

/// One file of the exported site, addressed by its path inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub path: &'static str,
    pub contents: String,
}

/// Ordered file map for the exported site. Paths are relative and `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBundle {
    pub display_name: String,
    pub files: Vec<BundleFile>,
}

impl AssetBundle {
    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.files.iter().map(|f| f.path)
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.contents.len()).sum()
    }
}

/// Trimmed owner name, or [`PLACEHOLDER_NAME`] if blank.
pub fn display_name(owner_name: &str) -> &str {
    let trimmed = owner_name.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_NAME
    } else {
        trimmed
    }
}

/// Assembles the full site from a rendered fragment and composed stylesheets.
pub fn build_bundle(
    fragment: &str,
    styles: &Stylesheets,
    owner_name: &str,
    theme: Theme,
) -> AssetBundle {
    let name = display_name(owner_name);
    let files = vec![
        BundleFile {
            path: INDEX_PATH,
            contents: render_document(fragment, name, theme),
        },
        BundleFile {
            path: README_PATH,
            contents: render_readme(name, theme),
        },
        BundleFile {
            path: MAIN_CSS_PATH,
            contents: styles.main.clone(),
        },
        BundleFile {
            path: MOBILE_CSS_PATH,
            contents: styles.mobile.clone(),
        },
        BundleFile {
            path: SCRIPT_PATH,
            contents: SITE_SCRIPT.to_string(),
        },
    ];

    AssetBundle {
        display_name: name.to_string(),
        files,
    }
}

/// Wraps a resume fragment in a standalone HTML document.
///
/// Also used for the in-app preview, so preview and export cannot drift.
pub fn render_document(fragment: &str, display_name: &str, theme: Theme) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="generator" content=(concat!("vitae ", env!("CARGO_PKG_VERSION")));
                title { (display_name) " - Resume" }
                link rel="stylesheet" href=(MAIN_CSS_PATH);
                link rel="stylesheet" href=(MOBILE_CSS_PATH);
            }
            body class=(theme.css_class()) {
                (PreEscaped(fragment))
                script src=(SCRIPT_PATH) {}
            }
        }
    };
    markup.into_string()
}

fn render_readme(display_name: &str, theme: Theme) -> String {
    let mut md = format!("# {display_name} - Resume Website\n\n");
    md.push_str(&format!(
        "A self-contained static website for {display_name}'s resume, \
         exported with the **{}** theme.\n\n",
        theme.label()
    ));

    md.push_str("## Files\n\n");
    md.push_str("```text\n");
    md.push_str(&format!("{INDEX_PATH}          Resume page\n"));
    md.push_str(&format!("{README_PATH}           This file\n"));
    md.push_str("styles/\n");
    md.push_str("  main.css          Layout, theme variables and print rules\n");
    md.push_str("  mobile.css        Tablet and phone overrides\n");
    md.push_str("scripts/\n");
    md.push_str("  main.js           Print button and entrance animations\n");
    md.push_str("```\n\n");

    md.push_str("## Viewing locally\n\n");
    md.push_str(&format!(
        "Unzip the package and open `{INDEX_PATH}` in any browser. \
         No server or build step is needed.\n\n"
    ));

    md.push_str("## Hosting\n\n");
    md.push_str("Upload the unzipped folder as-is to any static host:\n\n");
    md.push_str(
        "- **GitHub Pages**: push the files to a repository and enable Pages \
         for the default branch.\n",
    );
    md.push_str("- **Netlify**: drag and drop the folder onto the Netlify dashboard.\n");
    md.push_str("- **Vercel**: run `vercel` inside the folder and accept the defaults.\n");
    md.push_str("- **Any web server**: copy the files into the document root.\n\n");

    md.push_str("## Printing\n\n");
    md.push_str(
        "Use the print button in the corner of the page (or your browser's print command) \
         to save a PDF. Print styles remove decorations and keep each entry on a single page.\n\n",
    );

    md.push_str("## Customizing\n\n");
    md.push_str(&format!(
        "Colors are CSS custom properties declared per theme in `{MAIN_CSS_PATH}`. \
         Change the `theme-*` class on `<body>` in `{INDEX_PATH}` to switch themes.\n"
    ));
    md
}

/// Interactivity script shipped with every export. Plain ES5, no module system.
const SITE_SCRIPT: &str = r#"(function () {
  'use strict';

  var STAGGER_MS = 120;

  function addPrintButton() {
    if (document.getElementById('print-button')) {
      return;
    }
    var button = document.createElement('button');
    button.id = 'print-button';
    button.type = 'button';
    button.className = 'print-button no-print';
    button.textContent = 'Print / Save as PDF';
    button.addEventListener('click', function () {
      window.print();
    });
    document.body.appendChild(button);
  }

  function revealAll(sections) {
    for (var i = 0; i < sections.length; i++) {
      sections[i].classList.add('is-visible');
    }
  }

  function animateSections() {
    var sections = document.querySelectorAll('.resume-section');
    var reduceMotion = window.matchMedia &&
      window.matchMedia('(prefers-reduced-motion: reduce)').matches;
    if (reduceMotion) {
      return;
    }
    for (var i = 0; i < sections.length; i++) {
      sections[i].classList.add('animate-on-load');
    }
    for (var j = 0; j < sections.length; j++) {
      (function (section, delay) {
        window.setTimeout(function () {
          section.classList.add('is-visible');
        }, delay);
      })(sections[j], j * STAGGER_MS);
    }
    window.addEventListener('beforeprint', function () {
      revealAll(sections);
    });
  }

  function init() {
    addPrintButton();
    animateSections();
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', init);
  } else {
    init();
  }
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::styles::compose_styles;

    impl AssetBundle {
        fn get(&self, path: &str) -> Option<&str> {
            self.files
                .iter()
                .find(|f| f.path == path)
                .map(|f| f.contents.as_str())
        }
    }

    fn bundle(owner: &str) -> AssetBundle {
        let styles = compose_styles(Theme::Dark);
        build_bundle("<div class=\"resume-container\"></div>", &styles, owner, Theme::Dark)
    }

    #[test]
    fn test_bundle_layout() {
        let b = bundle("Alex Johnson");
        let paths: Vec<_> = b.paths().collect();
        assert_eq!(
            paths,
            vec![INDEX_PATH, README_PATH, MAIN_CSS_PATH, MOBILE_CSS_PATH, SCRIPT_PATH]
        );
        assert!(b.total_bytes() > 0);
    }

    #[test]
    fn test_stylesheets_copied_verbatim() {
        let styles = compose_styles(Theme::Dark);
        let b = build_bundle("", &styles, "Alex", Theme::Dark);
        assert_eq!(b.get(MAIN_CSS_PATH).unwrap(), styles.main);
        assert_eq!(b.get(MOBILE_CSS_PATH).unwrap(), styles.mobile);
    }

    #[test]
    fn test_index_references_relative_assets() {
        let b = bundle("Alex Johnson");
        let index = b.get(INDEX_PATH).unwrap();
        assert!(index.starts_with("<!DOCTYPE html>"));
        assert!(index.contains("<link rel=\"stylesheet\" href=\"styles/main.css\">"));
        assert!(index.contains("<link rel=\"stylesheet\" href=\"styles/mobile.css\">"));
        assert!(index.contains("<script src=\"scripts/main.js\"></script>"));
        assert!(index.contains("<body class=\"theme-dark\">"));
        assert!(index.contains("<title>Alex Johnson - Resume</title>"));
        assert!(index.contains("<div class=\"resume-container\"></div>"));
    }

    #[test]
    fn test_blank_owner_uses_placeholder() {
        let b = bundle("   ");
        assert_eq!(b.display_name, PLACEHOLDER_NAME);
        assert!(b.get(INDEX_PATH).unwrap().contains("<title>Resume - Resume</title>"));
        assert!(b.get(README_PATH).unwrap().starts_with("# Resume - Resume Website"));
    }

    #[test]
    fn test_readme_names_owner_files_and_hosting() {
        let readme = bundle("Alex Johnson").get(README_PATH).unwrap().to_string();
        assert!(readme.contains("Alex Johnson"));
        for path in [INDEX_PATH, "main.css", "mobile.css", "main.js"] {
            assert!(readme.contains(path), "README should list {path}");
        }
        assert!(readme.contains("GitHub Pages"));
        assert!(readme.contains("Dark"));
    }

    #[test]
    fn test_script_is_self_contained() {
        let b = bundle("Alex");
        let script = b.get(SCRIPT_PATH).unwrap();
        assert!(!script.contains("import "));
        assert!(!script.contains("require("));
        assert!(!script.contains("export "));
        assert!(script.contains("window.print()"));
        assert!(script.contains(".resume-section"));
        assert_eq!(script, bundle("Someone Else").get(SCRIPT_PATH).unwrap());
    }
}
