//! Serde-loadable description of an in-memory wiki, used by the offline
//! batch driver.

use serde::{Deserialize, Serialize};
use wpb_types::Project;

use crate::memory::InMemoryWiki;

/// A whole wiki corpus: pages (optionally redirects) and equivalence
/// links between projects.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WikiFixture {
    #[serde(default)]
    pub pages: Vec<FixturePage>,
    #[serde(default)]
    pub links: Vec<FixtureLink>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixturePage {
    pub project: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// One equivalence edge; registered in both directions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixtureLink {
    pub project: String,
    pub title: String,
    pub other_project: String,
    pub other_title: String,
}

impl WikiFixture {
    pub fn build(self) -> InMemoryWiki {
        let wiki = InMemoryWiki::new();
        for page in self.pages {
            let project = Project::new(page.project);
            match page.redirect_to {
                Some(target) => wiki.add_redirect(&project, &page.title, &target),
                None => wiki.add_page(&project, &page.title, &page.text),
            }
        }
        for link in self.links {
            wiki.link(
                &Project::new(link.project),
                &link.title,
                &Project::new(link.other_project),
                &link.other_title,
            );
        }
        wiki
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{EquivalenceGraph, WikiClient};

    #[test]
    fn fixture_builds_pages_redirects_and_links() {
        let json = r#"{
            "pages": [
                {"project": "en", "title": "Ship", "text": "a boat"},
                {"project": "en", "title": "Boat", "redirect_to": "Ship"}
            ],
            "links": [
                {"project": "en", "title": "Ship", "other_project": "zh", "other_title": "船"}
            ]
        }"#;
        let fixture: WikiFixture = serde_json::from_str(json).unwrap();
        let wiki = fixture.build();

        let en = Project::new("en");
        let zh = Project::new("zh");
        assert_eq!(wiki.fetch_text(&en, "Ship").unwrap(), "a boat");
        assert!(wiki.is_redirect(&en, "Boat").unwrap());
        assert_eq!(
            wiki.equivalent_page(&zh, "船", &en).unwrap(),
            Some("Ship".to_string())
        );
    }
}
