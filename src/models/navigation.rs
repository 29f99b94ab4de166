//! Static site navigation

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub title: &'static str,
    pub href: &'static str,
}

/// Top level menu entry, optionally with a dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavMenu {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavLink>,
}

impl NavMenu {
    fn link(title: &'static str, href: &'static str) -> Self {
        Self {
            title,
            href: Some(href),
            children: Vec::new(),
        }
    }

    fn dropdown(title: &'static str, children: Vec<NavLink>) -> Self {
        Self {
            title,
            href: None,
            children,
        }
    }

    /// Whether this entry or one of its children points at `path`
    pub fn contains(&self, path: &str) -> bool {
        self.href == Some(path) || self.children.iter().any(|child| child.href == path)
    }
}

/// Everything the site chrome needs
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub menu: Vec<NavMenu>,
    pub about_topics: Vec<NavLink>,
    pub actions: Vec<NavLink>,
}

static NAVIGATION: Lazy<Navigation> = Lazy::new(|| Navigation {
    menu: vec![
        NavMenu::link("Home", "/"),
        NavMenu::dropdown(
            "About",
            vec![
                NavLink { title: "At a Glance", href: "/about/at-a-glance" },
                NavLink { title: "History", href: "/about/history" },
                NavLink { title: "Mission and Vision", href: "/about/mission-vision" },
                NavLink { title: "Achievements", href: "/about/achievements" },
            ],
        ),
        NavMenu::dropdown(
            "Academic",
            vec![NavLink { title: "Academic Calendar", href: "/academic/academic-calendar" }],
        ),
        NavMenu::link("Notice", "/notice"),
        NavMenu::dropdown(
            "Result",
            vec![NavLink { title: "Individual Result", href: "/result/individual" }],
        ),
    ],
    about_topics: vec![
        NavLink { title: "At A Glance", href: "/about/at-a-glance" },
        NavLink { title: "History", href: "/about/history" },
        NavLink { title: "Why Study at Our Institute", href: "/about/why-study" },
        NavLink { title: "Mission and Vision", href: "/about/mission-vision" },
        NavLink { title: "Infrastructure", href: "/about/infrastructure" },
        NavLink { title: "Achievements", href: "/about/achievements" },
        NavLink { title: "News & Events", href: "/about/news-events" },
    ],
    actions: vec![
        NavLink { title: "LOGIN", href: "/login" },
        NavLink { title: "ONLINE APPLICATION", href: "/apply" },
    ],
});

pub fn navigation() -> &'static Navigation {
    &NAVIGATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_contains_result_page() {
        let nav = navigation();
        let result = nav.menu.iter().find(|m| m.title == "Result").unwrap();
        assert!(result.contains("/result/individual"));
        assert!(result.href.is_none());
    }

    #[test]
    fn test_about_topics_order() {
        let titles: Vec<_> = navigation().about_topics.iter().map(|t| t.title).collect();
        assert_eq!(titles.first(), Some(&"At A Glance"));
        assert_eq!(titles.last(), Some(&"News & Events"));
        assert_eq!(titles.len(), 7);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(navigation()).unwrap();
        assert_eq!(json["menu"][0]["title"], "Home");
        assert!(json["menu"][0].get("children").is_none());
        assert_eq!(json["actions"][0]["title"], "LOGIN");
    }
}
