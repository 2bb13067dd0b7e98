use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::entry::{all_displayable, BlogPost, CardEntry, Project};

/// The fixed local content of the site. Built once at startup and shared
/// read-only; the blog loader may render a different set but never edits this.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub projects: Vec<Project>,
    pub blog_posts: Vec<BlogPost>,
}

impl Catalogs {
    pub fn builtin() -> Self {
        Catalogs {
            projects: builtin_projects(),
            blog_posts: builtin_blog_posts(),
        }
    }

    /// Built-in catalogs, with `projects.json` / `blog_posts.json` from `dir`
    /// replacing them when present and well-formed.
    pub fn load(dir: Option<&Path>) -> Self {
        let mut catalogs = Self::builtin();
        let dir = match dir {
            Some(d) => d,
            None => return catalogs,
        };
        if let Some(projects) = read_catalog::<Project>(&dir.join("projects.json")) {
            catalogs.projects = projects;
        }
        if let Some(posts) = read_catalog::<BlogPost>(&dir.join("blog_posts.json")) {
            catalogs.blog_posts = posts;
        }
        catalogs
    }
}

fn read_catalog<T: DeserializeOwned + CardEntry>(path: &Path) -> Option<Vec<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[catalog] {} not readable ({}), keeping built-in", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(entries) if all_displayable(&entries) => {
            log::info!("[catalog] Loaded {} entries from {}", entries.len(), path.display());
            Some(entries)
        }
        Ok(_) => {
            log::warn!("[catalog] {} has an entry without a title, keeping built-in", path.display());
            None
        }
        Err(e) => {
            log::warn!("[catalog] {} is malformed ({}), keeping built-in", path.display(), e);
            None
        }
    }
}

fn project(id: i64, title: &str, description: &str, tags: &[&str], icon: &str) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        icon: Some(icon.to_string()),
        link: Some("#".to_string()),
    }
}

fn post(id: i64, title: &str, excerpt: &str, date: &str, icon: &str) -> BlogPost {
    BlogPost {
        id,
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        date: Some(date.to_string()),
        icon: Some(icon.to_string()),
        link: Some("#".to_string()),
        tags: Vec::new(),
    }
}

fn builtin_projects() -> Vec<Project> {
    vec![
        project(
            1,
            "E-Commerce Platform",
            "A full-stack e-commerce solution with payment integration, user authentication, and admin dashboard.",
            &["React", "Node.js", "MongoDB"],
            "🛒",
        ),
        project(
            2,
            "Task Management App",
            "A collaborative task management application with real-time updates and team collaboration features.",
            &["Vue.js", "Firebase", "TypeScript"],
            "✅",
        ),
        project(
            3,
            "Weather Dashboard",
            "An interactive weather dashboard with forecasts, maps, and weather alerts using API integration.",
            &["JavaScript", "API", "CSS"],
            "🌤️",
        ),
        project(
            4,
            "Social Media Analytics",
            "Analytics dashboard for social media metrics with data visualization and reporting tools.",
            &["Python", "Django", "Chart.js"],
            "📊",
        ),
        project(
            5,
            "Portfolio Website",
            "A responsive portfolio website with modern design and smooth animations.",
            &["HTML", "CSS", "JavaScript"],
            "💼",
        ),
        project(
            6,
            "Recipe Finder App",
            "Find recipes based on ingredients with step-by-step instructions and nutritional information.",
            &["React Native", "API", "Redux"],
            "🍳",
        ),
    ]
}

fn builtin_blog_posts() -> Vec<BlogPost> {
    vec![
        post(
            1,
            "Getting Started with React Hooks",
            "Learn how to use React Hooks to manage state and side effects in functional components.",
            "March 15, 2024",
            "⚛️",
        ),
        post(
            2,
            "CSS Grid vs Flexbox: When to Use Which",
            "A comprehensive guide to choosing between CSS Grid and Flexbox for your layout needs.",
            "March 10, 2024",
            "🎨",
        ),
        post(
            3,
            "Building RESTful APIs with Flask",
            "Step-by-step tutorial on creating RESTful APIs using Python and Flask framework.",
            "March 5, 2024",
            "🐍",
        ),
        post(
            4,
            "JavaScript Async/Await Explained",
            "Understanding asynchronous JavaScript with async/await for cleaner and more readable code.",
            "February 28, 2024",
            "⚡",
        ),
        post(
            5,
            "Modern Web Design Principles",
            "Key principles and best practices for creating modern, user-friendly web interfaces.",
            "February 20, 2024",
            "✨",
        ),
        post(
            6,
            "Git Workflow Best Practices",
            "Essential Git workflows and branching strategies for efficient team collaboration.",
            "February 15, 2024",
            "🔀",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("folio_catalog_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_builtin_catalogs_have_unique_ids_and_titles() {
        let c = Catalogs::builtin();
        assert_eq!(c.projects.len(), 6);
        assert_eq!(c.blog_posts.len(), 6);
        let mut ids: Vec<i64> = c.projects.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert!(all_displayable(&c.projects));
        assert!(all_displayable(&c.blog_posts));
    }

    #[test]
    fn test_load_without_dir_is_builtin() {
        let c = Catalogs::load(None);
        assert_eq!(c.projects, Catalogs::builtin().projects);
    }

    #[test]
    fn test_load_replaces_projects_from_file() {
        let dir = scratch_dir("replace");
        fs::write(
            dir.join("projects.json"),
            r#"[{"id":9,"title":"Compiler","description":"A toy compiler","tags":["Rust"]}]"#,
        )
        .unwrap();
        let c = Catalogs::load(Some(&dir));
        assert_eq!(c.projects.len(), 1);
        assert_eq!(c.projects[0].title, "Compiler");
        // blog_posts.json absent: built-in kept
        assert_eq!(c.blog_posts.len(), 6);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_keeps_builtin_on_malformed_file() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("blog_posts.json"), "{not json").unwrap();
        fs::write(dir.join("projects.json"), r#"[{"id":1,"title":""}]"#).unwrap();
        let c = Catalogs::load(Some(&dir));
        assert_eq!(c.blog_posts, Catalogs::builtin().blog_posts);
        assert_eq!(c.projects, Catalogs::builtin().projects);
        let _ = fs::remove_dir_all(&dir);
    }
}
