use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Page content for the portfolio: who, what they work with, what they built.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub live_url: Option<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Profile {
    /// Load from a JSON file, or fall back to the built-in profile.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Profile(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_json(&raw)
            .map_err(|e| AppError::Profile(format!("Invalid profile {}: {e}", path.display())))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            headline: "Full Stack Developer".to_string(),
            about: vec![
                "I build modern web applications with a focus on responsive, accessible and performant interfaces."
                    .to_string(),
            ],
            skills: [
                "JavaScript",
                "TypeScript",
                "React",
                "Next.js",
                "Tailwind CSS",
                "Git",
                "FastAPI",
                "Redis + Docker",
                "RabbitMQ",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            projects: vec![
                Project {
                    title: "Travel Bookings".to_string(),
                    description: "A travel booking application to search for flights, hotels and car rentals."
                        .to_string(),
                    tech: vec!["React".to_string(), "Tailwind CSS".to_string(), "Git".to_string()],
                    live_url: None,
                    source_url: None,
                },
                Project {
                    title: "Dynamic Button Workflow".to_string(),
                    description: "Create and manage workflows built from customizable buttons.".to_string(),
                    tech: vec!["React".to_string(), "Tailwind CSS".to_string(), "Git".to_string()],
                    live_url: None,
                    source_url: None,
                },
            ],
            links: Vec::new(),
        }
    }
}
