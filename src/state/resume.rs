//! Résumé content model

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Résumé shipped with the binary
const BUILTIN_RESUME: &str = include_str!("../../assets/resume.json");

/// Files the built-in résumé refers to by relative path
const BUILTIN_ASSETS: &[(&str, &str)] =
    &[("portrait.txt", include_str!("../../assets/portrait.txt"))];

/// Errors loading a résumé document
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("failed to read résumé {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid résumé document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("résumé has no sections")]
    Empty,
    #[error("duplicate section id `{0}`")]
    DuplicateSection(String),
}

/// The whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub name: String,
    pub headline: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hero: Hero,
    pub sections: Vec<Section>,
}

/// Banner drawn above the sections with a parallax offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default)]
    pub banner: Vec<String>,
    #[serde(default = "default_parallax_speed")]
    pub speed: f32,
}

fn default_parallax_speed() -> f32 {
    0.5
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            banner: Vec::new(),
            speed: default_parallax_speed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    About {
        paragraphs: Vec<String>,
        #[serde(default)]
        portrait: Option<PathBuf>,
    },
    Experience {
        entries: Vec<ExperienceEntry>,
    },
    Projects {
        items: Vec<ProjectItem>,
    },
    Skills {
        skills: Vec<Skill>,
    },
    Stats {
        stats: Vec<Stat>,
    },
    Contact {
        #[serde(default)]
        blurb: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub organization: String,
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

/// A skill with a proficiency percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

/// A headline number that counts up when shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: u64,
}

/// Embedded copy of a built-in asset, looked up by its relative path
pub fn builtin_asset(path: &Path) -> Option<&'static str> {
    if path.is_absolute() {
        return None;
    }
    BUILTIN_ASSETS
        .iter()
        .find(|(name, _)| Path::new(name) == path)
        .map(|(_, content)| *content)
}

impl Resume {
    /// The résumé embedded in the binary. Its asset paths stay relative and
    /// name entries of [`builtin_asset`].
    pub fn builtin() -> Result<Self, ResumeError> {
        Self::from_json(BUILTIN_RESUME)
    }

    /// Load a résumé file. Relative asset paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ResumeError> {
        let content = fs::read_to_string(path).map_err(|source| ResumeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut resume = Self::from_json(&content)?;
        if let Some(dir) = path.parent() {
            resume.resolve_assets(dir);
        }
        Ok(resume)
    }

    /// Parse and check a résumé document
    pub fn from_json(json: &str) -> Result<Self, ResumeError> {
        let mut resume: Resume = serde_json::from_str(json)?;
        resume.check()?;
        for section in &mut resume.sections {
            if let SectionBody::Skills { skills } = &mut section.body {
                for skill in skills {
                    skill.level = skill.level.min(100);
                }
            }
        }
        Ok(resume)
    }

    fn check(&self) -> Result<(), ResumeError> {
        if self.sections.is_empty() {
            return Err(ResumeError::Empty);
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(ResumeError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(())
    }

    fn resolve_assets(&mut self, base: &Path) {
        for section in &mut self.sections {
            if let SectionBody::About {
                portrait: Some(path),
                ..
            } = &mut section.body
            {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Distinct project categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for section in &self.sections {
            if let SectionBody::Projects { items } = &section.body {
                for item in items {
                    if !categories.contains(&item.category) {
                        categories.push(item.category.clone());
                    }
                }
            }
        }
        categories
    }
}
