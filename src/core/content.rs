//! Content repository: the one place where portfolio content is parsed and
//! checked. A [`Snapshot`] can only be obtained through [`ContentRepository`],
//! so every consumer may assume the invariants below already hold.
//!
//! Invariants enforced at load time:
//! - every profile field is non-empty and `profile.email` is an address
//! - social URLs and project URLs are absolute http(s) URLs
//! - at least one skill category, category names unique, skill names unique
//!   within their category, levels in `0..=100`
//! - project ids unique, years are 4 digits, at least one technology each
//! - experience/education ids unique within their own list, durations non-empty
//! - certification credential ids unique

use crate::core::sections::SocialIcon;
use crate::domain::model::{
    Certification, ContentDocument, EducationEntry, ExperienceEntry, Profile, Project,
    SkillCategory, SocialLinks, Stat,
};
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_range, validate_unique, validate_url,
    validate_year,
};
use std::path::Path;
use std::sync::Arc;

const EMBEDDED_CONTENT: &str = include_str!("../../data/portfolio.toml");

pub const MAX_SKILL_LEVEL: u32 = 100;

/// 內容來源 (檔案、字串或內建資料)
#[derive(Debug, Clone)]
pub enum ContentSource<'a> {
    Toml(&'a str),
    Json(&'a str),
    File(&'a Path),
    Embedded,
}

/// Validated, immutable content. Shared by `Arc` across all sections.
#[derive(Debug)]
pub struct Snapshot {
    document: ContentDocument,
}

impl Snapshot {
    pub fn profile(&self) -> &Profile {
        &self.document.profile
    }

    pub fn social(&self) -> &SocialLinks {
        &self.document.social
    }

    pub fn skills(&self) -> &[SkillCategory] {
        &self.document.skills
    }

    pub fn projects(&self) -> &[Project] {
        &self.document.projects
    }

    pub fn project(&self, id: u32) -> Option<&Project> {
        self.document.projects.iter().find(|p| p.id == id)
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.document.experience
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.document.education
    }

    pub fn certifications(&self) -> &[Certification] {
        &self.document.certifications
    }

    pub fn stats(&self) -> Option<&[Stat]> {
        self.document.stats.as_deref()
    }
}

pub struct ContentRepository;

impl ContentRepository {
    pub fn load(source: ContentSource<'_>) -> Result<Arc<Snapshot>> {
        let document = match source {
            ContentSource::Toml(text) => Self::parse_toml(text)?,
            ContentSource::Json(text) => Self::parse_json(text)?,
            ContentSource::File(path) => Self::parse_file(path)?,
            ContentSource::Embedded => Self::parse_toml(EMBEDDED_CONTENT)?,
        };

        validate_document(&document).map_err(PortfolioError::into_malformed)?;
        check_icon_table(&document.social);

        tracing::info!(
            "✅ Content loaded: {} skill categories, {} projects, {} jobs, {} social links",
            document.skills.len(),
            document.projects.len(),
            document.experience.len(),
            document.social.len()
        );

        Ok(Arc::new(Snapshot { document }))
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Arc<Snapshot>> {
        Self::load(ContentSource::File(path.as_ref()))
    }

    pub fn embedded() -> Result<Arc<Snapshot>> {
        Self::load(ContentSource::Embedded)
    }

    fn parse_file(path: &Path) -> Result<ContentDocument> {
        tracing::debug!("Reading content from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&text)
        } else {
            Self::parse_toml(&text)
        }
    }

    fn parse_toml(text: &str) -> Result<ContentDocument> {
        toml::from_str(text).map_err(|e| {
            PortfolioError::malformed("toml_parsing", format!("TOML parsing error: {}", e))
        })
    }

    fn parse_json(text: &str) -> Result<ContentDocument> {
        serde_json::from_str(text).map_err(|e| {
            PortfolioError::malformed("json_parsing", format!("JSON parsing error: {}", e))
        })
    }
}

fn validate_document(document: &ContentDocument) -> Result<()> {
    validate_profile(&document.profile)?;

    for (platform, url) in document.social.iter() {
        validate_url(&format!("social.{}", platform), url)?;
    }

    validate_skills(&document.skills)?;
    validate_projects(&document.projects)?;

    validate_unique("experience", "id", document.experience.iter().map(|e| &e.id))?;
    for (i, entry) in document.experience.iter().enumerate() {
        validate_non_empty_string(&format!("experience[{}].title", i), &entry.title)?;
        validate_non_empty_string(&format!("experience[{}].duration", i), &entry.duration)?;
    }

    validate_unique("education", "id", document.education.iter().map(|e| &e.id))?;
    for (i, entry) in document.education.iter().enumerate() {
        validate_non_empty_string(&format!("education[{}].degree", i), &entry.degree)?;
        validate_non_empty_string(&format!("education[{}].duration", i), &entry.duration)?;
    }

    validate_unique(
        "certifications",
        "credential_id",
        document.certifications.iter().map(|c| &c.credential_id),
    )?;

    if let Some(stats) = &document.stats {
        for (i, stat) in stats.iter().enumerate() {
            validate_non_empty_string(&format!("stats[{}].label", i), &stat.label)?;
            validate_non_empty_string(&format!("stats[{}].value", i), &stat.value)?;
        }
    }

    Ok(())
}

fn validate_profile(profile: &Profile) -> Result<()> {
    let fields = [
        ("profile.name", &profile.name),
        ("profile.title", &profile.title),
        ("profile.subtitle", &profile.subtitle),
        ("profile.bio", &profile.bio),
        ("profile.location", &profile.location),
        ("profile.phone", &profile.phone),
        ("profile.availability", &profile.availability),
    ];
    for (field, value) in fields {
        validate_non_empty_string(field, value)?;
    }
    validate_email("profile.email", &profile.email)
}

fn validate_skills(skills: &[SkillCategory]) -> Result<()> {
    if skills.is_empty() {
        return Err(PortfolioError::MissingConfigError {
            field: "skills".to_string(),
        });
    }

    validate_unique("skills", "category", skills.iter().map(|c| &c.category))?;

    for (i, category) in skills.iter().enumerate() {
        validate_non_empty_string(&format!("skills[{}].category", i), &category.category)?;
        let prefix = format!("skills[{}].technologies", i);
        validate_unique(&prefix, "name", category.technologies.iter().map(|s| &s.name))?;

        for (j, skill) in category.technologies.iter().enumerate() {
            validate_non_empty_string(&format!("{}[{}].name", prefix, j), &skill.name)?;
            validate_range(&format!("{}[{}].level", prefix, j), skill.level, 0, MAX_SKILL_LEVEL)?;
        }
    }
    Ok(())
}

fn validate_projects(projects: &[Project]) -> Result<()> {
    validate_unique("projects", "id", projects.iter().map(|p| &p.id))?;

    for (i, project) in projects.iter().enumerate() {
        validate_non_empty_string(&format!("projects[{}].title", i), &project.title)?;
        validate_year(&format!("projects[{}].year", i), &project.year)?;
        if project.technologies.is_empty() {
            return Err(PortfolioError::InvalidConfigValueError {
                field: format!("projects[{}].technologies", i),
                value: "[]".to_string(),
                reason: "At least one technology is required".to_string(),
            });
        }
        validate_url(&format!("projects[{}].live_url", i), &project.live_url)?;
        validate_url(&format!("projects[{}].github_url", i), &project.github_url)?;
    }
    Ok(())
}

/// 啟動時比對圖示表，沒有圖示的平台只會在圖示列中省略
fn check_icon_table(social: &SocialLinks) {
    if social.is_empty() {
        tracing::debug!("No social links configured");
        return;
    }
    for (platform, _) in social.iter() {
        if SocialIcon::for_platform(platform).is_none() {
            tracing::warn!(
                "⚠️ No icon for social platform '{}', it will be omitted from icon rows",
                platform
            );
        }
    }
}
