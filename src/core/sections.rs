//! Section contracts: which snapshot fields each page section consumes, and
//! the view model it renders from them. Missing optional data is omitted from
//! the view rather than reported.

use crate::core::contact_form::ContactForm;
use crate::core::content::Snapshot;
use crate::domain::model::{
    Certification, EducationEntry, ExperienceEntry, Project, SkillCategory, SocialPlatform, Stat,
};
use std::fmt::{self, Write as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Experience,
    Contact,
    Footer,
}

impl SectionId {
    /// Page order.
    pub const ALL: [SectionId; 7] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Experience,
        SectionId::Contact,
        SectionId::Footer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Skills => "skills",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    pub fn from_name(name: &str) -> Option<SectionId> {
        let name = name.trim().to_ascii_lowercase();
        if name == "home" {
            return Some(SectionId::Hero);
        }
        SectionId::ALL.into_iter().find(|s| s.name() == name)
    }

    /// In-page navigation anchor. The footer has none.
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            SectionId::Hero => Some("home"),
            SectionId::Footer => None,
            other => Some(other.name()),
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SectionId::Hero => &[
                "profile.name",
                "profile.title",
                "profile.subtitle",
                "social.github",
                "social.linkedin",
            ],
            SectionId::About => &[
                "profile.bio",
                "profile.location",
                "profile.availability",
                "stats",
            ],
            SectionId::Skills => &["skills"],
            SectionId::Projects => &["projects"],
            SectionId::Experience => &["experience", "education", "certifications"],
            SectionId::Contact => &[
                "profile.email",
                "profile.phone",
                "profile.location",
                "social",
                "contact_form",
            ],
            SectionId::Footer => &["profile.name", "social"],
        }
    }
}

/// Navigation entries `(label, anchor)` in page order.
pub fn navigation() -> Vec<(&'static str, &'static str)> {
    SectionId::ALL
        .iter()
        .filter_map(|s| s.anchor().map(|a| (nav_label(*s), a)))
        .collect()
}

fn nav_label(section: SectionId) -> &'static str {
    match section {
        SectionId::Hero => "Home",
        SectionId::About => "About",
        SectionId::Skills => "Skills",
        SectionId::Projects => "Projects",
        SectionId::Experience => "Experience",
        SectionId::Contact => "Contact",
        SectionId::Footer => "Footer",
    }
}

/// Closed icon table for social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialIcon {
    Github,
    Linkedin,
    Twitter,
    Instagram,
}

impl SocialIcon {
    pub fn for_platform(platform: SocialPlatform) -> Option<SocialIcon> {
        match platform {
            SocialPlatform::Github => Some(SocialIcon::Github),
            SocialPlatform::Linkedin => Some(SocialIcon::Linkedin),
            SocialPlatform::Twitter => Some(SocialIcon::Twitter),
            SocialPlatform::Instagram => Some(SocialIcon::Instagram),
            SocialPlatform::Dribbble => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            SocialIcon::Github => "[gh]",
            SocialIcon::Linkedin => "[in]",
            SocialIcon::Twitter => "[tw]",
            SocialIcon::Instagram => "[ig]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLinkView {
    pub platform: SocialPlatform,
    pub url: String,
    pub icon: Option<SocialIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroView {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutView {
    pub bio: String,
    pub location: String,
    pub availability: String,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsView {
    pub categories: Vec<SkillCategory>,
    selected: usize,
}

impl SkillsView {
    pub fn selected(&self) -> Option<&SkillCategory> {
        self.categories.get(self.selected)
    }

    /// Returns whether the selection changed.
    pub fn select_category(&mut self, name: &str) -> bool {
        match self.categories.iter().position(|c| c.category == name) {
            Some(index) if index != self.selected => {
                self.selected = index;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectsView {
    pub projects: Vec<Project>,
    open: Option<u32>,
}

impl ProjectsView {
    pub fn open(&mut self, id: u32) -> bool {
        if self.projects.iter().any(|p| p.id == id) {
            self.open = Some(id);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn open_project(&self) -> Option<&Project> {
        self.open
            .and_then(|id| self.projects.iter().find(|p| p.id == id))
    }

    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for project in &self.projects {
            if !categories.contains(&project.category.as_str()) {
                categories.push(&project.category);
            }
        }
        categories
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| p.category == category)
    }
}

/// Timeline node key. Work and education ids overlap, so the kind is part of
/// the key; certifications share a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKey {
    Work(u32),
    Education(u32),
    Certifications,
}

impl TimelineKey {
    /// Parses `work:<id>`, `education:<id>` or `certifications`.
    pub fn parse(value: &str) -> Option<TimelineKey> {
        let value = value.trim().to_ascii_lowercase();
        if value == "certifications" {
            return Some(TimelineKey::Certifications);
        }
        let (kind, id) = value.split_once(':')?;
        let id = id.parse().ok()?;
        match kind {
            "work" => Some(TimelineKey::Work(id)),
            "education" => Some(TimelineKey::Education(id)),
            _ => None,
        }
    }
}

impl fmt::Display for TimelineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineKey::Work(id) => write!(f, "work:{}", id),
            TimelineKey::Education(id) => write!(f, "education:{}", id),
            TimelineKey::Certifications => f.write_str("certifications"),
        }
    }
}

/// Detail card for the selected timeline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCard<'a> {
    Work(&'a ExperienceEntry),
    Education(&'a EducationEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceView {
    pub work: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<Certification>,
    selected: Option<TimelineKey>,
}

impl ExperienceView {
    pub fn selected(&self) -> Option<TimelineKey> {
        self.selected
    }

    /// Selecting the current node again clears the selection. Unknown nodes
    /// leave it untouched. Returns whether the selection changed.
    pub fn select(&mut self, key: TimelineKey) -> bool {
        if self.selected == Some(key) {
            self.selected = None;
            return true;
        }
        let exists = match key {
            TimelineKey::Work(id) => self.work.iter().any(|e| e.id == id),
            TimelineKey::Education(id) => self.education.iter().any(|e| e.id == id),
            TimelineKey::Certifications => !self.certifications.is_empty(),
        };
        if exists {
            self.selected = Some(key);
        }
        exists
    }

    /// Certifications never open a card.
    pub fn card(&self) -> Option<TimelineCard<'_>> {
        match self.selected? {
            TimelineKey::Work(id) => self
                .work
                .iter()
                .find(|e| e.id == id)
                .map(TimelineCard::Work),
            TimelineKey::Education(id) => self
                .education
                .iter()
                .find(|e| e.id == id)
                .map(TimelineCard::Education),
            TimelineKey::Certifications => None,
        }
    }
}

/// What the contact section shows of the live form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormStatus {
    pub counter: String,
    pub read_only: bool,
    pub status: Option<&'static str>,
}

impl From<&ContactForm> for ContactFormStatus {
    fn from(form: &ContactForm) -> Self {
        Self {
            counter: form.message_counter(),
            read_only: form.is_read_only(),
            status: form.status_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub social: Vec<SocialLinkView>,
    pub form: ContactFormStatus,
}

impl ContactView {
    pub fn with_form(mut self, form: &ContactForm) -> Self {
        self.form = ContactFormStatus::from(form);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub name: String,
    pub social: Vec<SocialLinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionView {
    Hero(HeroView),
    About(AboutView),
    Skills(SkillsView),
    Projects(ProjectsView),
    Experience(ExperienceView),
    Contact(ContactView),
    Footer(FooterView),
}

pub fn default_stats() -> Vec<Stat> {
    [
        ("Years Experience", "5+"),
        ("Projects Completed", "50+"),
        ("Happy Clients", "30+"),
        ("Countries Worked", "10+"),
    ]
    .into_iter()
    .map(|(label, value)| Stat {
        label: label.to_string(),
        value: value.to_string(),
    })
    .collect()
}

pub fn render(section: SectionId, snapshot: &Snapshot) -> SectionView {
    let profile = snapshot.profile();
    match section {
        SectionId::Hero => SectionView::Hero(HeroView {
            name: profile.name.clone(),
            title: profile.title.clone(),
            subtitle: profile.subtitle.clone(),
            github: snapshot.social().get(SocialPlatform::Github).map(str::to_string),
            linkedin: snapshot.social().get(SocialPlatform::Linkedin).map(str::to_string),
        }),
        SectionId::About => SectionView::About(AboutView {
            bio: profile.bio.clone(),
            location: profile.location.clone(),
            availability: profile.availability.clone(),
            stats: snapshot.stats().map(<[Stat]>::to_vec).unwrap_or_else(default_stats),
        }),
        SectionId::Skills => SectionView::Skills(SkillsView {
            categories: snapshot.skills().to_vec(),
            selected: 0,
        }),
        SectionId::Projects => SectionView::Projects(ProjectsView {
            projects: snapshot.projects().to_vec(),
            open: None,
        }),
        SectionId::Experience => SectionView::Experience(ExperienceView {
            work: snapshot.experience().to_vec(),
            education: snapshot.education().to_vec(),
            certifications: snapshot.certifications().to_vec(),
            selected: None,
        }),
        SectionId::Contact => SectionView::Contact(ContactView {
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            location: profile.location.clone(),
            social: social_views(snapshot, true),
            form: ContactFormStatus::from(&ContactForm::for_profile(profile)),
        }),
        SectionId::Footer => SectionView::Footer(FooterView {
            name: profile.name.clone(),
            social: social_views(snapshot, false),
        }),
    }
}

fn social_views(snapshot: &Snapshot, icons_only: bool) -> Vec<SocialLinkView> {
    snapshot
        .social()
        .iter()
        .map(|(platform, url)| SocialLinkView {
            platform,
            url: url.to_string(),
            icon: SocialIcon::for_platform(platform),
        })
        .filter(|link| !icons_only || link.icon.is_some())
        .collect()
}

impl SectionView {
    pub fn id(&self) -> SectionId {
        match self {
            SectionView::Hero(_) => SectionId::Hero,
            SectionView::About(_) => SectionId::About,
            SectionView::Skills(_) => SectionId::Skills,
            SectionView::Projects(_) => SectionId::Projects,
            SectionView::Experience(_) => SectionId::Experience,
            SectionView::Contact(_) => SectionId::Contact,
            SectionView::Footer(_) => SectionId::Footer,
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // String 寫入不會失敗
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        match self {
            SectionView::Hero(hero) => {
                writeln!(out, "# {}", hero.name)?;
                writeln!(out, "{}", hero.title)?;
                writeln!(out, "{}", hero.subtitle)?;
                if let Some(url) = &hero.github {
                    writeln!(out, "GitHub: {}", url)?;
                }
                if let Some(url) = &hero.linkedin {
                    writeln!(out, "LinkedIn: {}", url)?;
                }
            }
            SectionView::About(about) => {
                writeln!(out, "## About Me")?;
                writeln!(out, "{}", about.bio)?;
                writeln!(out, "Location: {}", about.location)?;
                writeln!(out, "{}", about.availability)?;
                for stat in &about.stats {
                    writeln!(out, "  {} {}", stat.value, stat.label)?;
                }
            }
            SectionView::Skills(skills) => {
                writeln!(out, "## Skills")?;
                let tabs: Vec<&str> = skills
                    .categories
                    .iter()
                    .map(|c| c.category.as_str())
                    .collect();
                writeln!(out, "[{}]", tabs.join(" | "))?;
                if let Some(category) = skills.selected() {
                    for skill in &category.technologies {
                        writeln!(out, "  {} {} {}%", skill.icon, skill.name, skill.level)?;
                    }
                }
            }
            SectionView::Projects(projects) => {
                writeln!(out, "## Projects")?;
                for project in &projects.projects {
                    writeln!(
                        out,
                        "- {} ({}, {}) [{}]",
                        project.title,
                        project.category,
                        project.year,
                        project.technologies.join(", ")
                    )?;
                }
                if let Some(project) = projects.open_project() {
                    writeln!(out, "> {}", project.description)?;
                    for feature in &project.features {
                        writeln!(out, ">   * {}", feature)?;
                    }
                    writeln!(out, "> Live: {}", project.live_url)?;
                    writeln!(out, "> Code: {}", project.github_url)?;
                }
            }
            SectionView::Experience(experience) => {
                writeln!(out, "## Experience")?;
                for entry in &experience.work {
                    writeln!(out, "- {} @ {} ({})", entry.title, entry.company, entry.duration)?;
                    if let Some(description) = &entry.description {
                        writeln!(out, "  {}", description)?;
                    }
                }
                writeln!(out, "## Education")?;
                for entry in &experience.education {
                    write!(out, "- {}, {} ({})", entry.degree, entry.school, entry.duration)?;
                    if let Some(gpa) = &entry.gpa {
                        write!(out, " GPA {}", gpa)?;
                    }
                    writeln!(out)?;
                }
                writeln!(out, "## Certifications")?;
                for cert in &experience.certifications {
                    writeln!(
                        out,
                        "- {} by {} ({}) #{}",
                        cert.name, cert.issuer, cert.date, cert.credential_id
                    )?;
                }
                match experience.card() {
                    Some(TimelineCard::Work(entry)) => {
                        writeln!(out, "> {} @ {}", entry.title, entry.company)?;
                        writeln!(out, "> {} | {}", entry.duration, entry.location)?;
                        for achievement in &entry.achievements {
                            writeln!(out, ">   * {}", achievement)?;
                        }
                    }
                    Some(TimelineCard::Education(entry)) => {
                        writeln!(out, "> {} @ {}", entry.degree, entry.school)?;
                        writeln!(out, "> {} | {}", entry.duration, entry.location)?;
                        for achievement in &entry.achievements {
                            writeln!(out, ">   * {}", achievement)?;
                        }
                    }
                    None => {}
                }
            }
            SectionView::Contact(contact) => {
                writeln!(out, "## Get In Touch")?;
                writeln!(out, "Email: {}", contact.email)?;
                writeln!(out, "Phone: {}", contact.phone)?;
                writeln!(out, "Location: {}", contact.location)?;
                for link in &contact.social {
                    let glyph = link.icon.map(|i| i.glyph()).unwrap_or_default();
                    writeln!(out, "  {} {}", glyph, link.url)?;
                }
                write!(out, "Message: {}", contact.form.counter)?;
                if contact.form.read_only {
                    write!(out, " (sending...)")?;
                }
                writeln!(out)?;
                if let Some(status) = contact.form.status {
                    writeln!(out, "{}", status)?;
                }
            }
            SectionView::Footer(footer) => {
                writeln!(out, "-- {} --", footer.name)?;
                for link in &footer.social {
                    writeln!(out, "  {}: {}", link.platform, link.url)?;
                }
            }
        }
        Ok(())
    }
}
