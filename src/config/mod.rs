pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio")]
#[command(about = "Validate portfolio content and render its sections")]
pub struct CliConfig {
    /// Path to the site TOML configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Content file (TOML or JSON); the built-in content is used when omitted
    #[arg(long)]
    pub content: Option<String>,

    /// Render a single section (home, about, skills, projects, experience, contact, footer)
    #[arg(long)]
    pub section: Option<String>,

    /// Skill category to select in the skills section
    #[arg(long)]
    pub skill_category: Option<String>,

    /// Project id to open in the projects section
    #[arg(long)]
    pub open_project: Option<u32>,

    /// Timeline node to open in the experience section (work:<id>, education:<id>)
    #[arg(long)]
    pub timeline: Option<String>,

    /// Only validate the content, do not render
    #[arg(long)]
    pub check: bool,

    /// Skip the loading splash
    #[arg(long)]
    pub no_splash: bool,

    /// Toggle and persist the theme preference
    #[arg(long)]
    pub toggle_theme: bool,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn content_path(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn loading_screen_ms(&self) -> u64 {
        if self.no_splash {
            0
        } else {
            crate::core::site::DEFAULT_SPLASH.as_millis() as u64
        }
    }

    fn relay_timeout_seconds(&self) -> u64 {
        crate::core::contact_form::DEFAULT_RELAY_TIMEOUT.as_secs()
    }
}
