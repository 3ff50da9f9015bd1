use clap::Parser;
use portfolio_site::core::sections::{SectionView, TimelineKey};
use portfolio_site::core::ConfigProvider;
use portfolio_site::utils::error::ErrorSeverity;
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{
    CliConfig, ContentRepository, LocalStorage, PortfolioError, SectionId, Site, SiteConfig,
    ThemeStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入站台配置 (沒有指定就用預設值)
    let config = match &cli.config {
        Some(path) => match SiteConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => SiteConfig::default(),
    };

    // 初始化日誌
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(if cli.verbose { "debug" } else { config.log_level() });
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting portfolio");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入內容快照，只在啟動時驗證一次
    let content_path = cli.content_path().or(config.content_path());
    let loaded = match content_path {
        Some(path) => {
            tracing::info!("📁 Loading content from: {}", path);
            ContentRepository::load_file(path)
        }
        None => ContentRepository::embedded(),
    };
    let snapshot = match loaded {
        Ok(snapshot) => snapshot,
        Err(e) => fail(e),
    };

    if cli.check {
        println!("✅ Content is valid");
        return Ok(());
    }

    let storage = LocalStorage::new(config.theme_dir());
    tracing::debug!("Theme preference stored under {}", storage.base_path().display());
    let mut theme = ThemeStore::init(storage).await;
    if cli.toggle_theme {
        match theme.toggle().await {
            Ok(next) => tracing::info!("🎨 Theme switched to {}", next),
            Err(e) => tracing::warn!("Could not persist theme: {}", e),
        }
    }
    tracing::info!("🎨 Theme: {}", theme.current());

    // --no-splash 優先於配置檔
    let site = if cli.no_splash {
        Site::from_config(snapshot, &cli)
    } else {
        Site::from_config(snapshot, &config)
    };

    let mut page = match &cli.section {
        Some(name) => {
            let Some(id) = SectionId::from_name(name) else {
                eprintln!("❌ Unknown section '{}'", name);
                std::process::exit(1);
            };
            site.load_sections(&[id]).await
        }
        None => site.mount().await,
    };

    if let Some(category) = &cli.skill_category {
        if let Some(SectionView::Skills(skills)) = page.view_mut(SectionId::Skills) {
            if !skills.select_category(category) {
                tracing::warn!("Skill category '{}' not selected", category);
            }
        }
    }
    if let Some(id) = cli.open_project {
        if let Some(SectionView::Projects(projects)) = page.view_mut(SectionId::Projects) {
            if !projects.open(id) {
                tracing::warn!("No project with id {}", id);
            }
        }
    }

    if let Some(node) = &cli.timeline {
        if let Some(SectionView::Experience(experience)) = page.view_mut(SectionId::Experience) {
            match TimelineKey::parse(node) {
                Some(key) if experience.select(key) => {
                    tracing::debug!("Timeline node {} selected", key)
                }
                _ => tracing::warn!("No timeline node '{}'", node),
            }
        }
    }

    println!("{}", page.render_text());
    Ok(())
}

fn fail(e: PortfolioError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Portfolio failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
