use clap::Parser;
use portfolio_site::core::contact_form::FormField;
use portfolio_site::core::{ConfigProvider, MailRelay};
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{
    ContactForm, ContentRepository, DryRunRelay, FormState, HttpMailRelay, SiteConfig,
};

#[derive(Parser)]
#[command(name = "send-message")]
#[command(about = "Submit one message through the portfolio contact form")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "site-config.toml")]
    config: String,

    /// Content file; the built-in content is used when omitted
    #[arg(long)]
    content: Option<String>,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    subject: String,

    #[arg(long)]
    message: String,

    /// Validate and log the payload without contacting the relay
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = SiteConfig::from_file(&args.config)?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let snapshot = match args.content.as_deref().or(config.content_path()) {
        Some(path) => ContentRepository::load_file(path)?,
        None => ContentRepository::embedded()?,
    };

    let relay: Box<dyn MailRelay> = match (&config.relay, args.dry_run) {
        (Some(relay_config), false) => Box::new(HttpMailRelay::from_config(relay_config)),
        (None, false) => {
            tracing::warn!("⚠️ No [relay] section in config, falling back to dry run");
            Box::new(DryRunRelay)
        }
        (_, true) => Box::new(DryRunRelay),
    };

    let mut form = ContactForm::for_profile(snapshot.profile())
        .with_limits(config.form_limits())
        .with_relay_timeout(config.relay_timeout());

    form.set_field(FormField::Name, args.name);
    form.set_field(FormField::Email, args.email);
    form.set_field(FormField::Subject, args.subject);
    form.set_field(FormField::Message, args.message);

    match form.submit_with(&*relay).await {
        FormState::Sent => {
            println!("✅ {}", form.status_message().unwrap_or_default());
            Ok(())
        }
        FormState::Invalid => {
            for field in FormField::ALL {
                if let Some(message) = form.error_message(field) {
                    eprintln!("❌ {}", message);
                }
            }
            std::process::exit(1);
        }
        state => {
            eprintln!("❌ {}", form.status_message().unwrap_or("Message was not sent"));
            if let Some(reason) = form.last_failure() {
                tracing::error!("Relay failure ({:?}): {}", state, reason);
            }
            std::process::exit(2);
        }
    }
}
