use portfolio_site::core::sections::{self, SocialIcon, TimelineCard, TimelineKey};
use portfolio_site::core::site::SlotState;
use portfolio_site::domain::model::SocialPlatform;
use portfolio_site::{
    ContactForm, ContentRepository, ContentSource, FormField, SectionId, SectionView, Site,
};
use std::time::{Duration, Instant};

const SPARSE: &str = r#"
[profile]
name = "Jane Doe"
title = "Systems Engineer"
subtitle = "Building reliable things"
bio = "Ten years of backend work."
location = "Lisbon, PT"
email = "jane@example.com"
phone = "+351 000 000 000"
availability = "Open to contract work"

[social]
linkedin = "https://linkedin.com/in/janedoe"
dribbble = "https://dribbble.com/janedoe"

[[skills]]
category = "Backend"
technologies = [{ name = "Rust", level = 90, icon = "🦀" }]

[[skills]]
category = "Ops"
technologies = [{ name = "Docker", level = 70, icon = "🐳" }]

[[stats]]
label = "Years Experience"
value = "10+"
"#;

#[test]
fn test_hero_omits_missing_social_links() {
    let snapshot = ContentRepository::load(ContentSource::Toml(SPARSE)).unwrap();

    match sections::render(SectionId::Hero, &snapshot) {
        SectionView::Hero(hero) => {
            assert_eq!(hero.name, "Jane Doe");
            assert!(hero.github.is_none());
            assert_eq!(hero.linkedin.as_deref(), Some("https://linkedin.com/in/janedoe"));
        }
        other => panic!("unexpected view {other:?}"),
    }

    let text = sections::render(SectionId::Hero, &snapshot).render_text();
    assert!(!text.contains("GitHub"));
    assert!(text.contains("LinkedIn"));
}

#[test]
fn test_about_uses_content_stats_or_defaults() {
    let sparse = ContentRepository::load(ContentSource::Toml(SPARSE)).unwrap();
    match sections::render(SectionId::About, &sparse) {
        SectionView::About(about) => {
            assert_eq!(about.stats.len(), 1);
            assert_eq!(about.stats[0].value, "10+");
        }
        other => panic!("unexpected view {other:?}"),
    }

    let embedded = ContentRepository::embedded().unwrap();
    match sections::render(SectionId::About, &embedded) {
        SectionView::About(about) => assert_eq!(about.stats, sections::default_stats()),
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn test_skills_default_and_selection() {
    let snapshot = ContentRepository::load(ContentSource::Toml(SPARSE)).unwrap();
    let SectionView::Skills(mut skills) = sections::render(SectionId::Skills, &snapshot) else {
        panic!("expected skills view");
    };

    assert_eq!(skills.selected().unwrap().category, "Backend");
    assert!(skills.select_category("Ops"));
    assert_eq!(skills.selected().unwrap().category, "Ops");
    assert!(!skills.select_category("Ops"));
    assert!(!skills.select_category("Frontend"));
    assert_eq!(skills.selected().unwrap().category, "Ops");
}

#[test]
fn test_projects_modal_and_categories() {
    let snapshot = ContentRepository::embedded().unwrap();
    let SectionView::Projects(mut projects) = sections::render(SectionId::Projects, &snapshot)
    else {
        panic!("expected projects view");
    };

    assert!(projects.open_project().is_none());
    assert!(!projects.open(42));
    assert!(projects.open(2));
    assert_eq!(projects.open_project().unwrap().title, "AI-Powered Portfolio Generator");
    let text = SectionView::Projects(projects.clone()).render_text();
    assert!(text.contains("Custom 3D scene generation"));
    projects.close();
    assert!(projects.open_project().is_none());

    assert_eq!(
        projects.categories(),
        vec!["Full-Stack", "AI/ML", "VR/AR", "Blockchain"]
    );
    assert_eq!(projects.by_category("VR/AR").count(), 1);
}

#[test]
fn test_empty_collections_render_without_error() {
    let snapshot = ContentRepository::load(ContentSource::Toml(SPARSE)).unwrap();

    let SectionView::Experience(experience) = sections::render(SectionId::Experience, &snapshot)
    else {
        panic!("expected experience view");
    };
    assert!(experience.work.is_empty());
    assert!(experience.education.is_empty());
    assert!(experience.certifications.is_empty());

    let text = sections::render(SectionId::Projects, &snapshot).render_text();
    assert_eq!(text.trim(), "## Projects");
}

#[test]
fn test_contact_icons_and_footer_links() {
    let snapshot = ContentRepository::embedded().unwrap();

    let SectionView::Contact(contact) = sections::render(SectionId::Contact, &snapshot) else {
        panic!("expected contact view");
    };
    assert_eq!(contact.email, "alex@example.com");
    // dribbble has no icon, so the contact icon row skips it
    assert_eq!(contact.social.len(), 4);
    assert!(contact
        .social
        .iter()
        .all(|link| link.platform != SocialPlatform::Dribbble));
    assert_eq!(contact.social[0].icon, Some(SocialIcon::Github));

    let SectionView::Footer(footer) = sections::render(SectionId::Footer, &snapshot) else {
        panic!("expected footer view");
    };
    assert_eq!(footer.name, "Alex Developer");
    assert_eq!(footer.social.len(), 5);
}

#[test]
fn test_education_gpa_is_optional() {
    let snapshot = ContentRepository::embedded().unwrap();
    let text = sections::render(SectionId::Experience, &snapshot).render_text();
    assert!(text.contains("GPA 3.8/4.0"));
    assert!(text.contains("Senior Full-Stack Developer @ TechCorp Inc."));
    assert!(text.contains("#AWS-SA-2023-001"));
}

#[test]
fn test_timeline_selection_toggles_and_keys_by_kind() {
    let snapshot = ContentRepository::embedded().unwrap();
    let SectionView::Experience(mut experience) =
        sections::render(SectionId::Experience, &snapshot)
    else {
        panic!("expected experience view");
    };
    assert!(experience.selected().is_none());
    assert!(experience.card().is_none());

    // work #1 and education #1 are different nodes
    assert!(experience.select(TimelineKey::Work(1)));
    assert!(matches!(
        experience.card(),
        Some(TimelineCard::Work(entry)) if entry.company == "TechCorp Inc."
    ));
    assert!(experience.select(TimelineKey::Education(1)));
    assert_eq!(experience.selected(), Some(TimelineKey::Education(1)));
    assert!(matches!(experience.card(), Some(TimelineCard::Education(_))));
    let text = SectionView::Experience(experience.clone()).render_text();
    assert!(text.contains("> Bachelor of Science in Computer Science @ University"));
    assert!(text.contains(">   * Magna Cum Laude"));

    // second click on the same node closes it
    assert!(experience.select(TimelineKey::Education(1)));
    assert!(experience.selected().is_none());

    // unknown nodes leave the selection alone
    assert!(experience.select(TimelineKey::Work(2)));
    assert!(!experience.select(TimelineKey::Work(42)));
    assert_eq!(experience.selected(), Some(TimelineKey::Work(2)));

    // certifications are selectable but open no card
    assert!(experience.select(TimelineKey::Certifications));
    assert_eq!(experience.selected(), Some(TimelineKey::Certifications));
    assert!(experience.card().is_none());
}

#[test]
fn test_contact_view_reflects_form_state() {
    let snapshot = ContentRepository::embedded().unwrap();
    let SectionView::Contact(contact) = sections::render(SectionId::Contact, &snapshot) else {
        panic!("expected contact view");
    };
    assert_eq!(contact.form.counter, "0/500");
    assert!(!contact.form.read_only);
    assert!(contact.form.status.is_none());

    let mut form = ContactForm::for_profile(snapshot.profile());
    form.set_field(FormField::Name, "Jane Doe");
    form.set_field(FormField::Email, "jane@example.com");
    form.set_field(FormField::Subject, "Hi");
    form.set_field(FormField::Message, "Interested in working together");
    let _dispatch = form.submit();

    let view = SectionView::Contact(contact.with_form(&form));
    let text = view.render_text();
    assert!(text.contains("Message: 30/500 (sending...)"));
}

#[test]
fn test_required_fields_are_declared_for_every_section() {
    for section in SectionId::ALL {
        assert!(!section.required_fields().is_empty(), "{:?}", section);
    }
    assert!(SectionId::Hero.required_fields().contains(&"social.github"));
    assert!(SectionId::Contact.required_fields().contains(&"contact_form"));
}

#[tokio::test]
async fn test_mount_fills_every_slot_in_page_order() {
    let snapshot = ContentRepository::embedded().unwrap();
    let site = Site::new(snapshot).with_splash(Duration::ZERO);

    let page = site.mount().await;

    assert!(page.is_complete());
    let order: Vec<SectionId> = page.slots().iter().map(|s| s.id).collect();
    assert_eq!(order, SectionId::ALL.to_vec());
    assert!(matches!(
        page.view(SectionId::Footer),
        Some(SectionView::Footer(_))
    ));
    assert!(page.render_text().contains("# Alex Developer"));
}

#[tokio::test]
async fn test_mount_waits_for_splash() {
    let snapshot = ContentRepository::embedded().unwrap();
    let site = Site::new(snapshot).with_splash(Duration::from_millis(100));

    let started = Instant::now();
    let page = site.mount().await;

    assert!(started.elapsed() >= Duration::from_millis(100));
    assert!(page.is_complete());
}

#[tokio::test]
async fn test_failed_section_keeps_placeholder() {
    let snapshot = ContentRepository::embedded().unwrap();
    let site = Site::new(snapshot).with_splash(Duration::ZERO);

    let page = site
        .load_sections_with(&SectionId::ALL, |id, snapshot| {
            if id == SectionId::Skills || id == SectionId::Footer {
                panic!("render failed for {:?}", id);
            }
            sections::render(id, snapshot)
        })
        .await;

    assert!(!page.is_complete());
    let skills = page.slots().iter().find(|s| s.id == SectionId::Skills).unwrap();
    assert_eq!(skills.state, SlotState::Fallback("Loading..."));
    let footer = page.slots().iter().find(|s| s.id == SectionId::Footer).unwrap();
    assert_eq!(footer.state, SlotState::Fallback("Loading footer..."));
    assert!(page.view(SectionId::Hero).is_some());
    assert!(page.render_text().contains("Loading footer..."));
}

#[tokio::test]
async fn test_single_section_page() {
    let snapshot = ContentRepository::embedded().unwrap();
    let site = Site::new(snapshot).with_splash(Duration::ZERO);

    let page = site.load_sections(&[SectionId::Contact, SectionId::Contact]).await;

    assert_eq!(page.slots().len(), 1);
    assert!(page.view(SectionId::Hero).is_none());
    assert!(page.render_text().contains("Phone: +1 (555) 123-4567"));
}
