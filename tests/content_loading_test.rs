use portfolio_site::domain::model::SocialPlatform;
use portfolio_site::{ContentRepository, ContentSource, PortfolioError};
use std::io::Write;
use tempfile::NamedTempFile;
use tokio_test::{assert_err, assert_ok};

const VALID: &str = r#"
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
github = "https://github.com/janedoe"
dribbble = "https://dribbble.com/janedoe"

[[skills]]
category = "Backend"
technologies = [
    { name = "Rust", level = 90, icon = "🦀" },
    { name = "Go", level = 100, icon = "🐹" },
]

[[skills]]
category = "Ops"
technologies = [{ name = "Docker", level = 0, icon = "🐳" }]

[[projects]]
id = 1
title = "Queue"
description = "A durable job queue."
technologies = ["Rust"]
live_url = "https://queue.example.com"
github_url = "https://github.com/janedoe/queue"
category = "Infra"
year = "2023"

[[projects]]
id = 2
title = "Proxy"
description = "An HTTP proxy."
technologies = ["Rust", "Tokio"]
features = ["Hot reload"]
live_url = "https://proxy.example.com"
github_url = "https://github.com/janedoe/proxy"
category = "Infra"
year = "2024"

[[experience]]
id = 1
title = "Engineer"
company = "Acme"
location = "Remote"
duration = "2020 - Present"

[[education]]
id = 1
degree = "BSc Computer Science"
school = "Some University"
location = "Porto"
duration = "2012 - 2016"

[[certifications]]
name = "CKA"
issuer = "CNCF"
date = "2022"
credential_id = "CKA-1"
"#;

fn load(text: &str) -> Result<std::sync::Arc<portfolio_site::Snapshot>, PortfolioError> {
    ContentRepository::load(ContentSource::Toml(text))
}

fn malformed_field(err: PortfolioError) -> String {
    match err {
        PortfolioError::MalformedContent { field, .. } => field,
        other => panic!("expected MalformedContent, got {other:?}"),
    }
}

#[test]
fn test_valid_snapshot_loads() {
    let snapshot = assert_ok!(load(VALID));

    assert_eq!(snapshot.profile().name, "Jane Doe");
    assert_eq!(snapshot.skills().len(), 2);
    assert_eq!(snapshot.skills()[0].technologies[1].level, 100);
    assert_eq!(snapshot.projects()[1].features, vec!["Hot reload".to_string()]);
    assert_eq!(snapshot.social().len(), 2);
    assert!(snapshot.social().get(SocialPlatform::Linkedin).is_none());
    assert!(snapshot.education()[0].gpa.is_none());
    assert!(snapshot.experience()[0].description.is_none());
    assert!(snapshot.stats().is_none());
}

#[test]
fn test_duplicate_project_id_is_rejected() {
    let text = VALID.replace("id = 2\ntitle = \"Proxy\"", "id = 1\ntitle = \"Proxy\"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "projects[1].id");
}

#[test]
fn test_skill_level_above_100_is_rejected() {
    let text = VALID.replace("level = 90", "level = 150");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "skills[0].technologies[0].level");
}

#[test]
fn test_negative_skill_level_is_rejected() {
    let text = VALID.replace("level = 90", "level = -1");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "toml_parsing");
}

#[test]
fn test_malformed_profile_email_is_rejected() {
    let text = VALID.replace("jane@example.com", "jane.example.com");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "profile.email");
}

#[test]
fn test_blank_profile_field_is_rejected() {
    let text = VALID.replace("location = \"Lisbon, PT\"", "location = \"   \"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "profile.location");
}

#[test]
fn test_missing_profile_field_is_rejected() {
    let text = VALID.replace("phone = \"+351 000 000 000\"\n", "");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "toml_parsing");
}

#[test]
fn test_relative_social_url_is_rejected() {
    let text = VALID.replace("https://github.com/janedoe\"", "github.com/janedoe\"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "social.github");
}

#[test]
fn test_unknown_social_platform_is_rejected() {
    let text = VALID.replace("[social]\n", "[social]\nmyspace = \"https://myspace.com/jane\"\n");
    assert_err!(load(&text));
}

#[test]
fn test_empty_skills_are_rejected() {
    let start = VALID.find("[[skills]]").unwrap();
    let end = VALID.find("[[projects]]").unwrap();
    // top-level key must come before the first table header
    let text = format!("skills = []\n{}{}", &VALID[..start], &VALID[end..]);
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "skills");
}

#[test]
fn test_duplicate_skill_category_is_rejected() {
    let text = VALID.replace("category = \"Ops\"", "category = \"Backend\"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "skills[1].category");
}

#[test]
fn test_duplicate_skill_name_within_category_is_rejected() {
    let text = VALID.replace("name = \"Go\"", "name = \"Rust\"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "skills[0].technologies[1].name");
}

#[test]
fn test_same_skill_name_in_different_categories_is_allowed() {
    let text = VALID.replace("name = \"Docker\"", "name = \"Rust\"");
    assert_ok!(load(&text));
}

#[test]
fn test_bad_year_is_rejected() {
    let text = VALID.replace("year = \"2023\"", "year = \"23\"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "projects[0].year");
}

#[test]
fn test_project_without_technologies_is_rejected() {
    let text = VALID.replace("technologies = [\"Rust\"]\n", "technologies = []\n");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "projects[0].technologies");
}

#[test]
fn test_blank_duration_is_rejected() {
    let text = VALID.replace("duration = \"2020 - Present\"", "duration = \"\"");
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "experience[0].duration");
}

#[test]
fn test_ids_only_need_to_be_unique_within_their_collection() {
    // experience id 1 and education id 1 coexist
    let snapshot = assert_ok!(load(VALID));
    assert_eq!(snapshot.experience()[0].id, snapshot.education()[0].id);

    let intern = r#"[[experience]]
id = 1
title = "Intern"
company = "Acme"
location = "Porto"
duration = "2019"

[[education]]"#;
    let text = VALID.replace("[[education]]", intern);
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "experience[1].id");
}

#[test]
fn test_duplicate_credential_id_is_rejected() {
    let duplicate = r#"
[[certifications]]
name = "CKAD"
issuer = "CNCF"
date = "2023"
credential_id = "CKA-1"
"#;
    let text = format!("{}{}", VALID, duplicate);
    let err = assert_err!(load(&text));
    assert_eq!(malformed_field(err), "certifications[1].credential_id");
}

#[test]
fn test_json_with_camel_case_field_names() {
    let json = serde_json::json!({
        "profile": {
            "name": "Jane Doe",
            "title": "Engineer",
            "subtitle": "Hi",
            "bio": "Bio",
            "location": "Lisbon",
            "email": "jane@example.com",
            "phone": "1",
            "availability": "Yes"
        },
        "social": { "linkedin": "https://linkedin.com/in/jane" },
        "skills": [
            {
                "category": "Backend",
                "technologies": [{ "name": "Rust", "level": 90, "icon": "🦀" }]
            }
        ],
        "projects": [{
            "id": 7,
            "title": "Queue",
            "description": "Jobs",
            "technologies": ["Rust"],
            "features": [],
            "liveUrl": "https://queue.example.com",
            "githubUrl": "https://github.com/jane/queue",
            "category": "Infra",
            "year": "2024"
        }],
        "certifications": [
            { "name": "CKA", "issuer": "CNCF", "date": "2022", "credentialId": "CKA-1" }
        ]
    });

    let text = json.to_string();
    let snapshot = assert_ok!(ContentRepository::load(ContentSource::Json(&text)));
    assert_eq!(snapshot.projects()[0].live_url, "https://queue.example.com");
    assert_eq!(snapshot.certifications()[0].credential_id, "CKA-1");
    assert!(snapshot.experience().is_empty());
}

#[test]
fn test_load_file_picks_format_by_extension() {
    let mut toml_file = NamedTempFile::with_suffix(".toml").unwrap();
    toml_file.write_all(VALID.as_bytes()).unwrap();
    assert_ok!(ContentRepository::load_file(toml_file.path()));

    let mut json_file = NamedTempFile::with_suffix(".json").unwrap();
    json_file.write_all(VALID.as_bytes()).unwrap();
    let err = assert_err!(ContentRepository::load_file(json_file.path()));
    assert_eq!(malformed_field(err), "json_parsing");
}

#[test]
fn test_missing_file_is_io_error() {
    let err = assert_err!(ContentRepository::load_file("/definitely/not/here.toml"));
    assert!(matches!(err, PortfolioError::IoError(_)));
}
