//! Test fixtures and constants.

use load_secrets::{Field, Secret, SecretGroup};

pub const ACCOUNT: &str = "123456789012";
pub const OTHER_ACCOUNT: &str = "210987654321";
pub const HOME_REGION: &str = "eu-west-1";

/// The `/app/` group with a single string secret.
pub fn app_group(secret: Secret) -> SecretGroup {
    SecretGroup::new(ACCOUNT, HOME_REGION, "/app/")
        .with_description("Application")
        .with_secret(secret)
}

/// A JSON secret with a bare field and a described field.
pub fn json_secret() -> Secret {
    Secret::json(
        "api",
        vec![
            Field::from("username"),
            Field::Described {
                key: "password".to_string(),
                description: Some("API password".to_string()),
                example: Some("hunter2".to_string()),
            },
        ],
    )
}

/// A config file exercising both secret kinds.
pub const SAMPLE_CONFIG: &str = r#"
[[group]]
account_id = "123456789012"
region = "eu-west-1"
name_prefix = "/app/"
description = "Application"

[[group.secret]]
name = "db-password"
type = "string"
replica_regions = ["us-east-1"]

[[group.secret]]
name = "api"
type = "json"
fields = ["username", { key = "password", example = "hunter2" }]
"#;
