use portfolio_forge::config::AppConfig;
use serial_test::serial;
use std::env;

const KEYS: [&str; 4] = [
    "GITHUB_TOKEN",
    "GITHUB_USERNAME",
    "GEMINI_API_KEY",
    "VERCEL_TOKEN",
];

fn clear_env() {
    for key in KEYS {
        env::remove_var(key);
    }
}

fn set_all() {
    env::set_var("GITHUB_TOKEN", "ghp_testtoken");
    env::set_var("GITHUB_USERNAME", "octo");
    env::set_var("GEMINI_API_KEY", "AIza-test");
    env::set_var("VERCEL_TOKEN", "vc_test");
}

#[test]
#[serial]
fn complete_environment_validates() {
    clear_env();
    set_all();

    let credentials = AppConfig::from_env()
        .validate()
        .expect("complete environment should validate");
    assert_eq!(credentials.github.username, "octo");
    assert_eq!(credentials.gemini.model, "gemini-1.5-flash");
    assert_eq!(credentials.vercel.token, "vc_test");

    clear_env();
}

#[test]
#[serial]
fn missing_github_credentials_use_the_canonical_message() {
    clear_env();
    set_all();
    env::remove_var("GITHUB_TOKEN");

    let err = AppConfig::from_env().validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "GitHub credentials are not properly configured"
    );
    assert_eq!(err.kind(), "configuration");

    clear_env();
}

#[test]
#[serial]
fn blank_values_count_as_missing() {
    clear_env();
    set_all();
    env::set_var("GITHUB_USERNAME", "   ");

    let err = AppConfig::from_env().validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "GitHub credentials are not properly configured"
    );

    clear_env();
}

#[test]
#[serial]
fn missing_vercel_token_is_reported() {
    clear_env();
    set_all();
    env::remove_var("VERCEL_TOKEN");

    let err = AppConfig::from_env().validate().unwrap_err();
    assert_eq!(err.to_string(), "Vercel token is not configured");

    clear_env();
}

#[test]
#[serial]
fn missing_gemini_key_is_reported() {
    clear_env();
    set_all();
    env::remove_var("GEMINI_API_KEY");

    let err = AppConfig::from_env().validate().unwrap_err();
    assert_eq!(err.to_string(), "GEMINI_API_KEY is not configured");

    clear_env();
}
