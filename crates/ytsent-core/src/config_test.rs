use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert!(cfg.youtube_api_key.is_none());
    assert_eq!(cfg.youtube_base_url, "https://www.googleapis.com/youtube/v3/");
    assert_eq!(cfg.classifier_url, "http://localhost:8080");
    assert_eq!(cfg.label_set, LabelSet::ThreeClass);
    assert!((cfg.likes_coefficient.value() - 0.5).abs() < f64::EPSILON);
    assert_eq!(cfg.missing_likes, MissingLikesPolicy::TreatAsZero);
    assert_eq!(cfg.output_dir, PathBuf::from("./output"));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "ytsent/0.1 (comment-sentiment)");
    assert_eq!(cfg.max_retries, 3);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert_eq!(cfg.classifier_batch_size, 32);
    assert_eq!(cfg.max_comments, 100);
}

#[test]
fn youtube_api_key_is_read() {
    let mut map = HashMap::new();
    map.insert("YOUTUBE_API_KEY", "abc123");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.youtube_api_key.as_deref(), Some("abc123"));
    assert_eq!(cfg.require_youtube_api_key().unwrap(), "abc123");
}

#[test]
fn blank_youtube_api_key_is_treated_as_missing() {
    let mut map = HashMap::new();
    map.insert("YOUTUBE_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.youtube_api_key.is_none());
    assert!(matches!(
        cfg.require_youtube_api_key(),
        Err(ConfigError::MissingEnvVar(ref var)) if var == "YOUTUBE_API_KEY"
    ));
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("YOUTUBE_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret"), "{debug}");
    assert!(debug.contains("[redacted]"), "{debug}");
}

#[test]
fn label_set_override() {
    let mut map = HashMap::new();
    map.insert("YTSENT_LABEL_SET", "five-star");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.label_set, LabelSet::FiveStar);
}

#[test]
fn label_set_invalid() {
    let mut map = HashMap::new();
    map.insert("YTSENT_LABEL_SET", "binary");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTSENT_LABEL_SET"),
        "expected InvalidEnvVar(YTSENT_LABEL_SET), got: {result:?}"
    );
}

#[test]
fn likes_coefficient_override() {
    let mut map = HashMap::new();
    map.insert("YTSENT_LIKES_COEFFICIENT", "0.9");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.likes_coefficient.value() - 0.9).abs() < f64::EPSILON);
}

#[test]
fn likes_coefficient_of_one_is_rejected() {
    let mut map = HashMap::new();
    map.insert("YTSENT_LIKES_COEFFICIENT", "1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTSENT_LIKES_COEFFICIENT"),
        "expected InvalidEnvVar(YTSENT_LIKES_COEFFICIENT), got: {result:?}"
    );
}

#[test]
fn likes_coefficient_not_a_number() {
    let mut map = HashMap::new();
    map.insert("YTSENT_LIKES_COEFFICIENT", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTSENT_LIKES_COEFFICIENT"),
        "expected InvalidEnvVar(YTSENT_LIKES_COEFFICIENT), got: {result:?}"
    );
}

#[test]
fn missing_likes_reject_override() {
    let mut map = HashMap::new();
    map.insert("YTSENT_MISSING_LIKES", "reject");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.missing_likes, MissingLikesPolicy::Reject);
    assert_eq!(cfg.weighting().missing_likes, MissingLikesPolicy::Reject);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("YTSENT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTSENT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(YTSENT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = HashMap::new();
    map.insert("YTSENT_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 5);
}

#[test]
fn classifier_batch_size_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("YTSENT_CLASSIFIER_BATCH_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "YTSENT_CLASSIFIER_BATCH_SIZE"),
        "expected InvalidEnvVar(YTSENT_CLASSIFIER_BATCH_SIZE), got: {result:?}"
    );
}

#[test]
fn output_dir_drives_derived_directories() {
    let mut map = HashMap::new();
    map.insert("YTSENT_OUTPUT_DIR", "/tmp/ytsent");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.comments_dir(), PathBuf::from("/tmp/ytsent/comments"));
    assert_eq!(
        cfg.analysis_dir(),
        PathBuf::from("/tmp/ytsent/sentiment_analysis")
    );
}
