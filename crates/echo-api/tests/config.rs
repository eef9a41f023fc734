use std::collections::HashMap;

use echo_api::config::{DEFAULT_CHAT_MODELS, EchoConfig, StoreKind};

fn config(vars: &[(&str, &str)]) -> EchoConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EchoConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn defaults_apply_when_unset() {
    let config = config(&[]);
    assert_eq!(config.bucket, "dr-echo");
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.store, StoreKind::S3);
    assert_eq!(config.chat_models, DEFAULT_CHAT_MODELS);
}

#[test]
fn model_list_is_split_and_trimmed() {
    let config = config(&[
        ("ECHO_CHAT_MODELS", " model-a , ,model-b "),
        ("ECHO_STORE", "Memory"),
        ("ECHO_BUCKET", "reports-bucket"),
    ]);
    assert_eq!(config.chat_models, vec!["model-a", "model-b"]);
    assert_eq!(config.store, StoreKind::Memory);
    assert_eq!(config.bucket, "reports-bucket");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = config(&[("ECHO_CHAT_MODELS", " , "), ("AWS_REGION", "  ")]);
    assert_eq!(config.chat_models.len(), DEFAULT_CHAT_MODELS.len());
    assert_eq!(config.region, "us-east-1");
}
