use arex_config::config::{ConfigUpdate, RuntimeConfig, DURING_WORK};

#[test]
fn test_update_from_json_payload() {
    let json = r#"{
        "enableDebug": false,
        "serviceName": "order-service",
        "entities": [
            {"clazzName": "com.example.OrderRepo", "operation": "find", "parameterTypes": "long"}
        ],
        "properties": {"arex.agent.version": "0.4.0", "arex.during.work": "true"},
        "excludeServiceOperations": ["/health", "/metrics"],
        "dubboStreamReplayThreshold": 100,
        "recordRate": 5
    }"#;

    let update: ConfigUpdate = serde_json::from_str(json).unwrap();
    let cfg = RuntimeConfig::from(update);

    assert_eq!(cfg.service_name(), "order-service");
    assert_eq!(cfg.record_version(), Some("0.4.0"));
    assert!(cfg.get_bool(DURING_WORK, false));
    assert_eq!(cfg.exclude_service_operations().len(), 2);
    assert_eq!(cfg.dubbo_stream_replay_threshold(), 100);
    assert_eq!(cfg.record_rate(), 5);
    assert!(cfg
        .dynamic_entity("com.example.OrderRepofindlong")
        .is_some());
}

#[test]
fn test_sparse_payload_uses_defaults() {
    let update: ConfigUpdate = serde_json::from_str(r#"{"serviceName": "bare"}"#).unwrap();
    let cfg = RuntimeConfig::new(update);

    assert_eq!(cfg.service_name(), "bare");
    assert!(!cfg.is_enable_debug());
    assert_eq!(cfg.record_rate(), 0);
    assert!(cfg.dynamic_class_entities().is_empty());
    assert!(cfg.properties().is_empty());
    assert!(cfg.invalid_record_with("/any", &|_: &str| true));
}
