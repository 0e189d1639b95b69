use rust_passgen::core::service::ServiceError;
use rust_passgen::core::{Config, PassGen};
use rust_passgen::db::Database;
use rust_passgen::generators::random::ALPHABET;
use rust_passgen::generators::{GenerationError, PasswordGenerator};
use rust_passgen::models::GenerationRequest;

fn service_with_map(json: &str) -> PassGen {
    let config = Config::from_source(|key| match key {
        "CHAR_MAP" => Some(json.to_string()),
        "DATABASE_URL" => Some("memory:".to_string()),
        _ => None,
    })
    .unwrap();
    let db = Database::new(&config.database_url).unwrap();
    PassGen::new(db, PasswordGenerator::new(config.substitution_table))
}

#[test]
fn configured_table_drives_derivation() {
    let svc = service_with_map(r#"{"A": "5", "B": "*"}"#);
    let record = svc.generate(&GenerationRequest::from_base("ABC")).unwrap();
    assert_eq!(record.value, "5*C");
    assert_eq!(svc.list(None).unwrap(), vec![record]);
}

#[test]
fn empty_base_with_length_generates_random() {
    let svc = service_with_map("{}");
    let record = svc
        .generate(&GenerationRequest {
            base: Some(String::new()),
            length: Some(8),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(record.value.len(), 8);
    assert!(record.value.bytes().all(|b| ALPHABET.contains(&b)));
    assert_eq!(record.base, None);
}

#[test]
fn missing_length_is_rejected_and_nothing_is_stored() {
    let svc = service_with_map("{}");
    let err = svc.generate(&GenerationRequest::default()).unwrap_err();
    assert!(matches!(err, ServiceError::Generation(GenerationError::MissingLength)));
    assert!(svc.list(None).unwrap().is_empty());
}

#[test]
fn one_record_per_generation_and_full_cleanup() {
    let svc = service_with_map("{}");
    for length in 1..=5 {
        svc.generate(&GenerationRequest::random(length)).unwrap();
    }
    let records = svc.list(None).unwrap();
    let lengths: Vec<usize> = records.iter().map(|r| r.value.len()).collect();
    assert_eq!(lengths, vec![1, 2, 3, 4, 5]);

    assert!(svc.delete(records[0].id, None).unwrap());
    assert_eq!(svc.delete_all(None).unwrap(), 4);
    assert!(svc.list(None).unwrap().is_empty());
    svc.close().unwrap();
}
