//! End-to-end pipeline tests over the umbrella crate's public API.
//!
//! The classifier's parsing and validation discipline is exercised against
//! stubbed model replies — what is under test is the pipeline, not the
//! model's judgment.

use triage::{
    parse_classification, point_id, ClassifierError, IntentType, ProductArea, UrgencyLevel,
};

fn stub_reply(urgency: &str, intent: &str, product: &str, confidence: f64) -> String {
    format!(
        r#"{{"urgency":"{urgency}","intent":"{intent}","product":"{product}","confidence":{confidence},"reasoning":"stub"}}"#
    )
}

#[test]
fn outage_ticket_reply_classifies_critical() {
    // Ticket T-1 "Prod down, 500s everywhere" with the model answering the
    // expected JSON must land on urgency=critical.
    let reply = r#"{
        "urgency": "critical",
        "intent": "bug_report",
        "product": "api",
        "confidence": 0.97,
        "reasoning": "All endpoints failing; production outage."
    }"#;

    let classification = parse_classification(reply).unwrap();
    assert_eq!(classification.urgency, UrgencyLevel::Critical);
    assert_eq!(classification.intent, IntentType::BugReport);
    assert_eq!(classification.product, ProductArea::Api);
}

#[test]
fn every_taxonomy_combination_is_accepted() {
    // Any reply built from recognized literals and an in-range confidence
    // yields a classification whose fields are members of the closed enums.
    for urgency in UrgencyLevel::ALL {
        for intent in IntentType::ALL {
            for product in ProductArea::ALL {
                let reply = stub_reply(urgency.as_str(), intent.as_str(), product.as_str(), 0.5);
                let classification = parse_classification(&reply).unwrap();
                assert_eq!(classification.urgency, *urgency);
                assert_eq!(classification.intent, *intent);
                assert_eq!(classification.product, *product);
                assert!((0.0..=1.0).contains(&classification.confidence));
            }
        }
    }
}

#[test]
fn malformed_replies_never_yield_partial_classifications() {
    let cases = [
        // not JSON at all
        "urgency: critical",
        // JSON but not an object
        r#""critical""#,
        // unknown literal
        r#"{"urgency":"sev1","intent":"bug_report","product":"api","confidence":0.9,"reasoning":"x"}"#,
        // missing confidence
        r#"{"urgency":"critical","intent":"bug_report","product":"api","reasoning":"x"}"#,
        // out-of-range confidence
        r#"{"urgency":"critical","intent":"bug_report","product":"api","confidence":1.2,"reasoning":"x"}"#,
        // missing reasoning
        r#"{"urgency":"critical","intent":"bug_report","product":"api","confidence":0.9}"#,
    ];

    for reply in cases {
        let result = parse_classification(reply);
        assert!(result.is_err(), "accepted malformed reply: {reply}");
    }
}

#[test]
fn parse_and_validation_errors_are_distinguished() {
    let err = parse_classification("not json").unwrap_err();
    assert!(matches!(err, ClassifierError::Parse(_)));

    let err = parse_classification(
        r#"{"urgency":"sev1","intent":"bug_report","product":"api","confidence":0.9,"reasoning":"x"}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ClassifierError::Validation(_)));
}

#[test]
fn same_ticket_id_always_maps_to_the_same_point() {
    // Idempotent upsert semantics rest on this: re-adding a ticket id hits
    // the same point and overwrites instead of duplicating.
    let first = point_id("TICKET-001");
    for _ in 0..100 {
        assert_eq!(point_id("TICKET-001"), first);
    }
    assert_ne!(point_id("TICKET-001"), point_id("ticket-001"));
}

#[test]
fn pipeline_error_wraps_both_stages() {
    let classifier_err: triage::PipelineError = ClassifierError::MissingApiKey.into();
    assert!(classifier_err.to_string().contains("classification failure"));

    let store_err: triage::PipelineError =
        triage::StoreError::Qdrant("collection missing".into()).into();
    assert!(store_err.to_string().contains("vector store failure"));
}
