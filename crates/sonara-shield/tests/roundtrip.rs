use sonara_core::models::deid::PhiCategory;
use sonara_shield::scrub::DeidSession;
use sonara_shield::{deidentify, reidentify, reidentify_value};

const SESSION_TEXT: &str = "Anna Schmidt attended on 14.03.2024. She can be reached at \
anna.schmidt@example.com or 0171 234 5678, and recently moved to 42 Maple Street.";

#[test]
fn scrubbed_text_contains_no_originals() {
    let (scrubbed, map) = deidentify(SESSION_TEXT);

    assert!(!scrubbed.contains("Anna Schmidt"));
    assert!(!scrubbed.contains("14.03.2024"));
    assert!(!scrubbed.contains("anna.schmidt@example.com"));
    assert!(!scrubbed.contains("0171 234 5678"));
    assert!(!scrubbed.contains("42 Maple Street"));

    assert!(scrubbed.contains("[NAME_1]"));
    assert!(scrubbed.contains("[DATE_1]"));
    assert!(scrubbed.contains("[EMAIL_1]"));
    assert!(scrubbed.contains("[PHONE_1]"));
    assert!(scrubbed.contains("[ADDRESS_1]"));

    assert_eq!(map.len(), 5);
}

/// Every placeholder in the map appears literally in the scrubbed output.
#[test]
fn every_mapped_placeholder_appears_in_output() {
    let (scrubbed, map) = deidentify(SESSION_TEXT);
    for replacement in map.iter() {
        assert!(
            scrubbed.contains(&replacement.placeholder),
            "placeholder {} missing from output",
            replacement.placeholder
        );
    }
}

#[test]
fn reidentify_is_left_inverse_of_deidentify() {
    let (scrubbed, map) = deidentify(SESSION_TEXT);
    assert_eq!(reidentify(&scrubbed, &map), SESSION_TEXT);
}

#[test]
fn repeated_value_reuses_placeholder() {
    let text = "John Smith arrived late. John Smith left early.";
    let (scrubbed, map) = deidentify(text);

    assert_eq!(map.len(), 1);
    assert_eq!(scrubbed.matches("[NAME_1]").count(), 2);
    assert_eq!(reidentify(&scrubbed, &map), text);
}

#[test]
fn per_category_counters_increment_independently() {
    let text = "Jane Doe met Tom Baker on 01.02.2023 and again on 05/06/2023.";
    let (scrubbed, _map) = deidentify(text);

    assert!(scrubbed.contains("[NAME_1]"));
    assert!(scrubbed.contains("[NAME_2]"));
    assert!(scrubbed.contains("[DATE_1]"));
    assert!(scrubbed.contains("[DATE_2]"));
}

#[test]
fn sentence_openers_are_not_names() {
    let text = "This Tuesday went well. Every Session matters.";
    let (scrubbed, map) = deidentify(text);
    assert_eq!(scrubbed, text);
    assert!(map.is_empty());
}

#[test]
fn street_pairs_are_left_for_the_address_matcher() {
    let (scrubbed, map) = deidentify("She lives at 7 Birch Avenue now.");
    assert!(scrubbed.contains("[ADDRESS_1]"));
    assert!(
        map.iter().all(|r| r.category == PhiCategory::Address),
        "street name must not be consumed by the name matcher"
    );
}

#[test]
fn unmapped_placeholder_is_left_verbatim() {
    let (_, map) = deidentify("Anna Schmidt was here.");
    let model_output = "Note for [NAME_1], cc [NAME_9].";
    let restored = reidentify(model_output, &map);
    assert!(restored.contains("Anna Schmidt"));
    assert!(restored.contains("[NAME_9]"));
}

#[test]
fn session_scrubs_consistently_across_calls() {
    let mut session = DeidSession::new();
    let first = session.scrub("Anna Schmidt reported progress.");
    let second = session.scrub("Anna Schmidt cancelled the follow-up.");
    assert!(first.contains("[NAME_1]"));
    assert!(second.contains("[NAME_1]"));
    assert_eq!(session.map().len(), 1);
}

#[test]
fn structured_results_are_reidentified_recursively() {
    let (_, map) = deidentify("Anna Schmidt was here on 14.03.2024.");

    let mut value = serde_json::json!({
        "summary": "[NAME_1] discussed the events of [DATE_1].",
        "signals": [
            { "description": "mentions of [NAME_1]" }
        ]
    });
    reidentify_value(&mut value, &map);

    assert_eq!(
        value["summary"],
        "Anna Schmidt discussed the events of 14.03.2024."
    );
    assert_eq!(value["signals"][0]["description"], "mentions of Anna Schmidt");
}
