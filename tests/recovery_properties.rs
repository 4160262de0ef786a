//! Recovery pipeline behaviour on the kinds of text models actually return.

use prompt_director::structured::{clean, lenient, OutputRecovery, RecoveredResult, RecoveryStage};
use prompt_director::{recover, Locale};
use serde_json::json;

const WELL_FORMED: &str = r#"{
  "prompt": {
    "type": "Cinematic",
    "subject_context": {"description": "A glass of iced coffee", "environment": "Sunlit cafe"},
    "text_integration_styling": {"headline": {"text": "Fresh Brew", "font_style": "Bold sans"}},
    "visual_elements": {"main_subject": "Glass", "supporting_elements": "Beans, ice"},
    "technical_specs": {"camera": "Sony A7R IV", "resolution": "8K", "quality": "Ultra-Sharp"}
  }
}"#;

#[test]
fn test_well_formed_passes_strict() {
    let (result, stage) = OutputRecovery::default().recover_with_stage(WELL_FORMED);
    assert_eq!(stage, RecoveryStage::Strict);
    assert_eq!(
        result.parsed().unwrap()["prompt"]["technical_specs"]["resolution"],
        "8K"
    );
}

#[test]
fn test_fences_and_prose_are_removed() {
    let wrapped = format!(
        "Here is your prompt:\n```json\n{}\n```\nLet me know if you need changes!",
        WELL_FORMED
    );
    let expected: serde_json::Value = serde_json::from_str(WELL_FORMED).unwrap();
    assert_eq!(recover(&wrapped), RecoveredResult::Parsed(expected));
}

#[test]
fn test_common_model_slips_are_tolerated() {
    let sloppy = r#"```
    {
      // model commentary
      prompt: {
        'type': 'Surreal',
        "visual_elements": {"main_subject": "Shoe", "supporting_elements": "Clouds",},
      },
    }
    ```"#;
    let (result, stage) = OutputRecovery::default().recover_with_stage(sloppy);
    assert_eq!(stage, RecoveryStage::Lenient);
    assert_eq!(
        result,
        RecoveredResult::Parsed(json!({
            "prompt": {
                "type": "Surreal",
                "visual_elements": {"main_subject": "Shoe", "supporting_elements": "Clouds"}
            }
        }))
    );
}

#[test]
fn test_truncated_output_becomes_diagnostic() {
    let truncated = &WELL_FORMED[..WELL_FORMED.len() / 2];
    let result = OutputRecovery::new(Locale::En).recover(truncated);
    let diagnostic = result.diagnostic().expect("diagnostic");
    assert_eq!(diagnostic.raw_output, clean(truncated));
    assert!(!diagnostic.error.is_empty());
}

#[test]
fn test_recovery_is_idempotent_on_parsed_values() {
    for input in [
        WELL_FORMED.to_string(),
        "Sure! {\"a\": [1, 2,], b: 'x'}".to_string(),
        "```json\n{\"n\": null}\n```".to_string(),
    ] {
        let first = recover(&input);
        let value = first.parsed().expect("parsed").clone();
        let again = recover(&serde_json::to_string(&value).unwrap());
        assert_eq!(again, first, "input {:?}", input);
    }
}

#[test]
fn test_recovery_is_idempotent_on_diagnostic_raw_output() {
    let truncated_fenced = format!("```json\n{}", &WELL_FORMED[..WELL_FORMED.len() / 2]);
    for input in [
        "not json at all",
        truncated_fenced.as_str(),
        "} x {",
        "`````json`",
        "```python\n{'a': \n```",
        "Here you go: {\"headline\": \"```Bold``` text\",",
    ] {
        let first = recover(input);
        let diagnostic = first.diagnostic().expect("diagnostic").clone();
        let again = recover(&diagnostic.raw_output);
        assert_eq!(again, first, "input {:?}", input);
        assert_eq!(again.diagnostic(), Some(&diagnostic));
    }
}

#[test]
fn test_recovery_never_panics_on_hostile_input() {
    let deep = "[".repeat(10_000);
    for input in [
        "",
        "{",
        "}",
        "}{",
        "```",
        "{\"a\": \"\\u12\"}",
        "{\"a\": 1e999999}",
        deep.as_str(),
        "{'unterminated",
        "\u{feff}{\"bom\": true}",
    ] {
        let _ = recover(input);
    }
}

#[test]
fn test_lenient_rejects_what_it_cannot_repair() {
    assert!(lenient::parse("{\"a\": }").is_err());
    assert!(lenient::parse("{\"a\": 1} trailing").is_err());
    assert!(lenient::parse("function() { return 1 }").is_err());
}
