//! Integration tests for the Generator

#[cfg(test)]
mod tests {
    use crate::{parse_reply, GenerationError, Generator, GeneratorConfig, SchemaRule};
    use proptest::prelude::*;
    use studykit_domain::{Artifact, ArtifactKind, GenerationRequest, WordList};
    use studykit_llm::MockProvider;

    const QUIZ_JSON: &str = r#"{"quiz": ["Question 1: What is ATP?", "Question 2: True or false: plants respire."], "answers": ["Answer 1: The cell's energy currency", "Answer 2: True"]}"#;

    #[test]
    fn test_full_quiz_flow() {
        let llm = MockProvider::new(QUIZ_JSON);
        let generator = Generator::new(llm.clone());

        let quiz = generator.generate_quiz("Mitochondria produce ATP.").unwrap();

        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.questions()[0], "Question 1: What is ATP?");
        assert_eq!(quiz.answers()[1], "Answer 2: True");
        assert_eq!(llm.call_count(), 1);
        assert_eq!(llm.last_temperature(), Some(0.7));

        let prompt = llm.last_prompt().unwrap();
        assert!(prompt.ends_with("\n\nMitochondria produce ATP."));
        assert!(prompt.contains("\"answers\""));
    }

    #[test]
    fn test_fenced_and_prose_wrapped_replies_match_bare_json() {
        let bare = Generator::new(MockProvider::new(QUIZ_JSON)).generate_quiz("text").unwrap();

        let fenced = format!("```json\n{}\n```", QUIZ_JSON);
        let wrapped = format!("Sure! Here's your quiz:\n\n{}\n\nLet me know if you'd like more.", fenced);

        for reply in [fenced, wrapped] {
            let quiz = Generator::new(MockProvider::new(reply)).generate_quiz("text").unwrap();
            assert_eq!(quiz, bare);
        }
    }

    #[test]
    fn test_reordered_and_nested_payloads() {
        let reordered = r#"{"answers": ["A1"], "quiz": ["Q1"]}"#;
        let quiz = Generator::new(MockProvider::new(reordered)).generate_quiz("text").unwrap();
        assert_eq!(quiz.questions(), ["Q1"]);

        let nested = r#"{"response": {"notes": ["Summary: cells", "- Nucleus holds DNA"]}}"#;
        let notes = Generator::new(MockProvider::new(nested)).generate_notes("text").unwrap();
        assert_eq!(notes.summary(), "Summary: cells");
        assert_eq!(notes.bullets(), ["- Nucleus holds DNA"]);
    }

    #[test]
    fn test_quiz_length_mismatch_fails() {
        let llm = MockProvider::new(r#"{"quiz": ["Q1", "Q2", "Q3"], "answers": ["A1", "A2"]}"#);
        let err = Generator::new(llm).generate_quiz("text").unwrap_err();

        match err {
            GenerationError::SchemaViolation { kind, rule, raw } => {
                assert_eq!(kind, ArtifactKind::Quiz);
                assert_eq!(rule, SchemaRule::LengthMismatch { questions: 3, answers: 2 });
                assert!(raw.contains("Q3"));
            }
            other => panic!("expected a schema violation, got {:?}", other),
        }
    }

    #[test]
    fn test_partial_payload_is_a_schema_violation() {
        let llm = MockProvider::new(r#"{"quiz": ["Q1"]}"#);
        let err = Generator::new(llm).generate_quiz("text").unwrap_err();
        assert!(matches!(
            err,
            GenerationError::SchemaViolation { rule: SchemaRule::MissingKey("answers"), .. }
        ));
    }

    #[test]
    fn test_no_payload() {
        let llm = MockProvider::new("I'm sorry, I can't help with that.");
        let err = Generator::new(llm).generate_notes("text").unwrap_err();
        assert!(matches!(
            err,
            GenerationError::NoStructuredPayload { kind: ArtifactKind::Notes, .. }
        ));
    }

    #[test]
    fn test_malformed_payload_keeps_raw_reply() {
        let reply = r#"{"notes": ["Summary" "- missing comma"]}"#;
        let err = Generator::new(MockProvider::new(reply)).generate_notes("text").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedPayload { .. }));
        assert_eq!(err.raw_reply(), Some(reply));
    }

    #[test]
    fn test_empty_words_never_call_the_model() {
        let llm = MockProvider::new(r#"{"story": "unused"}"#);
        let generator = Generator::new(llm.clone());

        let story = generator.generate_story(&WordList::default()).unwrap();
        assert_eq!(story.as_str(), "");

        let mnemonics = generator.generate_mnemonics(&WordList::new(["", "  "])).unwrap();
        assert!(mnemonics.is_empty());

        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_blank_text_is_rejected_before_the_model() {
        let llm = MockProvider::new(QUIZ_JSON);
        let generator = Generator::new(llm.clone());

        assert!(matches!(
            generator.generate_quiz("  \n\t"),
            Err(GenerationError::EmptyInput(ArtifactKind::Quiz))
        ));
        assert!(matches!(
            generator.generate_notes(""),
            Err(GenerationError::EmptyInput(ArtifactKind::Notes))
        ));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_provider_failure_propagates() {
        let llm = MockProvider::default();
        llm.push_error("upstream timeout");

        let err = Generator::new(llm.clone()).generate_quiz("text").unwrap_err();
        assert!(matches!(err, GenerationError::Provider(ref msg) if msg.contains("upstream timeout")));
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn test_story_prompt_and_temperature() {
        let llm = MockProvider::new(r#"{"story": "The moon watched the tide."}"#);
        let generator = Generator::new(llm.clone());

        let story = generator.generate_story(&WordList::parse("moon, tide")).unwrap();

        assert_eq!(story.as_str(), "The moon watched the tide.");
        assert_eq!(llm.last_temperature(), Some(0.8));
        assert!(llm.last_prompt().unwrap().ends_with("\n\nWords: moon, tide"));
    }

    #[test]
    fn test_mnemonics_flow() {
        let llm = MockProvider::new(
            r#"{"mnemonics": ["Word: cat - Mnemonic: Cute Animal Tail", "Word: sun - Mnemonic: Picture a bright sun"]}"#,
        );
        let mnemonics = Generator::new(llm)
            .generate_mnemonics(&WordList::new(["cat", "sun"]))
            .unwrap();
        assert_eq!(mnemonics.len(), 2);
        assert!(mnemonics.as_slice()[0].starts_with("Word: cat"));
    }

    #[test]
    fn test_configured_temperature_and_truncation() {
        let config = GeneratorConfig {
            quiz_temperature: 0.2,
            max_input_chars: Some(5),
            ..GeneratorConfig::default()
        };
        let llm = MockProvider::new(QUIZ_JSON);
        let generator = Generator::with_config(llm.clone(), config).unwrap();

        generator.generate_quiz("héllo world").unwrap();

        assert_eq!(llm.last_temperature(), Some(0.2));
        assert!(llm.last_prompt().unwrap().ends_with("\n\nhéllo"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig {
            notes_temperature: -1.0,
            ..GeneratorConfig::default()
        };
        let result = Generator::with_config(MockProvider::default(), config);
        assert!(matches!(result, Err(GenerationError::Config(_))));
    }

    #[test]
    fn test_generate_dispatches_on_request_kind() {
        let llm = MockProvider::with_replies([r#"{"notes": ["Summary: x"]}"#, r#"{"story": "A tale of moons."}"#]);
        let generator = Generator::new(llm);

        let notes = generator.generate(&GenerationRequest::notes("text")).unwrap();
        assert_eq!(notes.kind(), ArtifactKind::Notes);

        match generator.generate(&GenerationRequest::story(WordList::new(["moon"]))).unwrap() {
            Artifact::Story(story) => assert_eq!(story.as_str(), "A tale of moons."),
            other => panic!("expected a story, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_payload_found_inside_any_prose(
            prefix in "[^{}]{0,40}",
            suffix in "[^{}]{0,40}",
        ) {
            let reply = format!("{}{{\"notes\": [\"Summary\", \"- Point\"]}}{}", prefix, suffix);
            let artifact = parse_reply(ArtifactKind::Notes, &reply, 0).unwrap();
            match artifact {
                Artifact::Notes(notes) => prop_assert_eq!(notes.as_slice().len(), 2),
                other => prop_assert!(false, "unexpected artifact {:?}", other),
            }
        }
    }
}
