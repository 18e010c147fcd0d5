#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use futures::executor::block_on;

    use crate::conversation::{ChatState, Conversation, PendingTurn};
    use crate::event_bus::EventBus;
    use crate::markup::{to_markup, Span};
    use crate::ports::{DelayPort, EntropyPort};
    use crate::resolver::{resolve, RuleTable};
    use crate::responder::Responder;
    use crate::rules::{default_rules, ADMISSIONS_URL, FALLBACK_REPLY};
    use crate::startup::{load_config, load_rule_table};
    use siba_types::config::{AssistantConfig, DelayRange};
    use siba_types::event::ChatEvent;
    use siba_types::message::Role;
    use siba_types::rule::Rule;
    use siba_types::AssistantError;

    // ─── Resolver Tests ──────────────────────────────────────

    fn reply_of(name: &str) -> String {
        default_rules()
            .into_iter()
            .find(|r| r.name == name)
            .map(|r| r.reply)
            .unwrap()
    }

    #[test]
    fn test_resolve_admission_question() {
        let reply = resolve("What is the admission deadline?");
        assert_eq!(reply, reply_of("admissions"));
        assert!(reply.contains(ADMISSIONS_URL));
    }

    #[test]
    fn test_resolve_greeting() {
        assert_eq!(resolve("hi"), reply_of("greeting"));
        assert!(resolve("hi").contains("welcome"));
    }

    #[test]
    fn test_resolve_fallback() {
        assert_eq!(resolve("xyz123"), FALLBACK_REPLY);
        assert_eq!(resolve(""), FALLBACK_REPLY);
        assert_eq!(resolve("   "), FALLBACK_REPLY);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve("TUITION please"), reply_of("fees"));
        assert_eq!(resolve("Scholarship?"), reply_of("scholarships"));
    }

    #[test]
    fn test_resolve_first_declared_rule_wins() {
        // admissions is declared before fees
        assert_eq!(resolve("fee for admission"), reply_of("admissions"));
        // "scholarship" contains "hi" but greeting is declared last
        assert_eq!(resolve("scholarship"), reply_of("scholarships"));
    }

    #[test]
    fn test_resolve_plain_substring_containment() {
        assert_eq!(resolve("coffee"), reply_of("fees"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = resolve("Which programs do you offer?");
        let second = resolve("Which programs do you offer?");
        assert_eq!(first, second);
        assert_eq!(first, reply_of("programs"));
    }

    #[test]
    fn test_custom_table_order_and_fallback() {
        let table = RuleTable::new(vec![
            Rule::new("a", &["alpha"], "first"),
            Rule::new("b", &["alpha", "beta"], "second"),
        ])
        .unwrap()
        .with_fallback("none");

        assert_eq!(table.resolve("ALPHA beta"), "first");
        assert_eq!(table.resolve("beta"), "second");
        assert_eq!(table.resolve("gamma"), "none");
        assert_eq!(table.find("beta").map(|r| r.name.as_str()), Some("b"));
        assert!(table.find("gamma").is_none());
    }

    #[test]
    fn test_table_new_lowercases_triggers() {
        let rule = Rule {
            name: "x".to_string(),
            triggers: vec!["MiXeD".to_string()],
            reply: "ok".to_string(),
        };
        let table = RuleTable::new(vec![rule]).unwrap();
        assert_eq!(table.rules()[0].triggers, vec!["mixed"]);
        assert_eq!(table.resolve("mixed case"), "ok");
        assert_eq!(table.fallback(), FALLBACK_REPLY);
    }

    #[test]
    fn test_table_rejects_empty() {
        let err = RuleTable::new(vec![]).unwrap_err();
        assert!(matches!(err, AssistantError::Config(_)));
    }

    #[test]
    fn test_table_rejects_blank_trigger() {
        let err = RuleTable::new(vec![Rule::new("bad", &["ok", "  "], "r")]).unwrap_err();
        assert!(err.to_string().contains("blank trigger"));

        let err = RuleTable::new(vec![Rule::new("none", &[], "r")]).unwrap_err();
        assert!(err.to_string().contains("no triggers"));
    }

    #[test]
    fn test_table_from_json_list() {
        let json = r#"[
            {"name": "hours", "triggers": ["Open"], "reply": "9 to 5"},
            {"triggers": ["bye"], "reply": "Goodbye"}
        ]"#;
        let table = RuleTable::from_json(json).unwrap();
        assert_eq!(table.rules().len(), 2);
        assert_eq!(table.resolve("when are you open?"), "9 to 5");
        assert_eq!(table.resolve("nothing"), FALLBACK_REPLY);
    }

    #[test]
    fn test_table_from_json_with_fallback() {
        let json = r#"{"rules": [{"triggers": ["bye"], "reply": "Goodbye"}], "fallback": "Huh?"}"#;
        let table = RuleTable::from_json(json).unwrap();
        assert_eq!(table.resolve("BYE"), "Goodbye");
        assert_eq!(table.resolve("hello"), "Huh?");
    }

    #[test]
    fn test_table_from_json_invalid() {
        assert!(matches!(
            RuleTable::from_json("{{not json"),
            Err(AssistantError::Serialization(_))
        ));
        assert!(matches!(
            RuleTable::from_json("[]"),
            Err(AssistantError::Config(_))
        ));
    }

    #[test]
    fn test_builtin_table_is_shared() {
        let a = RuleTable::builtin() as *const RuleTable;
        let b = RuleTable::builtin() as *const RuleTable;
        assert_eq!(a, b);
        assert_eq!(RuleTable::builtin().rules().len(), default_rules().len());
    }

    #[test]
    fn test_builtin_triggers_are_lowercase_and_non_blank() {
        for rule in RuleTable::builtin().rules() {
            assert!(!rule.triggers.is_empty(), "rule {} has no triggers", rule.name);
            for trigger in &rule.triggers {
                assert_eq!(trigger, &trigger.to_lowercase());
                assert!(!trigger.trim().is_empty());
            }
        }
    }

    // ─── Conversation Tests ──────────────────────────────────

    #[test]
    fn test_conversation_initial() {
        let conv = Conversation::new();
        assert!(conv.messages().is_empty());
        assert_eq!(conv.state(), ChatState::Idle);
        assert!(!conv.is_waiting());
        assert!(!conv.session().id.is_empty());
    }

    #[test]
    fn test_conversation_with_greeting() {
        let conv = Conversation::with_greeting(Some("Welcome!"));
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].role, Role::Assistant);
        assert_eq!(conv.messages()[0].text, "Welcome!");
        assert_eq!(conv.state(), ChatState::Idle);

        assert!(Conversation::with_greeting(None).messages().is_empty());
        assert!(Conversation::with_greeting(Some("  ")).messages().is_empty());
    }

    #[test]
    fn test_conversation_submit_appends_trimmed_user_message() {
        let mut conv = Conversation::new();
        let turn = conv.submit("  hello there \n").unwrap();

        assert_eq!(turn, PendingTurn { turn_id: 1, input: "hello there".to_string() });
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].role, Role::User);
        assert_eq!(conv.messages()[0].text, "hello there");
        assert_eq!(conv.state(), ChatState::Waiting { turn_id: 1 });
    }

    #[test]
    fn test_conversation_blank_submit_is_noop() {
        let mut conv = Conversation::new();
        assert!(conv.submit("   ").is_none());
        assert!(conv.submit("").is_none());
        assert!(conv.submit("\n\t").is_none());
        assert!(conv.messages().is_empty());
        assert_eq!(conv.state(), ChatState::Idle);
    }

    #[test]
    fn test_conversation_submit_while_waiting_is_noop() {
        let mut conv = Conversation::new();
        let turn = conv.submit("fees").unwrap();

        assert!(!conv.can_submit("another"));
        assert!(conv.submit("another").is_none());
        assert_eq!(conv.messages().len(), 1);

        conv.complete(turn.turn_id, "reply").unwrap();
        assert_eq!(conv.state(), ChatState::Idle);

        // Exactly one assistant message since the triggering user message
        let after_user: Vec<_> = conv.messages().iter().skip(1).collect();
        assert_eq!(after_user.len(), 1);
        assert_eq!(after_user[0].role, Role::Assistant);
        assert!(conv.can_submit("another"));
    }

    #[test]
    fn test_conversation_complete_ignores_stale_turn() {
        let mut conv = Conversation::new();
        let turn = conv.submit("hi").unwrap();

        assert!(conv.complete(turn.turn_id + 1, "wrong").is_none());
        assert!(conv.is_waiting());
        assert_eq!(conv.messages().len(), 1);

        let msg = conv.complete(turn.turn_id, "right").unwrap();
        assert_eq!(msg.text, "right");

        // Already idle: a second delivery is dropped
        assert!(conv.complete(turn.turn_id, "again").is_none());
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn test_conversation_ids_are_monotonic() {
        let mut conv = Conversation::with_greeting(Some("hello"));
        for input in ["a", "b", "c"] {
            let turn = conv.submit(input).unwrap();
            conv.complete(turn.turn_id, "ok");
        }
        let ids: Vec<_> = conv.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 7);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(conv.messages()[6].role, Role::Assistant);
    }

    #[test]
    fn test_conversation_turn_ids_increment() {
        let mut conv = Conversation::new();
        let first = conv.submit("one").unwrap();
        conv.complete(first.turn_id, "r1");
        let second = conv.submit("two").unwrap();
        assert_eq!(second.turn_id, first.turn_id + 1);
    }

    // ─── Markup Tests ────────────────────────────────────────

    #[test]
    fn test_markup_lines_and_link() {
        let text = "line1\nhttps://example.com\nline2";
        let lines = to_markup(text);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![Span::Text("line1")]);
        assert_eq!(lines[1], vec![Span::Link("https://example.com")]);
        assert_eq!(lines[2], vec![Span::Text("line2")]);
    }

    #[test]
    fn test_markup_link_inside_line() {
        let lines = to_markup("Visit http://a.edu/x?y=1 today");
        assert_eq!(
            lines[0],
            vec![
                Span::Text("Visit "),
                Span::Link("http://a.edu/x?y=1"),
                Span::Text(" today"),
            ]
        );
    }

    #[test]
    fn test_markup_multiple_links() {
        let lines = to_markup("https://a.com and https://b.com");
        assert_eq!(
            lines[0],
            vec![Span::Link("https://a.com"), Span::Text(" and "), Span::Link("https://b.com")]
        );
    }

    #[test]
    fn test_markup_plain_and_empty() {
        assert_eq!(to_markup("no links here"), vec![vec![Span::Text("no links here")]]);
        assert_eq!(to_markup(""), vec![Vec::<Span<'_>>::new()]);
        assert_eq!(to_markup("a\n\nb").len(), 3);
        assert!(to_markup("a\n\nb")[1].is_empty());
    }

    #[test]
    fn test_markup_strips_carriage_return() {
        let lines = to_markup("one\r\ntwo");
        assert_eq!(lines[0], vec![Span::Text("one")]);
        assert_eq!(lines[1], vec![Span::Text("two")]);
    }

    #[test]
    fn test_markup_does_not_link_bare_domains() {
        assert_eq!(to_markup("www.example.com")[0], vec![Span::Text("www.example.com")]);
    }

    #[test]
    fn test_builtin_admissions_reply_links_portal() {
        let link_spans: Vec<_> = to_markup(resolve("admission"))
            .into_iter()
            .flatten()
            .filter(|span| matches!(span, Span::Link(_)))
            .collect();
        assert_eq!(link_spans, vec![Span::Link(ADMISSIONS_URL)]);
    }

    #[test]
    fn test_markup_keeps_trailing_punctuation_in_link() {
        let lines = to_markup("see https://x.edu.");
        assert_eq!(lines[0], vec![Span::Text("see "), Span::Link("https://x.edu.")]);

        let lines = to_markup("(https://x.edu/apply), then");
        assert_eq!(
            lines[0],
            vec![Span::Text("("), Span::Link("https://x.edu/apply),"), Span::Text(" then")]
        );
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        bus.emit(ChatEvent::TypingStarted { turn_id: 1, delay_ms: 1000 });
        bus.emit(ChatEvent::ReplyReady { turn_id: 1, text: "x".to_string() });
        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        bus1.emit(ChatEvent::TypingStarted { turn_id: 1, delay_ms: 5 });
        assert!(bus2.has_pending());
        assert_eq!(bus2.drain().len(), 1);
        assert!(!bus1.has_pending());
    }

    #[test]
    fn test_event_bus_drain_keeps_emit_order_across_turns() {
        let bus = EventBus::new();
        bus.emit(ChatEvent::ReplyReady { turn_id: 1, text: "late".to_string() });
        bus.emit(ChatEvent::TypingStarted { turn_id: 2, delay_ms: 1200 });
        let turns: Vec<u64> = bus.drain().iter().map(|e| e.turn_id()).collect();
        assert_eq!(turns, vec![1, 2]);
    }

    // ─── Startup Tests ───────────────────────────────────────

    #[test]
    fn test_load_config_missing_or_blank_uses_default() {
        assert_eq!(load_config(None), AssistantConfig::default());
        assert_eq!(load_config(Some("  \n ")), AssistantConfig::default());
    }

    #[test]
    fn test_load_config_uses_embedded_json() {
        let json = r#"{
            "title": "Help desk",
            "subtitle": "Registry",
            "typing_delay": { "min_ms": 10, "max_ms": 20 },
            "max_input_rows": 3
        }"#;
        let config = load_config(Some(json));
        assert_eq!(config.title, "Help desk");
        assert_eq!(config.typing_delay, DelayRange::new(10, 20).unwrap());
        assert_eq!(config.max_input_rows, 3);
    }

    #[test]
    fn test_load_config_invalid_falls_back() {
        assert_eq!(load_config(Some("{{nope")), AssistantConfig::default());

        let inverted = r#"{
            "title": "x", "subtitle": "",
            "typing_delay": { "min_ms": 500, "max_ms": 100 },
            "max_input_rows": 3
        }"#;
        assert_eq!(load_config(Some(inverted)), AssistantConfig::default());
    }

    #[test]
    fn test_load_rule_table_missing_uses_builtin() {
        let table = load_rule_table(None);
        assert_eq!(table.rules().len(), default_rules().len());
        assert_eq!(table.fallback(), FALLBACK_REPLY);
        assert_eq!(load_rule_table(Some("")).rules().len(), default_rules().len());
    }

    #[test]
    fn test_load_rule_table_uses_embedded_json() {
        let json = r#"{"rules":[{"triggers":["bye"],"reply":"Goodbye"}],"fallback":"?"}"#;
        let table = load_rule_table(Some(json));
        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.resolve("BYE now"), "Goodbye");
        assert_eq!(table.resolve("hello"), "?");
    }

    #[test]
    fn test_load_rule_table_invalid_falls_back() {
        let builtin_len = default_rules().len();
        assert_eq!(load_rule_table(Some("not json")).rules().len(), builtin_len);
        // Parses, but an empty table is rejected
        assert_eq!(load_rule_table(Some("[]")).rules().len(), builtin_len);
        assert_eq!(load_rule_table(Some("[]")).resolve("xyz123"), FALLBACK_REPLY);
    }

    // ─── Responder Tests ─────────────────────────────────────

    /// Delay that completes immediately and records what was asked for
    struct RecordingDelay {
        requested: RefCell<Vec<u32>>,
    }

    impl RecordingDelay {
        fn new() -> Self {
            Self { requested: RefCell::new(Vec::new()) }
        }
    }

    #[async_trait(?Send)]
    impl DelayPort for RecordingDelay {
        async fn sleep(&self, ms: u32) {
            self.requested.borrow_mut().push(ms);
        }
    }

    struct FixedEntropy(f64);

    impl EntropyPort for FixedEntropy {
        fn next_unit(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_responder_emits_typing_then_reply() {
        let bus = EventBus::new();
        let responder = Responder::new(RuleTable::builtin().clone(), DelayRange::default(), bus.clone());
        let delay = RecordingDelay::new();
        let turn = PendingTurn { turn_id: 4, input: "hi".to_string() };

        let text = block_on(responder.respond(turn, &delay, &FixedEntropy(0.0)));
        assert_eq!(text, resolve("hi"));
        assert_eq!(*delay.requested.borrow(), vec![1000]);

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                ChatEvent::TypingStarted { turn_id: 4, delay_ms: 1000 },
                ChatEvent::ReplyReady { turn_id: 4, text: resolve("hi").to_string() },
            ]
        );
    }

    #[test]
    fn test_responder_fallback() {
        let bus = EventBus::new();
        let responder = Responder::new(RuleTable::builtin().clone(), DelayRange::default(), bus.clone());
        let turn = PendingTurn { turn_id: 1, input: "xyz123".to_string() };
        let text = block_on(responder.respond(turn, &RecordingDelay::new(), &FixedEntropy(0.5)));
        assert_eq!(text, FALLBACK_REPLY);
    }

    #[test]
    fn test_responder_delay_within_range() {
        let bus = EventBus::new();
        let responder = Responder::new(RuleTable::builtin().clone(), DelayRange::default(), bus);
        for unit in [0.0, 0.25, 0.5, 0.75, 0.9999] {
            let ms = responder.typing_delay(&FixedEntropy(unit));
            assert!((1000..=1500).contains(&ms), "{} out of range", ms);
        }
    }

    #[test]
    fn test_responder_custom_table() {
        let bus = EventBus::new();
        let table = RuleTable::new(vec![Rule::new("bye", &["bye"], "Goodbye")]).unwrap();
        let responder = Responder::new(table, DelayRange::new(0, 0).unwrap(), bus.clone());
        assert_eq!(responder.table().rules().len(), 1);

        let turn = PendingTurn { turn_id: 2, input: "Bye!".to_string() };
        let delay = RecordingDelay::new();
        let text = block_on(responder.respond(turn, &delay, &FixedEntropy(0.3)));
        assert_eq!(text, "Goodbye");
        assert_eq!(*delay.requested.borrow(), vec![0]);
    }

    #[test]
    fn test_full_turn_through_conversation() {
        let bus = EventBus::new();
        let responder = Responder::new(RuleTable::builtin().clone(), DelayRange::default(), bus.clone());
        let mut conv = Conversation::new();

        let turn = conv.submit("What is the admission deadline?").unwrap();
        assert!(conv.submit("second try").is_none());

        block_on(responder.respond(turn, &RecordingDelay::new(), &FixedEntropy(0.1)));
        for event in bus.drain() {
            if let ChatEvent::ReplyReady { turn_id, text } = event {
                conv.complete(turn_id, text);
            }
        }

        assert_eq!(conv.state(), ChatState::Idle);
        assert_eq!(conv.messages().len(), 2);
        assert!(conv.messages()[1].text.contains(ADMISSIONS_URL));
    }
}
