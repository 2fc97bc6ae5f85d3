//! End-to-end tests for the voice-driven match session.
//!
//! Every dialogue is driven by a scripted voice collaborator, so the
//! engine's unbounded retry loops are visibly bounded by the script.

use strictly_darts::{
    DigitExtractor, HistoryStore, MatchConfig, MatchReport, MatchSession, MemoryStore,
    ScriptedVoice, Seat, TurnRecord,
};

fn play(script: &[&str], config: MatchConfig) -> (ScriptedVoice, MemoryStore, MatchReport) {
    let mut voice = ScriptedVoice::new(script.iter().copied());
    let extractor = DigitExtractor::new();
    let store = MemoryStore::new();

    let report = MatchSession::new(&mut voice, &extractor, &store, config)
        .with_starting_seat(Seat::One)
        .run()
        .expect("session should run to completion");

    (voice, store, report)
}

fn spoken_count(voice: &ScriptedVoice, prompt: &str) -> usize {
    voice.spoken().iter().filter(|s| s.as_str() == prompt).count()
}

#[test]
fn test_full_match_is_scored_and_recorded() {
    let script = ["alice", "yes", "bob", "yes", "40", "40", "21"];
    let (voice, store, report) = play(&script, MatchConfig::default());

    assert_eq!(report.winner(), "Alice");
    assert_eq!(*report.turns(), 1);

    let log = store.load().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(
        log.get(report.timestamp()).map(Vec::as_slice),
        Some(&[TurnRecord::new("Alice".to_string(), vec![40, 40, 21])][..])
    );

    for prompt in [
        "Let's start a new game",
        "Name player 1",
        "Player 1 is called Alice, is that right?",
        "Name player 2",
        "Players saved",
        "Starting the game",
        "Alice to throw",
        "101 points to go",
        "The winner is Alice",
    ] {
        assert!(
            voice.spoken().iter().any(|s| s == prompt),
            "missing prompt {:?} in {:?}",
            prompt,
            voice.spoken()
        );
    }
}

#[test]
fn test_invalid_throws_only_prompt_a_retry() {
    // "blah" resolves to nothing, "500" is implausible, "" is silence;
    // none of them may move the score or consume a turn slot.
    let script = [
        "alice", "yes", "bob", "yes", "blah", "500", "", "60", "мимо", "41",
    ];
    let (voice, store, report) = play(&script, MatchConfig::default());

    assert_eq!(report.winner(), "Alice");
    assert_eq!(spoken_count(&voice, "Repeat the throw, please"), 2);
    assert_eq!(spoken_count(&voice, "Nice try. Now tell me the honest score"), 1);

    let log = store.load().unwrap();
    assert_eq!(
        log.get(report.timestamp()).map(Vec::as_slice),
        Some(&[TurnRecord::new("Alice".to_string(), vec![60, 0, 41])][..])
    );
}

#[test]
fn test_rejected_name_reprompts_same_slot() {
    let script = ["алиса", "нет", "alice", "yes", "bob", "yes", "50"];
    let (voice, _store, report) = play(&script, MatchConfig::default().with_starting_score(50));

    assert_eq!(report.winner(), "Alice");
    assert_eq!(spoken_count(&voice, "Name player 1"), 2);
    assert_eq!(spoken_count(&voice, "Name player 2"), 1);
}

#[test]
fn test_bust_announces_and_hands_over() {
    let script = ["alice", "yes", "bob", "yes", "30", "25", "50"];
    let (voice, store, report) = play(&script, MatchConfig::default().with_starting_score(50));

    assert_eq!(report.winner(), "Bob");
    assert_eq!(spoken_count(&voice, "Bust"), 1);
    assert!(voice.spoken().iter().any(|s| s == "Bob to throw"));
    assert!(voice.spoken().iter().any(|s| s == "50 points to go"));

    let log = store.load().unwrap();
    assert_eq!(
        log.get(report.timestamp()).map(Vec::as_slice),
        Some(
            &[
                TurnRecord::new("Alice".to_string(), vec![30, 25]),
                TurnRecord::new("Bob".to_string(), vec![50]),
            ][..]
        )
    );
}

#[test]
fn test_history_is_keyed_by_match_start_timestamp() {
    let script = ["alice", "yes", "bob", "yes", "101"];
    let (_voice, store, report) = play(&script, MatchConfig::default());

    let log = store.load().unwrap();
    assert_eq!(log.keys().collect::<Vec<_>>(), vec![report.timestamp()]);
}
