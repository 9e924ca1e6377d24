use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use quiztrainer::gate::Gate;
use quiztrainer::persist::{FileStore, KeyValueStore, MemoryStore, STATS_KEY};
use quiztrainer::sampler;
use quiztrainer::scorer::{self, OptionMark, Verdict};
use quiztrainer::session::QuizSession;
use quiztrainer::source::load_file;
use quiztrainer::stats;
use quiztrainer::QuestionSet;

fn law() -> QuestionSet {
    load_file(Path::new("fixtures/sets/law_basics.json")).unwrap()
}

fn answer_all(session: &mut QuizSession, correctly: bool) {
    for q in session.questions().to_vec() {
        if correctly {
            for id in q.correct_ids() {
                session.select(&q.id, id);
            }
        } else {
            let wrong = q.options.iter().find(|o| !o.is_correct).unwrap();
            session.select(&q.id, &wrong.id);
        }
    }
}

#[test]
fn test_full_test_run_updates_stats_once() {
    let set = law();
    let mut rng = StdRng::seed_from_u64(7);
    let mut store = MemoryStore::new();

    let mut session = QuizSession::new(sampler::sample(&set, 3, &mut rng));
    assert_eq!(session.len(), 3);
    assert!(!session.all_answered());

    answer_all(&mut session, true);
    assert!(session.all_answered());
    assert!(session.submit());

    let report = scorer::score(&session);
    assert_eq!((report.correct, report.total, report.percent), (3, 3, 100));
    assert_eq!(Verdict::from_percent(report.percent), Some(Verdict::Great));

    let record = stats::record_submission(&mut store, &mut session, "ala").unwrap().unwrap();
    assert_eq!(record.tests_taken, 1);
    assert_eq!(record.total_correct, 3);
    assert_eq!(record.last_percent, Some(100));

    // Submitting and recording again changes nothing.
    assert!(!session.submit());
    assert!(stats::record_submission(&mut store, &mut session, "ala").unwrap().is_none());
    assert_eq!(stats::read_stats(&store, "ala"), record);

    let mut second = QuizSession::new(sampler::sample(&set, 2, &mut rng));
    answer_all(&mut second, false);
    second.submit();
    let record = stats::record_submission(&mut store, &mut second, "ala").unwrap().unwrap();
    assert_eq!(record.tests_taken, 2);
    assert_eq!(record.total_correct, 3);
    assert_eq!(record.total_questions, 5);
    assert_eq!(record.average_percent(), 60);
    assert_eq!(record.last_percent, Some(0));
}

#[test]
fn test_multi_select_partial_answer_is_wrong() {
    let set = law();
    let q1 = set.question("1").unwrap().clone();
    let mut session = QuizSession::new(vec![q1.clone()]);

    session.select("1", "A");
    session.submit();

    assert_eq!(scorer::score(&session).correct, 0);
    let selected = session.selected("1");
    let marks: Vec<OptionMark> = q1.options.iter().map(|o| scorer::classify(o, selected)).collect();
    assert_eq!(
        marks,
        vec![
            OptionMark::CorrectlyChosen,
            OptionMark::Missed,
            OptionMark::Neutral,
            OptionMark::Neutral
        ]
    );
}

#[test]
fn test_file_store_keeps_stats_and_sign_in() {
    let dir = std::env::temp_dir().join(format!("quiztrainer_it_store_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let gate = Gate::new(Some("sesame".to_string()));
    {
        let mut store = FileStore::new(&dir);
        assert_eq!(gate.enter(&mut store, "sesame", "ala").unwrap(), "ala");

        let mut session = QuizSession::new(law().questions);
        answer_all(&mut session, true);
        session.submit();
        stats::record_submission(&mut store, &mut session, "ala").unwrap();
    }

    let mut store = FileStore::new(&dir);
    assert_eq!(gate.remembered_user(&store).unwrap().as_deref(), Some("ala"));
    let record = stats::read_stats(&store, "");
    assert_eq!(record.name, "ala");
    assert_eq!(record.tests_taken, 1);
    assert_eq!(record.total_questions, 3);

    // A corrupt record reads as a fresh one instead of failing.
    store.set(STATS_KEY, "{not json").unwrap();
    assert_eq!(stats::read_stats(&store, "ala").tests_taken, 0);

    stats::reset_stats(&mut store).unwrap();
    assert_eq!(store.get(STATS_KEY).unwrap(), None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_count_is_clamped_before_sampling() {
    let set = law();
    let mut rng = StdRng::seed_from_u64(1);

    let count = sampler::clamp_count(-4, set.len());
    assert_eq!(count, 1);
    assert_eq!(sampler::sample(&set, count, &mut rng).len(), 1);

    let count = sampler::clamp_count(50, set.len());
    let drawn = sampler::sample(&set, count, &mut rng);
    let mut ids: Vec<&str> = drawn.iter().map(|q| q.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["1", "2", "3"]);
}
