use chem_quiz_bot::quiz::dataset::{builtin_pairs, Category, Difficulty};
use chem_quiz_bot::quiz::{
    QuestionBank, QuizError, QuizMode, QuizSession, SessionState, VocabularyPair,
};
use chem_quiz_bot::ranking::{
    MemoryRankingStore, RankingEntry, RankingStore, SavePolicy, SqliteRankingStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn play(session: &mut QuizSession, rng: &mut StdRng, answer_right: impl Fn(usize) -> bool) {
    session.start(rng).unwrap();
    let mut round = 1;
    while session.state() == SessionState::InProgress {
        let question = session.current_question().unwrap().clone();
        let chosen = if answer_right(round) {
            question.correct.clone()
        } else {
            question
                .options
                .iter()
                .find(|o| **o != question.correct)
                .cloned()
                .unwrap()
        };
        session.submit_answer(&chosen, rng).unwrap();
        round += 1;
    }
}

#[test]
fn chemistry_example_all_correct() {
    let pairs = vec![
        VocabularyPair::new("H2O", "물"),
        VocabularyPair::new("CO2", "이산화탄소"),
        VocabularyPair::new("O2", "산소"),
        VocabularyPair::new("N2", "질소"),
    ];
    let mut rng = StdRng::seed_from_u64(2024);
    let mut session =
        QuizSession::new(QuestionBank::new(pairs).unwrap(), QuizMode::KeyToValue, 4).unwrap();

    let mut prompts = Vec::new();
    session.start(&mut rng).unwrap();
    while let Some(question) = session.current_question().cloned() {
        prompts.push(question.prompt.clone());
        session.submit_answer(&question.correct, &mut rng).unwrap();
    }

    prompts.sort();
    assert_eq!(prompts, vec!["CO2", "H2O", "N2", "O2"]);
    let summary = session.summary().unwrap();
    assert_eq!(summary.score, 4);
    assert_eq!(summary.total_answered, 4);
    assert!(summary.wrong_log.is_empty());
}

#[test]
fn every_builtin_game_can_be_played_to_the_end() {
    let mut rng = StdRng::seed_from_u64(77);
    for category in [Category::Molecule, Category::Periodic] {
        for mode in [QuizMode::KeyToValue, QuizMode::ValueToKey, QuizMode::Mixed] {
            let bank = QuestionBank::new(builtin_pairs(category, Difficulty::Hard)).unwrap();
            let mut session = QuizSession::new(bank, mode, 35).unwrap();
            play(&mut session, &mut rng, |round| round % 3 != 0);

            let summary = session.summary().unwrap();
            assert_eq!(summary.total_answered, 35);
            assert_eq!(summary.score + summary.wrong_log.len(), 35);
            assert!(summary.wrong_log.iter().all(|w| w.round % 3 == 0));
            assert_eq!(
                session.submit_answer("x", &mut rng).unwrap_err(),
                QuizError::AlreadyCompleted
            );
        }
    }
}

#[tokio::test]
async fn finished_sessions_land_in_the_ranking() {
    let mut rng = StdRng::seed_from_u64(5);
    let sqlite = SqliteRankingStore::in_memory().await.unwrap();
    let memory = MemoryRankingStore::new();
    let stores: [&dyn RankingStore; 2] = [&sqlite, &memory];

    let runs = [("20240001", "민준", 5), ("20240002", "서연", 3), ("20240003", "도윤", 5)];
    for (id, name, correct_answers) in runs {
        let bank = QuestionBank::new(builtin_pairs(Category::Periodic, Difficulty::Easy)).unwrap();
        let mut session = QuizSession::new(bank, QuizMode::Mixed, 5).unwrap();
        play(&mut session, &mut rng, |round| round <= correct_answers);

        let summary = session.summary().unwrap();
        if !SavePolicy::PerfectOnly.allows(&summary) {
            assert_eq!(name, "서연");
            continue;
        }
        let entry = RankingEntry::from_summary(Category::Periodic.tag(), id, name, &summary);
        for store in stores {
            store.insert(&entry).await.unwrap();
        }
    }

    for store in stores {
        let top = store.top(Category::Periodic.tag(), 10).await.unwrap();
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|e| e.score == 5));
        assert!(top[0].elapsed_secs <= top[1].elapsed_secs);
        assert!(store.top(Category::Molecule.tag(), 10).await.unwrap().is_empty());
    }
}
