use std::{error::Error, sync::Arc};

use chem_quiz_bot::config::{Config, RankingBackend};
use chem_quiz_bot::quiz::{
    dataset::{self, Category, Difficulty},
    Hint, Question, QuestionBank, QuizMode, QuizSession, SessionSummary, VocabularyPair,
};
use chem_quiz_bot::ranking::{
    self, MemoryRankingStore, RankingEntry, RankingError, RankingStore, SqliteRankingStore,
};
use dotenv::dotenv;
use log::{debug, info, warn};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup, KeyboardRemove},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;
type DialogueStorage = Arc<ErasedStorage<State>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Player {
    student_id: String,
    name: String,
}

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveStudentId,
    ReceivePlayerName {
        student_id: String,
    },
    ReceiveGameChoice {
        player: Player,
    },
    ReceiveMode {
        player: Player,
        category: Category,
    },
    ReceiveDifficulty {
        player: Player,
        category: Category,
        mode: QuizMode,
    },
    ReceiveAmountOfQuestions {
        player: Player,
        category: Category,
        mode: QuizMode,
        difficulty: Difficulty,
    },
    // The whole session rides along in the dialogue storage between messages
    Quiz {
        player: Player,
        category: Category,
        session: QuizSession,
    },
}

/// Shared, read-mostly things every handler may need.
#[derive(Clone)]
struct BotContext {
    config: Arc<Config>,
    rankings: Arc<dyn RankingStore>,
    custom_pairs: Arc<Vec<VocabularyPair>>,
}

impl BotContext {
    fn categories(&self) -> Vec<Category> {
        let mut categories = vec![Category::Molecule, Category::Periodic];
        if !self.custom_pairs.is_empty() {
            categories.push(Category::Custom);
        }
        categories
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // .env is optional, the variables may come from the environment directly
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting quiz bot...");

    let config = Config::from_env()?;
    let bot = Bot::from_env();

    info!("Opening dialogue storage at {}", config.dialogue_db_path.display());
    let storage: DialogueStorage =
        SqliteStorage::open(&config.dialogue_db_path.to_string_lossy(), Json)
            .await?
            .erase();

    let rankings: Arc<dyn RankingStore> = match config.ranking_backend {
        RankingBackend::Sqlite => {
            info!("Opening ranking database at {}", config.ranking_db_path.display());
            Arc::new(SqliteRankingStore::open(&config.ranking_db_path).await?)
        }
        RankingBackend::Memory => {
            warn!("Ranking table is kept in memory and will be lost on restart");
            Arc::new(MemoryRankingStore::new())
        }
    };
    if let Err(e) = rankings.backup(&config.backup_dir).await {
        warn!("Startup backup failed: {}", e);
    }

    let custom_pairs = match &config.custom_dataset {
        Some(path) => {
            let pairs = dataset::load_pairs_from_path(path)?;
            info!("Loaded {} custom pairs from {}", pairs.len(), path.display());
            pairs
        }
        None => Vec::new(),
    };

    let ctx = BotContext {
        config: Arc::new(config),
        rankings,
        custom_pairs: Arc::new(custom_pairs),
    };

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(
                dptree::filter(|msg: Message| is_reset_request(msg.text())).endpoint(reset),
            )
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveStudentId].endpoint(receive_student_id))
            .branch(
                dptree::case![State::ReceivePlayerName { student_id }]
                    .endpoint(receive_player_name),
            )
            .branch(dptree::case![State::ReceiveGameChoice { player }].endpoint(receive_game_choice))
            .branch(dptree::case![State::ReceiveMode { player, category }].endpoint(receive_mode))
            .branch(
                dptree::case![State::ReceiveDifficulty {
                    player,
                    category,
                    mode
                }]
                .endpoint(receive_difficulty),
            )
            .branch(
                dptree::case![State::ReceiveAmountOfQuestions {
                    player,
                    category,
                    mode,
                    difficulty
                }]
                .endpoint(receive_amount_of_questions),
            )
            .branch(
                dptree::case![State::Quiz {
                    player,
                    category,
                    session
                }]
                .endpoint(quiz_round),
            ),
    )
    .dependencies(dptree::deps![storage, ctx])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const GREETING_TEXT: &str =
    "안녕하세요! 화학 퀴즈 봇입니다. 분자식과 원소기호를 얼마나 잘 아는지 확인해 봅시다!\n먼저 학번을 입력해 주세요.";

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(KeyboardRemove::new())
        .await?;
    dialogue.update(State::ReceiveStudentId).await?;
    Ok(())
}

const CHANGE_PLAYER_BUTTON: &str = "👤 게임 초기화";

/// `/start` and the change-player button work from any state.
fn is_reset_request(text: Option<&str>) -> bool {
    matches!(
        text.map(str::trim),
        Some("/start") | Some(CHANGE_PLAYER_BUTTON)
    )
}

async fn reset(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    if let Some(State::Quiz { player, .. }) = dialogue.get().await? {
        info!("{} ({}) left a running game", player.name, player.student_id);
    }
    dialogue.reset().await?;
    start(bot, dialogue, msg).await
}

fn non_blank(msg: &Message) -> Option<String> {
    msg.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

async fn receive_student_id(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    let Some(student_id) = non_blank(&msg) else {
        bot.send_message(msg.chat.id, "학번을 텍스트로 입력해 주세요.").await?;
        return Ok(());
    };

    bot.send_message(msg.chat.id, "이름을 입력해 주세요.").await?;
    dialogue.update(State::ReceivePlayerName { student_id }).await?;
    Ok(())
}

async fn receive_player_name(
    bot: Bot,
    dialogue: QuizDialogue,
    student_id: String,
    ctx: BotContext,
    msg: Message,
) -> HandlerResult {
    let Some(name) = non_blank(&msg) else {
        bot.send_message(msg.chat.id, "이름을 텍스트로 입력해 주세요.").await?;
        return Ok(());
    };

    bot.send_message(msg.chat.id, format!("반가워요, {}님!", name))
        .await?;
    show_main_menu(&bot, msg.chat.id, &ctx).await?;
    dialogue
        .update(State::ReceiveGameChoice {
            player: Player { student_id, name },
        })
        .await?;
    Ok(())
}

const RANKING_BUTTON: &str = "🏆 순위표";
const EXPORT_BUTTON: &str = "⬇ CSV 내보내기";
const RESTART_BUTTON: &str = "🔄 게임 재시작";

fn main_menu_keyboard(categories: &[Category]) -> KeyboardMarkup {
    let games = categories
        .iter()
        .map(|c| KeyboardButton::new(c.tag()))
        .collect::<Vec<_>>();
    KeyboardMarkup::new(vec![
        games,
        vec![
            KeyboardButton::new(RANKING_BUTTON),
            KeyboardButton::new(EXPORT_BUTTON),
        ],
        vec![
            KeyboardButton::new(RESTART_BUTTON),
            KeyboardButton::new(CHANGE_PLAYER_BUTTON),
        ],
    ])
}

/// Choice keyboards during game setup always end with a way back to the menu.
fn with_restart_row(mut rows: Vec<Vec<KeyboardButton>>) -> KeyboardMarkup {
    rows.push(vec![KeyboardButton::new(RESTART_BUTTON)]);
    KeyboardMarkup::new(rows)
}

async fn show_main_menu(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    bot.send_message(chat_id, "어떤 게임을 할까요?")
        .reply_markup(main_menu_keyboard(&ctx.categories()))
        .await?;
    Ok(())
}

async fn back_to_menu(
    bot: &Bot,
    dialogue: &QuizDialogue,
    ctx: &BotContext,
    chat_id: ChatId,
    player: Player,
) -> HandlerResult {
    show_main_menu(bot, chat_id, ctx).await?;
    dialogue.update(State::ReceiveGameChoice { player }).await?;
    Ok(())
}

async fn receive_game_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    player: Player,
    ctx: BotContext,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(RESTART_BUTTON) => show_main_menu(&bot, msg.chat.id, &ctx).await?,
        Some(RANKING_BUTTON) => {
            for category in ctx.categories() {
                let text = ranking_text(&ctx, category).await?;
                bot.send_message(msg.chat.id, text).await?;
            }
        }
        Some(EXPORT_BUTTON) => {
            for category in ctx.categories() {
                let entries = ctx.rankings.all(category.tag()).await?;
                let mut buffer = Vec::new();
                ranking::export_csv(&entries, ctx.config.export_offset, &mut buffer)?;
                let file = InputFile::memory(buffer).file_name(csv_file_name(category));
                bot.send_document(msg.chat.id, file).await?;
            }
        }
        Some(text) => match Category::from_tag(text).filter(|c| ctx.categories().contains(c)) {
            Some(category) => {
                let keyboard = with_restart_row(
                    [QuizMode::Mixed, QuizMode::KeyToValue, QuizMode::ValueToKey]
                        .into_iter()
                        .map(|mode| vec![KeyboardButton::new(mode_label(category, mode))])
                        .collect::<Vec<_>>(),
                );
                bot.send_message(msg.chat.id, "모드를 선택해 주세요.")
                    .reply_markup(keyboard)
                    .await?;
                dialogue
                    .update(State::ReceiveMode { player, category })
                    .await?;
            }
            None => {
                bot.send_message(msg.chat.id, "아래 버튼 중 하나를 선택해 주세요.")
                    .await?;
            }
        },
        None => {
            bot.send_message(msg.chat.id, "아래 버튼 중 하나를 선택해 주세요.")
                .await?;
        }
    }
    Ok(())
}

fn csv_file_name(category: Category) -> &'static str {
    match category {
        Category::Molecule => "molecule_ranking.csv",
        Category::Periodic => "periodic_ranking.csv",
        Category::Custom => "custom_ranking.csv",
    }
}

fn mode_label(category: Category, mode: QuizMode) -> &'static str {
    match (category, mode) {
        (_, QuizMode::Mixed) => "전체",
        (Category::Molecule, QuizMode::KeyToValue) => "분자식 → 이름",
        (Category::Molecule, QuizMode::ValueToKey) => "이름 → 분자식",
        (Category::Periodic, QuizMode::KeyToValue) => "원소기호 → 이름",
        (Category::Periodic, QuizMode::ValueToKey) => "이름 → 원소기호",
        (Category::Custom, QuizMode::KeyToValue) => "문제 → 답",
        (Category::Custom, QuizMode::ValueToKey) => "답 → 문제",
    }
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "쉬움",
        Difficulty::Medium => "보통",
        Difficulty::Hard => "어려움",
    }
}

async fn ask_amount_of_questions(bot: &Bot, chat_id: ChatId, ctx: &BotContext) -> HandlerResult {
    let keyboard = with_restart_row(
        ctx.config
            .question_counts
            .iter()
            .map(|count| vec![KeyboardButton::new(count.to_string())])
            .collect::<Vec<_>>(),
    );
    bot.send_message(chat_id, "문제 수를 선택해 주세요.")
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

async fn receive_mode(
    bot: Bot,
    dialogue: QuizDialogue,
    (player, category): (Player, Category),
    ctx: BotContext,
    msg: Message,
) -> HandlerResult {
    if msg.text() == Some(RESTART_BUTTON) {
        return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
    }
    let mode = [QuizMode::Mixed, QuizMode::KeyToValue, QuizMode::ValueToKey]
        .into_iter()
        .find(|mode| msg.text() == Some(mode_label(category, *mode)));
    let Some(mode) = mode else {
        bot.send_message(msg.chat.id, "아래 모드 중 하나를 선택해 주세요.")
            .await?;
        return Ok(());
    };

    // Custom datasets come as-is, there are no difficulty tiers to pick from
    if category == Category::Custom {
        ask_amount_of_questions(&bot, msg.chat.id, &ctx).await?;
        dialogue
            .update(State::ReceiveAmountOfQuestions {
                player,
                category,
                mode,
                difficulty: Difficulty::default(),
            })
            .await?;
        return Ok(());
    }

    let keyboard = with_restart_row(vec![[
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
    ]
    .into_iter()
    .map(|d| KeyboardButton::new(difficulty_label(d)))
    .collect::<Vec<_>>()]);
    bot.send_message(msg.chat.id, "난이도를 선택해 주세요.")
        .reply_markup(keyboard)
        .await?;
    dialogue
        .update(State::ReceiveDifficulty {
            player,
            category,
            mode,
        })
        .await?;
    Ok(())
}

async fn receive_difficulty(
    bot: Bot,
    dialogue: QuizDialogue,
    (player, category, mode): (Player, Category, QuizMode),
    ctx: BotContext,
    msg: Message,
) -> HandlerResult {
    if msg.text() == Some(RESTART_BUTTON) {
        return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
    }
    let difficulty = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        .into_iter()
        .find(|d| msg.text() == Some(difficulty_label(*d)));
    let Some(difficulty) = difficulty else {
        bot.send_message(msg.chat.id, "아래 난이도 중 하나를 선택해 주세요.")
            .await?;
        return Ok(());
    };

    ask_amount_of_questions(&bot, msg.chat.id, &ctx).await?;
    dialogue
        .update(State::ReceiveAmountOfQuestions {
            player,
            category,
            mode,
            difficulty,
        })
        .await?;
    Ok(())
}

async fn receive_amount_of_questions(
    bot: Bot,
    dialogue: QuizDialogue,
    (player, category, mode, difficulty): (Player, Category, QuizMode, Difficulty),
    ctx: BotContext,
    msg: Message,
) -> HandlerResult {
    if msg.text() == Some(RESTART_BUTTON) {
        return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
    }
    let Some(amount) = msg.text().and_then(|t| t.trim().parse::<usize>().ok()) else {
        bot.send_message(msg.chat.id, "숫자를 입력해 주세요.").await?;
        return Ok(());
    };
    if amount == 0 {
        bot.send_message(msg.chat.id, "문제 수는 0이 될 수 없습니다.")
            .await?;
        return Ok(());
    }

    let pairs = match category {
        Category::Custom => ctx.custom_pairs.to_vec(),
        _ => dataset::builtin_pairs(category, difficulty),
    };
    let bank = match QuestionBank::new(pairs) {
        Ok(bank) => bank,
        Err(e) => {
            warn!("Cannot build a question bank for {}: {}", category.tag(), e);
            bot.send_message(msg.chat.id, "이 게임에는 문제가 없습니다.")
                .await?;
            return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
        }
    };

    let mut session = QuizSession::new(bank, mode, amount)?;
    let question = {
        let mut rng = rand::thread_rng();
        session.start(&mut rng)?.clone()
    };
    info!(
        "{} ({}) started {} with {} questions",
        player.name,
        player.student_id,
        category.tag(),
        amount
    );

    bot.send_message(msg.chat.id, "좋아요! 시작합니다!").await?;
    send_question(&bot, msg.chat.id, &session, &question).await?;
    dialogue
        .update(State::Quiz {
            player,
            category,
            session,
        })
        .await?;
    Ok(())
}

const HINT_BUTTON: &str = "💡 힌트";
const SKIP_BUTTON: &str = "⏭ 건너뛰기";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizCommand<'a> {
    Restart,
    Hint,
    Skip,
    Answer(&'a str),
}

impl<'a> QuizCommand<'a> {
    fn parse(text: &'a str) -> Self {
        match text {
            RESTART_BUTTON => QuizCommand::Restart,
            HINT_BUTTON => QuizCommand::Hint,
            SKIP_BUTTON => QuizCommand::Skip,
            // Users typing by hand tend to add stray spaces
            answer => QuizCommand::Answer(answer.trim()),
        }
    }
}

fn question_keyboard(question: &Question) -> KeyboardMarkup {
    let mut rows = question
        .options
        .iter()
        .map(|option| vec![KeyboardButton::new(option.clone())])
        .collect::<Vec<_>>();
    rows.push(vec![
        KeyboardButton::new(HINT_BUTTON),
        KeyboardButton::new(SKIP_BUTTON),
    ]);
    rows.push(vec![KeyboardButton::new(RESTART_BUTTON)]);
    KeyboardMarkup::new(rows)
}

async fn send_question(
    bot: &Bot,
    chat_id: ChatId,
    session: &QuizSession,
    question: &Question,
) -> HandlerResult {
    let text = format!(
        "문제 {} / {}\n\n{}\n\n점수: {}/{} · 연속 정답: {}",
        session.round(),
        session.target_count(),
        question.prompt,
        session.score(),
        session.total_answered(),
        session.streak()
    );

    bot.send_message(chat_id, text)
        .reply_markup(question_keyboard(question))
        .await?;
    Ok(())
}

fn hint_text(hint: &Hint) -> String {
    match hint {
        Hint::Elements(elements) => format!("힌트: 포함된 원소는 {}", elements.join(", ")),
        Hint::FirstLetter(first) => format!("힌트: 정답의 첫 글자는 {}", first),
        Hint::Unavailable => "이 문제에는 힌트가 없습니다.".to_string(),
    }
}

async fn quiz_round(
    bot: Bot,
    dialogue: QuizDialogue,
    (player, category, mut session): (Player, Category, QuizSession),
    ctx: BotContext,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "버튼으로 답을 선택하거나 텍스트로 입력해 주세요.")
            .await?;
        return Ok(());
    };

    let command = QuizCommand::parse(text);
    match command {
        QuizCommand::Restart => {
            // The unfinished session is dropped and never reaches the ranking
            info!(
                "{} ({}) abandoned {} at round {}/{}",
                player.name,
                player.student_id,
                category.tag(),
                session.round(),
                session.target_count()
            );
            bot.send_message(msg.chat.id, "게임을 종료했습니다. 다시 플레이해 보세요!")
                .await?;
            return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
        }
        QuizCommand::Hint => {
            let reply = match session.hint() {
                Ok(hint) => hint_text(&hint),
                Err(e) => {
                    warn!("Hint requested in a finished session: {}", e);
                    "지금은 힌트를 볼 수 없습니다.".to_string()
                }
            };
            bot.send_message(msg.chat.id, reply).await?;
            return Ok(());
        }
        QuizCommand::Skip | QuizCommand::Answer(_) => {}
    }

    let outcome = {
        let mut rng = rand::thread_rng();
        match command {
            QuizCommand::Answer(answer) => session
                .submit_answer(answer, &mut rng)
                .map(|result| (Some(result), false)),
            _ => session.skip(&mut rng).map(|completed| (None, completed)),
        }
    };

    let completed = match outcome {
        Ok((Some(result), _)) => {
            debug!(
                "{} answered round {}: correct={}",
                player.student_id,
                session.index(),
                result.is_correct
            );
            let reply = if result.is_correct {
                "정답입니다! 🎉".to_string()
            } else {
                format!("오답입니다. 정답: {}", result.correct_answer)
            };
            bot.send_message(msg.chat.id, reply).await?;
            result.completed
        }
        Ok((None, completed)) => {
            bot.send_message(msg.chat.id, "문제를 건너뛰었습니다.").await?;
            completed
        }
        Err(e) => {
            warn!("Rejected round for {}: {}", player.student_id, e);
            bot.send_message(msg.chat.id, "게임이 이미 끝났습니다.").await?;
            return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
        }
    };

    if completed {
        let summary = session.summary()?;
        finish_quiz(&bot, msg.chat.id, &ctx, &player, category, &summary).await?;
        return back_to_menu(&bot, &dialogue, &ctx, msg.chat.id, player).await;
    }

    if let Some(question) = session.current_question() {
        send_question(&bot, msg.chat.id, &session, question).await?;
    }
    dialogue
        .update(State::Quiz {
            player,
            category,
            session,
        })
        .await?;
    Ok(())
}

async fn finish_quiz(
    bot: &Bot,
    chat_id: ChatId,
    ctx: &BotContext,
    player: &Player,
    category: Category,
    summary: &SessionSummary,
) -> HandlerResult {
    info!(
        "{} ({}) finished {}: {}/{} in {:.1}s",
        player.name,
        player.student_id,
        category.tag(),
        summary.score,
        summary.target_count,
        summary.elapsed.as_secs_f64()
    );

    let mut text = format!(
        "🎉 최종 점수: {}/{}\n⏱ 걸린 시간: {:.1}초\n🔥 최고 연속 정답: {}",
        summary.score,
        summary.total_answered,
        summary.elapsed.as_secs_f64(),
        summary.best_streak
    );
    if summary.skipped > 0 {
        text.push_str(&format!("\n⏭ 건너뛴 문제: {}", summary.skipped));
    }
    if !summary.wrong_log.is_empty() {
        text.push_str("\n\n❌ 틀린 문제");
        for wrong in &summary.wrong_log {
            text.push_str(&format!(
                "\n{}번 {}: 선택한 답 {} / 정답 {}",
                wrong.round, wrong.question, wrong.chosen, wrong.correct
            ));
        }
    }
    bot.send_message(chat_id, text).await?;

    if !ctx.config.save_policy.allows(summary) {
        bot.send_message(chat_id, "만점일 때만 점수가 저장됩니다.")
            .await?;
        return Ok(());
    }

    let entry = RankingEntry::from_summary(category.tag(), &player.student_id, &player.name, summary);
    if let Err(e) = ctx.rankings.insert(&entry).await {
        warn!("Failed to save score for {}: {}", player.student_id, e);
        bot.send_message(chat_id, "점수를 저장하지 못했습니다.").await?;
        return Ok(());
    }
    if let Err(e) = ctx.rankings.backup(&ctx.config.backup_dir).await {
        warn!("Backup failed: {}", e);
    }

    bot.send_message(chat_id, "점수가 저장되었습니다.").await?;
    bot.send_message(chat_id, ranking_text(ctx, category).await?)
        .await?;
    Ok(())
}

async fn ranking_text(ctx: &BotContext, category: Category) -> Result<String, RankingError> {
    let top = ctx
        .rankings
        .top(category.tag(), ctx.config.ranking_limit)
        .await?;

    let mut text = format!("🏆 {} 순위표", category.tag());
    if top.is_empty() {
        text.push_str("\n아직 기록이 없습니다.");
    }
    for (rank, entry) in top.iter().enumerate() {
        text.push_str(&format!(
            "\n{}. {} ({}) {}점, {:.1}초",
            rank + 1,
            entry.player_name,
            entry.player_id,
            entry.score,
            entry.elapsed_secs
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chem_quiz_bot::quiz::Direction;

    fn labels(keyboard: &KeyboardMarkup) -> Vec<Vec<String>> {
        keyboard
            .keyboard
            .iter()
            .map(|row| row.iter().map(|button| button.text.clone()).collect())
            .collect()
    }

    fn question() -> Question {
        Question {
            direction: Direction::KeyToValue,
            prompt: "H2O".to_string(),
            options: vec!["물".to_string(), "산소".to_string()],
            correct: "물".to_string(),
        }
    }

    #[test]
    fn question_keyboard_offers_restart() {
        let rows = labels(&question_keyboard(&question()));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec!["물"]);
        assert_eq!(rows[1], vec!["산소"]);
        assert_eq!(rows[2], vec![HINT_BUTTON, SKIP_BUTTON]);
        assert_eq!(rows[3], vec![RESTART_BUTTON]);
    }

    #[test]
    fn main_menu_offers_restart_and_player_change() {
        let rows = labels(&main_menu_keyboard(&[Category::Molecule, Category::Periodic]));
        assert_eq!(rows[0], vec!["화학식 게임", "주기율표 게임"]);
        assert!(rows
            .iter()
            .any(|row| row.contains(&RESTART_BUTTON.to_string())
                && row.contains(&CHANGE_PLAYER_BUTTON.to_string())));
    }

    #[test]
    fn setup_keyboards_end_with_restart() {
        let rows = labels(&with_restart_row(vec![vec![KeyboardButton::new("10")]]));
        assert_eq!(rows, vec![vec!["10".to_string()], vec![RESTART_BUTTON.to_string()]]);
    }

    #[test]
    fn quiz_buttons_are_commands_and_other_text_is_an_answer() {
        assert_eq!(QuizCommand::parse(RESTART_BUTTON), QuizCommand::Restart);
        assert_eq!(QuizCommand::parse(HINT_BUTTON), QuizCommand::Hint);
        assert_eq!(QuizCommand::parse(SKIP_BUTTON), QuizCommand::Skip);
        assert_eq!(QuizCommand::parse("  물 "), QuizCommand::Answer("물"));
    }

    #[test]
    fn start_command_and_player_change_reset_the_dialogue() {
        assert!(is_reset_request(Some("/start")));
        assert!(is_reset_request(Some(CHANGE_PLAYER_BUTTON)));
        assert!(!is_reset_request(Some(RESTART_BUTTON)));
        assert!(!is_reset_request(Some("물")));
        assert!(!is_reset_request(None));
    }
}
