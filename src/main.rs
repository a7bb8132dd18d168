//! Mini Arcade headless runner
//!
//! The games are played in the browser through the wasm bindings. Natively
//! this binary plays them without a renderer and logs what happens:
//!
//! ```text
//! mini-arcade [wheel|defense] [seed] [config.json]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::rc::Rc;

    use mini_arcade::consts::FRAME_MS;
    use mini_arcade::defense::{AttackOutcome, DefenseObserver, DefenseSession, QuizMode, VocabularyEntry};
    use mini_arcade::wheel::SpinController;
    use mini_arcade::{DefenseSettings, SeededRandom, Settings, WheelSettings};

    /// Longest auto-played defense run, in frames (two minutes at 60 Hz)
    const MAX_DEFENSE_FRAMES: u32 = 60 * 120;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Wheel,
        Defense,
        Both,
    }

    struct Args {
        mode: Mode,
        seed: u64,
        config: Option<String>,
    }

    fn parse_args() -> Args {
        let mut args = Args {
            mode: Mode::Both,
            seed: 42,
            config: None,
        };
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "wheel" => args.mode = Mode::Wheel,
                "defense" => args.mode = Mode::Defense,
                other => match other.parse::<u64>() {
                    Ok(seed) => args.seed = seed,
                    Err(_) => args.config = Some(other.to_string()),
                },
            }
        }
        args
    }

    /// Logs every defense event
    #[derive(Default)]
    struct LogObserver {
        kills: u32,
        crossings: u32,
    }

    impl DefenseObserver for LogObserver {
        fn on_score_change(&mut self, score: u64) {
            log::debug!("Score: {}", score);
        }

        fn on_entity_killed(&mut self, id: u32) {
            self.kills += 1;
            log::info!("Zombie {} down", id);
        }

        fn on_boundary_crossed(&mut self, id: u32, damage: u32) {
            self.crossings += 1;
            log::info!("Zombie {} got through (-{} points)", id, damage);
        }
    }

    fn run_wheel(settings: &WheelSettings, seed: u64) {
        let landed = Rc::new(Cell::new(None));
        let sink = Rc::clone(&landed);

        let mut wheel = match SpinController::new(settings.prizes.clone(), settings.spin_settings()) {
            Ok(wheel) => wheel.with_on_complete(move |id| sink.set(Some(id))),
            Err(err) => {
                log::error!("Invalid prize table: {}", err);
                return;
            }
        };

        let mut rng = SeededRandom::new(seed);
        for spin in 1..=3 {
            match wheel.trigger(&mut rng) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    log::error!("Spin failed: {}", err);
                    return;
                }
            }

            let outcome = loop {
                if let Some(outcome) = wheel.advance(FRAME_MS) {
                    break outcome;
                }
            };

            let label = wheel.item(outcome.id).map_or("?", |item| item.label.as_str());
            let under_pointer = wheel.prize_at_rotation(outcome.rotation);
            println!(
                "Spin {}: prize {} ({}) after {:.1}°, pointer over {:?}, callback saw {:?}",
                spin,
                outcome.id,
                label,
                outcome.rotation,
                under_pointer,
                landed.get()
            );
        }
    }

    fn run_defense(settings: DefenseSettings, seed: u64) {
        let vocabulary = settings.vocabulary.clone();
        let mut session = DefenseSession::new(settings, SeededRandom::new(seed), LogObserver::default());
        session.start();

        let mut frames = 0;
        while frames < MAX_DEFENSE_FRAMES && !session.is_game_over() {
            play_quiz(&mut session, &vocabulary);

            if let Some(&id) = session.manager().active_ids().first() {
                match session.attack(id) {
                    AttackOutcome::Killed { score } => log::debug!("Kill, score {}", score),
                    AttackOutcome::GameOver => break,
                    _ => {}
                }
            }
            session.tick(1.0, FRAME_MS);
            frames += 1;
        }

        let snapshot = session.snapshot();
        println!(
            "Defense: {} frames, score {}, points {}, kills {}, crossings {}, quiz {}/{}, game over: {}",
            frames,
            snapshot.score,
            snapshot.points,
            session.observer().kills,
            session.observer().crossings,
            snapshot.quiz_correct,
            snapshot.quiz_asked,
            snapshot.game_over
        );
    }

    /// Answer the open question the way a player who knows the list would
    fn play_quiz(session: &mut DefenseSession<SeededRandom, LogObserver>, vocabulary: &[VocabularyEntry]) {
        let Some(prompt) = session.quiz_prompt() else {
            return;
        };
        if prompt.answered {
            return;
        }
        let result = match prompt.mode {
            QuizMode::Memorize => session.acknowledge_word(),
            QuizMode::MultipleChoice => {
                let word = prompt.word.as_deref();
                match vocabulary.iter().find(|e| Some(e.word.as_str()) == word) {
                    Some(entry) => session.answer_choice(&entry.meaning),
                    None => None,
                }
            }
            QuizMode::Spelling => {
                let meaning = prompt.meaning.as_deref();
                match vocabulary.iter().find(|e| Some(e.meaning.as_str()) == meaning) {
                    Some(entry) => session.answer_spelling(&entry.word),
                    None => None,
                }
            }
        };
        if let Some(result) = result {
            log::debug!("Quiz {:?}: +{} points", prompt.mode, result.reward);
        }
    }

    pub fn run() {
        env_logger::init();
        let args = parse_args();
        log::info!("Mini arcade (native) starting, seed {}", args.seed);

        let settings = match &args.config {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };

        if args.mode != Mode::Defense {
            run_wheel(&settings.wheel, args.seed);
        }
        if args.mode != Mode::Wheel {
            run_defense(settings.defense, args.seed);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser entry point is `web::init`
}
