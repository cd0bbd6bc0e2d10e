use anyhow::{anyhow, bail, Context, Result};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::{
    app::{MindWell, Update},
    breathing::format_elapsed,
    concentration::{DelaySource, GameUpdate, RoundState, SignalOutcome},
    log_info, log_warn,
    timer::{FiredTimer, Scheduler, TokioScheduler},
};

const ENABLE_LOGS: bool = true;

const DEFAULT_RECENT_MOODS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mood { level: u8, note: String },
    Moods(usize),
    Breathe,
    StopBreathe,
    Game,
    Tap,
    StopGame,
    NextTip,
    PreviousTip,
    Language(String),
    Stats,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "mood" => {
                let (level, note) = match rest.split_once(char::is_whitespace) {
                    Some((level, note)) => (level, note.trim()),
                    None => (rest, ""),
                };
                let level = level
                    .parse()
                    .with_context(|| format!("mood level must be a number, got '{level}'"))?;
                Command::Mood {
                    level,
                    note: note.to_string(),
                }
            }
            "moods" if rest.is_empty() => Command::Moods(DEFAULT_RECENT_MOODS),
            "moods" => Command::Moods(
                rest.parse()
                    .with_context(|| format!("expected a count, got '{rest}'"))?,
            ),
            "breathe" => Command::Breathe,
            "stop-breathe" => Command::StopBreathe,
            "game" => Command::Game,
            "tap" => Command::Tap,
            "stop-game" => Command::StopGame,
            "tip" => match rest {
                "" | "next" => Command::NextTip,
                "prev" => Command::PreviousTip,
                other => bail!("unknown tip direction '{other}'"),
            },
            "lang" if !rest.is_empty() => Command::Language(rest.to_string()),
            "lang" => bail!("usage: lang <en|ru|zh>"),
            "stats" => Command::Stats,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command '{other}', try 'help'")),
        };

        Ok(Some(command))
    }
}

const HELP: &str = "\
commands:
  mood <1-5> [note]   record how you feel
  moods [n]           last n mood levels
  breathe             start guided breathing
  stop-breathe        end the breathing session
  game                start the concentration game
  tap                 react to the target
  stop-game           end the game
  tip [next|prev]     browse EQ tips
  lang <en|ru|zh>     switch language
  stats               session counters
  quit";

/// Reads commands from stdin and serves fired timers until `quit` or EOF.
pub async fn run_console<D: DelaySource>(
    mut app: MindWell<TokioScheduler, D>,
    mut fired: mpsc::UnboundedReceiver<FiredTimer>,
) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    println!("{}", HELP);

    loop {
        tokio::select! {
            // Timers first, so a timeout that is already due settles the round
            // before a tap read in the same pass.
            biased;

            Some(timer) = fired.recv() => {
                if let Some((key, due)) = app.scheduler_mut().accept(timer) {
                    let updates = app.fire_at(key, due);
                    render(&app, &updates);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => execute(&mut app, command),
                    Ok(None) => {}
                    Err(err) => println!("{err:#}"),
                }
            }
        }
    }

    app.stop_breathing();
    app.stop_game();
    log_info!("Console closed");
    Ok(())
}

fn execute<D: DelaySource>(app: &mut MindWell<TokioScheduler, D>, command: Command) {
    match command {
        Command::Mood { level, note } => match app.record_mood(level, note) {
            Ok(entry) => println!(
                "{} {}",
                entry.level.emoji(),
                app.localizer().get(entry.level.label_key())
            ),
            Err(err) => {
                log_warn!("Rejected mood entry: {}", err);
                println!("{err}");
            }
        },
        Command::Moods(n) => println!("{:?}", app.recent_moods(n)),
        Command::Breathe => {
            println!("{}", app.localizer().get("meditation_timer"));
            let updates = app.start_breathing();
            render(app, &updates);
        }
        Command::StopBreathe => {
            let updates = app.stop_breathing();
            render(app, &updates);
        }
        Command::Game => {
            println!("{}", app.localizer().get("focus_circle"));
            let updates = app.start_game();
            render(app, &updates);
        }
        Command::Tap => {
            let (outcome, updates) = app.signal();
            if let SignalOutcome::Hit { reaction_ms, .. } = outcome {
                println!("{}", app.localizer().format_reaction_time(reaction_ms));
            }
            render(app, &updates);
        }
        Command::StopGame => {
            let updates = app.stop_game();
            render(app, &updates);
        }
        Command::NextTip | Command::PreviousTip => {
            let tips = app.tips_mut();
            let tip = if command == Command::NextTip {
                tips.next()
            } else {
                tips.previous()
            };
            let (position, total) = tips.position();
            println!("[{position}/{total}] {}\n{}\n{}", tip.title, tip.content, tip.science);
        }
        Command::Language(code) => {
            if app.localizer_mut().set_language(&code) {
                println!("{}: {}", app.localizer().get("language"), code);
            } else {
                println!("unsupported language '{code}'");
            }
        }
        Command::Stats => {
            let stats = app.store().stats();
            println!(
                "{}: {}  best {}: {}",
                app.localizer().get("meditate"),
                stats.meditation_sessions_completed,
                app.localizer().get("concentration"),
                stats.best_concentration_score
            );
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn render<S: Scheduler, D: DelaySource>(app: &MindWell<S, D>, updates: &[Update]) {
    let localizer = app.localizer();
    for update in updates {
        match update {
            Update::Breath(breath) if breath.active => println!(
                "[{}] {} ({})",
                format_elapsed(breath.elapsed_secs),
                localizer.get(breath.instruction_key),
                breath.target_size
            ),
            Update::Breath(_) => println!("{}", localizer.get("start_button")),
            Update::Game(game) => println!("{}", game_line(game)),
            Update::MeditationCompleted { elapsed_secs, .. } => println!(
                "{} {}  {}",
                localizer.get("well_done"),
                localizer.get("session_complete"),
                format_elapsed(*elapsed_secs)
            ),
        }
    }
}

fn game_line(game: &GameUpdate) -> String {
    match (game.active, game.state) {
        (true, RoundState::Armed) => "(O) tap!".to_string(),
        (true, RoundState::Waiting) => format!(
            "( ) score {}  rounds {}  misses {}",
            game.score, game.rounds, game.misses
        ),
        (false, _) => format!("score {}  rounds {}", game.score, game.rounds),
    }
}
