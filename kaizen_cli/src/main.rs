use clap::{Parser, Subcommand};
use kaizen_core::calories::EntryOutcome;
use kaizen_core::planner::{DAYS, HEADERS, SLOTS};
use kaizen_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kaizen")]
#[command(about = "Self-improvement toolkit: planner, calories, brain games, health and habits", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit a weekly timetable of two-hour slots
    Planner,

    /// Log food and keep a running calorie total
    Calories,

    /// Solve randomly generated arithmetic problems
    Equations {
        /// Number of problems (defaults to brain.equation_rounds)
        #[arg(long)]
        count: Option<String>,
    },

    /// Memorize a sequence of numbers and recall it in order
    Memory {
        /// How many numbers to memorize (defaults to brain.memory_count)
        #[arg(long)]
        count: Option<String>,
    },

    /// Compute BMI and BMR
    Health {
        /// Weight in kg
        #[arg(long)]
        weight: String,
        /// Height in cm
        #[arg(long)]
        height: String,
        /// Age in years
        #[arg(long)]
        age: String,
        /// M or F
        #[arg(long)]
        sex: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Track sleep against a daily goal
    Sleep {
        /// Goal in hours (defaults to sleep.default_goal_hours)
        #[arg(long)]
        goal: Option<String>,
        /// Hours slept so far
        #[arg(long)]
        slept: String,
    },

    /// Track water intake with periodic reminders
    Water {
        /// Daily goal in liters
        #[arg(long)]
        goal: String,
        /// Seconds between reminders (defaults to water.reminder_interval_seconds)
        #[arg(long)]
        interval: Option<String>,
    },

    /// Recommend a workout program from height and weight
    Workout {
        /// Height in cm
        #[arg(long)]
        height: String,
        /// Weight in kg
        #[arg(long)]
        weight: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    kaizen_core::logging::init_for_shell(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(?config, "configuration resolved");
    let mut prompt = Prompt::stdin();

    match cli.command {
        Commands::Planner => cmd_planner(&mut prompt),
        Commands::Calories => cmd_calories(&mut prompt, &config),
        Commands::Equations { count } => cmd_equations(&mut prompt, &config, count),
        Commands::Memory { count } => cmd_memory(&mut prompt, &config, count),
        Commands::Health {
            weight,
            height,
            age,
            sex,
            json,
        } => cmd_health(&weight, &height, &age, &sex, json),
        Commands::Sleep { goal, slept } => cmd_sleep(&mut prompt, &config, goal, &slept),
        Commands::Water { goal, interval } => cmd_water(&mut prompt, &config, &goal, interval),
        Commands::Workout {
            height,
            weight,
            json,
        } => cmd_workout(&height, &weight, json),
    }
}

fn cmd_planner(prompt: &mut Prompt) -> Result<()> {
    let mut planner = WeeklyPlanner::new();
    display_grid(&planner);
    println!("Commands: set <row 1-{}> <day 1-{}> <activity> | show | reset | quit", SLOTS, DAYS);

    while let Some(line) = prompt.ask("planner")? {
        let mut parts = line.splitn(4, char::is_whitespace);
        match parts.next().unwrap_or_default() {
            "" => continue,
            "show" => display_grid(&planner),
            "reset" => {
                planner.reset();
                println!("Timetable cleared.");
            }
            "quit" | "q" => break,
            "set" => {
                let (Some(row), Some(day)) = (parts.next(), parts.next()) else {
                    println!("Usage: set <row> <day> <activity>");
                    continue;
                };
                let activity = parts.next().unwrap_or_default().trim();
                match (parse_ordinal(row), parse_ordinal(day)) {
                    (Some(row), Some(day)) => match planner.set_activity(row, day, activity) {
                        Ok(()) => println!(
                            "{} {}: {}",
                            HEADERS[day + 1],
                            planner.slot(row)?,
                            activity
                        ),
                        // Rows and days are typed 1-based
                        Err(Error::OutOfRange { what, index, max }) => println!(
                            "{} {} out of range (1..={})",
                            what,
                            index + 1,
                            max + 1
                        ),
                        Err(e) => println!("{}", e),
                    },
                    _ => println!("Row and day must be numbers starting at 1."),
                }
            }
            other => println!("Unknown command: {}", other),
        }
    }
    Ok(())
}

fn cmd_calories(prompt: &mut Prompt, config: &Config) -> Result<()> {
    let mut ledger = CalorieLedger::with_extra_foods(
        config.calories.foods.iter().map(|(name, kcal)| (name, *kcal)),
    )?;
    println!("Known foods: {}", ledger.food_names().join(", "));
    println!("Enter '<food> <quantity>' (grams/ml), 'total', or 'quit'.");

    while let Some(line) = prompt.ask("food")? {
        match line.as_str() {
            "" => continue,
            "quit" | "q" => break,
            "total" => {
                println!("Total Calories: {:.2}", ledger.total());
                continue;
            }
            _ => {}
        }

        let Some((food, quantity)) = line.rsplit_once(char::is_whitespace) else {
            println!("Please fill in both fields.");
            continue;
        };
        match ledger.add_entry(food, quantity) {
            Ok(EntryOutcome::Known(entry)) => println!(
                "{} ({} units): {:.2} kcal",
                entry.name, entry.quantity, entry.kcal
            ),
            Ok(EntryOutcome::UnknownFood(entry)) => {
                println!("Food not found. Adding manual calories.");
                println!("{} (Unknown quantity): {:.2} kcal", entry.name, entry.kcal);
            }
            Err(e) => {
                println!("{}", e);
                continue;
            }
        }
        println!("Total Calories: {:.2}", ledger.total());
    }

    let summary = ledger.summary();
    println!(
        "Logged {} entries, {:.2} kcal in total.",
        summary.entries, summary.total_kcal
    );
    Ok(())
}

fn cmd_equations(prompt: &mut Prompt, config: &Config, count: Option<String>) -> Result<()> {
    let count = match count {
        Some(raw) => validate::count(&raw)?,
        None => config.brain.equation_rounds,
    };
    let mut game = EquationGame::new().with_policy(config.brain.on_invalid_answer);
    game.start(i64::from(count))?;
    println!("Solve equations to test your math skills!");

    while let Some(problem) = game.current_problem().cloned() {
        let Some(line) = prompt.ask(&format!("Solve: {}", problem.text()))? else {
            break;
        };
        match game.submit_answer(&line) {
            Ok(scored) if scored.correct => {
                println!("Correct: {} = {}", problem.text(), scored.answer)
            }
            Ok(_) => println!(
                "Wrong: {} (Correct: {})",
                problem.text(),
                problem.correct_answer
            ),
            Err(e) => println!("{}", e),
        }
    }

    match (game.phase(), game.summary()) {
        (EquationPhase::Complete, Some(score)) => {
            println!("You solved {} correctly!", score)
        }
        (_, Some(score)) => println!(
            "Session ended early. You solved {} of {} answered.",
            score.correct, score.answered
        ),
        (_, None) => println!("Session abandoned."),
    }
    Ok(())
}

fn cmd_memory(prompt: &mut Prompt, config: &Config, count: Option<String>) -> Result<()> {
    let count = match count {
        Some(raw) => validate::count(&raw)?,
        None => config.brain.memory_count,
    };
    let mut game = MemoryGame::new().with_policy(config.brain.on_invalid_answer);
    game.start(i64::from(count))?;

    let numbers = game.reveal()?;
    let rendered: Vec<String> = numbers.iter().map(u32::to_string).collect();
    println!("Memorize the numbers: {}", rendered.join(" "));
    if prompt.ask("Press Enter when ready")?.is_none() {
        println!("Session abandoned.");
        return Ok(());
    }
    // Push the sequence off a typical terminal screen
    print!("{}", "\n".repeat(40));

    while game.phase() == MemoryPhase::Recalling {
        let position = game.recalls().len() + 1;
        let Some(line) = prompt.ask(&format!("Enter number {}", position))? else {
            break;
        };
        if let Err(e) = game.submit_recall(&line) {
            println!("{}", e);
        }
    }

    match game.summary() {
        Some(score) if game.phase() == MemoryPhase::Complete => {
            println!("You remembered {} numbers!", score)
        }
        Some(score) => println!(
            "Session ended early. You remembered {} of {} answered.",
            score.correct, score.answered
        ),
        None => println!("Session abandoned."),
    }
    if let Some(key) = game.answer_key() {
        let rendered: Vec<String> = key.iter().map(u32::to_string).collect();
        println!("The sequence was: {}", rendered.join(" "));
    }
    Ok(())
}

fn cmd_health(weight: &str, height: &str, age: &str, sex: &str, json: bool) -> Result<()> {
    let profile = HealthProfile {
        weight_kg: validate::measure("weight", weight)?,
        height_cm: validate::measure("height", height)?,
        age_years: validate::measure("age", age)?,
        sex: sex.parse()?,
    };
    let report = profile.report()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Your BMI: {:.2}", report.bmi);
        println!("Your BMR: {:.2} calories/day", report.bmr);
    }
    Ok(())
}

fn cmd_sleep(
    prompt: &mut Prompt,
    config: &Config,
    goal: Option<String>,
    slept: &str,
) -> Result<()> {
    let goal = match goal {
        Some(raw) => validate::level("goal", &raw)?,
        None => config.sleep.default_goal_hours,
    };
    let slept = validate::level("slept", slept)?;

    let mut tracker = SleepTracker::new();
    let status = tracker.start(goal, slept)?;
    if status.phase == SleepPhase::Met {
        println!("Great job! You've already met your daily sleep goal.");
        return Ok(());
    }
    println!(
        "You need to sleep {:.2} more hours to meet your daily goal.",
        status.remaining_hours
    );

    while tracker.phase() == SleepPhase::Tracking {
        let Some(line) = prompt.ask("Additional sleep hours")? else {
            break;
        };
        let status = match validate::amount(&line).and_then(|h| tracker.add_sleep(h)) {
            Ok(status) => status,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if status.phase == SleepPhase::Met {
            println!("Congratulations! You've met your daily sleep goal.");
        } else {
            println!(
                "You still need to sleep {:.2} more hours.",
                status.remaining_hours
            );
        }
    }
    Ok(())
}

fn cmd_water(
    prompt: &mut Prompt,
    config: &Config,
    goal: &str,
    interval: Option<String>,
) -> Result<()> {
    let goal = validate::measure("goal", goal)?;
    let interval = match interval {
        Some(raw) => validate::interval_seconds(&raw)?,
        None => config.water.reminder_interval_seconds,
    };

    let mut reminder = WaterReminder::new(goal)?;
    tracing::debug!(goal, interval, "starting water reminder");
    reminder.on_remind(|r| {
        println!(
            "\nReminder: Stay hydrated! You've drunk {:.2} liters out of your {:.2} liter goal.",
            r.drunk_liters, r.goal_liters
        );
    });
    let interval = i64::try_from(interval)
        .map_err(|_| Error::InvalidInterval(format!("{} seconds is too long", interval)))?;
    reminder.start(interval)?;

    while reminder.phase() == WaterPhase::Tracking {
        let Some(line) = prompt.ask("Liters just drunk")? else {
            break;
        };
        let state = match validate::amount(&line).and_then(|l| reminder.add_water(l)) {
            Ok(state) => state,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if state.phase == WaterPhase::Met {
            println!("Great job! You've achieved your daily water goal!");
            println!(
                "You've exceeded your goal by {:.2} liters.",
                reminder.surplus()
            );
        } else {
            println!(
                "You've now drunk {:.2} liters out of your {:.2} liter goal.",
                state.drunk_liters, state.goal_liters
            );
        }
    }
    reminder.cancel();
    Ok(())
}

fn cmd_workout(height: &str, weight: &str, json: bool) -> Result<()> {
    let plan = workout::recommend(
        validate::measure("height", height)?,
        validate::measure("weight", weight)?,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }
    println!("Your BMI: {:.2}", plan.bmi);
    println!("Your Fitness Goal: {}", plan.goal);
    println!("Workout Plan for: {}", plan.goal);
    for exercise in &plan.exercises {
        println!("  → {}", exercise);
    }
    Ok(())
}

fn display_grid(planner: &WeeklyPlanner) {
    let widths: Vec<usize> = (0..HEADERS.len())
        .map(|col| {
            planner
                .grid()
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(HEADERS[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        println!("│ {} │", padded.join(" │ "));
    };

    render(HEADERS.to_vec());
    for row in planner.grid() {
        render(row.iter().map(String::as_str).collect());
    }
}

/// "1" → 0; anything else that is not a positive integer → None
fn parse_ordinal(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

/// Line-oriented reader used for every interactive question
struct Prompt {
    input: Box<dyn BufRead>,
}

impl Prompt {
    fn stdin() -> Self {
        Self {
            input: Box::new(io::BufReader::new(io::stdin())),
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}> ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
