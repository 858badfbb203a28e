//! Vocabulary Practice Trainer - daily cluster rotation drills
//!
//! Single-user, synchronous, self-contained CLI application. Loads a word
//! sheet (remote CSV or local cache), buckets words into topical clusters,
//! picks one cluster per calendar day, and records session metrics to a
//! local tracking log.

mod cli;
mod csv;
mod session;
mod vocab;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cli::display::Display;
use cli::input::{InputHandler, RawModeGuard, SessionKey};
use rand::seq::SliceRandom;
use session::recorder::DEFAULT_TRACK_FILE;
use session::{PracticeSessionRecorder, SessionState, TrackingLog};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use vocab::source::{DEFAULT_CACHE_FILE, DEFAULT_SHEET_URL};
use vocab::words::WordEntry;
use vocab::{cluster_for_date, ClusterClassifier, PhoneticClient, WordList, WordSource};

#[derive(Parser, Debug)]
#[command(name = "Vocabulary Practice Trainer")]
#[command(about = "Daily vocabulary drills with cluster rotation and session tracking")]
struct Args {
    /// Word sheet export URL
    #[arg(long, default_value = DEFAULT_SHEET_URL)]
    sheet_url: String,

    /// Local word cache file
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    cache: PathBuf,

    /// Tracking log file
    #[arg(long, default_value = DEFAULT_TRACK_FILE)]
    track: PathBuf,

    /// Backfill missing IPA via the dictionary API
    #[arg(long)]
    fetch_ipa: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive practice session for one day's cluster
    Daily {
        /// Practice date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Browse clusters with search and CSV export
    Summary {
        /// Clusters to include (default: all)
        #[arg(short, long)]
        cluster: Vec<String>,

        /// Case-insensitive substring search over word and translation
        #[arg(short, long)]
        search: Option<String>,

        /// Write the filtered subset as CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Learning outcome tracking over a date range
    Tracking {
        /// Range start (default: earliest record)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Range end (default: latest record)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Write the selected records as CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Refresh the local cache from the sheet
    Refresh,
}

/// Load the word list and run the enrichment pass
///
/// A failed load is reported and degrades to an empty placeholder list so
/// every page still renders.
fn load_words(args: &Args, display: &Display) -> Result<WordList, Box<dyn Error>> {
    let source = WordSource::new(&args.sheet_url, &args.cache);
    let mut words = match source.load() {
        Ok(words) => words,
        Err(e) => {
            display.show_error(&format!("Error loading word sheet: {}", e))?;
            WordList::empty()
        }
    };

    // Mirror of the cache-info sidebar: where the words came from
    if let Some(status) = source.cache_status() {
        display.show_message(&format!("{}, {} words", status, words.len()))?;
    }

    words.backfill_clusters(&ClusterClassifier::default());
    if args.fetch_ipa {
        let client = PhoneticClient::new(vocab::phonetics::DEFAULT_API_URL)?;
        words.backfill_ipa(|word| client.lookup(word));
    }

    Ok(words)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let display = Display::simple()?;

    match &args.command {
        Some(Command::Summary {
            cluster,
            search,
            export,
        }) => run_summary(&args, &display, cluster, search.as_deref(), export.as_deref()),
        Some(Command::Tracking { from, to, export }) => {
            run_tracking(&args, &display, *from, *to, export.as_deref())
        }
        Some(Command::Refresh) => run_refresh(&args, &display),
        Some(Command::Daily { date }) => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            run_daily(&args, &display, date)
        }
        // No subcommand: today's practice session
        None => run_daily(&args, &display, chrono::Local::now().date_naive()),
    }
}

/// Interactive daily practice session
fn run_daily(args: &Args, display: &Display, date: NaiveDate) -> Result<(), Box<dyn Error>> {
    let words = load_words(args, display)?;
    let clusters = words.distinct_clusters();
    let cluster = cluster_for_date(&clusters, date);

    // Shuffled practice order within the day's cluster
    let mut practice: Vec<&WordEntry> = words.in_cluster(&cluster);
    practice.shuffle(&mut rand::thread_rng());

    let recorder = PracticeSessionRecorder::new(&args.track);
    let mut session = SessionState::new();
    let input = InputHandler::new();
    let mut recorded = false;

    // Dropped on every exit path, including `?` failures in the loop
    let raw_mode = RawModeGuard::enable()?;

    'session: loop {
        display.clear()?;
        display.show_cluster_header(date, &cluster)?;
        display.show_word_table(&practice)?;
        display.show_session_status(&session)?;
        display.show_daily_help()?;

        let key = match input.read_key()? {
            Some(key) => key,
            None => continue,
        };

        match InputHandler::session_key(&key) {
            Some(SessionKey::StartTimer) => session.start_timer(),
            Some(SessionKey::StopTimer) => {
                // A stop without a start is a silent no-op
                let _ = session.stop_timer();
            }
            Some(SessionKey::AddExercise) => session.add_exercise(),
            Some(SessionKey::Digit(d)) => session.push_score_digit(d),
            Some(SessionKey::Backspace) => session.pop_score_digit(),
            Some(SessionKey::Submit) => {
                if session.timer_running() {
                    let _ = session.stop_timer();
                }
                recorder.record_session(
                    date,
                    session.time_spent(),
                    session.exercises_completed(),
                    session.score().min(20),
                )?;
                recorded = true;
                break 'session;
            }
            Some(SessionKey::Quit) => break 'session,
            None => {}
        }
    }

    drop(raw_mode);

    if recorded {
        println!(
            "\n✓ Recorded: {} min, {} exercises, score {}",
            session.time_spent(),
            session.exercises_completed(),
            session.score().min(20)
        );
    } else {
        println!("\nSession discarded.");
    }
    Ok(())
}

/// Cluster summary page: filter, search, export
fn run_summary(
    args: &Args,
    display: &Display,
    selected: &[String],
    search: Option<&str>,
    export: Option<&std::path::Path>,
) -> Result<(), Box<dyn Error>> {
    let words = load_words(args, display)?;
    display.show_heading("📋 Cluster Summary")?;

    let clusters = if selected.is_empty() {
        words.distinct_clusters()
    } else {
        selected.to_vec()
    };

    // Search narrows the word set before the per-cluster grouping
    let matched: Vec<&WordEntry> = match search {
        Some(q) => words.search(q),
        None => words.entries.iter().collect(),
    };

    let mut exported: Vec<&WordEntry> = Vec::new();
    for cluster in &clusters {
        let subset: Vec<&WordEntry> = matched
            .iter()
            .copied()
            .filter(|e| &e.cluster == cluster)
            .collect();

        display.show_heading(cluster)?;
        display.show_word_table(&subset)?;
        exported.extend(subset);
    }

    if let Some(path) = export {
        fs::write(path, WordList::to_csv(&exported))?;
        display.show_message(&format!("Exported {} words to {}", exported.len(), path.display()))?;
    }
    Ok(())
}

/// Learning outcome tracking page
fn run_tracking(
    args: &Args,
    display: &Display,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    export: Option<&std::path::Path>,
) -> Result<(), Box<dyn Error>> {
    let recorder = PracticeSessionRecorder::new(&args.track);
    let log = recorder.load_log()?;

    display.show_heading("📊 Learning Outcome Tracking")?;

    if log.is_empty() {
        display.show_message("No records yet.")?;
        return Ok(());
    }

    // Bounds are safe to unwrap: the log is non-empty here
    let (min_date, max_date) = log.date_bounds().ok_or("empty log")?;
    let from = from.unwrap_or(min_date);
    let to = to.unwrap_or(max_date);

    let records = log.range(from, to);
    display.show_message(&format!("{} to {}", from, to))?;
    display.show_records(&records)?;
    display.show_summary(&TrackingLog::summarize(&records))?;
    display.show_score_chart(&records)?;
    display.show_minutes_chart(&records)?;

    if let Some(path) = export {
        fs::write(path, TrackingLog::records_to_csv(&records))?;
        display.show_message(&format!(
            "Exported {} records to {}",
            records.len(),
            path.display()
        ))?;
    }
    Ok(())
}

/// Force a fresh fetch of the sheet into the local cache
fn run_refresh(args: &Args, display: &Display) -> Result<(), Box<dyn Error>> {
    let source = WordSource::new(&args.sheet_url, &args.cache);
    match source.fetch_and_save() {
        Ok(words) => {
            display.show_message(&format!(
                "✓ Fetched {} words and saved to {}",
                words.len(),
                source.cache_path().display()
            ))?;
            if let Some(status) = source.cache_status() {
                display.show_message(&status)?;
            }
        }
        Err(e) => {
            display.show_error(&format!("Error fetching sheet: {}", e))?;
        }
    }
    Ok(())
}
