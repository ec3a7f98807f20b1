// CLI commands for searching, ranking and health-checking plugins

use crate::catalog::DirectoryCatalogClient;
use crate::config::Config;
use crate::display;
use crate::health::{DirectoryHealthClient, HealthBoard, HealthService, HealthSource, HealthStatus};
use crate::model::{FilterCriteria, PluginRecord, RatingHistogram, SortKey};
use crate::pipeline::{FilterSession, RefreshOutcome};
use crate::scoring::{self, date, health, usability, HealthScoreResult};
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Filter, rank and health-score plugin directory search results
#[derive(Parser, Debug)]
#[command(name = "plugscope", version, about)]
pub struct Cli {
    /// Config file (default: ./plugscope.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the directory and show one filtered, sorted page
    Search {
        /// Search term
        term: String,

        /// Minimum star rating (0-5)
        #[arg(long, default_value = "0")]
        min_rating: f64,

        /// Minimum active installs
        #[arg(long, default_value = "0")]
        min_installs: u64,

        /// Maximum days since the last update, or "any"
        // Fully qualified so clap hands the parsed Option through as one value
        #[arg(long, default_value = "any", value_parser = parse_max_days)]
        max_days: std::option::Option<u32>,

        /// Sort key: last_updated, rating, active_installs, usability_score, health_score, name
        #[arg(long, default_value = "last_updated")]
        sort: String,

        /// Page to show (clamped to the available pages)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Also fetch the authoritative health score for every shown plugin
        #[arg(long)]
        with_health: bool,
    },

    /// Show the authoritative health score for one plugin
    Health {
        /// Plugin slug (e.g., akismet)
        slug: String,
    },

    /// Score a star histogram for usability
    Usability {
        /// Counts per star, e.g. 1=5,2=3,3=10,4=40,5=200
        #[arg(long, value_parser = parse_histogram)]
        histogram: RatingHistogram,

        /// Total rating count (default: histogram sum)
        #[arg(long)]
        total: Option<u64>,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, config: &Config) -> Result<()> {
        match self {
            Commands::Search {
                term,
                min_rating,
                min_installs,
                max_days,
                sort,
                page,
                with_health,
            } => {
                let criteria = FilterCriteria::default()
                    .with_min_rating(min_rating)
                    .with_min_installs(min_installs)
                    .with_max_days(max_days)
                    .with_sort(SortKey::from(sort));
                Self::search_cmd(config, term, criteria, page, with_health).await
            }
            Commands::Health { slug } => Self::health_cmd(config, slug).await,
            Commands::Usability { histogram, total } => {
                Self::usability_cmd(config, histogram, total);
                Ok(())
            }
        }
    }

    async fn search_cmd(
        config: &Config,
        term: String,
        criteria: FilterCriteria,
        page: usize,
        with_health: bool,
    ) -> Result<()> {
        let client = DirectoryCatalogClient::with_config(config.catalog.clone());
        let mut session = FilterSession::new(&config.pipeline, config.scoring);
        let now = Utc::now();

        println!("Loading plugins for '{}'...", term);
        if session.refresh(&client, &term, criteria, now).await? == RefreshOutcome::NoResults {
            println!("No plugins found matching \"{}\".", term);
            return Ok(());
        }

        let shown = session.go_to_page(page);
        if shown.is_empty() {
            println!("No plugins match the current filters.");
            println!("{}", session.status_line());
            return Ok(());
        }

        let board = HealthBoard::new();
        if with_health {
            let source: Arc<dyn HealthSource> =
                Arc::new(DirectoryHealthClient::with_config(config.health.clone()));
            let handle = HealthService::spawn(source, &config.health);
            let needed = board.track_page(shown.items.iter().map(|r| r.slug.as_str()));
            handle.fill_board(&board, needed).await;
        }

        for (offset, record) in shown.items.iter().enumerate() {
            print_row(shown.start_index + offset, record, config, with_health.then_some(&board));
        }

        println!();
        println!("{}", session.status_line());
        Ok(())
    }

    async fn health_cmd(config: &Config, slug: String) -> Result<()> {
        let client = DirectoryHealthClient::with_config(config.health.clone());
        let detail = client.detail(&slug).await?;
        let result = HealthScoreResult::from_detail(&slug, &detail, Utc::now());

        println!(
            "{} {}: {}/100 ({})",
            health::meter(result.health_score),
            result.slug,
            result.health_score,
            result.tier().as_str()
        );
        println!(
            "  Update recency: {}/30 (last updated {})",
            result.breakdown.update,
            updated_text(result.raw.last_updated.as_deref())
        );
        println!(
            "  Support:        {}/30 ({}% of recent threads resolved)",
            result.breakdown.support, result.raw.support_percent
        );
        println!(
            "  Installs:       {}/40 ({})",
            result.breakdown.installs,
            display::install_count(result.raw.active_installs)
        );
        Ok(())
    }

    fn usability_cmd(config: &Config, histogram: RatingHistogram, total: Option<u64>) {
        let total = total.unwrap_or_else(|| histogram.total());
        let result = usability::score(Some(&histogram), total, &config.scoring);

        println!(
            "Usability: {:.1}/100 ({})",
            result.score,
            result.color().as_str()
        );
        println!("  Average:  {:.1} {}", result.avg_stars, display::stars(result.avg_stars));
        println!("  Adjusted: {:.1}", result.adjusted_avg);
        println!("  Ratings:  {}", result.total);
        for star in (1..=5u8).rev() {
            println!("    {}★ {}", star, result.distribution.count(star));
        }
    }
}

fn print_row(position: usize, record: &PluginRecord, config: &Config, board: Option<&HealthBoard>) {
    let now = Utc::now();
    let usability = scoring::usability_of(record, &config.scoring);
    let proxy = scoring::health_proxy_of(record, now);

    println!(
        "{:>3}. {} ({}) by {}",
        position,
        record.name,
        record.slug,
        record.author_name()
    );
    if let Some(icon) = record.icons.best() {
        println!("     icon {}", icon);
    }
    println!(
        "     {} {:.1} ({} ratings) | {} installs | updated {}",
        display::stars(record.stars()),
        record.stars(),
        record.num_ratings,
        display::install_count(record.active_installs),
        updated_text(record.last_updated.as_deref())
    );
    println!(
        "     usability {:.1} ({}) | health estimate {}",
        usability.score,
        usability.color().as_str(),
        proxy
    );

    if let Some(board) = board {
        let badge = match board.status(&record.slug) {
            Some(HealthStatus::Ready(result)) => format!(
                "{} {} ({})",
                health::meter(result.health_score),
                result.health_score,
                result.tier().as_str()
            ),
            Some(HealthStatus::Unavailable(reason)) => format!("N/A ({})", reason),
            Some(HealthStatus::Pending) | None => "pending".to_string(),
        };
        println!("     health {}", badge);
    }
}

fn updated_text(raw: Option<&str>) -> String {
    let updated = date::normalize(raw);
    if date::is_unknown(updated) {
        "unknown".to_string()
    } else {
        display::time_ago(updated, Utc::now())
    }
}

/// Parse `--max-days`: a day count or "any"
fn parse_max_days(value: &str) -> Result<Option<u32>, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .ok()
        .filter(|&days| days > 0)
        .map(Some)
        .ok_or_else(|| format!("expected a positive number of days or \"any\", got '{}'", value))
}

/// Parse `--histogram` as comma-separated `star=count` pairs
fn parse_histogram(value: &str) -> Result<RatingHistogram, String> {
    let mut histogram = RatingHistogram::new();
    for pair in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (star, count) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected star=count, got '{}'", pair))?;
        let star: u8 = star
            .trim()
            .parse()
            .ok()
            .filter(|s| (1..=5).contains(s))
            .ok_or_else(|| format!("star must be 1-5, got '{}'", star.trim()))?;
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|_| format!("invalid count '{}' for {} stars", count.trim(), star))?;
        histogram = histogram.with(star, count);
    }
    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_days_accepts_any() {
        assert_eq!(parse_max_days("any"), Ok(None));
        assert_eq!(parse_max_days("ANY"), Ok(None));
        assert_eq!(parse_max_days("90"), Ok(Some(90)));
        assert!(parse_max_days("-3").is_err());
        assert!(parse_max_days("0").is_err());
        assert!(parse_max_days("soon").is_err());
    }

    #[test]
    fn histogram_pairs() {
        let histogram = parse_histogram("1=5, 2=3,5=200").unwrap();
        assert_eq!(histogram.count(1), 5);
        assert_eq!(histogram.count(2), 3);
        assert_eq!(histogram.count(3), 0);
        assert_eq!(histogram.count(5), 200);
        assert_eq!(histogram.total(), 208);
    }

    #[test]
    fn histogram_rejects_bad_pairs() {
        assert!(parse_histogram("6=1").is_err());
        assert!(parse_histogram("3").is_err());
        assert!(parse_histogram("3=many").is_err());
    }

    #[test]
    fn search_args_parse() {
        let cli = Cli::try_parse_from([
            "plugscope",
            "-v",
            "search",
            "contact form",
            "--min-rating",
            "4",
            "--max-days",
            "180",
            "--sort",
            "usability_score",
            "--with-health",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Search {
                term,
                min_rating,
                max_days,
                sort,
                page,
                with_health,
                ..
            } => {
                assert_eq!(term, "contact form");
                assert_eq!(min_rating, 4.0);
                assert_eq!(max_days, Some(180));
                assert_eq!(SortKey::from(sort), SortKey::UsabilityScore);
                assert_eq!(page, 1);
                assert!(with_health);
            }
            other => panic!("Expected search command, got {other:?}"),
        }
    }

    #[test]
    fn max_days_defaults_to_unbounded() {
        let cli = Cli::try_parse_from(["plugscope", "search", "seo"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { max_days: None, .. }));
    }
}
