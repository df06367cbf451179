use std::path::PathBuf;
use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use rsoc_pipeline::record_loader::{available_authors, available_locales, load_records_file};
use rsoc_pipeline::types::{SkippedRow, TaskBatch, TaskRecord, Tier};
use rsoc_pipeline::{
    generate_tasks, IdListStyle, MalformedRowPolicy, PipelineResult, TaskConfig, TaskVariant,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    High,
    Medium,
    Low,
}

impl From<TierArg> for Tier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::High => Tier::High,
            TierArg::Medium => Tier::Medium,
            TierArg::Low => Tier::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    Internal,
    Partner,
}

impl From<VariantArg> for TaskVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Internal => TaskVariant::Internal,
            VariantArg::Partner => TaskVariant::Partner,
        }
    }
}

/// Generate creative tasks with pay from an ad performance CSV.
#[derive(Debug, Parser)]
#[command(name = "rsoc-cli", version)]
struct Cli {
    /// Ad performance export (CSV)
    csv: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only keep rows in this locale (repeatable)
    #[arg(long = "locale")]
    locales: Vec<String>,

    /// Only keep rows by this creative author (repeatable)
    #[arg(long = "author")]
    authors: Vec<String>,

    /// Number of top posts to keep after tier filtering (default: 5)
    #[arg(long)]
    top: Option<usize>,

    /// Post tiers to keep (repeatable; default: all)
    #[arg(long = "post-tier", value_enum)]
    post_tiers: Vec<TierArg>,

    /// Creative tiers to keep (repeatable; default: all)
    #[arg(long = "creative-tier", value_enum)]
    creative_tiers: Vec<TierArg>,

    /// Description template
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// List creative ids one per line with tier glyph and ROI
    #[arg(long)]
    annotated: bool,

    /// Skip and report rows with malformed ROI values instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn task_config(&self) -> PipelineResult<TaskConfig> {
        let mut config = match &self.config {
            Some(path) => TaskConfig::from_json_file(path)?,
            None => TaskConfig::default(),
        };
        if !self.locales.is_empty() {
            config.locales = Some(self.locales.clone());
        }
        if !self.authors.is_empty() {
            config.authors = Some(self.authors.clone());
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if !self.post_tiers.is_empty() {
            config.post_tiers = self.post_tiers.iter().map(|&t| t.into()).collect();
        }
        if !self.creative_tiers.is_empty() {
            config.creative_tiers = self.creative_tiers.iter().map(|&t| t.into()).collect();
        }
        if let Some(variant) = self.variant {
            config.variant = variant.into();
        }
        if self.annotated {
            config.id_list_style = IdListStyle::Annotated;
        }
        if self.skip_malformed {
            config.malformed_rows = MalformedRowPolicy::Skip;
        }
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct BatchJson<'a> {
    generated_at: String,
    pipeline_ms: u128,
    filter: &'a TaskConfig,
    tasks: Vec<TaskJson<'a>>,
    summary: SummaryJson<'a>,
}

#[derive(Serialize)]
struct TaskJson<'a> {
    original_post_id: &'a str,
    post_roi_total: f64,
    post_tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    article_name: Option<&'a str>,
    ad_creative_ids: &'a str,
    task_description: &'a str,
    total_pay: String,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    total_tasks: usize,
    total_payment: String,
    records_processed: usize,
    records_in_scope: usize,
    posts_considered: usize,
    posts_selected: usize,
    skipped_rows: &'a [SkippedRow],
}

fn build_json<'a>(batch: &'a TaskBatch, config: &'a TaskConfig, pipeline_ms: u128) -> BatchJson<'a> {
    BatchJson {
        generated_at: Utc::now().to_rfc3339(),
        pipeline_ms,
        filter: config,
        tasks: batch
            .tasks
            .iter()
            .map(|t| TaskJson {
                original_post_id: &t.original_post_id,
                post_roi_total: t.post_roi_total,
                post_tier: t.post_tier,
                article_name: t.article_name.as_deref(),
                ad_creative_ids: &t.id_list,
                task_description: &t.description,
                total_pay: t.pay_display(),
            })
            .collect(),
        summary: SummaryJson {
            total_tasks: batch.tasks.len(),
            total_payment: format!("${}", batch.total_payment),
            records_processed: batch.records_processed,
            records_in_scope: batch.records_in_scope,
            posts_considered: batch.posts_considered,
            posts_selected: batch.posts_selected,
            skipped_rows: &batch.skipped_rows,
        },
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_task(index: usize, task: &TaskRecord) {
    let glyph = task.post_tier.glyph();
    println!(
        "  {}. Post {}  {} {} (${:.2} ROI)  pay {}",
        index + 1,
        task.original_post_id,
        glyph,
        task.post_tier,
        task.post_roi_total,
        task.pay_display()
    );
    if let Some(article) = &task.article_name {
        println!("     Article: {}", article);
    }
    for line in task.id_list.lines() {
        println!("     Creatives: {}", line);
    }
    for line in task.description.lines() {
        println!("     {}", line);
    }
    println!();
}

fn print_human(batch: &TaskBatch, locales: &[String], authors: &[String], load_ms: u128, pipeline_ms: u128) {
    println!();
    println!("  RSOC Task Generator");
    println!(
        "  {} records  \u{00b7}  {} in scope  \u{00b7}  {} locales  \u{00b7}  {} authors",
        batch.records_processed,
        batch.records_in_scope,
        locales.len(),
        authors.len()
    );
    println!(
        "  {} posts considered  \u{00b7}  {} selected  \u{00b7}  {} skipped rows",
        batch.posts_considered,
        batch.posts_selected,
        batch.skipped_rows.len()
    );
    println!();

    if batch.is_empty() {
        println!("  No qualifying creatives found for the selected filters.");
    } else {
        println!("  {:\u{2500}<64}", "");
        for (i, task) in batch.tasks.iter().enumerate() {
            print_task(i, task);
        }
        println!("  {:\u{2500}<64}", "");
        println!(
            "  Generated {} task(s)  \u{00b7}  Total payment ${}",
            batch.tasks.len(),
            batch.total_payment
        );
    }

    for skipped in &batch.skipped_rows {
        println!(
            "  skipped row {}: {} = '{}'",
            skipped.row, skipped.column, skipped.value
        );
    }

    println!();
    println!(
        "  CSV loaded in {}ms \u{00b7} Pipeline ran in {}ms",
        load_ms, pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = match cli.task_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let load_start = Instant::now();
    let records = match load_records_file(&cli.csv) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();
    log::info!("loaded {} records from {}", records.len(), cli.csv.display());

    let pipeline_start = Instant::now();
    let batch = match generate_tasks(&records, &config) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error processing file: {}", e);
            process::exit(1);
        }
    };
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if cli.json {
        let output = build_json(&batch, &config, pipeline_ms);
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        let locales = config.locales.clone().unwrap_or_else(|| available_locales(&records));
        let authors = config.authors.clone().unwrap_or_else(|| available_authors(&records));
        print_human(&batch, &locales, &authors, load_ms, pipeline_ms);
    }
}
