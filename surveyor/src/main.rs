use anyhow::Context;
use bridge::bridge::SurveyBridge;
use bridge::model::SurveyModel;
use clap::Parser;
use generator::grid::{build_network, GeneratorConfig};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::SurveyConfig;
use workflow::runner::Runner;

mod bridge;
mod generator;
mod providers;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "AutoSense street-survey driver")]
struct Args {
    /// Run a single offline survey over a synthetic grid and emit a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a survey config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 12)]
    segment_count: usize,
    #[arg(long, default_value_t = 250.0)]
    spacing_m: f64,
    #[arg(long, default_value_t = 0.2)]
    jitter_fraction: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep the HTTP bridge alive for incoming survey requests
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let survey_config = if let Some(path) = args.workflow {
        SurveyConfig::load(path)?
    } else {
        SurveyConfig::from_args(
            args.segment_count,
            args.spacing_m,
            args.jitter_fraction,
            args.seed,
        )
    };

    let runner = Runner::new(survey_config.clone());
    let survey_bridge = SurveyBridge::new(Arc::new(runner.clone()));
    let generator_config = GeneratorConfig {
        seed: survey_config.seed,
        ..Default::default()
    };

    if args.offline {
        let network = build_network(&generator_config).context("building street network")?;
        let result = runner.execute(&network)?;

        println!(
            "Offline survey -> points {}, classified {}, no imagery {}, classifier failures {}",
            result.point_count,
            result.classified,
            result.image_unavailable,
            result.classification_failed
        );

        let model = SurveyModel::from_result(&result, Some("offline".to_string()));
        survey_bridge.publish(&model)?;
        survey_bridge.publish_status("Offline survey results ready.");

        let report = serde_json::json!({
            "seed": survey_config.seed,
            "points": result.point_count,
            "classified": result.classified,
            "image_unavailable": result.image_unavailable,
            "classification_failed": result.classification_failed,
        });
        let report_path = PathBuf::from("tools/data/survey_report.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        writeln!(file, "{}", report)?;
    }
    if args.serve {
        survey_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
