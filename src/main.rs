// src/main.rs

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use aerosim::run_simulation;
use aerosim::simulation::load_parameters::load_settings;

/// 時間発展型の空力弾性シミュレーション
#[derive(Parser, Debug)]
#[command(name = "aerosim", version)]
struct Args {
    /// 入力ファイル (YAML)
    input: PathBuf,

    /// 指定したスナップショットから再開する
    #[arg(short, long)]
    restart: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let start = Instant::now();

    // 設定の読み込み
    let settings = load_settings(&args.input)?;

    // ステージの実行
    let state = run_simulation(settings, args.restart.as_deref())?;

    info!(
        ts = state.ts,
        elapsed_s = start.elapsed().as_secs_f64(),
        "FINISHED"
    );
    Ok(())
}
