use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use vidscope::{
    analytics::{
        RandomScores, ScoreBand, DESCRIPTION_SUGGESTIONS, TAG_SUGGESTIONS, THUMBNAIL_TIPS,
        TITLE_SUGGESTIONS,
    },
    api::{
        mock::MockVideoSource,
        source::{analyze_url, build_source, usable_api_key, AnalyzeError, VideoSource},
        youtube::{extract_with_shape, ApiKey},
    },
    config::{AppConfig, ConfigManager},
    download::Downloader,
    format::{format_count, format_duration, VideoDuration},
    io::{write_json_report, AnalysisReport, ReportError},
    logging, VidscopeResult,
};

/// YouTube動画の分析ツール
#[derive(Parser, Debug)]
#[command(name = "vidscope", version, about = "YouTube video analytics from the command line")]
struct Cli {
    /// 設定ファイルのパス
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// ログレベル (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// URLから動画IDを取り出す
    Extract { url: String },
    /// 動画を分析して結果を表示する
    Analyze {
        url: String,
        /// JSONで出力
        #[arg(long)]
        json: bool,
        /// 乱数シード（モックデータとスコアを固定）
        #[arg(long)]
        seed: Option<u64>,
        /// レポートをJSONファイルに書き出す
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// ISO 8601 の再生時間を整形する
    Duration { token: String },
    /// yt-dlp で動画をダウンロードする
    Download {
        url: String,
        /// 保存先ディレクトリ
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// 設定ファイルの操作
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 現在の設定を表示
    Show,
    /// デフォルト設定ファイルを作成
    Init,
    /// 設定ファイルのパスを表示
    Path,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "❌ Command failed");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> VidscopeResult<()> {
    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };

    // 壊れた設定ファイルの場所を確認できるよう、読み込み前に応答する
    if let Command::Config {
        action: ConfigAction::Path,
    } = &cli.command
    {
        println!("{}", config_manager.config_path().display());
        return Ok(());
    }

    let mut config = config_manager.load_config()?;
    config.apply_env(|name| std::env::var(name).ok());
    if let Some(level) = &cli.log_level {
        config.log.log_level = level.clone();
    }

    let _guard = logging::init_logging(&config.log)?;
    tracing::debug!(config_path = %config_manager.config_path().display(), "⚙️ Configuration loaded");

    match cli.command {
        Command::Extract { url } => run_extract(&url),
        Command::Analyze {
            url,
            json,
            seed,
            output,
        } => run_analyze(&config, &url, json, seed, output).await,
        Command::Duration { token } => {
            run_duration(&token);
            Ok(())
        }
        Command::Download { url, dir } => run_download(&config, &url, dir).await,
        Command::Config { action } => run_config(&config_manager, &config, action),
    }
}

fn run_extract(url: &str) -> VidscopeResult<()> {
    let (video_id, shape) = extract_with_shape(url).ok_or_else(|| AnalyzeError::InvalidUrl {
        input: url.to_string(),
    })?;
    println!("{}", video_id);
    tracing::debug!(shape = ?shape, canonical = %video_id.canonical_url(shape), "🔗 URL recognized");
    Ok(())
}

async fn run_analyze(
    config: &AppConfig,
    url: &str,
    json: bool,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> VidscopeResult<()> {
    // シード指定時はモックデータも固定する
    let source: Box<dyn VideoSource> = match (seed, usable_api_key(config)) {
        (Some(seed), None) => Box::new(MockVideoSource::seeded(seed)),
        _ => build_source(config)?,
    };

    let analysis = match seed {
        Some(seed) => analyze_url(url, source.as_ref(), &mut RandomScores::seeded(seed)).await?,
        None => analyze_url(url, source.as_ref(), &mut RandomScores::from_entropy()).await?,
    };

    let video_id = extract_with_shape(url)
        .map(|(id, _)| id.to_string())
        .unwrap_or_default();
    let report = AnalysisReport::build(video_id, analysis);

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(ReportError::from)?;
        println!("{}", rendered);
    } else {
        print_report(&report);
    }

    if let Some(path) = output {
        write_json_report(&path, &report, true)?;
        println!("📄 Report written to {}", path.display());
    }

    Ok(())
}

fn band_label(score: u8) -> &'static str {
    match ScoreBand::from_score(score) {
        ScoreBand::High => "high",
        ScoreBand::Medium => "medium",
        ScoreBand::Low => "low",
    }
}

fn print_report(report: &AnalysisReport) {
    let analysis = &report.analysis;
    let video = analysis.video();

    println!("🎬 {}", video.title);
    println!("   Channel:   {}", video.channel_title);
    println!("   Published: {}", video.published_at.format("%Y-%m-%d"));
    println!("   Duration:  {}", report.duration);
    println!(
        "   Views: {}  Likes: {}  Comments: {}",
        format_count(video.views),
        format_count(video.likes),
        format_count(video.comments)
    );
    println!();

    println!("📊 Scores");
    println!("   Engagement rate: {}%", analysis.engagement_rate());
    println!(
        "   Sentiment:       {:.0}%",
        analysis.sentiment_score() * 100.0
    );
    println!(
        "   SEO score:       {}/100 ({})",
        analysis.seo_score(),
        band_label(analysis.seo_score())
    );
    println!("   Clickbait score: {}/100", analysis.clickbait_score());
    if analysis.insufficient_data() {
        println!("   ⚠️ No views yet, engagement cannot be measured");
    }
    println!();

    let engagement = &report.engagement;
    println!("💬 Engagement");
    println!(
        "   Engagement: {}% ({})",
        engagement.engagement_rate, engagement.engagement_vs_benchmark
    );
    println!(
        "   Likes:      {}% ({})",
        engagement.like_ratio, engagement.likes_vs_benchmark
    );
    println!(
        "   Comments:   {}% ({})",
        engagement.comment_ratio, engagement.comments_vs_benchmark
    );
    println!(
        "   Likes vs comments: {}%  Comment:like ratio: {}",
        engagement.likes_share, engagement.comment_like_ratio
    );
    println!();

    let seo = &report.seo;
    println!("🔍 SEO: {}/100 ({})", seo.score, seo.rating);
    println!(
        "   Title: {} chars, {} words  Tags: {} (avg {} chars)",
        seo.title_length, seo.title_word_count, seo.tag_count, seo.average_tag_length
    );
    for check in &seo.checks {
        println!("   [{:?}] {}: {}", check.status, check.name, check.message);
    }
    println!();

    println!("💡 Recommendations");
    if report.recommendations.is_empty() {
        println!("   Nothing to improve right now");
    }
    for recommendation in &report.recommendations {
        println!(
            "   {} - {}: {}",
            recommendation.priority, recommendation.title, recommendation.detail
        );
    }
    print_list("Title ideas", &TITLE_SUGGESTIONS);
    println!("   Suggested tags: {}", TAG_SUGGESTIONS.join(", "));
    print_list("Description openers", &DESCRIPTION_SUGGESTIONS);
    print_list("Thumbnail tips", &THUMBNAIL_TIPS);
}

fn print_list(heading: &str, items: &[&str]) {
    println!("   {}:", heading);
    for item in items {
        println!("   - {}", item);
    }
}

fn run_duration(token: &str) {
    match VideoDuration::parse(token) {
        Some(duration) => println!("{} ({}s)", duration, duration.total_seconds()),
        None => println!("{}", format_duration(token)),
    }
}

async fn run_download(config: &AppConfig, url: &str, dir: Option<PathBuf>) -> VidscopeResult<()> {
    let downloader = Downloader::new(
        dir.unwrap_or_else(|| config.download_dir.clone()),
        Duration::from_secs(config.download_timeout_secs),
    );
    let file = downloader.download(url).await?;
    println!("✅ {}", file.path.display());
    Ok(())
}

fn run_config(
    manager: &ConfigManager,
    config: &AppConfig,
    action: ConfigAction,
) -> VidscopeResult<()> {
    match action {
        ConfigAction::Show => {
            let mut shown = config.clone();
            shown.api_key = shown
                .api_key
                .map(|key| ApiKey::new(key).masked());
            let rendered = toml::to_string_pretty(&shown).context("Failed to serialize config")?;
            print!("{}", rendered);
        }
        ConfigAction::Init => {
            if manager.config_exists() {
                println!(
                    "Config already exists: {}",
                    manager.config_path().display()
                );
            } else {
                manager.save_config(&AppConfig::default())?;
                println!("📝 Created {}", manager.config_path().display());
            }
        }
        ConfigAction::Path => println!("{}", manager.config_path().display()),
    }
    Ok(())
}
