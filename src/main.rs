use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracker_swap::arguments;
use tracker_swap::config::{self, Config};
use tracker_swap::constants::{EXPLORER_TX_URL, SOL_MINT};
use tracker_swap::logger::{self, LogTag};
use tracker_swap::{SwapClient, SwapOptions, SwapRequest};

/// Swap through the Solana Tracker quoting service and confirm on-chain
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = config::CONFIG_FILE_PATH)]
    config: String,

    /// Mint to sell
    #[arg(long, default_value = SOL_MINT)]
    from: String,

    /// Mint to buy
    #[arg(long)]
    to: String,

    /// Amount of `from` to sell, in UI units
    #[arg(long)]
    amount: f64,

    /// Maximum slippage in percent
    #[arg(long, default_value_t = 30.0)]
    slippage: f64,

    /// Priority fee in SOL
    #[arg(long)]
    priority_fee: Option<f64>,

    /// Request a legacy (non-versioned) transaction
    #[arg(long)]
    force_legacy: bool,

    /// Return as soon as the transaction is sent
    #[arg(long)]
    skip_confirmation: bool,

    /// Print the quote and exit without signing
    #[arg(long)]
    quote_only: bool,

    /// Debug output for a tag (system, config, quote, swap, rpc, wallet, all)
    #[arg(long = "debug", value_name = "TAG")]
    debug_tags: Vec<String>,

    #[arg(long)]
    verbose: bool,

    /// Only print errors
    #[arg(long)]
    quiet: bool,

    /// Mirror log output to this file
    #[arg(long)]
    log_file: Option<String>,
}

/// Re-express clap's view of the logger flags as the argv snapshot the logger reads
fn logger_args(args: &Args) -> Vec<String> {
    let mut argv = vec!["tracker-swap".to_string()];
    argv.extend(args.debug_tags.iter().map(|tag| format!("--debug-{}", tag)));
    if args.verbose {
        argv.push("--verbose".to_string());
    }
    if args.quiet {
        argv.push("--quiet".to_string());
    }
    if let Some(path) = &args.log_file {
        argv.push("--log-file".to_string());
        argv.push(path.clone());
    }
    argv
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    arguments::set_cmd_args(logger_args(&args));
    logger::init();

    let started = Instant::now();
    let outcome = run(&args, started).await;
    let elapsed = started.elapsed().as_secs_f64();

    if let Err(e) = outcome {
        println!("Swap failed: {:#}", e);
        println!("Time elapsed before failure: {:.2} seconds", elapsed);
        logger::flush();
        std::process::exit(1);
    }
    logger::flush();
}

async fn run(args: &Args, started: Instant) -> Result<()> {
    config::load_config_from_path(&args.config).context("loading configuration")?;
    let cfg: Config = config::get_config_clone();

    let client = SwapClient::from_config(&cfg).context("loading wallet")?;
    logger::info(
        LogTag::Wallet,
        &format!("Wallet {} on {}", client.payer(), cfg.rpc.url),
    );

    let mut request = SwapRequest::new(
        args.from.clone(),
        args.to.clone(),
        args.amount,
        args.slippage,
        client.payer().to_string(),
    )
    .with_force_legacy(args.force_legacy);
    if let Some(fee) = args.priority_fee {
        request = request.with_priority_fee(fee);
    }

    let quote = client
        .get_swap_instructions(&request)
        .await
        .context("getting swap instructions")?;

    if args.quote_only {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    let mut options = SwapOptions::from(&cfg.swap);
    if args.skip_confirmation {
        options.skip_confirmation_check = true;
    }

    let send_time = Instant::now();
    let report = client.perform_swap_with_report(&quote, &options).await?;
    let end_time = Instant::now();

    println!("Transaction ID: {}", report.signature);
    println!("Transaction URL: {}{}", EXPLORER_TX_URL, report.signature);
    println!(
        "Swap completed in {:.2} seconds",
        end_time.duration_since(started).as_secs_f64()
    );
    println!(
        "Transaction finished in {:.2} seconds",
        end_time.duration_since(send_time).as_secs_f64()
    );
    Ok(())
}
