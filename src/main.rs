use anyhow::Result;
use clap::Parser;

use mule_link_analyzer::config::Config;
use mule_link_analyzer::viz::{RenderConfig, RenderFormat};
use mule_link_analyzer::{cluster, data, graph, report, storage, viz};

#[derive(Parser, Debug)]
#[clap(
    name = "mule-link-analyzer",
    about = "Link accounts by shared device and IP address and flag likely mule coordinators"
)]
struct Cli {
    /// Path to input CSV (with header) or Parquet file
    #[clap(long, default_value = "data/sample_data.csv")]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Largest device/IP bucket to link pairwise (unbounded if omitted)
    #[clap(long)]
    max_bucket_size: Option<usize>,

    /// Minimum cluster size to report
    #[clap(long, default_value = "1")]
    min_cluster_size: usize,

    /// Graph render format: dot, graphml or none
    // Fully qualified so clap treats `none` as a value, not a missing flag
    #[clap(long, default_value = "dot", value_parser = viz::parse_render_option)]
    render: std::option::Option<RenderFormat>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(args.max_bucket_size, args.min_cluster_size);

    log::info!("Starting mule link analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load records
    let rows = data::loader::load_account_rows(&args.input)?;

    // 2. Build the linkage graph
    let linkage = graph::build_from_rows(&rows, &config.build)?;

    // 3. Analyze clusters
    let reports = cluster::analyze_with(&linkage, &config.analysis);

    report::write_summary(&mut std::io::stdout().lock(), &reports)?;

    // 4. Save results
    storage::save_results(&reports, &linkage, &args.output_dir)?;

    // 5. Render the graph if requested
    if let Some(format) = args.render {
        let render = RenderConfig::in_dir(format, &args.output_dir);
        let path = viz::render_graph(&linkage, &render)?;
        log::info!("Graph written to {}", path.display());
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
