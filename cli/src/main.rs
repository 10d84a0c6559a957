use anyhow::{anyhow, bail, Result};
use blend_oxide::decode::decompress;
use blend_oxide::encode::{self, compress_to_vec};
use blend_oxide::eval::error_stats;
use blend_oxide::io::json::{load_skinning_data, save_json, TableDocument};
use blend_oxide::prelude::*;
use clap::Parser;

#[derive(Parser)]
#[command(name = "blend-cli")]
#[command(about = "A CLI tool for blend attribute compression")]
struct Cli {
    /// Skinning data in JSON: bone_count, indices and explicit weights
    #[arg(short, long)]
    input: String,

    /// Compression request in JSON. Flags override its fields
    #[arg(short, long)]
    config: Option<String>,

    /// Compression method, e.g. unit_cube_sampling or permutation_coding
    #[arg(short, long)]
    method: Option<String>,

    /// Requested bytes per vertex
    #[arg(long)]
    vertex_size: Option<usize>,

    /// Requested number of distinct bone index tuples
    #[arg(long)]
    max_tuple_count: Option<u32>,

    /// Keep only this many influences per vertex before compressing
    #[arg(long)]
    reduce: Option<usize>,

    /// Output path of the compressed vertices
    #[arg(short, long)]
    output: Option<String>,

    /// Output path of the tuple table document
    #[arg(short, long)]
    table: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let skinning = load_skinning_data(&cli.input)
        .map_err(|e| anyhow!("Failed to load skinning data: {}", e))?;
    let source = skinning.as_attributes()
        .map_err(|e| anyhow!("Invalid skinning data: {}", e))?;

    let reduced = match cli.reduce {
        Some(bone_count) => Some(reduce_bone_count(&source, bone_count, false)
            .map_err(|e| anyhow!("Failed to reduce bone count: {}", e))?),
        None => None,
    };
    let attributes = match &reduced {
        Some(reduced) => reduced.as_attributes()?,
        None => source,
    };

    let config = load_config(&cli, attributes.bone_count())?;
    let params = config.resolve();
    if params.max_bone_count != attributes.bone_count() {
        bail!(
            "The resolved method needs {} bones per vertex, but the data has {}. Use --reduce.",
            params.max_bone_count,
            attributes.bone_count()
        );
    }
    tracing::info!(
        method = ?params.method.get_type(),
        vertex_size = params.vertex_size,
        max_tuple_count = params.max_tuple_count,
        "Compressing {} vertices",
        attributes.vertex_count()
    );

    let compressed = compress_to_vec(&attributes, &params)
        .map_err(|e| anyhow!("Failed to compress: {}", e))?;
    let decoded = decompress(&compressed.data, params.vertex_size, attributes.vertex_count(), &params, &compressed.table)
        .map_err(|e| anyhow!("Failed to decode: {}", e))?;
    let stats = error_stats(&attributes, &decoded, &compressed.outcome);

    println!("{}", serde_json::to_string_pretty(&params)?);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    if compressed.outcome.is_overflow() {
        tracing::warn!(
            table_size = compressed.outcome.table_size,
            capacity = compressed.outcome.capacity,
            "Tuple table overflowed, some vertices reference wrong bones"
        );
    }
    if compressed.outcome.singleton_overflow > 0 {
        tracing::warn!(
            singleton_overflow = compressed.outcome.singleton_overflow,
            max_tuple_count = params.max_tuple_count,
            "Single influence vertices have bone indices that do not fit the tuple index field. \
             Raise --max-tuple-count above the largest bone index"
        );
    }

    if let Some(path) = &cli.output {
        std::fs::write(path, &compressed.data)
            .map_err(|e| anyhow!("Failed to write output file: {}", e))?;
    }
    if let Some(path) = &cli.table {
        save_json(&TableDocument::new(&compressed), path)
            .map_err(|e| anyhow!("Failed to write table file: {}", e))?;
    }
    Ok(())
}

/// Reads the compression request from the config file, or starts from the
/// default request, and applies the flags.
fn load_config(cli: &Cli, bone_count: usize) -> Result<encode::Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read config file: {}", e))?;
            serde_json::from_str(&text)?
        },
        None => encode::Config {
            max_bone_count: bone_count,
            ..<encode::Config as ConfigType>::default()
        },
    };
    if let Some(method) = &cli.method {
        config.method = serde_json::from_value(serde_json::Value::String(method.clone()))
            .map_err(|_| anyhow!("Unknown compression method: {}", method))?;
    }
    if let Some(vertex_size) = cli.vertex_size {
        config.vertex_size = vertex_size;
    }
    if let Some(max_tuple_count) = cli.max_tuple_count {
        config.max_tuple_count = max_tuple_count;
    }
    Ok(config)
}
