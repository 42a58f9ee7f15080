use clap::Args;
use oshocks::sizing::{BikeKind, recommend_frame_size};

#[derive(Debug, Args)]
pub(crate) struct SizeArgs {
    /// Bike category
    #[arg(short, long, value_enum)]
    kind: BikeKind,

    /// Rider height in centimetres
    #[arg(long)]
    height: u16,

    /// Rider inseam in centimetres
    #[arg(short, long)]
    inseam: Option<u16>,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) fn run(args: &SizeArgs) -> anyhow::Result<()> {
    let recommendation = recommend_frame_size(args.kind, args.height, args.inseam)?;

    println!("Recommended {} size: {recommendation}", args.kind);

    Ok(())
}
