//! Shim binary that calls into the `randomkey_host` library's `inner_main`.
use clap::Parser as _;
use eyre::Result;
use randomkey_host::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    randomkey_host::inner_main(Cli::parse()).await
}
