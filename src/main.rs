use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = pano_select::cli::parse();
    app::run(args)
}
