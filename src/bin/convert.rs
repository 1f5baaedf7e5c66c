use anyhow::{Context, Result};
use clap::Parser;
use cookconvert::core::{pages, routes, search};
use cookconvert::utils::logger;
use cookconvert::Registry;

#[derive(Parser)]
#[command(name = "convert")]
#[command(about = "Resolve one CookConvert path and print its page data")]
struct Args {
    /// Site path such as /cups-to-grams/flour, or a bare query slug like 2-cups-flour-to-grams
    target: Option<String>,

    /// Search the site index instead of resolving a path
    #[arg(short, long)]
    search: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let registry = Registry::builtin().context("ingredient registry failed to load")?;

    if let Some(query) = &args.search {
        let index = search::build_index(&registry);
        let hits = search::search(&index, query);
        if hits.is_empty() {
            println!("🔍 No results for '{}'", query);
        }
        for hit in hits {
            println!("{}  {}", hit.href, hit.title);
        }
        return Ok(());
    }

    let target = args
        .target
        .context("pass a path to resolve or --search <query>")?;
    let path = if target.contains('/') {
        target
    } else {
        format!("/q/{}", target)
    };

    let route_set = routes::enumerate(&registry)?;
    let route = routes::resolve(&registry, &path).with_context(|| format!("no page at {}", path))?;
    let page = pages::build_page(&registry, &route_set, &route);

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
