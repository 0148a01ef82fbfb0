//! Command-line interface for the aniver-links binary.
//!
//! The CLI exposes the slug normalizer, URL builder and route matcher for
//! scripting, and runs the legacy link resolver and canonical index against a
//! catalog file.

use std::{
    io,
    path::{Path, PathBuf},
    process,
};

use aniver_links::{
    CanonicalIndex, CatalogLookup, Error, EstablishmentRef, History, RedirectResolver,
    ResolverConfig, build_url, legacy_path, load_catalog, load_config, match_route, normalize,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Command line interface for establishment URL tooling.
#[derive(Debug, Parser,)]
#[command(name = "aniver-links", version, about = "Build and resolve establishment URLs")]
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Normalize display text into a URL slug.
    Slug(SlugArgs,),
    /// Build the public path of an establishment.
    Url(UrlArgs,),
    /// Match a request path against the establishment routes.
    Route(RouteArgs,),
    /// Resolve a legacy identifier to its navigation target.
    Resolve(ResolveArgs,),
    /// Print the canonical URL index of a catalog.
    Index(IndexArgs,),
}

#[derive(Debug, Args,)]
struct SlugArgs
{
    /// Text to normalize.
    text: String,
}

#[derive(Debug, Args,)]
struct UrlArgs
{
    /// Establishment identifier used for the legacy fallback.
    #[arg(long = "id", value_name = "ID")]
    id: String,

    /// Two-letter state code.
    #[arg(long = "estado", value_name = "UF")]
    estado: Option<String,>,

    /// City display name.
    #[arg(long = "cidade", value_name = "CITY")]
    cidade: Option<String,>,

    /// Establishment slug.
    #[arg(long = "slug", value_name = "SLUG")]
    slug: Option<String,>,
}

#[derive(Debug, Args,)]
struct RouteArgs
{
    /// Request path, e.g. `/sp/sao-paulo/loja-x`.
    path: String,
}

#[derive(Debug, Args,)]
struct ResolveArgs
{
    /// Catalog file (YAML or JSON) backing the lookup.
    #[arg(long = "catalog", value_name = "PATH", env = "ANIVER_CATALOG")]
    catalog: PathBuf,

    /// Resolver configuration file.
    #[arg(long = "config", value_name = "PATH", env = "ANIVER_CONFIG")]
    config: Option<PathBuf,>,

    /// Legacy identifier; omitted means the route carried none.
    id: Option<String,>,
}

#[derive(Debug, Args,)]
struct IndexArgs
{
    /// Catalog file (YAML or JSON).
    #[arg(long = "catalog", value_name = "PATH", env = "ANIVER_CATALOG")]
    catalog: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn",),),)
        .with_writer(io::stderr,)
        .init();

    if let Err(error,) = run(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors from catalog and configuration loading, index
/// validation and output serialization.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.command {
        Command::Slug(args,) => write_line(&mut handle, &normalize(&args.text,),),
        Command::Url(args,) => write_line(&mut handle, &run_url(args,),),
        Command::Route(args,) => write_json(&mut handle, &match_route(&args.path,), false,),
        Command::Resolve(args,) => {
            let target = run_resolve(args,).await?;
            write_line(&mut handle, &target,)
        }
        Command::Index(args,) => {
            let index = run_index(&args.catalog,)?;
            write_json(&mut handle, &index, args.pretty,)
        }
    }
}

fn run_url(args: UrlArgs,) -> String
{
    build_url(&EstablishmentRef {
        id:     args.id,
        estado: args.estado,
        cidade: args.cidade,
        slug:   args.slug,
    },)
}

/// Resolves a legacy identifier and returns the path the history ends on.
async fn run_resolve(args: ResolveArgs,) -> Result<String, Error,>
{
    let config = match args.config.as_deref() {
        Some(path,) => load_config(path,)?,
        None => ResolverConfig::default(),
    };
    let lookup = CatalogLookup::new(load_catalog(&args.catalog,)?,);
    let history = History::new(&legacy_path(args.id.as_deref().unwrap_or_default(),),);
    let resolver = RedirectResolver::new(lookup, &history, config,);

    let state = resolver.resolve(args.id.as_deref(),).await;

    state
        .target()
        .map(str::to_owned,)
        .or_else(|| history.current(),)
        .ok_or_else(|| Error::validation("resolution did not produce a navigation target",),)
}

fn run_index(catalog: &Path,) -> Result<CanonicalIndex, Error,>
{
    let catalog = load_catalog(catalog,)?;
    CanonicalIndex::build(&catalog.establishments,)
}

fn write_line<W: io::Write,>(writer: &mut W, line: &str,) -> Result<(), Error,>
{
    writeln!(writer, "{line}").map_err(|source| aniver_links::io_error(Path::new("<stdout>",), source,),)
}

fn write_json<W: io::Write, S: Serialize,>(
    writer: &mut W,
    value: &S,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value,)?;
    } else {
        serde_json::to_writer(&mut *writer, value,)?;
    }
    write_line(writer, "",)
}
