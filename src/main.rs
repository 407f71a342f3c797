mod error;
mod process;
mod server;
mod tasks;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::CliError;
use crate::tasks::{Browser, Paths};

#[derive(Parser, Debug)]
#[command(name = "sketchpad", about = "Build, serve, and test the sketchpad canvas app")]
struct Cli {
    /// Directory served at `/`; the wasm package is written to `<dir>/pkg`.
    #[arg(long, global = true, env = "SKETCHPAD_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile the canvas crate to wasm into the static package directory.
    Build(BuildArgs),
    /// Serve the static directory.
    Serve(ServeArgs),
    /// Build, then serve.
    Dev {
        #[command(flatten)]
        build: BuildArgs,
        #[command(flatten)]
        serve: ServeArgs,
    },
    /// Run native and/or in-browser tests.
    Test(TestArgs),
    /// Run the harness scenarios in a live browser against a running server.
    E2e(E2eArgs),
    /// Check that a running server answers `/healthz`.
    Ping {
        #[arg(long, env = "SKETCHPAD_BASE_URL", default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Unoptimized build that publishes `window.appInstance`.
    #[arg(long, default_value_t = false)]
    wasm_debug: bool,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "SKETCHPAD_HOST", default_value = "127.0.0.1")]
    host: String,

    #[arg(long, env = "SKETCHPAD_PORT", default_value_t = 8080)]
    port: u16,
}

#[derive(Args, Debug)]
struct TestArgs {
    /// Native `cargo test` for the workspace.
    #[arg(long, default_value_t = false)]
    native: bool,

    /// In-browser `wasm-pack test` for the canvas crate.
    #[arg(long, default_value_t = false)]
    wasm: bool,

    /// Browser for wasm tests; defaults to every browser on this platform.
    #[arg(long, value_enum)]
    browser: Option<Browser>,

    #[arg(long, default_value_t = false)]
    headless: bool,
}

#[derive(Args, Debug)]
struct E2eArgs {
    #[arg(long, env = "SKETCHPAD_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    #[arg(long, env = "HARNESS_WEBDRIVER_URL", default_value = "http://127.0.0.1:9515")]
    webdriver_url: String,

    /// Show the browser window.
    #[arg(long, default_value_t = false)]
    headed: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let paths = Paths::resolve(workspace_root(), cli.static_dir);

    match cli.command {
        Command::Build(args) => run_build(&paths, &args).await,
        Command::Serve(args) => server::serve(&paths, &args.host, args.port).await,
        Command::Dev { build, serve } => {
            run_build(&paths, &build).await?;
            server::serve(&paths, &serve.host, serve.port).await
        }
        Command::Test(args) => run_tests(&paths, &args).await,
        Command::E2e(args) => run_e2e(&paths, &args).await,
        Command::Ping { base_url } => run_ping(&base_url).await,
    }
}

/// The root package sits at the workspace root.
fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

async fn run_build(paths: &Paths, args: &BuildArgs) -> Result<(), CliError> {
    let mode = if args.wasm_debug { "debug" } else { "release" };
    tracing::info!(mode, out_dir = %paths.pkg_dir.display(), "building wasm package");
    process::run(&tasks::wasm_build(paths, args.wasm_debug)).await?;
    tracing::info!(out_dir = %paths.pkg_dir.display(), "build complete");
    Ok(())
}

async fn run_tests(paths: &Paths, args: &TestArgs) -> Result<(), CliError> {
    let (native, wasm) = tasks::test_selection(args.native, args.wasm);
    if native {
        process::run(&tasks::native_tests(paths)).await?;
        tracing::info!("native tests passed");
    }
    if wasm {
        let browsers = args.browser.map_or_else(Browser::platform_defaults, |b| vec![b]);
        for browser in browsers {
            process::run(&tasks::wasm_tests(paths, browser, args.headless)).await?;
            tracing::info!(?browser, "wasm tests passed");
        }
    }
    Ok(())
}

async fn run_e2e(paths: &Paths, args: &E2eArgs) -> Result<(), CliError> {
    run_ping(&args.base_url).await?;
    process::run(&tasks::e2e_tests(paths, &args.base_url, &args.webdriver_url, !args.headed)).await?;
    tracing::info!("e2e scenarios passed");
    Ok(())
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::HealthCheck(status.as_u16()));
    }
    println!("ok");
    Ok(())
}
