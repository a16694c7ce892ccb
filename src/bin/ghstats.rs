use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ghstats::formatter::{OutputFormat, render};
use ghstats::github::GitHubClient;
use ghstats::github::client::install_crypto_provider;
use ghstats::services::{StatsCommand, StatsRequest, StatsService};
use ghstats::types::SearchScope;

#[derive(Parser)]
#[command(name = "ghstats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "GitHub stats command line client")]
#[command(
    long_about = "ghstats counts issues and pull requests, ranks their authors and lists repositories using GitHub's GraphQL search API. Filters use GitHub search syntax and are passed through verbatim."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// GitHub personal access token
    #[arg(short, long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Request timeout in seconds for GitHub API calls (default: 30 seconds)
    #[arg(long, global = true)]
    request_timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Count issues or pull requests matching a search
    Count {
        #[command(subcommand)]
        target: CountTarget,
    },
    /// List resources matching a search
    List {
        #[command(subcommand)]
        target: ListTarget,
    },
    /// Describe the results of a search
    Describe {
        #[command(subcommand)]
        target: DescribeTarget,
    },
}

#[derive(Subcommand)]
enum CountTarget {
    /// Count pull requests
    Prs(KindSearchArgs),
    /// Count issues
    Issues(KindSearchArgs),
}

#[derive(Subcommand)]
enum ListTarget {
    /// List repositories of an organization or user (default: the authenticated user)
    Repo(OwnerSearchArgs),
}

#[derive(Subcommand)]
enum DescribeTarget {
    /// Rank the authors of matching issues and pull requests
    Authors(KindSearchArgs),
    /// Count issues (same as `count issues`)
    Issues(KindSearchArgs),
}

#[derive(Args)]
#[group(required = false, multiple = false)]
struct ScopeArgs {
    /// GitHub repository (i.e. "octocat/hello-world" or its URL)
    #[arg(short, long)]
    repo: Option<String>,
    /// GitHub organization (i.e. "octocat")
    #[arg(short, long)]
    org: Option<String>,
    /// GitHub user (i.e. "octocat")
    #[arg(short, long)]
    user: Option<String>,
}

#[derive(Args)]
struct KindSearchArgs {
    #[command(flatten)]
    scope: ScopeArgs,
    /// GitHub search filter (i.e. "merged:>=2020-10-08")
    #[arg(short, long, default_value = "")]
    filter: String,
    /// Additional is: condition, repeatable (i.e. "open")
    #[arg(short = 'i', long = "is", value_name = "TAG")]
    is_tags: Vec<String>,
}

impl From<KindSearchArgs> for StatsRequest {
    fn from(args: KindSearchArgs) -> Self {
        let scope = SearchScope::from_flags(args.scope.repo, args.scope.org, args.scope.user);
        StatsRequest::new(scope, args.filter).with_is_tags(args.is_tags)
    }
}

#[derive(Args)]
#[group(required = false, multiple = false)]
struct OwnerArgs {
    /// GitHub organization (i.e. "octocat")
    #[arg(short, long)]
    org: Option<String>,
    /// GitHub user (i.e. "octocat")
    #[arg(short, long)]
    user: Option<String>,
}

#[derive(Args)]
struct OwnerSearchArgs {
    #[command(flatten)]
    owner: OwnerArgs,
    /// GitHub search filter (i.e. "language:rust")
    #[arg(short, long, default_value = "")]
    filter: String,
}

impl From<OwnerSearchArgs> for StatsRequest {
    fn from(args: OwnerSearchArgs) -> Self {
        let scope = SearchScope::from_flags(None, args.owner.org, args.owner.user);
        StatsRequest::new(scope, args.filter)
    }
}

impl From<Commands> for StatsCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Count { target } => match target {
                CountTarget::Prs(args) => StatsCommand::CountPullRequests(args.into()),
                CountTarget::Issues(args) => StatsCommand::CountIssues(args.into()),
            },
            Commands::List { target } => match target {
                ListTarget::Repo(args) => StatsCommand::ListRepositories(args.into()),
            },
            Commands::Describe { target } => match target {
                DescribeTarget::Authors(args) => StatsCommand::DescribeAuthors(args.into()),
                DescribeTarget::Issues(args) => StatsCommand::DescribeIssues(args.into()),
            },
        }
    }
}

/// Log directives used when `RUST_LOG` is unset or blank.
const DEFAULT_LOG_DIRECTIVES: &str = "ghstats=warn";

fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider early to prevent "no process-level CryptoProvider available" panics
    install_crypto_provider();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = GitHubClient::new(cli.token, cli.request_timeout.map(Duration::from_secs))?;
    let service = StatsService::new(client);

    let output = service
        .run(cli.command.into(), &mut std::io::stderr())
        .await?;

    let rendered = render(&output, cli.format)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|_| stdout.flush())
        .context("Failed to write output")?;

    Ok(())
}
