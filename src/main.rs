//! opencrm - command-line access to the OpenCRM REST API
//!
//! Runs one operation against one module and prints the result to stdout
//! as JSON. Logs go to stderr.
//!
//! # Configuration
//!
//! Every global option can also be set through the environment (or a `.env` file):
//!
//! - `OPENCRM_SYSTEM`: System name, the `acme` in `acme.opencrm.co.uk`
//! - `OPENCRM_API_KEY` / `OPENCRM_PASS_KEY`: API key pair
//! - `OPENCRM_AUTH_METHOD`: `keys` (default), `headers` or `session`
//! - `OPENCRM_USER_AGENT`, `OPENCRM_TIMEOUT`, `OPENCRM_BASE_URL`: Optional overrides
//! - `RUST_LOG`: Log level (e.g., `opencrm=debug`)
//!
//! # Usage
//!
//! ```bash
//! opencrm leads count --query 'leadstatus|=|New'
//! opencrm helpdesk get 1234
//! opencrm contacts export --batch-size 200 > contacts.jsonl
//! opencrm leads create --set firstname=Ada --set lastname=Lovelace
//! ```

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

use opencrm::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use opencrm::resource::DEFAULT_BATCH_SIZE;
use opencrm::{AuthMethod, ClientConfig, ListParams, Module, OpenCrmClient, Record, Resource};

#[derive(Parser)]
#[command(name = "opencrm", version)]
#[command(about = "Query and update records in an OpenCRM system", long_about = None)]
struct Cli {
    /// OpenCRM system name (the subdomain of opencrm.co.uk)
    #[arg(long, env = "OPENCRM_SYSTEM")]
    system: String,

    /// API key
    #[arg(long, env = "OPENCRM_API_KEY", hide_env_values = true)]
    api_key: String,

    /// API pass key
    #[arg(long, env = "OPENCRM_PASS_KEY", hide_env_values = true)]
    pass_key: String,

    /// How credentials are sent: keys, headers or session
    #[arg(long, env = "OPENCRM_AUTH_METHOD", default_value = "keys")]
    auth_method: AuthMethod,

    /// User-Agent header sent with every request
    #[arg(long, env = "OPENCRM_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(long, env = "OPENCRM_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Override the API root, e.g. for a staging host
    #[arg(long, env = "OPENCRM_BASE_URL")]
    base_url: Option<String>,

    /// Module to work with (leads, contacts, companies, projects, helpdesk,
    /// opportunities, products, activities)
    #[arg(value_parser = parse_module)]
    module: &'static Module,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count matching records
    Count(FilterArgs),

    /// List one page of matching records
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Index of the first record
        #[arg(long)]
        start: Option<u64>,

        /// Index one past the last record
        #[arg(long)]
        end: Option<u64>,
    },

    /// Fetch one record by id
    Get {
        /// CRM id
        id: u64,
    },

    /// Stream every matching record as one JSON object per line
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Records fetched per request
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: u64,
    },

    /// Create a record and print its new id
    Create(FieldArgs),

    /// Update fields of a record
    Update {
        /// CRM id
        id: u64,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Filter as FIELD|OPERATOR|VALUE, e.g. 'lastname|BEGINS|Smi'
    #[arg(long)]
    query: Option<String>,

    /// Full-text search keywords
    #[arg(long)]
    keywords: Option<String>,
}

impl FilterArgs {
    fn to_params(&self) -> ListParams {
        let mut params = ListParams::new();
        if let Some(query) = &self.query {
            params = params.with_raw_query(query);
        }
        if let Some(keywords) = &self.keywords {
            params = params.with_keywords(keywords);
        }
        params
    }
}

#[derive(Args)]
struct FieldArgs {
    /// Field to set, as NAME=VALUE (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Fields as a JSON object; --set values win on conflict
    #[arg(long, value_name = "JSON")]
    json: Option<String>,
}

impl FieldArgs {
    fn to_record(&self) -> Result<Record> {
        let mut record = match &self.json {
            Some(text) => match serde_json::from_str(text).context("Failed to parse --json")? {
                Value::Object(map) => map,
                _ => anyhow::bail!("--json must be a JSON object"),
            },
            None => Record::new(),
        };
        for (name, value) in &self.fields {
            record.insert(name.clone(), Value::String(value.clone()));
        }
        if record.is_empty() {
            anyhow::bail!("no fields given; use --set NAME=VALUE or --json");
        }
        Ok(record)
    }
}

fn parse_module(name: &str) -> Result<&'static Module, String> {
    Module::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = Module::ALL.iter().map(|m| m.name).collect();
        format!("unknown module {:?} (expected one of {})", name, known.join(", "))
    })
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {:?}", arg)),
    }
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.system, &self.api_key, &self.pass_key)
            .with_auth_method(self.auth_method)
            .with_user_agent(&self.user_agent)
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        config
    }
}

fn main() -> Result<()> {
    // A missing .env is fine; clap falls back to the process environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries the JSON results
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("opencrm=info")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    tracing::debug!(
        module = cli.module.name,
        auth_method = %cli.auth_method,
        "Starting opencrm v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut client =
        OpenCrmClient::new(cli.client_config()).context("Failed to create OpenCRM client")?;

    let result = run(client.resource(cli.module), &cli.command);
    client.close();
    result
}

fn run(resource: Resource<'_>, command: &Command) -> Result<()> {
    let module = resource.module().name;
    let mut out = io::stdout().lock();

    match command {
        Command::Count(filter) => {
            let count = resource
                .count(&filter.to_params())
                .with_context(|| format!("Failed to count {}", module))?;
            writeln!(out, "{}", count)?;
        }
        Command::List { filter, start, end } => {
            let mut params = filter.to_params();
            if let Some(start) = start {
                params = params.with_limit_start(*start);
            }
            if let Some(end) = end {
                params = params.with_limit_end(*end);
            }
            let records = resource
                .list(&params)
                .with_context(|| format!("Failed to list {}", module))?;
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
        Command::Get { id } => {
            let record = resource
                .get(*id)
                .with_context(|| format!("Failed to get {} record {}", module, id))?;
            serde_json::to_writer_pretty(&mut out, &record)?;
            writeln!(out)?;
        }
        Command::Export { filter, batch_size } => {
            let mut exported = 0u64;
            for record in resource.iterate(filter.to_params(), *batch_size) {
                let record = record.with_context(|| {
                    format!("Failed to export {} after {} records", module, exported)
                })?;
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
                exported += 1;
            }
            tracing::info!(module, exported, "Export finished");
        }
        Command::Create(fields) => {
            let id = resource
                .create(fields.to_record()?)
                .with_context(|| format!("Failed to create {} record", module))?;
            writeln!(out, "{}", json!({ "crmid": id }))?;
        }
        Command::Update { id, fields } => {
            let id = resource
                .update(*id, fields.to_record()?)
                .with_context(|| format!("Failed to update {} record {}", module, id))?;
            writeln!(out, "{}", json!({ "crmid": id }))?;
        }
    }

    out.flush()?;
    Ok(())
}
