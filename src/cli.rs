// src/cli.rs
use crate::core::VoyagerApi;
use crate::linkedin::{ExperienceLevel, JobType, LinkedInEvolved, SearchFilters, WorkplaceType};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser)]
#[command(name = "linkedin-evolved")]
#[command(about = "Search LinkedIn jobs and inspect easy-apply forms")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search jobs and print them as JSON
    Search(SearchArgs),
    /// Print the easy-apply form fields of a job
    Fields { job_id: String },
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub keywords: Option<String>,
    /// e.g. "Kyiv City, Ukraine"
    #[arg(long)]
    pub location: Option<String>,
    /// Company URN id (repeatable)
    #[arg(long = "company")]
    pub companies: Vec<String>,
    /// 1-6: internship, entry, associate, mid-senior, director, executive
    #[arg(long)]
    pub experience: Vec<ExperienceLevel>,
    /// F, C, P, T, I, V or O
    #[arg(long = "job-type")]
    pub job_types: Vec<JobType>,
    /// Title URN id (repeatable)
    #[arg(long = "title")]
    pub job_titles: Vec<String>,
    /// Industry URN id (repeatable)
    #[arg(long = "industry")]
    pub industries: Vec<String>,
    /// 1 onsite, 2 remote, 3 hybrid
    #[arg(long)]
    pub remote: Vec<WorkplaceType>,
    /// Maximum posting age in seconds
    #[arg(long, default_value_t = crate::linkedin::query::DEFAULT_LISTED_AT_SECS)]
    pub listed_at: u64,
    /// Miles from the location
    #[arg(long)]
    pub distance: Option<u32>,
    /// Include jobs without easy apply
    #[arg(long)]
    pub no_easy_apply: bool,
    /// Stop after this many results
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Also fetch the easy-apply fields of every job found
    #[arg(long)]
    pub with_fields: bool,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            keywords: self.keywords.clone(),
            companies: self.companies.clone(),
            experience: self.experience.clone(),
            job_types: self.job_types.clone(),
            job_titles: self.job_titles.clone(),
            industries: self.industries.clone(),
            location_name: self.location.clone(),
            remote: self.remote.clone(),
            listed_at: self.listed_at,
            distance: self.distance,
            easy_apply: !self.no_easy_apply,
        }
    }
}

pub async fn handle_command<C: VoyagerApi>(cli: Cli, api: &LinkedInEvolved<C>) -> Result<()> {
    let output = run_command(cli, api).await?;
    let rendered = serde_json::to_string_pretty(&output).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}

/// Execute a command and return what it would print
pub async fn run_command<C: VoyagerApi>(cli: Cli, api: &LinkedInEvolved<C>) -> Result<Value> {
    match cli.command {
        Command::Search(args) => {
            let jobs = api
                .search_jobs(&args.filters(), args.limit, args.offset)
                .await?;
            info!("Found {} jobs", jobs.len());

            if !args.with_fields {
                return serde_json::to_value(&jobs).context("Failed to serialize jobs");
            }

            let mut entries = Vec::with_capacity(jobs.len());
            for job in jobs {
                let fields = api.get_fields_for_easy_apply(&job.job_id).await?;
                entries.push(json!({ "job": job, "fields": fields }));
            }
            Ok(Value::Array(entries))
        }

        Command::Fields { job_id } => {
            let fields = api.get_fields_for_easy_apply(&job_id).await?;
            serde_json::to_value(&fields).context("Failed to serialize fields")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::voyager::testing::MockVoyager;
    use crate::core::ApiResponse;

    #[test]
    fn test_parse_search_args() {
        let cli = Cli::try_parse_from([
            "linkedin-evolved",
            "search",
            "--keywords",
            "Frontend Developer",
            "--location",
            "Italia",
            "--experience",
            "2",
            "--experience",
            "3",
            "--job-type",
            "F",
            "--remote",
            "2",
            "--no-easy-apply",
            "--limit",
            "5",
            "--offset",
            "1",
        ])
        .unwrap();

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        let filters = args.filters();
        assert_eq!(filters.keywords.as_deref(), Some("Frontend Developer"));
        assert_eq!(
            filters.experience,
            [ExperienceLevel::EntryLevel, ExperienceLevel::Associate]
        );
        assert_eq!(filters.job_types, [JobType::FullTime]);
        assert_eq!(filters.remote, [WorkplaceType::Remote]);
        assert_eq!(filters.listed_at, 86400);
        assert!(!filters.easy_apply);
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.offset, 1);
    }

    #[test]
    fn test_rejects_unknown_codes() {
        assert!(Cli::try_parse_from(["linkedin-evolved", "search", "--job-type", "Z"]).is_err());
    }

    #[tokio::test]
    async fn test_fields_command_output() {
        let client = MockVoyager::new(|_| {
            Ok(ApiResponse::new(
                200,
                r#"{"included": [{"urn": "urn:li:fsu_formElement:1", "formComponent": {"textInputFormComponent": {}}}]}"#,
            ))
        });
        let api = LinkedInEvolved::new(client);
        let cli = Cli::try_parse_from(["linkedin-evolved", "fields", "42"]).unwrap();

        let output = run_command(cli, &api).await.unwrap();
        assert_eq!(
            output,
            json!([{
                "title": "urn:li:fsu_formElement:1",
                "urn": "urn:li:fsu_formElement:1",
                "formComponentType": "textInputFormComponent"
            }])
        );
    }
}
