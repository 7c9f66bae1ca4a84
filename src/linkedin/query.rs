// src/linkedin/query.rs
//! Job search filters and their `(key:value,...)` query serialization
//!
//! The search endpoint silently returns nothing for a query it cannot parse, so the
//! rendering below reproduces the expected grammar exactly, including its lack of escaping:
//! identifiers must not contain `,`, `(` or `)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SEARCH_ORIGIN: &str = "JOB_SEARCH_PAGE_QUERY_EXPANSION";
pub const DEFAULT_LISTED_AT_SECS: u64 = 24 * 60 * 60;

const KEYWORD_PLACEHOLDER: &str = "KEYWORD_PLACEHOLDER";
const LOCATION_PLACEHOLDER: &str = "LOCATION_PLACEHOLDER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Internship,
    EntryLevel,
    Associate,
    MidSeniorLevel,
    Director,
    Executive,
}

impl ExperienceLevel {
    pub fn code(self) -> &'static str {
        match self {
            Self::Internship => "1",
            Self::EntryLevel => "2",
            Self::Associate => "3",
            Self::MidSeniorLevel => "4",
            Self::Director => "5",
            Self::Executive => "6",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "internship" => Ok(Self::Internship),
            "2" | "entry" | "entry-level" => Ok(Self::EntryLevel),
            "3" | "associate" => Ok(Self::Associate),
            "4" | "mid-senior" | "mid-senior-level" => Ok(Self::MidSeniorLevel),
            "5" | "director" => Ok(Self::Director),
            "6" | "executive" => Ok(Self::Executive),
            _ => anyhow::bail!("Unknown experience level: {}. Use 1-6", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    FullTime,
    Contract,
    PartTime,
    Temporary,
    Internship,
    Volunteer,
    Other,
}

impl JobType {
    pub fn code(self) -> &'static str {
        match self {
            Self::FullTime => "F",
            Self::Contract => "C",
            Self::PartTime => "P",
            Self::Temporary => "T",
            Self::Internship => "I",
            Self::Volunteer => "V",
            Self::Other => "O",
        }
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "f" | "full-time" => Ok(Self::FullTime),
            "c" | "contract" => Ok(Self::Contract),
            "p" | "part-time" => Ok(Self::PartTime),
            "t" | "temporary" => Ok(Self::Temporary),
            "i" | "internship" => Ok(Self::Internship),
            "v" | "volunteer" => Ok(Self::Volunteer),
            "o" | "other" => Ok(Self::Other),
            _ => anyhow::bail!("Unknown job type: {}. Use one of F, C, P, T, I, V, O", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkplaceType {
    OnSite,
    Remote,
    Hybrid,
}

impl WorkplaceType {
    pub fn code(self) -> &'static str {
        match self {
            Self::OnSite => "1",
            Self::Remote => "2",
            Self::Hybrid => "3",
        }
    }
}

impl FromStr for WorkplaceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "onsite" | "on-site" => Ok(Self::OnSite),
            "2" | "remote" => Ok(Self::Remote),
            "3" | "hybrid" => Ok(Self::Hybrid),
            _ => anyhow::bail!("Unknown workplace type: {}. Use 1 (onsite), 2 (remote) or 3 (hybrid)", s),
        }
    }
}

/// Filters for a job search. Empty lists and `None` are left out of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub keywords: Option<String>,
    /// Company URN ids
    pub companies: Vec<String>,
    pub experience: Vec<ExperienceLevel>,
    pub job_types: Vec<JobType>,
    /// Title URN ids
    pub job_titles: Vec<String>,
    /// Industry URN ids
    pub industries: Vec<String>,
    /// e.g. "Kyiv City, Ukraine"
    pub location_name: Option<String>,
    pub remote: Vec<WorkplaceType>,
    /// Maximum age of a posting, in seconds
    pub listed_at: u64,
    /// Miles from the location; `None` or `0` leaves the server default of 25
    pub distance: Option<u32>,
    pub easy_apply: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            keywords: None,
            companies: Vec::new(),
            experience: Vec::new(),
            job_types: Vec::new(),
            job_titles: Vec::new(),
            industries: Vec::new(),
            location_name: None,
            remote: Vec::new(),
            listed_at: DEFAULT_LISTED_AT_SECS,
            distance: None,
            easy_apply: true,
        }
    }
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_location(mut self, location_name: impl Into<String>) -> Self {
        self.location_name = Some(location_name.into());
        self
    }

    pub fn with_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.companies.extend(companies.into_iter().map(Into::into));
        self
    }

    pub fn with_job_titles<I, S>(mut self, job_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.job_titles.extend(job_titles.into_iter().map(Into::into));
        self
    }

    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries.extend(industries.into_iter().map(Into::into));
        self
    }

    pub fn with_experience(mut self, levels: impl IntoIterator<Item = ExperienceLevel>) -> Self {
        self.experience.extend(levels);
        self
    }

    pub fn with_job_types(mut self, job_types: impl IntoIterator<Item = JobType>) -> Self {
        self.job_types.extend(job_types);
        self
    }

    pub fn with_remote(mut self, workplaces: impl IntoIterator<Item = WorkplaceType>) -> Self {
        self.remote.extend(workplaces);
        self
    }

    pub fn with_listed_at(mut self, seconds: u64) -> Self {
        self.listed_at = seconds;
        self
    }

    pub fn with_distance(mut self, miles: u32) -> Self {
        self.distance = Some(miles);
        self
    }

    pub fn with_easy_apply(mut self, easy_apply: bool) -> Self {
        self.easy_apply = easy_apply;
        self
    }

    fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref().filter(|k| !k.is_empty())
    }

    fn location_name(&self) -> Option<&str> {
        self.location_name.as_deref().filter(|l| !l.is_empty())
    }

    /// Render the `query` parameter of the search endpoint
    pub fn to_query(&self) -> String {
        let mut entries = vec![("origin", SEARCH_ORIGIN.to_string())];
        if self.keywords().is_some() {
            entries.push(("keywords", KEYWORD_PLACEHOLDER.to_string()));
        }
        if self.location_name().is_some() {
            entries.push(("locationFallback", LOCATION_PLACEHOLDER.to_string()));
        }
        entries.push(("selectedFilters", render_object(&self.selected_filters())));
        entries.push(("spellCorrectionEnabled", "true".to_string()));

        // Free text goes in after quotes and whitespace are stripped from the structure
        let structure: String = render_object(&entries)
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '"')
            .collect();

        structure
            .replace(KEYWORD_PLACEHOLDER, self.keywords().unwrap_or_default())
            .replace(LOCATION_PLACEHOLDER, self.location_name().unwrap_or_default())
            .replace('{', "(")
            .replace('}', ")")
    }

    fn selected_filters(&self) -> Vec<(&'static str, String)> {
        let mut filters = Vec::new();

        if !self.companies.is_empty() {
            filters.push(("company", list(&self.companies)));
        }
        if !self.experience.is_empty() {
            filters.push(("experience", list(self.experience.iter().map(|e| e.code()))));
        }
        if !self.job_types.is_empty() {
            filters.push(("jobType", list(self.job_types.iter().map(|j| j.code()))));
        }
        if !self.job_titles.is_empty() {
            filters.push(("title", list(&self.job_titles)));
        }
        if !self.industries.is_empty() {
            filters.push(("industry", list(&self.industries)));
        }
        if let Some(distance) = self.distance.filter(|d| *d > 0) {
            filters.push(("distance", list([distance.to_string()])));
        }
        if !self.remote.is_empty() {
            filters.push(("workplaceType", list(self.remote.iter().map(|r| r.code()))));
        }
        if self.easy_apply {
            filters.push(("applyWithLinkedin", list(["true"])));
        }
        filters.push(("timePostedRange", list([format!("r{}", self.listed_at)])));

        filters
    }
}

impl fmt::Display for SearchFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

/// `List(a,b,c)`
fn list<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let joined = values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("List({})", joined)
}

fn render_object(entries: &[(&str, String)]) -> String {
    let body = entries
        .iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", body)
}
