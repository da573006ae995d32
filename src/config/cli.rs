use crate::config::scrape::ScrapeConfig;
use crate::core::catalog::DEFAULT_CATALOG_PATH;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "unb-advisor")]
#[command(about = "UnB course dashboard and AI discipline recommendations")]
pub struct CliConfig {
    /// Course catalog JSON (records with nome, campus, coordenador)
    #[arg(long, global = true, default_value = DEFAULT_CATALOG_PATH)]
    pub catalog: String,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the courses of the catalog
    Courses,

    /// Show campus, coordinator and campus coordinates of one course
    Course { name: String },

    /// Ask the agent which disciplines fit a course and interest area
    Recommend {
        /// Course name as listed in the catalog (omit to use --other-course)
        #[arg(long)]
        course: Option<String>,

        /// Free-text course name when it is not in the catalog
        #[arg(long)]
        other_course: Option<String>,

        #[arg(long)]
        interest: String,

        /// Then describe one extracted discipline (1-based number or name)
        #[arg(long)]
        describe: Option<String>,
    },

    /// Ask the agent to describe one discipline
    Describe { discipline: String },
}

/// Arguments of the standalone prerequisite scraper.
#[derive(Debug, Clone, Parser)]
#[command(name = "prereq_scrape")]
#[command(about = "Scrape discipline prerequisites from the SIGAA public class listing")]
pub struct ScrapeArgs {
    /// TOML file overriding the default query parameters
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub period: Option<u8>,

    /// Only list the offerings found by the search
    #[arg(long)]
    pub list: bool,

    /// Position of the offering among the results (0-based)
    #[arg(long, default_value = "0")]
    pub index: usize,

    /// Pick the first offering whose title contains this text instead of --index
    #[arg(long)]
    pub title: Option<String>,

    /// Write prerequisites to this .csv or .json file
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ScrapeArgs {
    /// 檔案設定為基礎，命令列參數覆蓋其上
    pub fn scrape_config(&self) -> Result<ScrapeConfig> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(department) = &self.department {
            config.department = department.clone();
        }
        if let Some(year) = self.year {
            config.year = year;
        }
        if let Some(period) = self.period {
            config.period = period;
        }

        config.validate()?;
        Ok(config)
    }
}

impl Validate for ScrapeArgs {
    fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            validate_file_extensions("output", std::slice::from_ref(output), &["csv", "json"])?;
        }
        Ok(())
    }
}
