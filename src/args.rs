use clap::Parser;
use ground_page::{GroundingConfig, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ground-page")]
#[command(about = "Answer a question using the relevant pages of a website")]
#[command(version)]
pub struct Args {
    /// Seed page whose links are searched for relevant content
    pub seed_url: String,

    /// Question to answer
    pub query: String,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model used with grounding content
    #[arg(long)]
    pub primary_model: Option<String>,

    /// Model used when no grounding content is found
    #[arg(long)]
    pub fallback_model: Option<String>,

    /// Maximum number of relevant links to fetch
    #[arg(long)]
    pub max_links: Option<usize>,

    /// Retries after a failed generation call
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Site name used in the prompt (defaults to the seed host)
    #[arg(long)]
    pub site_name: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_API_BASE")]
    pub api_base: Option<String>,
}

impl Args {
    /// Load the configuration file (or defaults) and apply command-line overrides
    pub fn grounding_config(&self) -> Result<GroundingConfig> {
        let mut config = match &self.config {
            Some(path) => GroundingConfig::from_file(path)?,
            None => GroundingConfig::default(),
        };

        if let Some(model) = &self.primary_model {
            config.primary_model = model.clone();
        }
        if let Some(model) = &self.fallback_model {
            config.fallback_model = model.clone();
        }
        if let Some(max_links) = self.max_links {
            config.max_links = max_links;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(site_name) = &self.site_name {
            config.site_name = Some(site_name.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
