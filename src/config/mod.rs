pub mod toml_config;

use crate::adapters::random_org::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meal-arena")]
#[command(about = "An in-process meal battle arena")]
pub struct CliConfig {
    #[arg(long, help = "Seed for deterministic battle rolls")]
    pub seed: Option<u64>,

    #[arg(long, help = "Draw battle rolls from random.org")]
    pub random_org: bool,

    #[arg(long, help = "Override the random.org endpoint")]
    pub random_org_url: Option<String>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn random_seed(&self) -> Option<u64> {
        self.seed
    }

    fn random_org_url(&self) -> Option<&str> {
        if let Some(url) = &self.random_org_url {
            Some(url)
        } else if self.random_org {
            Some(DEFAULT_ENDPOINT)
        } else {
            None
        }
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}
