use anyhow::Result;
use clap::Args;

use crate::services::lore;
use crate::tools::cli::state::CliContext;

#[derive(Debug, Clone, Args)]
pub struct ToolsCommand {
    /// Print each tool's JSON input schema as well
    #[arg(long)]
    pub schema: bool,
}

#[derive(Debug, Clone, Args)]
pub struct LoreCommand {
    /// Sheet name or URI (sound_design, drum_design); lists sheets when omitted
    pub name: Option<String>,
}

impl ToolsCommand {
    pub fn execute(&self, ctx: &CliContext) -> Result<()> {
        let registry = ctx.registry();
        for descriptor in registry.descriptors() {
            let summary = descriptor.description.lines().next().unwrap_or_default();
            println!("{}\t{}", descriptor.name, summary);
            if self.schema {
                println!("{}", serde_json::to_string_pretty(&descriptor.input_schema)?);
            }
        }
        Ok(())
    }
}

impl LoreCommand {
    pub fn execute(&self, ctx: &CliContext) -> Result<()> {
        match &self.name {
            Some(name) => {
                let resource = lore::find(name).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Unknown cheat-sheet '{}'. Available: {}",
                        name,
                        lore::RESOURCES
                            .iter()
                            .map(|r| r.name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                })?;
                ctx.logger().debug(format!("Reading {}", resource.uri));
                println!("{}", resource.text.trim());
            }
            None => {
                ctx.logger()
                    .debug(format!("{} cheat-sheets available", lore::RESOURCES.len()));
                for resource in lore::RESOURCES.iter() {
                    println!("{}\t{}", resource.uri, resource.description);
                }
            }
        }
        Ok(())
    }
}
