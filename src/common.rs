use crate::config::Config;
use clap::Args;

#[derive(Args, Clone, Debug, Default)]
pub struct CommonParams {
    /// Override the configured model
    #[arg(long, help = "Override the configured model")]
    pub model: Option<String>,

    /// Custom instructions for this run
    #[arg(short, long, help = "Custom instructions for this run")]
    pub instructions: Option<String>,
}

impl CommonParams {
    /// Applies this run's overrides; nothing here is written back to disk
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(model) = self.model.as_deref().map(str::trim)
            && !model.is_empty()
        {
            config.model = model.to_string();
        }

        if let Some(instructions) = &self.instructions {
            // Temporary, never saved
            config.set_temp_instructions(Some(instructions.clone()));
        }
    }
}
