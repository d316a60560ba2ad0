use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::location::{FormState, LocationLookup, MemoryForm};
use crate::tui;

/// Pick an address interactively
#[derive(Args, Default)]
pub struct PickCommand {
    /// Previously saved value to start from, e.g. "Hà Nội_Ba Đình_Phúc Xá"
    #[arg(short = 'v', long = "value")]
    pub value: Option<String>,
}

impl PickCommand {
    pub async fn execute(&self, config: &Config, lookup: Arc<dyn LocationLookup>) -> Result<()> {
        let field = config.form.location_field();
        let mut form = MemoryForm::new();
        if let Some(value) = &self.value {
            debug!("Starting from saved value {:?}", value);
            form.set_value(&field.value_field, value.clone());
        }

        let form = tui::run_picker(lookup, form, field.clone(), config.pagination.clone()).await?;

        match (form.value(&field.value_field), form.value(&field.label_field)) {
            (Some(value), Some(label)) => {
                println!("{}: {}", field.value_field, value);
                println!("{}: {}", field.label_field, label);
            }
            _ => println!("No address selected"),
        }
        Ok(())
    }
}
