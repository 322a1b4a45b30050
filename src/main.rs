use std::sync::Arc;

use dining_host::config::TableConfig;
use dining_host::journal::LineJournal;
use dining_host::lifecycle::{setup_tracing, Table};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let table = Table::new(TableConfig::default(), Arc::new(LineJournal::stdout()))
        .map_err(|e| e.to_string())?;

    match table.run().await {
        Ok(summary) => {
            info!(
                meals = summary.meals_eaten(),
                retries = summary.retries(),
                "Everyone has left the table"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Dinner failed");
            Err(e.to_string())
        }
    }
}
