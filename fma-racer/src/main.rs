use fma_core::checkpoints::{CheckpointTable, CHECKPOINTS};
use fma_core::Settings;
use fma_racer::game::HeadlessRace;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    let table = match CheckpointTable::configured(&settings.checkpoints) {
        Ok(table) => table,
        Err(err) => {
            tracing::error!("{err}, falling back to the built-in checkpoints");
            CHECKPOINTS.clone()
        }
    };
    tracing::info!(
        laps = table.lap_count(),
        path = ?settings.checkpoints.table_path,
        "checkpoint table ready"
    );

    // kick off the frame loop
    let summary = HeadlessRace::new(&settings, table).run();
    match serde_json::to_string(&summary) {
        Ok(json) => tracing::info!(summary = %json, "race summary"),
        Err(err) => tracing::error!("could not serialise race summary: {err}"),
    }
}
