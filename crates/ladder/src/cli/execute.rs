//! Command execution logic.

use anyhow::{Result, bail};

use super::args::{GraphArgs, InitArgs, LayoutArgs, PathsArgs, ReachableArgs};
use crate::app::App;
use crate::domain::{PositionId, ViewerId};
use crate::output::{self, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing ladder repository...");
    }

    let result = init::init(&current_dir).await?;

    if !args.quiet {
        println!("Initialized ladder in {}", result.ladder_dir.display());
        println!("  Config: {}", result.config_file.display());
        for file in &result.catalog_files {
            println!("  Data:   {}", file.display());
        }
    }

    Ok(())
}

/// Execute the graph command
pub async fn execute_graph(app: &App, args: &GraphArgs, output_mode: OutputMode) -> Result<()> {
    let viewer = args.viewer.as_deref().map(ViewerId::new);
    let view = app.compute_graph(viewer.as_ref()).await?;
    output::print_graph(&view, output_mode)?;
    Ok(())
}

/// Execute the paths command
pub async fn execute_paths(app: &App, args: &PathsArgs, output_mode: OutputMode) -> Result<()> {
    let viewer = args.viewer.as_deref().map(ViewerId::new);

    let paths = match (&args.position, &viewer) {
        (Some(position), viewer) => {
            app.compute_from_position(&PositionId::new(position.as_str()), viewer.as_ref())
                .await?
        }
        (None, Some(viewer)) => app.compute_for_viewer(viewer).await?,
        (None, None) => bail!("Either a position or --viewer is required"),
    };

    output::print_paths(&paths, output_mode)?;
    Ok(())
}

/// Execute the layout command
pub async fn execute_layout(app: &App, args: &LayoutArgs, output_mode: OutputMode) -> Result<()> {
    let viewer = args.viewer.as_deref().map(ViewerId::new);
    let plan = app.render_plan(viewer.as_ref()).await?;
    output::print_render_plan(&plan, output_mode)?;
    Ok(())
}

/// Execute the reachable command
pub async fn execute_reachable(
    app: &App,
    args: &ReachableArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let from = PositionId::new(args.position.as_str());
    let mut ids: Vec<PositionId> = app.reachable(&from).await?.into_iter().collect();
    ids.sort();
    output::print_reachable(&from, &ids, output_mode)?;
    Ok(())
}
