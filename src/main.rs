use clap::Parser;
use gantt_mcp::cli::{Cli, Commands};
use gantt_mcp::cli_handlers;
use gantt_mcp::mcp::run_mcp_server;
use std::process;

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never mix with stdio MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_file = cli.data_file;
    let charts_dir = cli.charts_dir;

    let result = match cli.command {
        Commands::CreateProject { name, owner } => {
            cli_handlers::handle_create_project(&data_file, &name, &owner)
        }
        Commands::Projects => cli_handlers::handle_projects(&data_file),
        Commands::AddTask {
            project_id,
            name,
            desc,
            start,
            duration,
            end,
            owner,
        } => cli_handlers::handle_add_task(
            &data_file,
            &project_id,
            &name,
            desc.as_deref(),
            start.as_deref(),
            duration,
            end.as_deref(),
            &owner,
        ),
        Commands::Tasks { project_id } => cli_handlers::handle_tasks(&data_file, &project_id),
        Commands::Show {
            project_id,
            task_id,
        } => cli_handlers::handle_show(&data_file, &project_id, &task_id),
        Commands::Update {
            project_id,
            task_id,
            name,
            desc,
            owner,
            start,
            duration,
            end,
            progress,
        } => cli_handlers::handle_update(
            &data_file,
            &project_id,
            &task_id,
            name.as_deref(),
            desc.as_deref(),
            owner.as_deref(),
            start.as_deref(),
            duration,
            end.as_deref(),
            progress,
        ),
        Commands::DeleteTask {
            project_id,
            task_id,
        } => cli_handlers::handle_delete_task(&data_file, &project_id, &task_id),
        Commands::DeleteProject { project_id } => {
            cli_handlers::handle_delete_project(&data_file, &project_id)
        }
        Commands::Depend {
            project_id,
            task_id,
            on_id,
        } => cli_handlers::handle_depend(&data_file, &project_id, &task_id, &on_id),
        Commands::Undepend {
            project_id,
            task_id,
            on_id,
        } => cli_handlers::handle_undepend(&data_file, &project_id, &task_id, &on_id),
        Commands::Chart {
            project_id,
            open,
            inline,
            max_width,
        } => cli_handlers::handle_chart(
            &data_file,
            &charts_dir,
            &project_id,
            open,
            inline,
            max_width,
        ),
        Commands::Info => cli_handlers::handle_info(&data_file),
        Commands::Mcp => {
            if let Err(e) = run_mcp_server(data_file, charts_dir).await {
                eprintln!("MCP server error: {e}");
                process::exit(1);
            }
            return;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
