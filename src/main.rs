use clap::Parser;
use envsync::cli::{commands, init_logging, AuthAction, Cli, Commands};
use envsync::reconcile::Direction;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => commands::reconcile::execute(&cli, None),
        Some(Commands::Sync) => commands::reconcile::execute(&cli, Some(Direction::Sync)),
        Some(Commands::Pull) => commands::reconcile::execute(&cli, Some(Direction::Pull)),
        Some(Commands::Push) => commands::reconcile::execute(&cli, Some(Direction::Push)),
        Some(Commands::Status { show_values }) => commands::status::execute(&cli, show_values),
        Some(Commands::Audit { last, ref since }) => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Some(Commands::Auth { ref action }) => match action {
            AuthAction::Keyring { delete } => commands::auth::execute_keyring(&cli, *delete),
        },
        Some(Commands::Completions { ref shell }) => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        envsync::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
